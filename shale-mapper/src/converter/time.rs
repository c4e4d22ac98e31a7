/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Converters for temporal targets: periods, fixed offsets, named zones.

use crate::converter::{AttributeConverter, ConvertibleType, TypeDescriptor};
use crate::error::ConversionError;
use chrono::FixedOffset;
use chrono_tz::Tz;
use shale_types::{AttributeValue, Period};

fn source_text<'a>(
    attr: &'a AttributeValue,
    descriptor: fn() -> TypeDescriptor,
) -> Result<&'a str, ConversionError> {
    match attr {
        AttributeValue::S(text) => Ok(text),
        other => Err(ConversionError::new(
            descriptor(),
            format!("expected a string attribute, found `{}`", other.tag()),
        )),
    }
}

/// Converter for [`Period`], using the signed `P..Y..M..D` grammar.
#[derive(Debug, Clone, Copy, Default)]
pub struct PeriodConverter;

impl AttributeConverter<Period> for PeriodConverter {
    fn descriptor(&self) -> TypeDescriptor {
        Period::type_descriptor()
    }

    fn to_attribute(&self, value: &Period) -> AttributeValue {
        AttributeValue::S(value.to_string())
    }

    fn from_attribute(&self, attr: &AttributeValue) -> Result<Period, ConversionError> {
        let text = source_text(attr, Period::type_descriptor)?;
        text.parse::<Period>().map_err(|err| {
            ConversionError::with_source(
                Period::type_descriptor(),
                format!("invalid period text {:?}", text),
                err,
            )
        })
    }
}

impl ConvertibleType for Period {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::named("period")
    }
}

/// Converter for [`chrono::FixedOffset`], as signed `±HH:MM:SS` text.
///
/// Rendering always emits the full signed form (`+00:01:02`). Parsing also
/// accepts `Z` and the shorter `±HH`/`±HH:MM` spellings; text that matches
/// the grammar but exceeds the offset range of the backing type (a full day)
/// is rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedOffsetConverter;

impl AttributeConverter<FixedOffset> for FixedOffsetConverter {
    fn descriptor(&self) -> TypeDescriptor {
        FixedOffset::type_descriptor()
    }

    fn to_attribute(&self, value: &FixedOffset) -> AttributeValue {
        let seconds = value.local_minus_utc();
        let sign = if seconds < 0 { '-' } else { '+' };
        let magnitude = seconds.unsigned_abs();
        AttributeValue::S(format!(
            "{sign}{:02}:{:02}:{:02}",
            magnitude / 3600,
            magnitude % 3600 / 60,
            magnitude % 60,
        ))
    }

    fn from_attribute(&self, attr: &AttributeValue) -> Result<FixedOffset, ConversionError> {
        let text = source_text(attr, FixedOffset::type_descriptor)?;
        parse_offset(text)
            .ok_or_else(|| {
                ConversionError::new(
                    FixedOffset::type_descriptor(),
                    format!("invalid offset text {:?}, expected ±HH:MM:SS", text),
                )
            })
    }
}

fn parse_offset(text: &str) -> Option<FixedOffset> {
    if text == "Z" || text == "z" {
        return FixedOffset::east_opt(0);
    }
    let (sign, rest) = match text.as_bytes().first()? {
        b'+' => (1, &text[1..]),
        b'-' => (-1, &text[1..]),
        _ => return None,
    };

    let mut seconds = 0i32;
    for (index, part) in rest.split(':').enumerate() {
        if index > 2 || part.len() != 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let unit = [3600, 60, 1][index];
        seconds += part.parse::<i32>().ok()? * unit;
    }

    // east_opt rejects magnitudes of a day or more
    FixedOffset::east_opt(sign * seconds)
}

impl ConvertibleType for FixedOffset {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::named("utc-offset")
    }
}

/// Converter for [`chrono_tz::Tz`], round-tripping the registered zone name.
#[derive(Debug, Clone, Copy, Default)]
pub struct TzConverter;

impl AttributeConverter<Tz> for TzConverter {
    fn descriptor(&self) -> TypeDescriptor {
        Tz::type_descriptor()
    }

    fn to_attribute(&self, value: &Tz) -> AttributeValue {
        AttributeValue::S(value.name().to_owned())
    }

    fn from_attribute(&self, attr: &AttributeValue) -> Result<Tz, ConversionError> {
        let text = source_text(attr, Tz::type_descriptor)?;
        text.parse::<Tz>().map_err(|_| {
            ConversionError::new(
                Tz::type_descriptor(),
                format!("unrecognized time zone name {:?}", text),
            )
        })
    }
}

impl ConvertibleType for Tz {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::named("time-zone")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn s(text: &str) -> AttributeValue {
        AttributeValue::S(text.to_owned())
    }

    #[test]
    fn period_uses_the_signed_duration_grammar() {
        let converter = PeriodConverter;

        assert_eq!(s("P-5Y"), converter.to_attribute(&Period::from_years(-5)));
        assert_eq!(s("P-1D"), converter.to_attribute(&Period::from_days(-1)));
        assert_eq!(s("P0D"), converter.to_attribute(&Period::ZERO));
        assert_eq!(s("P1D"), converter.to_attribute(&Period::from_days(1)));
        assert_eq!(s("P5Y"), converter.to_attribute(&Period::from_years(5)));

        assert!(converter.from_attribute(&s("")).is_err());
        assert!(converter.from_attribute(&s("P")).is_err());

        assert_eq!(
            Period::from_years(-5),
            converter.from_attribute(&s("P-5Y")).unwrap()
        );
        assert_eq!(
            Period::from_days(-1),
            converter.from_attribute(&s("P-1D")).unwrap()
        );
        assert_eq!(Period::ZERO, converter.from_attribute(&s("P0D")).unwrap());
        assert_eq!(
            Period::from_days(1),
            converter.from_attribute(&s("P1D")).unwrap()
        );
        assert_eq!(
            Period::from_years(5),
            converter.from_attribute(&s("P5Y")).unwrap()
        );
    }

    #[test]
    fn offset_renders_full_signed_form() {
        let converter = FixedOffsetConverter;
        let east = FixedOffset::east_opt(62).unwrap();
        let west = FixedOffset::west_opt(62).unwrap();

        assert_eq!(s("+00:01:02"), converter.to_attribute(&east));
        assert_eq!(s("-00:01:02"), converter.to_attribute(&west));

        assert_eq!(east, converter.from_attribute(&s("+00:01:02")).unwrap());
        assert_eq!(west, converter.from_attribute(&s("-00:01:02")).unwrap());
        assert_eq!(
            FixedOffset::east_opt(0).unwrap(),
            converter.from_attribute(&s("Z")).unwrap()
        );
        assert_eq!(
            FixedOffset::east_opt(5 * 3600).unwrap(),
            converter.from_attribute(&s("+05")).unwrap()
        );
    }

    #[test]
    fn offset_rejects_malformed_and_out_of_range_text() {
        let converter = FixedOffsetConverter;
        assert!(converter.from_attribute(&s("+99999:00:00")).is_err());
        assert!(converter.from_attribute(&s("05:00:00")).is_err());
        assert!(converter.from_attribute(&s("+5:00")).is_err());
        assert!(converter.from_attribute(&s("+24:00:00")).is_err());
        assert!(converter.from_attribute(&s("")).is_err());
    }

    #[test]
    fn zone_names_round_trip_and_unknown_names_fail() {
        let converter = TzConverter;
        assert_eq!(s("UTC"), converter.to_attribute(&Tz::UTC));
        assert_eq!(Tz::UTC, converter.from_attribute(&s("UTC")).unwrap());
        assert_eq!(
            "America/New_York",
            converter
                .from_attribute(&s("America/New_York"))
                .unwrap()
                .name()
        );
        assert!(converter.from_attribute(&s("XXXXXX")).is_err());
    }
}
