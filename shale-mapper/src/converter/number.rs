/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Converters for numeric and boolean targets.
//!
//! Numbers render to the `N` variant through the wire-number encoder and
//! parse back from either `N` or `S` — the store itself keys purely off the
//! tag, and items written by other tooling routinely carry numbers as plain
//! strings.

use crate::converter::{AttributeConverter, ConvertibleType, TypeDescriptor};
use crate::error::ConversionError;
use shale_types::{primitive, AttributeValue};

fn source_text<'a>(
    attr: &'a AttributeValue,
    descriptor: fn() -> TypeDescriptor,
) -> Result<&'a str, ConversionError> {
    match attr {
        AttributeValue::N(text) | AttributeValue::S(text) => Ok(text),
        other => Err(ConversionError::new(
            descriptor(),
            format!("expected a number attribute, found `{}`", other.tag()),
        )),
    }
}

macro_rules! int_converter {
    ($(#[$docs:meta])* $name:ident, $native:ty, $descriptor:literal) => {
        $(#[$docs])*
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $name;

        impl AttributeConverter<$native> for $name {
            fn descriptor(&self) -> TypeDescriptor {
                <$native>::type_descriptor()
            }

            fn to_attribute(&self, value: &$native) -> AttributeValue {
                AttributeValue::N(primitive::fmt_int(*value))
            }

            fn from_attribute(&self, attr: &AttributeValue) -> Result<$native, ConversionError> {
                let text = source_text(attr, <$native>::type_descriptor)?;
                text.parse::<$native>().map_err(|err| {
                    ConversionError::with_source(
                        <$native>::type_descriptor(),
                        format!("invalid decimal text {:?}", text),
                        err,
                    )
                })
            }
        }

        impl ConvertibleType for $native {
            fn type_descriptor() -> TypeDescriptor {
                TypeDescriptor::named($descriptor)
            }
        }
    };
}

int_converter!(
    /// Converter for `i8`.
    I8Converter, i8, "i8"
);
int_converter!(
    /// Converter for `i16`.
    I16Converter, i16, "i16"
);
int_converter!(
    /// Converter for `i32`.
    I32Converter, i32, "i32"
);
int_converter!(
    /// Converter for `i64`.
    I64Converter, i64, "i64"
);
int_converter!(
    /// Converter for `u8`.
    U8Converter, u8, "u8"
);
int_converter!(
    /// Converter for `u16`.
    U16Converter, u16, "u16"
);
int_converter!(
    /// Converter for `u32`.
    U32Converter, u32, "u32"
);
int_converter!(
    /// Converter for `u64`.
    U64Converter, u64, "u64"
);

macro_rules! float_converter {
    ($(#[$docs:meta])* $name:ident, $native:ty, $descriptor:literal) => {
        $(#[$docs])*
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $name;

        impl AttributeConverter<$native> for $name {
            fn descriptor(&self) -> TypeDescriptor {
                <$native>::type_descriptor()
            }

            fn to_attribute(&self, value: &$native) -> AttributeValue {
                AttributeValue::N(primitive::fmt_float(*value))
            }

            fn from_attribute(&self, attr: &AttributeValue) -> Result<$native, ConversionError> {
                let text = source_text(attr, <$native>::type_descriptor)?;
                text.parse::<$native>().map_err(|err| {
                    ConversionError::with_source(
                        <$native>::type_descriptor(),
                        format!("invalid decimal text {:?}", text),
                        err,
                    )
                })
            }
        }

        impl ConvertibleType for $native {
            fn type_descriptor() -> TypeDescriptor {
                TypeDescriptor::named($descriptor)
            }
        }
    };
}

float_converter!(
    /// Converter for `f32`.
    F32Converter, f32, "f32"
);
float_converter!(
    /// Converter for `f64`.
    F64Converter, f64, "f64"
);

/// Converter for `bool`.
///
/// Renders the `BOOL` variant; reads `BOOL` directly and accepts the literal
/// text `true`/`false` from string or number attributes.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoolConverter;

impl AttributeConverter<bool> for BoolConverter {
    fn descriptor(&self) -> TypeDescriptor {
        bool::type_descriptor()
    }

    fn to_attribute(&self, value: &bool) -> AttributeValue {
        AttributeValue::Bool(*value)
    }

    fn from_attribute(&self, attr: &AttributeValue) -> Result<bool, ConversionError> {
        match attr {
            AttributeValue::Bool(value) => Ok(*value),
            AttributeValue::S(text) | AttributeValue::N(text) => {
                text.parse::<bool>().map_err(|err| {
                    ConversionError::with_source(
                        bool::type_descriptor(),
                        format!("expected `true` or `false`, found {:?}", text),
                        err,
                    )
                })
            }
            other => Err(ConversionError::new(
                bool::type_descriptor(),
                format!("expected a boolean attribute, found `{}`", other.tag()),
            )),
        }
    }
}

impl ConvertibleType for bool {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::named("bool")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn n(text: &str) -> AttributeValue {
        AttributeValue::N(text.to_owned())
    }

    #[test]
    fn integers_round_trip_and_accept_string_kind() {
        let converter = I64Converter;
        assert_eq!(n("-42"), converter.to_attribute(&-42));
        assert_eq!(-42, converter.from_attribute(&n("-42")).unwrap());
        assert_eq!(
            7,
            converter
                .from_attribute(&AttributeValue::S("7".to_owned()))
                .unwrap()
        );
    }

    #[test]
    fn every_integer_width_round_trips_its_extremes() {
        macro_rules! check {
            ($converter:expr, $($value:expr),+) => {
                $(assert_eq!(
                    $value,
                    $converter.from_attribute(&$converter.to_attribute(&$value)).unwrap()
                );)+
            };
        }
        check!(I8Converter, i8::MIN, -1, 0, i8::MAX);
        check!(I16Converter, i16::MIN, 0, i16::MAX);
        check!(I32Converter, i32::MIN, 0, i32::MAX);
        check!(I64Converter, i64::MIN, 0, i64::MAX);
        check!(U8Converter, 0, u8::MAX);
        check!(U16Converter, 0, u16::MAX);
        check!(U32Converter, 0, u32::MAX);
        check!(U64Converter, 0, u64::MAX);
        check!(F32Converter, -0.25f32, 0.0, f32::MAX);
    }

    #[test]
    fn integers_reject_malformed_and_out_of_range_text() {
        assert!(I64Converter.from_attribute(&n("four")).is_err());
        assert!(U8Converter.from_attribute(&n("300")).is_err());
        assert!(U32Converter.from_attribute(&n("-1")).is_err());
        assert!(I32Converter.from_attribute(&AttributeValue::Bool(true)).is_err());
    }

    #[test]
    fn floats_round_trip_through_shortest_form() {
        let converter = F64Converter;
        assert_eq!(n("0.25"), converter.to_attribute(&0.25));
        assert_eq!(0.25, converter.from_attribute(&n("0.25")).unwrap());
        assert_eq!(1e300, converter.from_attribute(&n("1e300")).unwrap());
        assert!(converter.from_attribute(&n("not-a-number")).is_err());
    }

    #[test]
    fn bool_reads_its_variant_and_literal_text() {
        let converter = BoolConverter;
        assert_eq!(AttributeValue::Bool(true), converter.to_attribute(&true));
        assert!(converter.from_attribute(&AttributeValue::Bool(false)).unwrap() == false);
        assert!(converter
            .from_attribute(&AttributeValue::S("true".to_owned()))
            .unwrap());
        assert!(converter
            .from_attribute(&AttributeValue::S("yes".to_owned()))
            .is_err());
    }
}
