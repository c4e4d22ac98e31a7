/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Calendar periods and their signed `P..Y..M..D` text form.

use std::fmt;
use std::str::FromStr;

/// A calendar amount of time: whole years, months, and days.
///
/// Each component carries its own sign, so `P-1D` (one day before) and `P1D`
/// (one day after) are both representable. The text form follows the
/// ISO-8601 duration grammar restricted to date components: components with a
/// zero amount are omitted, and the zero period renders as `P0D`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Period {
    years: i32,
    months: i32,
    days: i32,
}

impl Period {
    /// The period of no time at all.
    pub const ZERO: Period = Period {
        years: 0,
        months: 0,
        days: 0,
    };

    /// Creates a period from the given components.
    pub fn new(years: i32, months: i32, days: i32) -> Self {
        Period {
            years,
            months,
            days,
        }
    }

    /// A period of whole years.
    pub fn from_years(years: i32) -> Self {
        Period::new(years, 0, 0)
    }

    /// A period of whole months.
    pub fn from_months(months: i32) -> Self {
        Period::new(0, months, 0)
    }

    /// A period of whole days.
    pub fn from_days(days: i32) -> Self {
        Period::new(0, 0, days)
    }

    /// The years component.
    pub fn years(&self) -> i32 {
        self.years
    }

    /// The months component.
    pub fn months(&self) -> i32 {
        self.months
    }

    /// The days component.
    pub fn days(&self) -> i32 {
        self.days
    }

    /// Returns `true` when every component is zero.
    pub fn is_zero(&self) -> bool {
        *self == Period::ZERO
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("P0D");
        }
        f.write_str("P")?;
        if self.years != 0 {
            write!(f, "{}Y", self.years)?;
        }
        if self.months != 0 {
            write!(f, "{}M", self.months)?;
        }
        if self.days != 0 {
            write!(f, "{}D", self.days)?;
        }
        Ok(())
    }
}

impl FromStr for Period {
    type Err = PeriodParseError;

    /// Parses the `P..Y..M..W..D` grammar.
    ///
    /// Matching is ASCII case-insensitive. A leading sign negates every
    /// component; each component may carry its own sign as well. A weeks
    /// component is accepted and folded into days. At least one component
    /// must be present: the bare prefix `P` and empty text are rejected.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let bytes = text.as_bytes();
        if bytes.is_empty() {
            return Err(PeriodParseError {
                kind: PeriodParseErrorKind::Empty,
            });
        }

        let mut pos = 0;
        let negate_all = match bytes[0] {
            b'-' => {
                pos += 1;
                true
            }
            b'+' => {
                pos += 1;
                false
            }
            _ => false,
        };

        if pos >= bytes.len() || !bytes[pos].eq_ignore_ascii_case(&b'P') {
            return Err(PeriodParseError {
                kind: PeriodParseErrorKind::MissingPrefix,
            });
        }
        pos += 1;

        // Stages enforce the Y < M < W < D component order.
        let mut stage = 0u8;
        let mut years = 0i64;
        let mut months = 0i64;
        let mut weeks = 0i64;
        let mut days = 0i64;
        let mut seen_component = false;

        while pos < bytes.len() {
            let number_start = pos;
            if bytes[pos] == b'+' || bytes[pos] == b'-' {
                pos += 1;
            }
            let digits_start = pos;
            while pos < bytes.len() && bytes[pos].is_ascii_digit() {
                pos += 1;
            }
            if pos == digits_start {
                return Err(PeriodParseError {
                    kind: PeriodParseErrorKind::ExpectedAmount,
                });
            }
            let amount: i64 = text[number_start..pos].parse().map_err(|_| PeriodParseError {
                kind: PeriodParseErrorKind::OutOfRange,
            })?;
            let Some(&unit) = bytes.get(pos) else {
                return Err(PeriodParseError {
                    kind: PeriodParseErrorKind::ExpectedUnit,
                });
            };
            pos += 1;
            match unit.to_ascii_uppercase() {
                b'Y' if stage < 1 => {
                    years = amount;
                    stage = 1;
                }
                b'M' if stage < 2 => {
                    months = amount;
                    stage = 2;
                }
                b'W' if stage < 3 => {
                    weeks = amount;
                    stage = 3;
                }
                b'D' if stage < 4 => {
                    days = amount;
                    stage = 4;
                }
                _ => {
                    return Err(PeriodParseError {
                        kind: PeriodParseErrorKind::UnexpectedUnit(unit as char),
                    });
                }
            }
            seen_component = true;
        }

        if !seen_component {
            return Err(PeriodParseError {
                kind: PeriodParseErrorKind::NoComponents,
            });
        }

        let out_of_range = PeriodParseError {
            kind: PeriodParseErrorKind::OutOfRange,
        };
        let mut total_days = weeks
            .checked_mul(7)
            .and_then(|wd| wd.checked_add(days))
            .ok_or(out_of_range.clone())?;
        if negate_all {
            years = years.checked_neg().ok_or(out_of_range.clone())?;
            months = months.checked_neg().ok_or(out_of_range.clone())?;
            total_days = total_days.checked_neg().ok_or(out_of_range.clone())?;
        }

        Ok(Period::new(
            i32::try_from(years).map_err(|_| out_of_range.clone())?,
            i32::try_from(months).map_err(|_| out_of_range.clone())?,
            i32::try_from(total_days).map_err(|_| out_of_range)?,
        ))
    }
}

/// Text did not match the period grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodParseError {
    kind: PeriodParseErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PeriodParseErrorKind {
    Empty,
    MissingPrefix,
    NoComponents,
    ExpectedAmount,
    ExpectedUnit,
    UnexpectedUnit(char),
    OutOfRange,
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use PeriodParseErrorKind::*;
        match self.kind {
            Empty => write!(f, "period text is empty"),
            MissingPrefix => write!(f, "period text must start with `P`"),
            NoComponents => write!(f, "period text has no components after `P`"),
            ExpectedAmount => write!(f, "expected a component amount"),
            ExpectedUnit => write!(f, "component amount has no unit"),
            UnexpectedUnit(unit) => write!(f, "unexpected or repeated unit `{unit}`"),
            OutOfRange => write!(f, "component amount is out of range"),
        }
    }
}

impl std::error::Error for PeriodParseError {}

#[cfg(test)]
mod test {
    use super::Period;

    #[test]
    fn renders_signed_components_and_omits_zeroes() {
        assert_eq!("P-5Y", Period::from_years(-5).to_string());
        assert_eq!("P-1D", Period::from_days(-1).to_string());
        assert_eq!("P0D", Period::ZERO.to_string());
        assert_eq!("P1D", Period::from_days(1).to_string());
        assert_eq!("P5Y", Period::from_years(5).to_string());
        assert_eq!("P1Y2M3D", Period::new(1, 2, 3).to_string());
        assert_eq!("P1Y3D", Period::new(1, 0, 3).to_string());
    }

    #[test]
    fn parses_the_same_grammar() {
        assert_eq!(Period::from_years(-5), "P-5Y".parse().unwrap());
        assert_eq!(Period::from_days(-1), "P-1D".parse().unwrap());
        assert_eq!(Period::ZERO, "P0D".parse().unwrap());
        assert_eq!(Period::new(1, 2, 3), "P1Y2M3D".parse().unwrap());
        assert_eq!(Period::new(1, 2, 3), "p1y2m3d".parse().unwrap());
        assert_eq!(Period::from_days(17), "P2W3D".parse().unwrap());
        assert_eq!(Period::new(-1, -2, -3), "-P1Y2M3D".parse().unwrap());
        assert_eq!(Period::new(1, -2, 3), "+P1Y-2M3D".parse().unwrap());
    }

    #[test]
    fn rejects_text_outside_the_grammar() {
        assert!("".parse::<Period>().is_err());
        assert!("P".parse::<Period>().is_err());
        assert!("-P".parse::<Period>().is_err());
        assert!("P5".parse::<Period>().is_err());
        assert!("PD".parse::<Period>().is_err());
        assert!("P1D2Y".parse::<Period>().is_err());
        assert!("P1Y1Y".parse::<Period>().is_err());
        assert!("P99999999999999999999Y".parse::<Period>().is_err());
        assert!("5Y".parse::<Period>().is_err());
    }

    #[test]
    fn every_rendered_period_parses_back() {
        for period in [
            Period::ZERO,
            Period::from_years(4),
            Period::from_months(-7),
            Period::new(1, 2, 3),
            Period::new(-1, 0, 40),
        ] {
            assert_eq!(period, period.to_string().parse().unwrap());
        }
    }
}
