/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Rendering for the decimal-text payload of numeric attributes.
//!
//! Numbers travel as text (`N`), so encoding must be exact and deterministic.
//! Integers render through `itoa`; floats render through `ryu`, whose output
//! is the shortest text that parses back to the identical value.

/// Renders an integer to its wire text form.
pub fn fmt_int<T: itoa::Integer>(value: T) -> String {
    itoa::Buffer::new().format(value).to_owned()
}

/// Renders a float to its wire text form.
///
/// Non-finite values render as `NaN`/`inf`/`-inf`; the store has no number
/// representation for them and will reject the write, but rendering stays
/// total.
pub fn fmt_float<T: ryu::Float>(value: T) -> String {
    ryu::Buffer::new().format(value).to_owned()
}

#[cfg(test)]
mod test {
    #[test]
    fn integers_render_exactly() {
        assert_eq!("0", super::fmt_int(0i32));
        assert_eq!("-42", super::fmt_int(-42i64));
        assert_eq!("18446744073709551615", super::fmt_int(u64::MAX));
    }

    #[test]
    fn floats_render_shortest_round_trip_form() {
        assert_eq!("1.0", super::fmt_float(1.0f64));
        assert_eq!("-0.25", super::fmt_float(-0.25f32));
        assert_eq!("1e300", super::fmt_float(1e300f64));
    }
}
