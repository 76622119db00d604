// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2015-2026 Nautech Systems Pty Ltd. All rights reserved.
//  https://nautechsystems.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

//! Functions for converting between decimal numbers and scaled integers.
//!
//! A scaled integer is a signed arbitrary-precision [`ScaledInt`] paired with an implicit number
//! of decimal places agreed by the caller. Two scaled integers can only be compared or combined
//! when they share the same number of decimal places.
//!
//! # Conversion without floating-point drift
//!
//! Multiplying by a power of ten in binary floating point is inexact:
//!
//! ```text
//! 10.075 * 100.0 == 1007.4999999999999
//! ```
//!
//! [`to_scaled`] therefore never multiplies. It takes the shortest decimal representation of the
//! input (the one `Display` prints, which round-trips exactly) and moves the decimal point in the
//! digit string, then rounds on the first dropped digit. `10.075` at 2 decimal places yields
//! `1008`.
//!
//! The reverse direction, [`from_scaled_to_f64`], divides by a power of ten. Within the `f64`
//! integer range the dividend is exact and IEEE 754 division is correctly rounded, so this is as
//! exact as an `f64` can be.

use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive};
use thiserror::Error;

use crate::enums::RoundingMode;

/// The integer type backing scaled monetary values.
pub type ScaledInt = BigInt;

/// The maximum number of decimal places supported by the conversions.
pub const MAX_DECIMAL_PLACES: u8 = 18;

/// Precomputed powers of 10, index `i` holds 10^i.
const POWERS_OF_10: [u64; 19] = [
    1,                             // 10^0
    10,                            // 10^1
    100,                           // 10^2
    1_000,                         // 10^3
    10_000,                        // 10^4
    100_000,                       // 10^5
    1_000_000,                     // 10^6
    10_000_000,                    // 10^7
    100_000_000,                   // 10^8
    1_000_000_000,                 // 10^9
    10_000_000_000,                // 10^10
    100_000_000_000,               // 10^11
    1_000_000_000_000,             // 10^12
    10_000_000_000_000,            // 10^13
    100_000_000_000_000,           // 10^14
    1_000_000_000_000_000,         // 10^15
    10_000_000_000_000_000,        // 10^16
    100_000_000_000_000_000,       // 10^17
    1_000_000_000_000_000_000,     // 10^18
];

const _: () = assert!(
    (MAX_DECIMAL_PLACES as usize) < POWERS_OF_10.len(),
    "MAX_DECIMAL_PLACES exceeds POWERS_OF_10 table size"
);

/// Errors raised by decimal/scaled conversions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// The input was NaN or infinite.
    #[error("Invalid number {0}: conversions require a finite value")]
    InvalidNumber(f64),
    /// The requested decimal places exceed [`MAX_DECIMAL_PLACES`].
    #[error("`decimal_places` exceeded maximum {max}, was {decimal_places}")]
    PrecisionExceeded { decimal_places: u8, max: u8 },
}

/// Checks that `decimal_places` is within [`MAX_DECIMAL_PLACES`].
///
/// # Errors
///
/// Returns [`ConversionError::PrecisionExceeded`] when out of range.
pub fn check_decimal_places(decimal_places: u8) -> Result<(), ConversionError> {
    if decimal_places > MAX_DECIMAL_PLACES {
        return Err(ConversionError::PrecisionExceeded {
            decimal_places,
            max: MAX_DECIMAL_PLACES,
        });
    }
    Ok(())
}

/// Returns 10^`decimal_places`, the scaled representation of `1`.
///
/// # Errors
///
/// Returns [`ConversionError::PrecisionExceeded`] when out of range.
pub fn scale_factor(decimal_places: u8) -> Result<ScaledInt, ConversionError> {
    check_decimal_places(decimal_places)?;
    Ok(ScaledInt::from(POWERS_OF_10[usize::from(decimal_places)]))
}

/// Converts a decimal number to a scaled integer with `decimal_places` implied decimals.
///
/// The decimal point is moved by rewriting the digit string, then the remaining digits are
/// rounded per `rounding`: [`RoundingMode::HalfAwayFromZero`] rounds ties away from zero,
/// [`RoundingMode::Truncate`] drops them (toward zero). Any finite input converts; the result
/// is never clamped.
///
/// # Errors
///
/// Returns an error if:
/// - `value` is NaN or infinite.
/// - `decimal_places` exceeds [`MAX_DECIMAL_PLACES`].
///
/// # Examples
///
/// ```
/// use num_bigint::BigInt;
/// use treasury_model::{enums::RoundingMode, types::fixed::to_scaled};
///
/// assert_eq!(to_scaled(10.075, 2, RoundingMode::HalfAwayFromZero).unwrap(), BigInt::from(1008));
/// assert_eq!(to_scaled(-2.5, 0, RoundingMode::HalfAwayFromZero).unwrap(), BigInt::from(-3));
/// assert_eq!(to_scaled(10.079, 2, RoundingMode::Truncate).unwrap(), BigInt::from(1007));
/// ```
pub fn to_scaled(
    value: f64,
    decimal_places: u8,
    rounding: RoundingMode,
) -> Result<ScaledInt, ConversionError> {
    if !value.is_finite() {
        return Err(ConversionError::InvalidNumber(value));
    }
    check_decimal_places(decimal_places)?;

    // `Display` for f64 never uses exponent notation
    let text = value.to_string();
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.as_str()),
    };
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, ""));

    let dp = usize::from(decimal_places);
    let (kept, dropped) = if frac_part.len() > dp {
        frac_part.split_at(dp)
    } else {
        (frac_part, "")
    };

    let mut shifted = String::with_capacity(int_part.len() + dp);
    shifted.push_str(int_part);
    shifted.push_str(kept);
    shifted.extend(std::iter::repeat_n('0', dp - kept.len()));

    let mut magnitude: ScaledInt = shifted
        .parse()
        .map_err(|_| ConversionError::InvalidNumber(value))?;
    if rounding == RoundingMode::HalfAwayFromZero
        && dropped.as_bytes().first().is_some_and(|d| *d >= b'5')
    {
        magnitude += 1;
    }

    Ok(if negative { -magnitude } else { magnitude })
}

/// Converts a scaled integer back to a decimal number.
///
/// Magnitudes beyond the `f64` range convert to an infinity of the same sign.
#[must_use]
pub fn from_scaled_to_f64(value: &ScaledInt, decimal_places: u8) -> f64 {
    let numerator = value.to_f64().unwrap_or(if value.is_negative() {
        f64::NEG_INFINITY
    } else {
        f64::INFINITY
    });
    numerator / 10_f64.powi(i32::from(decimal_places))
}

/// Formats a scaled integer as a decimal string with exactly `decimal_places` decimals.
///
/// The digits are left-padded with zeros to at least `decimal_places + 1` digits before the
/// separator is inserted; the sign is kept in front. With zero decimal places no separator is
/// written.
///
/// # Examples
///
/// ```
/// use num_bigint::BigInt;
/// use treasury_model::types::fixed::from_scaled_to_string;
///
/// assert_eq!(from_scaled_to_string(&BigInt::from(123), 4), "0.0123");
/// assert_eq!(from_scaled_to_string(&BigInt::from(-1008), 2), "-10.08");
/// ```
#[must_use]
pub fn from_scaled_to_string(value: &ScaledInt, decimal_places: u8) -> String {
    if decimal_places == 0 {
        return value.to_string();
    }

    let dp = usize::from(decimal_places);
    let digits = value.magnitude().to_string();
    let padded = format!("{digits:0>width$}", width = dp + 1);
    let (int_part, frac_part) = padded.split_at(padded.len() - dp);
    let sign = if value.is_negative() { "-" } else { "" };

    format!("{sign}{int_part}.{frac_part}")
}
