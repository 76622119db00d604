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

//! A scaled integer bundled with its number of decimal places.

use std::fmt::{Debug, Display};

use num_traits::Zero;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::fixed::{
    ConversionError, ScaledInt, check_decimal_places, from_scaled_to_f64, from_scaled_to_string,
    to_scaled,
};
use crate::enums::RoundingMode;

/// Errors raised by [`ScaledAmount`] arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScaledAmountError {
    /// The operands carry different numbers of decimal places.
    #[error("Scale mismatch: {left} decimal places vs {right}")]
    ScaleMismatch { left: u8, right: u8 },
}

/// An exact monetary amount: `raw` units of 10^-`decimal_places`.
#[derive(Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaledAmount {
    /// The raw scaled integer.
    pub raw: ScaledInt,
    /// The number of implied decimal places.
    pub decimal_places: u8,
}

impl ScaledAmount {
    /// Creates a new [`ScaledAmount`] from a decimal number.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` is not finite or `decimal_places` is out of range.
    pub fn from_f64(
        value: f64,
        decimal_places: u8,
        rounding: RoundingMode,
    ) -> Result<Self, ConversionError> {
        let raw = to_scaled(value, decimal_places, rounding)?;
        Ok(Self {
            raw,
            decimal_places,
        })
    }

    /// Creates a new [`ScaledAmount`] from an already scaled integer.
    ///
    /// # Errors
    ///
    /// Returns an error if `decimal_places` is out of range.
    pub fn from_raw(raw: ScaledInt, decimal_places: u8) -> Result<Self, ConversionError> {
        check_decimal_places(decimal_places)?;
        Ok(Self {
            raw,
            decimal_places,
        })
    }

    /// Returns a zero amount at the given scale.
    #[must_use]
    pub fn zero(decimal_places: u8) -> Self {
        Self {
            raw: ScaledInt::zero(),
            decimal_places,
        }
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.raw.is_zero()
    }

    /// Returns the amount as a decimal number.
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        from_scaled_to_f64(&self.raw, self.decimal_places)
    }

    fn check_scale(&self, other: &Self) -> Result<(), ScaledAmountError> {
        if self.decimal_places != other.decimal_places {
            return Err(ScaledAmountError::ScaleMismatch {
                left: self.decimal_places,
                right: other.decimal_places,
            });
        }
        Ok(())
    }

    /// Adds two amounts of the same scale.
    ///
    /// # Errors
    ///
    /// Returns an error on a scale mismatch.
    pub fn checked_add(&self, other: &Self) -> Result<Self, ScaledAmountError> {
        self.check_scale(other)?;
        Ok(Self {
            raw: &self.raw + &other.raw,
            decimal_places: self.decimal_places,
        })
    }

    /// Subtracts `other` from this amount; both must share a scale.
    ///
    /// # Errors
    ///
    /// Returns an error on a scale mismatch.
    pub fn checked_sub(&self, other: &Self) -> Result<Self, ScaledAmountError> {
        self.check_scale(other)?;
        Ok(Self {
            raw: &self.raw - &other.raw,
            decimal_places: self.decimal_places,
        })
    }

    /// Sums amounts at `decimal_places`; an empty iterator sums to zero.
    ///
    /// # Errors
    ///
    /// Returns an error if any amount has a different scale.
    pub fn sum<'a, I>(decimal_places: u8, amounts: I) -> Result<Self, ScaledAmountError>
    where
        I: IntoIterator<Item = &'a Self>,
    {
        amounts
            .into_iter()
            .try_fold(Self::zero(decimal_places), |acc, amount| {
                acc.checked_add(amount)
            })
    }
}

impl Debug for ScaledAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}({}, decimal_places={})",
            stringify!(ScaledAmount),
            self,
            self.decimal_places
        )
    }
}

impl Display for ScaledAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", from_scaled_to_string(&self.raw, self.decimal_places))
    }
}
