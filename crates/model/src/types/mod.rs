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

//! Value types for scaled monetary amounts.
//!
//! Amounts are held as signed integers paired with a number of decimal places so that sums and
//! proportional splits are exact. [`fixed`] provides the conversion functions between decimal
//! numbers and scaled integers; [`ScaledAmount`] bundles a scaled integer with its scale.
//!
//! # Scale
//!
//! Two scaled values only mean the same thing when they share a number of decimal places.
//! Arithmetic on [`ScaledAmount`] is checked and fails on a scale mismatch rather than
//! silently rescaling.

pub mod fixed;
pub mod scaled;

// Re-exports
pub use fixed::{
    ConversionError, MAX_DECIMAL_PLACES, ScaledInt, from_scaled_to_f64, from_scaled_to_string,
    to_scaled,
};
pub use scaled::{ScaledAmount, ScaledAmountError};
