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

//! Enumerations for the monetary domain model.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// The rounding applied when a decimal number is converted to a scaled integer.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Display,
    Hash,
    PartialEq,
    Eq,
    AsRefStr,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoundingMode {
    /// Round to nearest, ties away from zero (the spreadsheet `ROUND` convention).
    #[default]
    HalfAwayFromZero,
    /// Truncate toward zero.
    Truncate,
}

impl RoundingMode {
    /// Maps the legacy boolean flag (`true` = round, `false` = truncate) to a mode.
    #[must_use]
    pub const fn from_round_flag(round: bool) -> Self {
        if round {
            Self::HalfAwayFromZero
        } else {
            Self::Truncate
        }
    }
}

/// How a principal schedule is ordered before reconciliation.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Display,
    Hash,
    PartialEq,
    Eq,
    AsRefStr,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScheduleOrder {
    /// Stable sort ascending by date; entries sharing a date keep their input order.
    #[default]
    SortByDate,
    /// Keep the caller's order.
    Preserve,
}

/// Which branch of the reconciliation produced a principal breakdown.
#[derive(
    Copy,
    Clone,
    Debug,
    Display,
    Hash,
    PartialEq,
    Eq,
    AsRefStr,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Reconciliation {
    /// Open-ended plus scheduled amounts already matched the total.
    Consistent,
    /// No breakdown was supplied; the whole total became open-ended.
    OpenEndedFromTotal,
    /// The residual was redistributed across the schedule by weight.
    Redistributed,
    /// Empty schedule with an open-ended amount that does not match the total; passed through.
    Unreconciled,
}
