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

//! Splitting a principal between an open-ended amount and a dated repayment schedule.
//!
//! A financing line is described by its total `value`, an amount without a scheduled date
//! (`open_ended`) and a schedule of dated amounts. User input rarely adds up exactly, so
//! [`allocate`] converts everything to scaled integers and reconciles the breakdown so that
//!
//! ```text
//! open_ended + sum(schedule) == value
//! ```
//!
//! holds exactly, in priority order:
//!
//! | Input                                       | Result                                       |
//! |---------------------------------------------|----------------------------------------------|
//! | Already consistent                          | Unchanged ([`Reconciliation::Consistent`])   |
//! | `open_ended == 0` and empty schedule        | `open_ended = value`                         |
//! | Non-empty schedule                          | Residual redistributed by weight             |
//! | Empty schedule, `open_ended != value`       | Passed through, or an error in strict mode   |
//!
//! Redistribution uses truncating integer division; whatever the truncation loses is added to
//! the last schedule entry so the total is exact. Amounts may be negative.

pub mod allocator;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use treasury_core::{
    correctness::{FAILED, check_predicate_true},
    serialization::Serializable,
};

use crate::{
    enums::{Reconciliation, RoundingMode, ScheduleOrder},
    types::fixed::{ConversionError, MAX_DECIMAL_PLACES, ScaledInt, from_scaled_to_f64},
};

// Re-exports
pub use self::allocator::{allocate, allocate_scaled};

/// Errors raised by the principal allocator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AllocationError {
    /// Schedule amounts and dates differ in length.
    #[error("Schedule has {amounts} amounts but {dates} dates")]
    LengthMismatch { amounts: usize, dates: usize },
    /// The residual must be redistributed but the schedule weights sum to zero.
    #[error("Cannot redistribute principal over a schedule whose amounts sum to zero")]
    ZeroScheduleWeight,
    /// Strict mode: an empty schedule with an open-ended amount that does not match the total.
    #[error(
        "Open-ended principal {open_ended} does not match value {value} and there is no schedule"
    )]
    Unreconciled {
        value: ScaledInt,
        open_ended: ScaledInt,
    },
    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

/// Options controlling conversion and reconciliation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocationOptions {
    /// Decimal places of the scaled integers.
    pub decimal_places: u8,
    /// Rounding applied when converting the inputs.
    pub rounding: RoundingMode,
    /// Whether the schedule is sorted by date first.
    pub order: ScheduleOrder,
    /// Fail instead of passing an unreconcilable breakdown through.
    pub strict: bool,
}

impl Default for AllocationOptions {
    fn default() -> Self {
        Self {
            decimal_places: 4,
            rounding: RoundingMode::HalfAwayFromZero,
            order: ScheduleOrder::SortByDate,
            strict: false,
        }
    }
}

impl Serializable for AllocationOptions {}

impl AllocationOptions {
    /// Creates a new [`AllocationOptions`] instance with correctness checking.
    ///
    /// # Errors
    ///
    /// Returns an error if `decimal_places` exceeds [`MAX_DECIMAL_PLACES`].
    pub fn new_checked(
        decimal_places: u8,
        rounding: RoundingMode,
        order: ScheduleOrder,
        strict: bool,
    ) -> anyhow::Result<Self> {
        check_predicate_true(
            decimal_places <= MAX_DECIMAL_PLACES,
            &format!("`decimal_places` {decimal_places} exceeded maximum {MAX_DECIMAL_PLACES}"),
        )?;
        Ok(Self {
            decimal_places,
            rounding,
            order,
            strict,
        })
    }

    /// Creates a new [`AllocationOptions`] instance.
    ///
    /// # Panics
    ///
    /// Panics if `decimal_places` exceeds [`MAX_DECIMAL_PLACES`].
    #[must_use]
    pub fn new(
        decimal_places: u8,
        rounding: RoundingMode,
        order: ScheduleOrder,
        strict: bool,
    ) -> Self {
        Self::new_checked(decimal_places, rounding, order, strict).expect(FAILED)
    }
}

/// The reconciled split of a principal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrincipalBreakdown {
    /// Amount without a scheduled date.
    pub open_ended: ScaledInt,
    /// Scheduled amounts, aligned with `schedule_dates`.
    pub schedule_amounts: Vec<ScaledInt>,
    /// Schedule dates, ascending unless the order was preserved.
    pub schedule_dates: Vec<NaiveDate>,
    /// Decimal places of every amount in the breakdown.
    pub decimal_places: u8,
    /// The reconciliation branch that produced this breakdown.
    pub reconciliation: Reconciliation,
}

impl PrincipalBreakdown {
    /// Returns `open_ended + sum(schedule_amounts)`.
    #[must_use]
    pub fn total(&self) -> ScaledInt {
        &self.open_ended + self.schedule_amounts.iter().sum::<ScaledInt>()
    }

    /// Returns `true` if the breakdown adds up exactly to `value`.
    #[must_use]
    pub fn is_reconciled(&self, value: &ScaledInt) -> bool {
        self.total() == *value
    }

    #[must_use]
    pub fn open_ended_f64(&self) -> f64 {
        from_scaled_to_f64(&self.open_ended, self.decimal_places)
    }

    #[must_use]
    pub fn schedule_f64(&self) -> Vec<f64> {
        self.schedule_amounts
            .iter()
            .map(|amount| from_scaled_to_f64(amount, self.decimal_places))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn scaled(values: &[i64]) -> Vec<ScaledInt> {
        values.iter().copied().map(ScaledInt::from).collect()
    }

    #[rstest]
    fn test_options_default() {
        let options = AllocationOptions::default();
        assert_eq!(options.decimal_places, 4);
        assert_eq!(options.rounding, RoundingMode::HalfAwayFromZero);
        assert_eq!(options.order, ScheduleOrder::SortByDate);
        assert!(!options.strict);
    }

    #[rstest]
    fn test_options_new_checked() {
        assert!(
            AllocationOptions::new_checked(
                MAX_DECIMAL_PLACES + 1,
                RoundingMode::Truncate,
                ScheduleOrder::Preserve,
                false
            )
            .is_err()
        );
    }

    #[rstest]
    #[should_panic(expected = "Condition failed")]
    fn test_options_new_panics_on_precision() {
        let _ = AllocationOptions::new(
            MAX_DECIMAL_PLACES + 1,
            RoundingMode::Truncate,
            ScheduleOrder::Preserve,
            false,
        );
    }

    #[rstest]
    fn test_options_from_json_fills_defaults() {
        let options =
            AllocationOptions::from_json_str(r#"{"decimal_places": 2, "order": "PRESERVE"}"#)
                .unwrap();
        assert_eq!(options.decimal_places, 2);
        assert_eq!(options.order, ScheduleOrder::Preserve);
        assert_eq!(options.rounding, RoundingMode::HalfAwayFromZero);
    }

    #[rstest]
    fn test_breakdown_totals() {
        let breakdown = PrincipalBreakdown {
            open_ended: ScaledInt::from(60_000),
            schedule_amounts: scaled(&[3_313_333, 3_313_333, 3_313_334]),
            schedule_dates: vec![
                NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
                NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            ],
            decimal_places: 4,
            reconciliation: Reconciliation::Redistributed,
        };
        assert_eq!(breakdown.total(), ScaledInt::from(10_000_000));
        assert!(breakdown.is_reconciled(&ScaledInt::from(10_000_000)));
        assert!(!breakdown.is_reconciled(&ScaledInt::from(10_000_001)));
        assert_eq!(breakdown.open_ended_f64(), 6.0);
        assert_eq!(breakdown.schedule_f64(), vec![331.3333, 331.3333, 331.3334]);
    }

    #[rstest]
    fn test_breakdown_total_beyond_i128() {
        let breakdown = PrincipalBreakdown {
            open_ended: ScaledInt::from(i128::MAX),
            schedule_amounts: scaled(&[1]),
            schedule_dates: vec![NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()],
            decimal_places: 0,
            reconciliation: Reconciliation::Consistent,
        };
        let expected = ScaledInt::from(i128::MAX) + 1;
        assert_eq!(breakdown.total(), expected);
        assert!(breakdown.is_reconciled(&expected));
        assert!(!breakdown.is_reconciled(&ScaledInt::from(0)));
    }

    #[rstest]
    fn test_breakdown_serializes_amounts() {
        let breakdown = PrincipalBreakdown {
            open_ended: ScaledInt::from(-5),
            schedule_amounts: scaled(&[15]),
            schedule_dates: vec![NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()],
            decimal_places: 1,
            reconciliation: Reconciliation::Redistributed,
        };
        let json = serde_json::to_string(&breakdown).unwrap();
        let back: PrincipalBreakdown = serde_json::from_str(&json).unwrap();
        assert_eq!(back, breakdown);
    }
}
