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

//! Reconciliation of a principal breakdown against its total.

use chrono::NaiveDate;
use num_traits::Zero;

use super::{AllocationError, AllocationOptions, PrincipalBreakdown};
use crate::{
    enums::{Reconciliation, ScheduleOrder},
    types::fixed::{ScaledInt, from_scaled_to_string, to_scaled},
};

/// Converts a decimal breakdown to scaled integers and reconciles it against `value`.
///
/// See the [module documentation](super) for the reconciliation rules.
///
/// # Errors
///
/// Returns an error if:
/// - `schedule_amounts` and `schedule_dates` differ in length.
/// - any input is not finite or `options.decimal_places` is out of range.
/// - a redistribution is required over a schedule summing to zero.
/// - `options.strict` is set and the breakdown cannot be reconciled.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use treasury_model::principal::{AllocationOptions, allocate};
///
/// let d = |m| NaiveDate::from_ymd_opt(2025, m, 1).unwrap();
/// let breakdown = allocate(
///     1000.0,
///     6.0,
///     &[100.0, 100.0, 100.0],
///     &[d(3), d(1), d(2)],
///     &AllocationOptions::default(),
/// )
/// .unwrap();
///
/// assert_eq!(breakdown.schedule_dates, vec![d(1), d(2), d(3)]);
/// assert_eq!(breakdown.schedule_f64(), vec![331.3333, 331.3333, 331.3334]);
/// ```
pub fn allocate(
    value: f64,
    open_ended: f64,
    schedule_amounts: &[f64],
    schedule_dates: &[NaiveDate],
    options: &AllocationOptions,
) -> Result<PrincipalBreakdown, AllocationError> {
    let dp = options.decimal_places;
    let value = to_scaled(value, dp, options.rounding)?;
    let open_ended = to_scaled(open_ended, dp, options.rounding)?;
    let schedule = schedule_amounts
        .iter()
        .map(|amount| to_scaled(*amount, dp, options.rounding))
        .collect::<Result<Vec<_>, _>>()?;

    allocate_scaled(value, open_ended, schedule, schedule_dates.to_vec(), options)
}

/// Reconciles a breakdown that is already expressed in scaled integers.
///
/// `options.rounding` is not used; all amounts are taken to share `options.decimal_places`.
///
/// # Errors
///
/// Returns the same errors as [`allocate`], except conversion errors.
pub fn allocate_scaled(
    value: ScaledInt,
    mut open_ended: ScaledInt,
    schedule_amounts: Vec<ScaledInt>,
    schedule_dates: Vec<NaiveDate>,
    options: &AllocationOptions,
) -> Result<PrincipalBreakdown, AllocationError> {
    if schedule_amounts.len() != schedule_dates.len() {
        return Err(AllocationError::LengthMismatch {
            amounts: schedule_amounts.len(),
            dates: schedule_dates.len(),
        });
    }

    let (mut schedule, dates) = match options.order {
        ScheduleOrder::SortByDate => sort_by_date(schedule_amounts, schedule_dates),
        ScheduleOrder::Preserve => (schedule_amounts, schedule_dates),
    };

    let scheduled: ScaledInt = schedule.iter().sum();
    let total = &open_ended + &scheduled;

    let reconciliation = if total == value {
        Reconciliation::Consistent
    } else if open_ended.is_zero() && schedule.is_empty() {
        open_ended = value.clone();
        Reconciliation::OpenEndedFromTotal
    } else if !schedule.is_empty() {
        redistribute(&mut schedule, &value, &open_ended, &scheduled)?;
        Reconciliation::Redistributed
    } else {
        if options.strict {
            return Err(AllocationError::Unreconciled { value, open_ended });
        }
        log::warn!(
            "Principal not reconciled: open-ended {} differs from value {} with an empty schedule",
            from_scaled_to_string(&open_ended, options.decimal_places),
            from_scaled_to_string(&value, options.decimal_places),
        );
        Reconciliation::Unreconciled
    };

    log::debug!(
        "Allocated principal {} over {} scheduled amounts: {reconciliation}",
        from_scaled_to_string(&value, options.decimal_places),
        schedule.len(),
    );

    Ok(PrincipalBreakdown {
        open_ended,
        schedule_amounts: schedule,
        schedule_dates: dates,
        decimal_places: options.decimal_places,
        reconciliation,
    })
}

/// Stable sort of amounts and dates together, ascending by date.
fn sort_by_date(
    amounts: Vec<ScaledInt>,
    dates: Vec<NaiveDate>,
) -> (Vec<ScaledInt>, Vec<NaiveDate>) {
    let mut pairs: Vec<(NaiveDate, ScaledInt)> = dates.into_iter().zip(amounts).collect();
    pairs.sort_by_key(|(date, _)| *date);
    pairs.into_iter().map(|(date, amount)| (amount, date)).unzip()
}

/// Splits `value - open_ended` across `schedule` weighted by each entry's current amount.
///
/// Each share is truncated toward zero; the shortfall is added to the last entry.
fn redistribute(
    schedule: &mut [ScaledInt],
    value: &ScaledInt,
    open_ended: &ScaledInt,
    weight_sum: &ScaledInt,
) -> Result<(), AllocationError> {
    if weight_sum.is_zero() {
        return Err(AllocationError::ZeroScheduleWeight);
    }

    let residual = value - open_ended;

    for amount in schedule.iter_mut() {
        // `BigInt` division truncates toward zero
        *amount = &residual * &*amount / weight_sum;
    }

    let split: ScaledInt = schedule.iter().sum();
    if let Some(last) = schedule.last_mut() {
        *last += residual - split;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;
    use crate::enums::RoundingMode;

    fn jan(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, day).unwrap()
    }

    fn big(value: i64) -> ScaledInt {
        ScaledInt::from(value)
    }

    fn scaled(values: &[i64]) -> Vec<ScaledInt> {
        values.iter().copied().map(ScaledInt::from).collect()
    }

    #[fixture]
    fn options() -> AllocationOptions {
        AllocationOptions::default()
    }

    #[fixture]
    fn preserve() -> AllocationOptions {
        AllocationOptions {
            order: ScheduleOrder::Preserve,
            ..AllocationOptions::default()
        }
    }

    #[rstest]
    fn test_consistent_input_is_only_sorted(options: AllocationOptions) {
        let breakdown = allocate(
            1000.0,
            10.0,
            &[690.0, 0.0, 100.0, 100.0, 0.0, 100.0, 0.0],
            &[jan(6), jan(1), jan(2), jan(3), jan(4), jan(5), jan(7)],
            &options,
        )
        .unwrap();

        assert_eq!(breakdown.reconciliation, Reconciliation::Consistent);
        assert_eq!(breakdown.open_ended, big(100_000));
        assert_eq!(
            breakdown.schedule_amounts,
            scaled(&[0, 1_000_000, 1_000_000, 0, 1_000_000, 6_900_000, 0])
        );
        assert_eq!(
            breakdown.schedule_dates,
            vec![jan(1), jan(2), jan(3), jan(4), jan(5), jan(6), jan(7)]
        );
    }

    #[rstest]
    fn test_duplicate_dates_keep_input_order(options: AllocationOptions) {
        let breakdown = allocate(
            1000.0,
            10.0,
            &[690.0, -200.0, 0.0, 400.0, 0.0, 100.0, 0.0],
            &[jan(6), jan(1), jan(1), jan(1), jan(4), jan(5), jan(7)],
            &options,
        )
        .unwrap();

        assert_eq!(breakdown.reconciliation, Reconciliation::Consistent);
        assert_eq!(
            breakdown.schedule_amounts,
            scaled(&[-2_000_000, 0, 4_000_000, 0, 1_000_000, 6_900_000, 0])
        );
        assert_eq!(
            breakdown.schedule_dates,
            vec![jan(1), jan(1), jan(1), jan(4), jan(5), jan(6), jan(7)]
        );
    }

    #[rstest]
    fn test_remainder_goes_to_last_by_date(options: AllocationOptions) {
        let breakdown = allocate(
            1000.0,
            6.0,
            &[100.0, 100.0, 100.0],
            &[jan(3), jan(1), jan(2)],
            &options,
        )
        .unwrap();

        assert_eq!(breakdown.reconciliation, Reconciliation::Redistributed);
        assert_eq!(breakdown.open_ended, big(60_000));
        assert_eq!(
            breakdown.schedule_amounts,
            scaled(&[3_313_333, 3_313_333, 3_313_334])
        );
        assert_eq!(breakdown.schedule_dates, vec![jan(1), jan(2), jan(3)]);
        assert_eq!(breakdown.schedule_f64(), vec![331.3333, 331.3333, 331.3334]);
        assert!(breakdown.is_reconciled(&big(10_000_000)));
    }

    #[rstest]
    fn test_even_split_has_no_remainder(options: AllocationOptions) {
        let breakdown = allocate(
            1000.0,
            10.0,
            &[100.0, 100.0, 100.0],
            &[jan(3), jan(1), jan(2)],
            &options,
        )
        .unwrap();

        assert_eq!(breakdown.open_ended_f64(), 10.0);
        assert_eq!(breakdown.schedule_f64(), vec![330.0, 330.0, 330.0]);
    }

    #[rstest]
    fn test_negative_weight_in_schedule(options: AllocationOptions) {
        let breakdown = allocate(
            1000.0,
            6.0,
            &[100.0, -100.0, 300.0],
            &[jan(3), jan(1), jan(2)],
            &options,
        )
        .unwrap();

        assert_eq!(
            breakdown.schedule_amounts,
            scaled(&[-3_313_333, 9_940_000, 3_313_333])
        );
        assert_eq!(breakdown.schedule_dates, vec![jan(1), jan(2), jan(3)]);
    }

    #[rstest]
    fn test_all_negative_total(options: AllocationOptions) {
        let breakdown = allocate(
            -1000.0,
            -6.0,
            &[-100.0, -100.0, -100.0],
            &[jan(3), jan(1), jan(2)],
            &options,
        )
        .unwrap();

        assert_eq!(
            breakdown.schedule_amounts,
            scaled(&[-3_313_333, -3_313_333, -3_313_334])
        );
        assert!(breakdown.is_reconciled(&big(-10_000_000)));
    }

    #[rstest]
    fn test_incomplete_schedule_keeps_zero_weights(options: AllocationOptions) {
        let breakdown = allocate(
            999.0,
            10.0,
            &[0.0, 1.0, 1.0, 1.0, 0.0, 2.0],
            &[jan(1), jan(2), jan(3), jan(4), jan(5), jan(6)],
            &options,
        )
        .unwrap();

        assert_eq!(breakdown.open_ended_f64(), 10.0);
        assert_eq!(
            breakdown.schedule_f64(),
            vec![0.0, 197.8, 197.8, 197.8, 0.0, 395.6]
        );
    }

    #[rstest]
    fn test_open_ended_takes_total_when_nothing_given(options: AllocationOptions) {
        let breakdown = allocate(1000.0, 0.0, &[], &[], &options).unwrap();

        assert_eq!(breakdown.reconciliation, Reconciliation::OpenEndedFromTotal);
        assert_eq!(breakdown.open_ended, big(10_000_000));
        assert!(breakdown.schedule_amounts.is_empty());
    }

    #[rstest]
    fn test_unreconciled_passes_through(options: AllocationOptions) {
        let breakdown = allocate(1000.0, 10.0, &[], &[], &options).unwrap();

        assert_eq!(breakdown.reconciliation, Reconciliation::Unreconciled);
        assert_eq!(breakdown.open_ended, big(100_000));
        assert!(!breakdown.is_reconciled(&big(10_000_000)));
    }

    #[rstest]
    fn test_unreconciled_strict_fails() {
        let options = AllocationOptions {
            strict: true,
            ..AllocationOptions::default()
        };
        assert_eq!(
            allocate(1000.0, 10.0, &[], &[], &options),
            Err(AllocationError::Unreconciled {
                value: big(10_000_000),
                open_ended: big(100_000),
            })
        );
    }

    #[rstest]
    fn test_zero_weight_schedule(options: AllocationOptions) {
        assert_eq!(
            allocate(1000.0, 10.0, &[0.0, 0.0], &[jan(1), jan(2)], &options),
            Err(AllocationError::ZeroScheduleWeight)
        );
    }

    #[rstest]
    fn test_zero_weight_schedule_consistent_is_fine(options: AllocationOptions) {
        let breakdown = allocate(10.0, 10.0, &[0.0, 0.0], &[jan(1), jan(2)], &options).unwrap();
        assert_eq!(breakdown.reconciliation, Reconciliation::Consistent);
    }

    #[rstest]
    fn test_length_mismatch(options: AllocationOptions) {
        assert_eq!(
            allocate(1000.0, 0.0, &[1.0, 2.0], &[jan(1)], &options),
            Err(AllocationError::LengthMismatch {
                amounts: 2,
                dates: 1
            })
        );
    }

    #[rstest]
    fn test_non_finite_input(options: AllocationOptions) {
        assert!(matches!(
            allocate(f64::NAN, 0.0, &[], &[], &options),
            Err(AllocationError::Conversion(_))
        ));
    }

    #[rstest]
    fn test_preserve_order_puts_remainder_on_last_input(preserve: AllocationOptions) {
        let breakdown = allocate(
            1000.0,
            6.0,
            &[100.0, 100.0, 100.0],
            &[jan(3), jan(1), jan(2)],
            &preserve,
        )
        .unwrap();

        assert_eq!(breakdown.schedule_dates, vec![jan(3), jan(1), jan(2)]);
        assert_eq!(
            breakdown.schedule_amounts,
            scaled(&[3_313_333, 3_313_333, 3_313_334])
        );
    }

    #[rstest]
    fn test_truncating_conversion() {
        let options = AllocationOptions {
            decimal_places: 2,
            rounding: RoundingMode::Truncate,
            ..AllocationOptions::default()
        };
        let breakdown = allocate(10.079, 0.0, &[], &[], &options).unwrap();
        assert_eq!(breakdown.open_ended, big(1007));
    }

    #[rstest]
    #[case(3e9, &[2e9, 2e9], 10, &["15000000000000000000", "15000000000000000000"])]
    #[case(20.0, &[15.0, 10.0], 18, &["12000000000000000000", "8000000000000000000"])]
    fn test_large_magnitudes_are_exact(
        #[case] value: f64,
        #[case] schedule: &[f64],
        #[case] decimal_places: u8,
        #[case] expected: &[&str],
    ) {
        let options = AllocationOptions {
            decimal_places,
            ..AllocationOptions::default()
        };
        let dates: Vec<NaiveDate> = (1..=schedule.len() as u32).map(jan).collect();
        let breakdown = allocate(value, 0.0, schedule, &dates, &options).unwrap();

        let expected: Vec<ScaledInt> = expected.iter().map(|s| s.parse().unwrap()).collect();
        assert_eq!(breakdown.reconciliation, Reconciliation::Redistributed);
        assert_eq!(breakdown.schedule_amounts, expected);
        let scaled_value = to_scaled(value, decimal_places, options.rounding).unwrap();
        assert!(breakdown.is_reconciled(&scaled_value));
    }

    #[rstest]
    fn test_allocate_scaled_beyond_i128(options: AllocationOptions) {
        let max = ScaledInt::from(i128::MAX);
        let breakdown = allocate_scaled(
            &max * 4,
            ScaledInt::from(i128::MIN),
            vec![max.clone(), ScaledInt::from(1)],
            vec![jan(1), jan(2)],
            &options,
        )
        .unwrap();

        assert_eq!(breakdown.reconciliation, Reconciliation::Redistributed);
        assert!(breakdown.is_reconciled(&(&max * 4)));
    }

    use proptest::prelude::*;

    fn schedule_strategy() -> impl Strategy<Value = Vec<(i128, u32)>> {
        proptest::collection::vec((-1_000_000_i128..1_000_000_i128, 1u32..=28), 0..24)
    }

    fn split(schedule: &[(i128, u32)]) -> (Vec<ScaledInt>, Vec<NaiveDate>) {
        schedule
            .iter()
            .map(|(amount, day)| (ScaledInt::from(*amount), jan(*day)))
            .unzip()
    }

    proptest! {
        /// Any reconcilable breakdown adds up exactly to the value
        #[rstest]
        fn prop_allocation_is_exact(
            value in -100_000_000_i128..100_000_000_i128,
            open_ended in -1_000_000_i128..1_000_000_i128,
            schedule in schedule_strategy(),
        ) {
            let (amounts, dates) = split(&schedule);
            let value = ScaledInt::from(value);
            let weight: ScaledInt = amounts.iter().sum();
            let result = allocate_scaled(
                value.clone(),
                ScaledInt::from(open_ended),
                amounts.clone(),
                dates,
                &AllocationOptions::default(),
            );

            match result {
                Ok(breakdown) => {
                    prop_assert_eq!(breakdown.schedule_amounts.len(), amounts.len());
                    if breakdown.reconciliation != Reconciliation::Unreconciled {
                        prop_assert!(breakdown.is_reconciled(&value));
                    } else {
                        prop_assert!(amounts.is_empty());
                    }
                    prop_assert!(breakdown.schedule_dates.is_sorted());
                }
                Err(e) => {
                    prop_assert_eq!(e, AllocationError::ZeroScheduleWeight);
                    prop_assert!(weight.is_zero());
                }
            }
        }

        /// Consistent input comes back unchanged apart from the date sort
        #[rstest]
        fn prop_consistent_input_unchanged(
            open_ended in -1_000_000_i128..1_000_000_i128,
            schedule in schedule_strategy(),
        ) {
            let (amounts, dates) = split(&schedule);
            let open_ended = ScaledInt::from(open_ended);
            let value = &open_ended + amounts.iter().sum::<ScaledInt>();
            let (expected_amounts, expected_dates) = sort_by_date(amounts.clone(), dates.clone());

            let breakdown = allocate_scaled(
                value,
                open_ended.clone(),
                amounts,
                dates,
                &AllocationOptions::default(),
            )
            .unwrap();

            prop_assert_eq!(breakdown.reconciliation, Reconciliation::Consistent);
            prop_assert_eq!(breakdown.open_ended, open_ended);
            prop_assert_eq!(breakdown.schedule_amounts, expected_amounts);
            prop_assert_eq!(breakdown.schedule_dates, expected_dates);
        }

        /// Decimal inputs reconcile to the scaled value
        #[rstest]
        fn prop_decimal_allocation_is_exact(
            value_cents in -10_000_000_i64..10_000_000_i64,
            amount_cents in proptest::collection::vec(1_i64..100_000, 1..12),
        ) {
            let value = value_cents as f64 / 100.0;
            let amounts: Vec<f64> = amount_cents.iter().map(|c| *c as f64 / 100.0).collect();
            let dates: Vec<NaiveDate> = (1..=amounts.len() as u32).map(jan).collect();
            let options = AllocationOptions::default();

            let breakdown = allocate(value, 0.0, &amounts, &dates, &options).unwrap();
            let scaled_value = to_scaled(value, options.decimal_places, options.rounding).unwrap();
            prop_assert!(breakdown.is_reconciled(&scaled_value));
        }
    }
}
