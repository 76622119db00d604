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

//! The driver repository.

use ahash::{AHashMap, AHashSet};
use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::Value;
use treasury_core::{
    EPOCH, UnixMillis,
    correctness::check_nonempty_string,
    datetime::day_millis,
    serialization::parse_json5_value,
    string::{normalize_identifier, normalize_or_default},
};
use ustr::Ustr;

use super::{
    config::{DriverAggregate, DriversRepoConfig, ValueSanitization},
    error::DriverError,
    key::{DriverKey, Mutability},
};

/// A value of a driver from a given calendar day onward.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DriverSample {
    /// Midnight of the day the value applies from, or [`EPOCH`] for undated values.
    pub date: UnixMillis,
    pub value: Value,
}

/// A sample to be written by [`DriversRepo::set`].
#[derive(Clone, Debug, PartialEq)]
pub struct DriverInput {
    /// Scenario, or the current scenario when `None` or blank.
    pub scenario: Option<String>,
    /// Unit, or the default unit when `None` or blank.
    pub unit: Option<String>,
    pub name: String,
    /// Day the value applies from; `None` means undated.
    pub date: Option<NaiveDateTime>,
    pub value: Value,
}

impl DriverInput {
    /// Creates a new undated [`DriverInput`] in the current scenario and default unit.
    #[must_use]
    pub fn new<T: Into<Value>>(name: &str, value: T) -> Self {
        Self {
            scenario: None,
            unit: None,
            name: name.to_string(),
            date: None,
            value: value.into(),
        }
    }

    #[must_use]
    pub fn with_scenario(mut self, scenario: &str) -> Self {
        self.scenario = Some(scenario.to_string());
        self
    }

    #[must_use]
    pub fn with_unit(mut self, unit: &str) -> Self {
        self.unit = Some(unit.to_string());
        self
    }

    #[must_use]
    pub fn with_date(mut self, date: NaiveDateTime) -> Self {
        self.date = Some(date);
        self
    }
}

/// A lookup for [`DriversRepo::get`] and the range queries.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DriverQuery {
    /// Scenario, or the current scenario when `None` or blank.
    pub scenario: Option<String>,
    /// Unit, or the default unit when `None` or blank.
    pub unit: Option<String>,
    pub name: String,
    /// Query day; `None` means the repository's "today".
    pub date: Option<NaiveDateTime>,
    /// Parse string values as JSON5 before returning them.
    pub parse_as_json5: bool,
    /// Coerce returned values, after JSON5 parsing.
    pub sanitization: Option<ValueSanitization>,
    /// Fall back to the default unit and base scenario when the key is unknown.
    pub search: bool,
}

impl DriverQuery {
    /// Creates a new [`DriverQuery`] for `name` in the current scenario and default unit.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_scenario(mut self, scenario: &str) -> Self {
        self.scenario = Some(scenario.to_string());
        self
    }

    #[must_use]
    pub fn with_unit(mut self, unit: &str) -> Self {
        self.unit = Some(unit.to_string());
        self
    }

    #[must_use]
    pub fn with_date(mut self, date: NaiveDateTime) -> Self {
        self.date = Some(date);
        self
    }

    #[must_use]
    pub fn parse_as_json5(mut self) -> Self {
        self.parse_as_json5 = true;
        self
    }

    #[must_use]
    pub fn with_sanitization(mut self, sanitization: ValueSanitization) -> Self {
        self.sanitization = Some(sanitization);
        self
    }

    #[must_use]
    pub fn search(mut self) -> Self {
        self.search = true;
        self
    }
}

/// An in-memory store of dated driver values keyed by scenario, unit and name.
///
/// Each key holds its samples in ascending date order. Whether a key may be overwritten is
/// decided by its name prefix (see [`Mutability`]).
///
/// The repository is not thread-safe. For concurrent use wrap it in a
/// [`SharedDriversRepo`](super::SharedDriversRepo) so that `set` (a read-modify-write of the
/// sample lists) never interleaves with other calls.
#[derive(Clone, Debug)]
pub struct DriversRepo {
    drivers: AHashMap<DriverKey, Vec<DriverSample>>,
    base_scenario: Ustr,
    current_scenario: Ustr,
    default_unit: Ustr,
    sanitization: ValueSanitization,
    prefix_without_dates: String,
    prefix_with_dates: String,
    allow_mutable: bool,
    debug_module_info: String,
    today: UnixMillis,
}

impl DriversRepo {
    /// Creates a new empty [`DriversRepo`].
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the current scenario or default unit is blank.
    /// - the prefix for immutable drivers with dates starts with the prefix for immutable
    ///   drivers without dates.
    pub fn new(config: DriversRepoConfig) -> Result<Self, DriverError> {
        for (field, value) in [
            ("base_scenario", &config.base_scenario),
            ("current_scenario", &config.current_scenario),
            ("default_unit", &config.default_unit),
        ] {
            check_nonempty_string(value, field)
                .map_err(|e| DriverError::InvalidConfig(e.to_string()))?;
        }

        let prefix_without_dates = normalize_identifier(&config.prefix_immutable_without_dates);
        let prefix_with_dates = normalize_identifier(&config.prefix_immutable_with_dates);
        if prefix_with_dates.starts_with(&prefix_without_dates) {
            return Err(DriverError::InvalidPrefixes {
                without_dates: prefix_without_dates,
                with_dates: prefix_with_dates,
            });
        }

        Ok(Self {
            drivers: AHashMap::new(),
            base_scenario: Ustr::from(&normalize_identifier(&config.base_scenario)),
            current_scenario: Ustr::from(&normalize_identifier(&config.current_scenario)),
            default_unit: Ustr::from(&normalize_identifier(&config.default_unit)),
            sanitization: config.sanitization,
            prefix_without_dates,
            prefix_with_dates,
            allow_mutable: config.allow_mutable,
            debug_module_info: String::new(),
            today: EPOCH,
        })
    }

    /// Sets the context appended to rejection log lines.
    pub fn set_debug_module_info(&mut self, info: &str) {
        self.debug_module_info = info.to_string();
    }

    #[must_use]
    pub fn debug_module_info(&self) -> &str {
        &self.debug_module_info
    }

    /// Sets the day used when a query has no date.
    pub fn set_today(&mut self, today: NaiveDateTime) {
        self.today = day_millis(Some(today));
    }

    #[must_use]
    pub const fn today(&self) -> UnixMillis {
        self.today
    }

    /// Returns the number of driver keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.drivers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.drivers.is_empty()
    }

    /// Returns the stored samples of a key, in date order.
    #[must_use]
    pub fn samples(&self, key: &DriverKey) -> Option<&[DriverSample]> {
        self.drivers.get(key).map(Vec::as_slice)
    }

    /// Returns `true` if the driver has at least one sample.
    #[must_use]
    pub fn is_defined(&self, scenario: Option<&str>, unit: Option<&str>, name: &str) -> bool {
        self.resolve_key(scenario, unit, name)
            .is_ok_and(|key| self.drivers.contains_key(&key))
    }

    /// Writes a batch of samples, returning one message per rejected sample.
    ///
    /// Every name is validated before anything is written. Rejections do not stop the batch:
    /// - mutable names when mutable drivers are not allowed.
    /// - dated samples for immutable drivers without dates.
    /// - immutable keys that already existed before this batch started.
    /// - a second sample for the same date of an immutable key.
    ///
    /// Keys created within the batch may receive several dates in that same batch.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::EmptyName`] if any input has a blank name; nothing is written.
    pub fn set(&mut self, inputs: &[DriverInput]) -> Result<Vec<String>, DriverError> {
        let keys = inputs
            .iter()
            .map(|input| {
                self.resolve_key(input.scenario.as_deref(), input.unit.as_deref(), &input.name)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let existing: AHashSet<DriverKey> = keys
            .iter()
            .filter(|key| self.drivers.contains_key(*key))
            .copied()
            .collect();

        let mut errors = Vec::new();
        for (input, key) in inputs.iter().zip(keys) {
            let sample = DriverSample {
                date: day_millis(input.date),
                value: self.sanitization.sanitize(&input.value),
            };
            let mutability = Mutability::classify(
                key.name(),
                &self.prefix_without_dates,
                &self.prefix_with_dates,
            );

            if let Err(e) = self.insert(key, mutability, sample, &existing) {
                self.log_rejection(&e);
                errors.push(e);
            }
        }

        log::debug!(
            "Set {} driver samples, {} rejected",
            inputs.len() - errors.len(),
            errors.len()
        );
        Ok(errors)
    }

    fn insert(
        &mut self,
        key: DriverKey,
        mutability: Mutability,
        sample: DriverSample,
        existing: &AHashSet<DriverKey>,
    ) -> Result<(), String> {
        match mutability {
            Mutability::Mutable if !self.allow_mutable => {
                return Err(format!("Driver {key} is mutable and this is not allowed"));
            }
            Mutability::Immutable { has_dates: false } if !sample.date.is_epoch() => {
                return Err(format!(
                    "Driver {key} is immutable without dates and the date is not Date(0)"
                ));
            }
            Mutability::Immutable { .. } if existing.contains(&key) => {
                return Err(format!("Driver {key} is immutable and it is already present"));
            }
            _ => {}
        }

        let samples = self.drivers.entry(key).or_default();
        match samples.iter().position(|s| s.date >= sample.date) {
            Some(i) if samples[i].date == sample.date => {
                if !mutability.is_mutable() {
                    return Err(format!(
                        "Driver {key} is immutable and the date {} is already present",
                        sample.date
                    ));
                }
                samples[i].value = sample.value;
            }
            Some(i) => samples.insert(i, sample),
            None => samples.push(sample),
        }
        Ok(())
    }

    fn log_rejection(&self, message: &str) {
        if self.debug_module_info.is_empty() {
            log::warn!("{message}");
        } else {
            log::warn!("{message} [{}]", self.debug_module_info);
        }
    }

    /// Returns the value in effect on the query day: the latest sample dated on or before it.
    ///
    /// Returns `None` if the key is unknown or every sample is later than the query day.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank or JSON5 parsing was requested and fails.
    pub fn get(&self, query: &DriverQuery) -> Result<Option<Value>, DriverError> {
        let Some(samples) = self.find(query)? else {
            return Ok(None);
        };
        let date = self.query_date(query.date);

        samples
            .iter()
            .take_while(|s| s.date <= date)
            .last()
            .map(|s| Self::finish(&s.value, query))
            .transpose()
    }

    /// Returns every value dated from the query day through `end_date`, both inclusive.
    ///
    /// An unknown key yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank, `end_date` falls before the query day, or JSON5
    /// parsing was requested and fails.
    pub fn get_range(
        &self,
        query: &DriverQuery,
        end_date: NaiveDateTime,
    ) -> Result<Vec<Value>, DriverError> {
        let date = self.query_date(query.date);
        let end_date = day_millis(Some(end_date));
        if end_date < date {
            return Err(DriverError::InvalidRange { date, end_date });
        }

        let Some(samples) = self.find(query)? else {
            return Ok(Vec::new());
        };

        samples
            .iter()
            .filter(|s| s.date >= date && s.date <= end_date)
            .map(|s| Self::finish(&s.value, query))
            .collect()
    }

    /// Folds the numeric values of [`get_range`](Self::get_range); other values are skipped.
    ///
    /// Returns `None` when the range holds no numeric value.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`get_range`](Self::get_range).
    pub fn get_range_aggregate(
        &self,
        query: &DriverQuery,
        end_date: NaiveDateTime,
        aggregate: DriverAggregate,
    ) -> Result<Option<f64>, DriverError> {
        let numbers: Vec<f64> = self
            .get_range(query, end_date)?
            .iter()
            .filter_map(Value::as_f64)
            .collect();
        Ok(aggregate.apply(&numbers))
    }

    fn resolve_key(
        &self,
        scenario: Option<&str>,
        unit: Option<&str>,
        name: &str,
    ) -> Result<DriverKey, DriverError> {
        DriverKey::new(
            &normalize_or_default(scenario, &self.current_scenario),
            &normalize_or_default(unit, &self.default_unit),
            name,
        )
    }

    fn find(&self, query: &DriverQuery) -> Result<Option<&Vec<DriverSample>>, DriverError> {
        let key = self.resolve_key(query.scenario.as_deref(), query.unit.as_deref(), &query.name)?;
        if let Some(samples) = self.drivers.get(&key) {
            return Ok(Some(samples));
        }
        if !query.search {
            return Ok(None);
        }

        let scenario = Ustr::from(key.scenario());
        let unit = Ustr::from(key.unit());
        let other_unit = unit != self.default_unit;
        let other_scenario = scenario != self.base_scenario;

        let fallbacks = [
            (other_unit, scenario, self.default_unit),
            (other_scenario, self.base_scenario, unit),
            (other_scenario && other_unit, self.base_scenario, self.default_unit),
        ];

        Ok(fallbacks
            .into_iter()
            .filter(|(applies, _, _)| *applies)
            .find_map(|(_, scenario, unit)| self.drivers.get(&key.with_location(scenario, unit))))
    }

    fn query_date(&self, date: Option<NaiveDateTime>) -> UnixMillis {
        match date {
            Some(date) => day_millis(Some(date)),
            None => self.today,
        }
    }

    fn finish(value: &Value, query: &DriverQuery) -> Result<Value, DriverError> {
        let value = if query.parse_as_json5 {
            parse_json5_value(value).map_err(|e| DriverError::Json5(e.to_string()))?
        } else {
            value.clone()
        };
        Ok(match query.sanitization {
            Some(sanitization) => sanitization.sanitize(&value),
            None => value,
        })
    }
}
