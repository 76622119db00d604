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

//! Configuration for the driver repository.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use strum::{AsRefStr, Display, EnumIter, EnumString};
use treasury_core::serialization::Serializable;

/// Configuration for a [`DriversRepo`](super::DriversRepo).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriversRepoConfig {
    /// Scenario searched last when falling back.
    pub base_scenario: String,
    /// Scenario used when a sample or query does not name one.
    pub current_scenario: String,
    /// Unit used when a sample or query does not name one.
    pub default_unit: String,
    /// Shape every stored value is sanitized to.
    pub sanitization: ValueSanitization,
    /// Names starting with this prefix are immutable and undated.
    pub prefix_immutable_without_dates: String,
    /// Names starting with this prefix are immutable, one sample per date.
    pub prefix_immutable_with_dates: String,
    /// Whether names without an immutable prefix may be written.
    pub allow_mutable: bool,
}

impl Default for DriversRepoConfig {
    fn default() -> Self {
        Self {
            base_scenario: "base".to_string(),
            current_scenario: "base".to_string(),
            default_unit: "simulation".to_string(),
            sanitization: ValueSanitization::Any,
            prefix_immutable_without_dates: "$$".to_string(),
            prefix_immutable_with_dates: "$".to_string(),
            allow_mutable: false,
        }
    }
}

impl Serializable for DriversRepoConfig {}

impl DriversRepoConfig {
    /// Parses a configuration from JSON; missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if `json` is not a valid configuration object.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        Self::from_json_str(json)
            .map_err(|e| anyhow::anyhow!("Invalid drivers repository config: {e}"))
    }
}

/// The shape a driver value is coerced to.
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
pub enum ValueSanitization {
    /// Keep the value as given.
    #[default]
    Any,
    /// Numbers; numeric strings are parsed, booleans map to 1/0, anything else becomes 0.
    Number,
    /// Strings; scalars are stringified and `null` or blank text becomes `""`.
    String,
    /// Booleans by truthiness; `"false"` and blank text are false.
    Boolean,
}

impl ValueSanitization {
    /// Coerces `value` to this shape.
    #[must_use]
    pub fn sanitize(&self, value: &Value) -> Value {
        match self {
            Self::Any => value.clone(),
            Self::Number => sanitize_number(value),
            Self::String => Value::String(sanitize_string(value)),
            Self::Boolean => Value::Bool(sanitize_bool(value)),
        }
    }
}

fn sanitize_number(value: &Value) -> Value {
    let number = match value {
        Value::Number(_) => return value.clone(),
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .unwrap_or(0.0),
        Value::Null | Value::Array(_) | Value::Object(_) => 0.0,
    };
    number_value(number)
}

/// Integral values become JSON integers, the rest JSON floats; `-0` becomes `0`.
fn number_value(number: f64) -> Value {
    const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

    if number == 0.0 {
        return Value::from(0);
    }
    if number.fract() == 0.0 && number.abs() <= MAX_SAFE_INTEGER {
        return Value::from(number as i64);
    }
    Number::from_f64(number).map_or_else(|| Value::from(0), Value::Number)
}

fn sanitize_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) if s.trim().is_empty() => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

fn sanitize_bool(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => {
            let s = s.trim();
            !(s.is_empty() || s.eq_ignore_ascii_case("false"))
        }
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// A fold over the numeric samples of a date range.
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
pub enum DriverAggregate {
    Sum,
    Average,
    Min,
    Max,
}

impl DriverAggregate {
    /// Folds `values`, returning `None` when there are none.
    #[must_use]
    pub fn apply(&self, values: &[f64]) -> Option<f64> {
        if values.is_empty() {
            return None;
        }
        let sum = || values.iter().sum::<f64>();
        Some(match self {
            Self::Sum => sum(),
            Self::Average => sum() / values.len() as f64,
            Self::Min => values.iter().copied().fold(f64::INFINITY, f64::min),
            Self::Max => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        })
    }
}
