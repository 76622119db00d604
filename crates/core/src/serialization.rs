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

//! Common serialization traits and functions.
//!
//! Settings and driver values arrive as text. Settings are strict JSON, driver values may use
//! the relaxed JSON5 notation (unquoted keys, single quotes, trailing commas, comments).

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Represents types which are serializable for JSON specifications.
pub trait Serializable: Serialize + for<'de> Deserialize<'de> {
    /// Deserialize an object from JSON encoded bytes.
    ///
    /// # Errors
    ///
    /// Returns serialization errors.
    fn from_json_bytes(data: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(data)
    }

    /// Deserialize an object from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns serialization errors.
    fn from_json_str(data: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(data)
    }

    /// Serialize an object to JSON encoded bytes.
    ///
    /// # Errors
    ///
    /// Returns serialization errors.
    fn to_json_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

/// Parses a JSON5 document into a structured JSON value.
///
/// # Errors
///
/// Returns an error if `text` is not valid JSON5.
///
/// # Examples
///
/// ```
/// use treasury_core::serialization::parse_json5;
///
/// let value = parse_json5("{rate: 'fixed', spread: 0.5,}").unwrap();
/// assert_eq!(value["rate"], "fixed");
/// ```
pub fn parse_json5(text: &str) -> Result<Value, json5::Error> {
    json5::from_str::<Value>(text)
}

/// Parses a stored value as JSON5 when it is a string; other values are already structured and
/// are returned unchanged.
///
/// # Errors
///
/// Returns an error if `value` is a string that is not valid JSON5.
pub fn parse_json5_value(value: &Value) -> Result<Value, json5::Error> {
    match value {
        Value::String(text) => parse_json5(text),
        other => Ok(other.clone()),
    }
}
