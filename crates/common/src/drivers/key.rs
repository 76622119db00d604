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

//! Driver keys and mutability classification.

use std::fmt::{Debug, Display};

use serde::Serialize;
use treasury_core::string::normalize_identifier;
use ustr::Ustr;

use super::error::DriverError;

/// The composite key of a driver: scenario, unit and name, each trimmed and lowercased.
///
/// Equality and hashing are on the normalized components. `Display` renders the key as a small
/// JSON object, the form used in rejection messages:
///
/// ```text
/// {"scenario":"scenario1","unit":"unita","name":"$driver xyz"}
/// ```
#[derive(Clone, Copy, Hash, PartialEq, Eq, Serialize)]
pub struct DriverKey {
    scenario: Ustr,
    unit: Ustr,
    name: Ustr,
}

impl DriverKey {
    /// Creates a new [`DriverKey`] from already resolved components.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::EmptyName`] if `name` is blank.
    pub fn new(scenario: &str, unit: &str, name: &str) -> Result<Self, DriverError> {
        let name = normalize_identifier(name);
        if name.is_empty() {
            return Err(DriverError::EmptyName);
        }
        Ok(Self {
            scenario: Ustr::from(&normalize_identifier(scenario)),
            unit: Ustr::from(&normalize_identifier(unit)),
            name: Ustr::from(&name),
        })
    }

    #[must_use]
    pub fn scenario(&self) -> &str {
        self.scenario.as_str()
    }

    #[must_use]
    pub fn unit(&self) -> &str {
        self.unit.as_str()
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the same driver name under a different scenario and unit.
    #[must_use]
    pub(crate) fn with_location(&self, scenario: Ustr, unit: Ustr) -> Self {
        Self {
            scenario,
            unit,
            name: self.name,
        }
    }
}

impl Debug for DriverKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({self})", stringify!(DriverKey))
    }
}

impl Display for DriverKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| std::fmt::Error)?;
        f.write_str(&json)
    }
}

/// How a driver may be written, decided by its name prefix.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Mutability {
    /// Written once. Without dates only a single undated (epoch) sample is accepted.
    Immutable { has_dates: bool },
    /// Samples may be overwritten per date.
    Mutable,
}

impl Mutability {
    /// Classifies a normalized driver name.
    ///
    /// The prefix for drivers without dates is checked first, so it wins when both match.
    #[must_use]
    pub fn classify(name: &str, prefix_without_dates: &str, prefix_with_dates: &str) -> Self {
        if name.starts_with(prefix_without_dates) {
            Self::Immutable { has_dates: false }
        } else if name.starts_with(prefix_with_dates) {
            Self::Immutable { has_dates: true }
        } else {
            Self::Mutable
        }
    }

    #[must_use]
    pub const fn is_mutable(&self) -> bool {
        matches!(self, Self::Mutable)
    }
}
