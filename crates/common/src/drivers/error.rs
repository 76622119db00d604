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

use thiserror::Error;
use treasury_core::UnixMillis;

/// Structural errors raised by the driver repository.
///
/// Policy rejections (mutability, duplicates) are not errors: [`DriversRepo::set`] returns them
/// as messages and keeps going.
///
/// [`DriversRepo::set`]: super::DriversRepo::set
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DriverError {
    /// A driver name was missing or blank.
    #[error("Driver name cannot be empty")]
    EmptyName,
    /// The configuration is unusable (blank defaults).
    #[error("Invalid drivers repository configuration: {0}")]
    InvalidConfig(String),
    /// The prefix for immutable drivers with dates starts with the prefix for immutable drivers
    /// without dates, so the two cannot be told apart.
    #[error(
        "Prefix {with_dates} for immutable drivers with dates starts with prefix {without_dates}"
    )]
    InvalidPrefixes {
        without_dates: String,
        with_dates: String,
    },
    /// A range query ends before it starts.
    #[error("Invalid range: `end_date` ({end_date}) is before `date` ({date})")]
    InvalidRange {
        date: UnixMillis,
        end_date: UnixMillis,
    },
    /// A stored value could not be parsed as JSON5.
    #[error("Driver value is not valid JSON5: {0}")]
    Json5(String),
}
