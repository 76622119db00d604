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

//! Calendar-day timestamps.
//!
//! Simulation inputs are indexed by calendar day, not by instant. A [`UnixMillis`] produced by
//! [`day_millis`] is always midnight of its day, except for the Unix epoch itself which doubles
//! as the "no date" sentinel ([`EPOCH`]).

use std::fmt::{Debug, Display};

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Milliseconds since the Unix epoch (UTC).
#[repr(transparent)]
#[derive(Clone, Copy, Default, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnixMillis(i64);

/// The Unix epoch, used as the date of undated values.
pub const EPOCH: UnixMillis = UnixMillis(0);

impl UnixMillis {
    /// Creates a new [`UnixMillis`] from a raw millisecond count.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw millisecond count.
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        self.0
    }

    /// Returns `true` if this is the Unix epoch.
    #[must_use]
    pub const fn is_epoch(&self) -> bool {
        self.0 == 0
    }

    /// Converts a naive date-time (interpreted as UTC) to milliseconds, keeping the time of day.
    #[must_use]
    pub fn from_datetime(dt: NaiveDateTime) -> Self {
        Self(dt.and_utc().timestamp_millis())
    }

    /// Converts back to a naive UTC date-time, or `None` if out of `chrono` range.
    #[must_use]
    pub fn to_datetime(&self) -> Option<NaiveDateTime> {
        DateTime::from_timestamp_millis(self.0).map(|dt| dt.naive_utc())
    }

    /// Formats the day as `YYYY-MM-DD`.
    #[must_use]
    pub fn to_yyyymmdd(&self) -> String {
        match self.to_datetime() {
            Some(dt) => dt.format("%Y-%m-%d").to_string(),
            None => format!("{}ms", self.0),
        }
    }
}

impl From<i64> for UnixMillis {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<NaiveDate> for UnixMillis {
    fn from(value: NaiveDate) -> Self {
        Self::from_datetime(value.and_time(NaiveTime::MIN))
    }
}

impl Debug for UnixMillis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", stringify!(UnixMillis), self.0)
    }
}

impl Display for UnixMillis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_yyyymmdd())
    }
}

/// Drops the time-of-day component, returning midnight of the same day.
#[must_use]
pub fn strip_time(dt: NaiveDateTime) -> NaiveDateTime {
    dt.date().and_time(NaiveTime::MIN)
}

/// Resolves an optional date-time to the calendar day it falls on.
///
/// A missing date, or one exactly at the epoch, resolves to [`EPOCH`]. Any other date has its
/// time of day stripped.
#[must_use]
pub fn day_millis(date: Option<NaiveDateTime>) -> UnixMillis {
    match date {
        None => EPOCH,
        Some(dt) => {
            let millis = UnixMillis::from_datetime(dt);
            if millis.is_epoch() {
                EPOCH
            } else {
                UnixMillis::from_datetime(strip_time(dt))
            }
        }
    }
}

/// Builds midnight of the given calendar day, or `None` if the day does not exist.
#[must_use]
pub fn naive_day(year: i32, month: u32, day: u32) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(year, month, day).map(|d| d.and_time(NaiveTime::MIN))
}
