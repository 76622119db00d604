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

//! Core utilities shared by the treasury simulation crates.
//!
//! - [`correctness`]: design-by-contract checks returning `anyhow::Result`.
//! - [`datetime`]: calendar-day handling on top of `chrono`, with the Unix epoch as the
//!   "no date" sentinel.
//! - [`string`]: normalization of case-insensitive identifiers.
//! - [`serialization`]: JSON helpers and relaxed (JSON5) parsing.

pub mod correctness;
pub mod datetime;
pub mod serialization;
pub mod string;

pub use crate::datetime::{EPOCH, UnixMillis};
