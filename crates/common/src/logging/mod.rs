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

//! The logging framework for treasury simulations.
//!
//! Every crate logs through the `log` facade. This module installs a synchronous [`Logger`] that
//! writes `<ISO8601 UTC> [LEVEL] target: message` lines to stdout, with errors on stderr. Levels
//! are configured per module with a [`LoggerConfig`], usually parsed from the `TREASURY_LOG`
//! environment variable.

pub mod config;
pub mod logger;
pub mod writer;

use std::sync::atomic::{AtomicBool, Ordering};

// Re-exports
pub use self::{
    config::{LoggerConfig, TREASURY_LOG},
    logger::{LogLine, Logger},
};

static LOGGING_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Returns whether the treasury logger is installed.
pub fn logging_is_initialized() -> bool {
    LOGGING_INITIALIZED.load(Ordering::Relaxed)
}

/// Initialize logging.
///
/// Only the first call installs the logger; later calls are no-ops.
///
/// # Errors
///
/// Returns an error if another `log` logger was already installed.
pub fn init_logging(config: LoggerConfig) -> anyhow::Result<()> {
    if LOGGING_INITIALIZED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }

    Logger::init_with_config(config).inspect_err(|_| {
        LOGGING_INITIALIZED.store(false, Ordering::SeqCst);
    })
}

/// Initialize logging from the `TREASURY_LOG` environment variable, falling back to the default
/// configuration when it is unset.
///
/// # Errors
///
/// Returns an error if `TREASURY_LOG` is set but invalid, or if initialization fails.
pub fn init_logging_from_env() -> anyhow::Result<()> {
    let config = match std::env::var(TREASURY_LOG) {
        Ok(spec) => LoggerConfig::from_spec(&spec)?,
        Err(_) => LoggerConfig::default(),
    };
    init_logging(config)
}
