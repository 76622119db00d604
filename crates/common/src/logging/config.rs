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

//! Logging configuration types and parsing.
//!
//! # Spec String Format
//!
//! The `TREASURY_LOG` environment variable uses a semicolon-separated format:
//!
//! ```text
//! stdout=Info;treasury_common::drivers=Debug;is_colored
//! ```
//!
//! ## Supported Keys
//!
//! | Key              | Type      | Description                                      |
//! |------------------|-----------|--------------------------------------------------|
//! | `stdout`         | Log level | Maximum level for stdout output.                 |
//! | `is_colored`     | Boolean   | Enable ANSI colors (default: true).              |
//! | `print_config`   | Boolean   | Print config to stdout at startup.               |
//! | `<module::path>` | Log level | Module-specific log level (longest prefix wins). |
//!
//! Log levels are case-insensitive: `Off`, `Error`, `Warn`, `Info`, `Debug`, `Trace`.
//! Booleans may be bare flags (`is_colored`) or explicit (`is_colored=false`, `=0`, `=no`).

use std::{env, str::FromStr};

use ahash::AHashMap;
use log::LevelFilter;
use ustr::Ustr;

/// The environment variable read by [`LoggerConfig::from_env`].
pub const TREASURY_LOG: &str = "TREASURY_LOG";

/// Configuration for the treasury logger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    /// Maximum log level for stdout output. Errors always go to stderr.
    pub stdout_level: LevelFilter,
    /// Per-module path log level overrides (prefix match).
    pub module_level: AHashMap<Ustr, LevelFilter>,
    /// Use ANSI color codes in output.
    pub is_colored: bool,
    /// Print configuration to stdout at startup.
    pub print_config: bool,
}

impl Default for LoggerConfig {
    /// Creates a new default [`LoggerConfig`] instance.
    fn default() -> Self {
        Self {
            stdout_level: LevelFilter::Info,
            module_level: AHashMap::new(),
            is_colored: true,
            print_config: false,
        }
    }
}

impl LoggerConfig {
    /// Creates a new [`LoggerConfig`] instance.
    #[must_use]
    pub fn new(
        stdout_level: LevelFilter,
        module_level: AHashMap<Ustr, LevelFilter>,
        is_colored: bool,
        print_config: bool,
    ) -> Self {
        Self {
            stdout_level,
            module_level,
            is_colored,
            print_config,
        }
    }

    /// Parses a configuration from a spec string.
    ///
    /// # Errors
    ///
    /// Returns an error if the spec string contains invalid syntax or log levels.
    pub fn from_spec(spec: &str) -> anyhow::Result<Self> {
        let mut config = Self::default();

        for kv in spec.split(';') {
            let kv = kv.trim();
            if kv.is_empty() {
                continue;
            }

            let Some((k, v)) = kv.split_once('=') else {
                match kv.to_lowercase().as_str() {
                    "is_colored" => config.is_colored = true,
                    "print_config" => config.print_config = true,
                    _ => anyhow::bail!("Invalid spec pair: {kv}"),
                }
                continue;
            };

            let k = k.trim();
            let v = v.trim();
            if k.is_empty() {
                anyhow::bail!("Invalid spec pair: {kv}");
            }

            match k.to_lowercase().as_str() {
                "is_colored" => config.is_colored = parse_bool_value(v),
                "print_config" => config.print_config = parse_bool_value(v),
                "stdout" => config.stdout_level = parse_level(v)?,
                _ => {
                    config.module_level.insert(Ustr::from(k), parse_level(v)?);
                }
            }
        }

        Ok(config)
    }

    /// Parses configuration from the `TREASURY_LOG` environment variable.
    ///
    /// # Errors
    ///
    /// Returns an error if the variable is unset or contains invalid syntax.
    pub fn from_env() -> anyhow::Result<Self> {
        let spec = env::var(TREASURY_LOG)?;
        Self::from_spec(&spec)
    }

    /// Returns the level filter for a log target.
    ///
    /// The longest module override that prefixes `target` wins; otherwise `stdout_level`.
    #[must_use]
    pub fn level_for(&self, target: &str) -> LevelFilter {
        self.module_level
            .iter()
            .filter(|(module, _)| target.starts_with(module.as_str()))
            .max_by_key(|(module, _)| module.len())
            .map_or(self.stdout_level, |(_, level)| *level)
    }

    /// Returns the most verbose level any target can reach.
    #[must_use]
    pub fn max_level(&self) -> LevelFilter {
        self.module_level
            .values()
            .copied()
            .chain(std::iter::once(self.stdout_level))
            .max()
            .unwrap_or(self.stdout_level)
    }
}

/// Parses a boolean value from a string.
///
/// Returns `true` unless the value is explicitly "false", "0", or "no" (case-insensitive).
fn parse_bool_value(v: &str) -> bool {
    !matches!(v.to_lowercase().as_str(), "false" | "0" | "no")
}

fn parse_level(v: &str) -> anyhow::Result<LevelFilter> {
    LevelFilter::from_str(v).map_err(|_| anyhow::anyhow!("Invalid log level: {v}"))
}
