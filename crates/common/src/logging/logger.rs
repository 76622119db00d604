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

//! The logger behind the `log` facade.

use std::{fmt::Display, sync::Mutex};

use chrono::{DateTime, SecondsFormat, Utc};
use log::{Level, LevelFilter, Log, STATIC_MAX_LEVEL, set_boxed_logger, set_max_level};
use ustr::Ustr;

use super::{
    config::LoggerConfig,
    writer::{LogWriter, StderrWriter, StdoutWriter},
};

/// Represents a log event which includes a message.
#[derive(Clone, Debug)]
pub struct LogLine {
    /// The timestamp for the event.
    pub timestamp: DateTime<Utc>,
    /// The log level for the event.
    pub level: Level,
    /// The module path the event originated from.
    pub target: Ustr,
    /// The log message content.
    pub message: String,
}

impl LogLine {
    /// Returns the plain log line, newline terminated.
    #[must_use]
    pub fn get_string(&self) -> String {
        format!(
            "{} [{}] {}: {}\n",
            self.iso8601(),
            self.level,
            self.target,
            self.message,
        )
    }

    /// Returns the log line with ANSI colors, newline terminated.
    #[must_use]
    pub fn get_colored(&self) -> String {
        format!(
            "\x1b[1m{}\x1b[0m {}[{}] {}: {}\x1b[0m\n",
            self.iso8601(),
            level_ansi(self.level),
            self.level,
            self.target,
            self.message,
        )
    }

    fn iso8601(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Nanos, true)
    }
}

impl Display for LogLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.level, self.target, self.message)
    }
}

const fn level_ansi(level: Level) -> &'static str {
    match level {
        Level::Error => "\x1b[1;31m",
        Level::Warn => "\x1b[1;33m",
        Level::Info => "",
        Level::Debug | Level::Trace => "\x1b[36m",
    }
}

/// A synchronous logger writing to stdout, with errors on stderr.
#[derive(Debug)]
pub struct Logger {
    /// Configuration for logging levels and behavior.
    pub config: LoggerConfig,
    stdout: Mutex<StdoutWriter>,
    stderr: Mutex<StderrWriter>,
}

impl Logger {
    /// Creates a new [`Logger`] instance.
    #[must_use]
    pub fn new(config: LoggerConfig) -> Self {
        // Module overrides may be more verbose than `stdout_level`, so the writer
        // admits the most verbose level and `enabled` filters per target
        let stdout = StdoutWriter::new(config.max_level(), config.is_colored);
        let stderr = StderrWriter::new(config.is_colored);
        Self {
            config,
            stdout: Mutex::new(stdout),
            stderr: Mutex::new(stderr),
        }
    }

    /// Installs a [`Logger`] as the global `log` logger.
    ///
    /// # Errors
    ///
    /// Returns an error if a global logger is already installed.
    pub fn init_with_config(config: LoggerConfig) -> anyhow::Result<()> {
        // Errors reach stderr whatever the configured levels
        let max_level = config.max_level().max(LevelFilter::Error);
        if config.print_config {
            println!("STATIC_MAX_LEVEL={STATIC_MAX_LEVEL}");
            println!("Logger initialized with {config:?}");
        }

        set_boxed_logger(Box::new(Self::new(config)))?;
        set_max_level(max_level);
        Ok(())
    }

    fn write_to<W: LogWriter>(writer: &Mutex<W>, line: &LogLine, is_colored: bool) {
        let Ok(mut writer) = writer.lock() else {
            return;
        };
        if writer.enabled(line) {
            let text = if is_colored {
                line.get_colored()
            } else {
                line.get_string()
            };
            writer.write(&text);
        }
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() == Level::Error
            || metadata.level() <= self.config.level_for(metadata.target())
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = LogLine {
            timestamp: Utc::now(),
            level: record.level(),
            target: Ustr::from(record.target()),
            message: record.args().to_string(),
        };
        Self::write_to(&self.stdout, &line, self.config.is_colored);
        Self::write_to(&self.stderr, &line, self.config.is_colored);
    }

    fn flush(&self) {
        if let Ok(mut w) = self.stdout.lock() {
            w.flush();
        }
        if let Ok(mut w) = self.stderr.lock() {
            w.flush();
        }
    }
}
