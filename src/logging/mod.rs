// avail-pack: Avail Artifact Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `tracing` setup: a terse console layer plus an optional log file.
//!
//! ```text
//!  level 0..=6 --> directive() --> EnvFilter
//!
//!  registry
//!    +-- console   stderr, no timestamps, avail_pack only above INFO
//!    +-- file      appended, targets + span close events
//!                  "*.json" file name => one JSON object per line
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use bon::Builder;
use serde::{Deserialize, Serialize};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

use crate::error::{ConfigError, Result};

/// Verbosity 0 (silent) to 6 (everything, dependency crates included).
///
/// Update advisories are warnings, so level 2 still shows them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct LogLevel(u8);

impl Default for LogLevel {
    fn default() -> Self {
        Self::INFO
    }
}

impl LogLevel {
    pub const SILENT: Self = Self(0);
    pub const ERROR: Self = Self(1);
    pub const WARN: Self = Self(2);
    pub const INFO: Self = Self(3);
    pub const DEBUG: Self = Self(4);
    pub const TRACE: Self = Self(5);
    pub const DUMP: Self = Self(6);

    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` above 6.
    pub fn new(level: u8) -> std::result::Result<Self, ConfigError> {
        Self::from_u8(level).ok_or_else(|| ConfigError::InvalidValue {
            section: "global".to_string(),
            key: "log_level".to_string(),
            message: format!("log level must be 0-6, got {level}"),
        })
    }

    #[must_use]
    pub const fn from_u8(level: u8) -> Option<Self> {
        if level <= Self::DUMP.0 {
            Some(Self(level))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self.0
    }

    /// `EnvFilter` directive for this level.
    ///
    /// From INFO to TRACE only this crate gets the extra verbosity; HTTP
    /// and archive crates stay at their quieter default.
    #[must_use]
    pub const fn directive(self) -> &'static str {
        match self.0 {
            0 => "off",
            1 => "error",
            2 => "warn",
            3 => "avail_pack=info,warn",
            4 => "avail_pack=debug,info",
            5 => "avail_pack=trace,info",
            _ => "trace",
        }
    }

    fn filter(self) -> EnvFilter {
        EnvFilter::new(self.directive())
    }
}

impl TryFrom<u8> for LogLevel {
    type Error = ConfigError;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LogLevel> for u8 {
    fn from(level: LogLevel) -> Self {
        level.0
    }
}

/// Where and how much to log.
#[derive(Debug, Clone, Builder)]
pub struct LogConfig {
    #[builder(setters(name = with_console_level), default = LogLevel::INFO)]
    console_level: LogLevel,
    #[builder(setters(name = with_file_level), default = LogLevel::TRACE)]
    file_level: LogLevel,
    #[builder(into, setters(name = with_log_file))]
    log_file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl LogConfig {
    #[must_use]
    pub const fn console_level(&self) -> LogLevel {
        self.console_level
    }

    #[must_use]
    pub const fn file_level(&self) -> LogLevel {
        self.file_level
    }

    #[must_use]
    pub fn log_file(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }

    /// Whether the file layer writes JSON lines.
    #[must_use]
    pub fn json_file(&self) -> bool {
        self.log_file
            .as_deref()
            .and_then(Path::extension)
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
    }
}

/// Flushes the file writer when dropped; hold it until exit.
#[must_use = "dropping the guard stops file logging"]
pub struct LogGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Installs the global subscriber.
///
/// # Errors
///
/// Fails if the log directory cannot be created or a subscriber is
/// already installed.
///
/// # Example
///
/// ```no_run
/// use avail_pack::logging::{LogConfig, LogLevel, init_logging};
///
/// let config = LogConfig::builder()
///     .with_console_level(LogLevel::DEBUG)
///     .with_log_file("build/avail-pack.json")
///     .build();
/// let _guard = init_logging(&config)?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn init_logging(config: &LogConfig) -> Result<LogGuard> {
    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .with_filter(config.console_level().filter());

    let (file, file_guard) = match config.log_file() {
        Some(path) => {
            let (writer, guard) = tracing_appender::non_blocking(open_log_file(path)?);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_span_events(FmtSpan::CLOSE);
            let layer = if config.json_file() {
                layer.json().with_filter(config.file_level().filter()).boxed()
            } else {
                layer.with_filter(config.file_level().filter()).boxed()
            };
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(console)
        .with(file)
        .try_init()
        .context("failed to install the tracing subscriber")?;

    Ok(LogGuard {
        _file_guard: file_guard,
    })
}

fn open_log_file(path: &Path) -> Result<std::fs::File> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create log directory {}", parent.display()))?;
    }
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))
}

#[cfg(test)]
mod tests;
