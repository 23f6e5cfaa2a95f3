// avail-pack: Avail Artifact Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options available for all commands.
//!
//! # Option Precedence
//!
//! ```text
//! --ini FILE          ← Additional config files (can repeat)
//! --dry               ← Log writes instead of performing them
//! --log-level N       ← Console verbosity (0-6)
//! --file-log-level    ← File verbosity (defaults to --log-level)
//! -C DIR              ← Project directory
//! --set KEY=VAL       ← Direct config override
//!
//! Precedence: CLI flags > --set > env > --ini > avail.toml > defaults
//! ```

use clap::Args;
use std::path::{Path, PathBuf};

use crate::config::CONFIG_FILE_NAME;

/// Global options available for all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Path to additional TOML configuration file(s).
    /// Can be specified multiple times; later files win.
    #[arg(short = 'i', long = "ini", value_name = "FILE", action = clap::ArgAction::Append)]
    pub inis: Vec<PathBuf>,

    /// Logs what would be created, downloaded or written without touching
    /// the filesystem.
    #[arg(long)]
    pub dry: bool,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace, 6=dump).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub log_level: Option<u8>,

    /// File log level, overrides --log-level for the log file.
    #[arg(long = "file-log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub file_log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Project directory; relative paths in the configuration refer to it.
    #[arg(short = 'C', long = "project-dir", value_name = "DIR")]
    pub project_dir: Option<PathBuf>,

    /// Sets an option, such as 'project.version=1.2.0' or
    /// 'artifact/digest_algorithm=SHA-512'. Can be specified multiple times.
    #[arg(short = 's', long = "set", value_name = "OPTION", action = clap::ArgAction::Append)]
    pub options: Vec<String>,

    /// Disables loading avail.toml from the project directory, only uses --ini.
    #[arg(long = "no-default-inis")]
    pub no_default_inis: bool,
}

impl GlobalOptions {
    /// Project directory, defaulting to the current one.
    #[must_use]
    pub fn project_dir(&self) -> &Path {
        self.project_dir.as_deref().unwrap_or_else(|| Path::new("."))
    }

    /// `avail.toml` inside the project directory.
    #[must_use]
    pub fn default_config_file(&self) -> PathBuf {
        self.project_dir().join(CONFIG_FILE_NAME)
    }

    /// Converts command-line options to configuration overrides.
    ///
    /// `--set` values come first so explicit flags win over them.
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<String> {
        let mut overrides = self.options.clone();

        if let Some(level) = self.log_level {
            overrides.push(format!("global.output_log_level={level}"));
        }

        if let Some(level) = self.file_log_level.or(self.log_level) {
            overrides.push(format!("global.file_log_level={level}"));
        }

        if let Some(ref path) = self.log_file {
            overrides.push(format!("global.log_file={}", path.display()));
        }

        if self.dry {
            overrides.push("global.dry=true".to_string());
        }

        overrides
    }
}
