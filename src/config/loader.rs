// avail-pack: Avail Artifact Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration loading from multiple sources.
//!
//! # Loader Pipeline
//!
//! ```text
//! ConfigLoader::new()
//!   .with_project_dir()
//!   .add_toml_file(req)
//!   .add_toml_file(opt)
//!   .add_toml_str()
//!   .with_env_prefix()
//!   .set()
//!        |
//!        v
//!    build() --> Config (paths resolved against the project dir)
//! ```

use std::path::{Path, PathBuf};

use super::Config;
use crate::error::{ConfigError, Result};

/// Builder for loading configuration from multiple sources.
pub struct ConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
    env_prefix: Option<String>,
    project_dir: PathBuf,
    files: Vec<(String, PathBuf)>,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: config::Config::builder(),
            env_prefix: None,
            project_dir: PathBuf::from("."),
            files: Vec::new(),
        }
    }

    /// Adds a TOML configuration file to the loader.
    ///
    /// The file will be read when `build()` is called. If the file doesn't exist
    /// or contains invalid TOML, `build()` will return an error.
    #[must_use]
    pub fn add_toml_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        use config::{File, FileFormat};
        let p = path.as_ref();
        self.builder = self
            .builder
            .add_source(File::from(p).format(FileFormat::Toml).required(true));
        self.files.push(("file".to_string(), p.to_path_buf()));
        self
    }

    #[must_use]
    pub fn add_toml_file_optional<P: AsRef<Path>>(mut self, path: P) -> Self {
        use config::{File, FileFormat};
        let p = path.as_ref();
        self.builder = self
            .builder
            .add_source(File::from(p).format(FileFormat::Toml).required(false));
        if p.exists() {
            self.files.push(("optional".to_string(), p.to_path_buf()));
        }
        self
    }

    #[must_use]
    pub fn add_toml_str(mut self, content: &str) -> Self {
        use config::{File, FileFormat};
        self.builder = self
            .builder
            .add_source(File::from_str(content, FileFormat::Toml));
        self.files
            .push(("string".to_string(), PathBuf::from("<string>")));
        self
    }

    /// Directory that relative paths in the configuration refer to.
    #[must_use]
    pub fn with_project_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.project_dir = dir.as_ref().to_path_buf();
        self
    }

    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Sets a configuration override.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or if the value cannot be converted
    /// to a configuration value.
    pub fn set<T: Into<config::Value>>(mut self, key: &str, value: T) -> Result<Self> {
        self.builder = self
            .builder
            .set_override(key, value)
            .map_err(|e| anyhow::anyhow!("Config error: {e}"))?;
        Ok(self)
    }

    /// Applies `section.key=value` overrides, as given to `--set`.
    ///
    /// `section/key` is accepted as well.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for an override without `=` or
    /// with an empty key.
    pub fn apply_overrides(mut self, overrides: &[String]) -> Result<Self> {
        for option in overrides {
            let Some((key, value)) = option.split_once('=') else {
                return Err(ConfigError::InvalidValue {
                    section: "set".to_string(),
                    key: option.clone(),
                    message: "expected 'section.key=value'".to_string(),
                }
                .into());
            };
            let key = key.trim().replace('/', ".");
            if key.is_empty() || key.starts_with('.') || key.ends_with('.') {
                return Err(ConfigError::InvalidValue {
                    section: "set".to_string(),
                    key: option.clone(),
                    message: "empty key".to_string(),
                }
                .into());
            }
            tracing::debug!(key = %key, value = %value, "Config override");
            self = self.set(&key, value.trim())?;
        }
        Ok(self)
    }

    /// Builds the configuration from all added sources.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required configuration files are missing.
    /// - Configuration files have invalid TOML syntax.
    /// - Environment variables cannot be parsed.
    /// - The merged configuration cannot be deserialized into the `Config` struct.
    /// - A digest algorithm or coordinate in it is malformed.
    pub fn build(self) -> Result<Config> {
        let sources = self.describe_sources();
        let builder = match &self.env_prefix {
            Some(prefix) => self.builder.add_source(
                config::Environment::with_prefix(prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            ),
            None => self.builder,
        };
        let parse_error = |e: config::ConfigError| ConfigError::ParseError {
            path: sources.clone(),
            message: e.to_string(),
        };
        let cfg = builder.build().map_err(parse_error)?;
        let mut config: Config = cfg.try_deserialize().map_err(parse_error)?;
        config.resolve_and_validate(&self.project_dir)?;
        Ok(config)
    }

    fn describe_sources(&self) -> String {
        if self.files.is_empty() {
            return "<defaults>".to_string();
        }
        self.files
            .iter()
            .map(|(_, path)| path.display().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }

    #[must_use]
    pub fn loaded_files(&self) -> Vec<(String, PathBuf)> {
        self.files.clone()
    }

    #[must_use]
    pub fn format_loaded_files(&self) -> Vec<String> {
        self.files
            .iter()
            .enumerate()
            .map(|(i, (source, path))| format!("{}. [{}] {}", i + 1, source, path.display()))
            .collect()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
