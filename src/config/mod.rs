// avail-pack: Avail Artifact Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for avail-pack.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. avail.toml (project dir, optional)
//! 3. --ini files
//! 4. AVAIL_PACK_* env vars
//! 5. --set key=value overrides
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! AVAIL_PACK_GLOBAL__DRY=true                     → global.dry = true
//! AVAIL_PACK_PROJECT__VERSION=1.2.0               → project.version = "1.2.0"
//! AVAIL_PACK_ARTIFACT__DIGEST_ALGORITHM=SHA-512   → artifact.digest_algorithm = "SHA-512"
//! ```
//!
//! `__` separates nesting levels, so single underscores stay part of a key.
//!
//! # Example
//!
//! ```toml
//! [project]
//! name = "my-avail-lib"
//! version = "1.0.0"
//! runtime = "org.availlang:avail:2.0.0"
//!
//! [artifact]
//! digest_algorithm = "SHA-256"
//! embed = ["org.availlang:avail-json:1.2.0"]
//!
//! [[artifact.files]]
//! source = "LICENSE"
//! target = "META-INF/"
//!
//! [roots.my-lib]
//! location = "src/avail/my-lib"
//! entry_points = ["Main"]
//!
//! [create_roots.scratch]
//! modules = ["Scratch"]
//! packages = ["Experiments"]
//!
//! [dependencies]
//! avail-stdlib = "org.availlang:avail-stdlib:2.0.0"
//! ```

pub mod loader;
pub mod paths;
pub mod types;


use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::model::{DigestAlgorithm, LibraryDependency};
use crate::resolve::Repository;

pub use loader::ConfigLoader;
use types::{
    Aliases, ArtifactConfig, CreateRootConfig, GlobalConfig, ProjectConfig, RepositoriesConfig,
    RootConfig,
};

/// Name of the per-project configuration file.
pub const CONFIG_FILE_NAME: &str = "avail.toml";

/// Prefix of environment overrides, e.g. `AVAIL_PACK_GLOBAL__DRY`.
pub const ENV_PREFIX: &str = "AVAIL_PACK";

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub global: GlobalConfig,
    pub project: ProjectConfig,
    pub artifact: ArtifactConfig,
    /// Existing roots by name.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub roots: BTreeMap<String, RootConfig>,
    /// Roots to scaffold by name.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub create_roots: BTreeMap<String, CreateRootConfig>,
    /// Library dependencies, name to coordinate, in declaration order.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub dependencies: IndexMap<String, String>,
    pub repositories: RepositoriesConfig,
    pub aliases: Aliases,
    /// Directory relative paths were resolved against.
    #[serde(skip)]
    project_dir: PathBuf,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use avail_pack::config::Config;
    ///
    /// let config = Config::builder()
    ///     .with_project_dir("my-project")
    ///     .add_toml_file_optional("my-project/avail.toml")
    ///     .with_env_prefix(avail_pack::config::ENV_PREFIX)
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file, relative to its directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let project_dir = path.parent().unwrap_or_else(|| Path::new("."));
        Self::builder()
            .with_project_dir(project_dir)
            .add_toml_file(path)
            .build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    #[must_use]
    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// Resolve paths against `project_dir` and validate values that would
    /// otherwise only fail halfway through packaging.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` for an unknown digest algorithm or a malformed
    /// dependency, embed or runtime coordinate.
    pub fn resolve_and_validate(&mut self, project_dir: &Path) -> Result<()> {
        self.project_dir = project_dir.to_path_buf();
        self.resolve_paths(project_dir);

        if self.project.name.is_empty()
            && let Some(name) = std::path::absolute(project_dir)
                .ok()
                .and_then(|dir| dir.file_name().map(|n| n.to_string_lossy().into_owned()))
        {
            self.project.name = name;
        }

        self.digest_algorithm()?;
        self.library_dependencies()?;
        self.embedded_dependencies()?;
        self.runtime()?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `ConfigError::UnknownDigestAlgorithm` for unsupported names.
    pub fn digest_algorithm(&self) -> Result<DigestAlgorithm> {
        Ok(self.artifact.digest_algorithm.parse()?)
    }

    /// Artifact base name: `artifact.name`, else `project.name`.
    #[must_use]
    pub fn artifact_name(&self) -> &str {
        self.artifact
            .name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.project.name)
    }

    /// `[dependencies]` in declaration order.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidCoordinate` for the first malformed entry.
    pub fn library_dependencies(&self) -> Result<Vec<LibraryDependency>> {
        self.dependencies
            .iter()
            .map(|(name, coordinate)| Ok(LibraryDependency::parse(name.as_str(), coordinate)?))
            .collect()
    }

    /// `artifact.embed`, plus the runtime when `artifact.include_runtime` is set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidCoordinate` for the first malformed entry.
    pub fn embedded_dependencies(&self) -> Result<Vec<LibraryDependency>> {
        let mut embedded = self
            .artifact
            .embed
            .iter()
            .map(|coordinate| {
                let artifact = coordinate.split(':').nth(1).unwrap_or(coordinate);
                Ok(LibraryDependency::parse(artifact, coordinate)?)
            })
            .collect::<Result<Vec<_>>>()?;
        if self.artifact.include_runtime
            && let Some(runtime) = self.runtime()?
        {
            embedded.push(runtime);
        }
        Ok(embedded)
    }

    /// `project.runtime` as a dependency named `avail-runtime`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidCoordinate` if the coordinate is malformed.
    pub fn runtime(&self) -> Result<Option<LibraryDependency>> {
        self.project
            .runtime
            .as_deref()
            .map(|coordinate| Ok(LibraryDependency::parse("avail-runtime", coordinate)?))
            .transpose()
    }

    /// Configured repositories; local paths resolve against the project dir.
    #[must_use]
    pub fn repositories(&self) -> Vec<Repository> {
        self.repositories
            .urls
            .iter()
            .map(|url| Repository::parse(url, &self.project_dir))
            .collect()
    }
}
