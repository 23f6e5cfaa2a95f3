// avail-pack: Avail Artifact Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Avail library dependencies published as Maven-style jars.

use std::fmt;
use std::path::{Path, PathBuf};

use super::root::{Root, RootLocation};
use crate::error::ConfigError;

/// A named library dependency, `group:artifact:version`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryDependency {
    name: String,
    group: String,
    artifact: String,
    version: String,
}

impl LibraryDependency {
    /// Parses a coordinate string for the dependency called `name`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidCoordinate` unless the coordinate has
    /// exactly three non-empty colon-separated fields.
    pub fn parse(
        name: impl Into<String>,
        coordinate: &str,
    ) -> std::result::Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidCoordinate {
            coordinate: coordinate.to_string(),
        };
        let fields: Vec<&str> = coordinate.split(':').collect();
        let [group, artifact, version] = fields.as_slice() else {
            return Err(invalid());
        };
        if [group, artifact, version].iter().any(|f| f.trim().is_empty()) {
            return Err(invalid());
        }
        Ok(Self {
            name: name.into(),
            group: (*group).to_string(),
            artifact: (*artifact).to_string(),
            version: (*version).to_string(),
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn group(&self) -> &str {
        &self.group
    }

    #[must_use]
    pub fn artifact(&self) -> &str {
        &self.artifact
    }

    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Reassembles `group:artifact:version`.
    #[must_use]
    pub fn coordinate(&self) -> String {
        format!("{}:{}:{}", self.group, self.artifact, self.version)
    }

    /// Same coordinate with a different version.
    #[must_use]
    pub fn with_version(&self, version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            ..self.clone()
        }
    }

    /// `<artifact>-<version>.jar`
    #[must_use]
    pub fn jar_file_name(&self) -> String {
        format!("{}-{}.jar", self.artifact, self.version)
    }

    /// Where the jar lands once resolved into `roots_dir`.
    #[must_use]
    pub fn resolved_file_path(&self, roots_dir: &Path) -> PathBuf {
        roots_dir.join(self.jar_file_name())
    }

    /// A root whose sources are the resolved jar.
    #[must_use]
    pub fn to_root(&self, roots_dir: &Path) -> Root {
        Root::new(
            self.name.clone(),
            RootLocation::Jar {
                archive: self.resolved_file_path(roots_dir),
                prefix: String::new(),
            },
        )
        .with_description(format!("Library dependency {}", self.coordinate()))
    }
}

impl fmt::Display for LibraryDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.coordinate())
    }
}
