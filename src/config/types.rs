// avail-pack: Avail Artifact Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration section types.
//!
//! # Config Structure
//!
//! ```text
//! Config
//!   global        GlobalConfig       dry run, log levels, log file
//!   project       ProjectConfig      name, version, roots_directory, runtime
//!   artifact      ArtifactConfig     packaging options + extra inclusions
//!   roots.<n>     RootConfig         existing source roots
//!   create_roots.<n> CreateRootConfig roots scaffolded by `init`
//!   dependencies  name -> "group:artifact:version"
//!   repositories  RepositoriesConfig Maven repositories, in lookup order
//!   aliases       name -> [task patterns]
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::logging::LogLevel;
use crate::model::{ArtifactType, JvmComponent};

/// Maven Central, where published Avail libraries live.
pub const MAVEN_CENTRAL: &str = "https://repo.maven.apache.org/maven2";

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log what would happen without writing anything.
    pub dry: bool,
    /// Log level for stdout output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Path to log file; no file logging when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            dry: false,
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::TRACE,
            log_file: None,
        }
    }
}

/// Project identity and layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    /// Project name; defaults to the project directory name.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Project version, used in the artifact file name.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub version: String,
    /// Where dependency jars are resolved to and roots are created.
    pub roots_directory: PathBuf,
    /// Avail runtime coordinate, checked by `check-updates` and optionally
    /// embedded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime: Option<String>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            version: String::new(),
            roots_directory: PathBuf::from("roots"),
            runtime: None,
        }
    }
}

/// A single file copied into the artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileInclusionConfig {
    pub source: PathBuf,
    /// Entry name; a trailing `/` appends the source file name.
    pub target: String,
}

/// A directory copied recursively into the artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DirectoryInclusionConfig {
    pub source: PathBuf,
    /// Entry prefix; empty places the contents at the archive root.
    #[serde(default)]
    pub target: String,
}

/// Packaging options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArtifactConfig {
    /// Base name of the artifact file; defaults to the project name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub output_directory: PathBuf,
    pub artifact_type: ArtifactType,
    pub digest_algorithm: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jvm_component: Option<JvmComponent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_class: Option<String>,
    /// `Implementation-Title`; defaults to the artifact name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub implementation_title: Option<String>,
    pub description: String,
    /// Comment placed at the top of scaffolded modules.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_header: Option<String>,
    /// Coordinates resolved and merged into the artifact.
    pub embed: Vec<String>,
    /// Also embed `project.runtime`.
    pub include_runtime: bool,
    pub files: Vec<FileInclusionConfig>,
    pub directories: Vec<DirectoryInclusionConfig>,
    /// Archives whose entries are merged into the artifact.
    pub archives: Vec<PathBuf>,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            name: None,
            output_directory: PathBuf::from("build/libs"),
            artifact_type: ArtifactType::default(),
            digest_algorithm: "SHA-256".to_string(),
            jvm_component: None,
            main_class: None,
            implementation_title: None,
            description: String::new(),
            module_header: None,
            embed: Vec::new(),
            include_runtime: false,
            files: Vec::new(),
            directories: Vec::new(),
            archives: Vec::new(),
        }
    }
}

fn default_extensions() -> Vec<String> {
    vec!["avail".to_string()]
}

/// An existing source root.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RootConfig {
    /// `file:` URI, `jar:` URI or plain path.
    pub location: String,
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    #[serde(default)]
    pub entry_points: Vec<String>,
    #[serde(default)]
    pub description: String,
}

/// A root scaffolded onto disk by `init`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateRootConfig {
    /// Defaults to `<roots_directory>/<name>`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    #[serde(default)]
    pub entry_points: Vec<String>,
    #[serde(default)]
    pub description: String,
    /// Single-file modules, without extension.
    #[serde(default)]
    pub modules: Vec<String>,
    /// Module packages (directory + representative module), without extension.
    #[serde(default)]
    pub packages: Vec<String>,
    /// Overrides `artifact.module_header` for this root's modules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_header: Option<String>,
}

/// Maven repositories, tried in order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RepositoriesConfig {
    /// `https://` URLs, `file:` URIs or plain directories.
    pub urls: Vec<String>,
}

impl Default for RepositoriesConfig {
    fn default() -> Self {
        Self {
            urls: vec![MAVEN_CENTRAL.to_string()],
        }
    }
}

/// Task aliases mapping alias names to task patterns.
pub type Aliases = BTreeMap<String, Vec<String>>;
