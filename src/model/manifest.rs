// avail-pack: Avail Artifact Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Artifact manifest written to `META-INF/avail-artifact-manifest.json`.
//!
//! ```json
//! {
//!   "format_version": 1,
//!   "artifact_type": "library",
//!   "jvm_component": null,
//!   "description": "...",
//!   "roots": {
//!     "my-root": {
//!       "extensions": ["avail"],
//!       "entry_points": [],
//!       "description": "",
//!       "digest_algorithm": "SHA-256",
//!       "digests": { "Main.avail": "ab12..." }
//!     }
//!   }
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Archive path of the artifact manifest.
pub const ARTIFACT_MANIFEST_PATH: &str = "META-INF/avail-artifact-manifest.json";

/// Current manifest format.
pub const MANIFEST_FORMAT_VERSION: u32 = 1;

/// Whether the artifact is a reusable library or a runnable application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactType {
    #[default]
    Library,
    Application,
}

impl std::fmt::Display for ArtifactType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Library => write!(f, "library"),
            Self::Application => write!(f, "application"),
        }
    }
}

impl std::str::FromStr for ArtifactType {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "library" => Ok(Self::Library),
            "application" => Ok(Self::Application),
            _ => Err(ConfigError::InvalidValue {
                section: "artifact".to_string(),
                key: "artifact_type".to_string(),
                message: format!("expected 'library' or 'application', got '{s}'"),
            }),
        }
    }
}

/// JVM code shipped alongside the Avail roots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JvmComponent {
    /// What the JVM part provides.
    pub description: String,
}

/// Per-root metadata recorded in the artifact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestRoot {
    pub extensions: Vec<String>,
    pub entry_points: Vec<String>,
    pub description: String,
    pub digest_algorithm: String,
    /// Root-relative path to hex digest.
    pub digests: BTreeMap<String, String>,
}

/// Whole-artifact metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactManifest {
    pub format_version: u32,
    pub artifact_type: ArtifactType,
    pub jvm_component: Option<JvmComponent>,
    pub description: String,
    pub roots: BTreeMap<String, ManifestRoot>,
}

impl ArtifactManifest {
    #[must_use]
    pub const fn new(
        artifact_type: ArtifactType,
        jvm_component: Option<JvmComponent>,
        description: String,
    ) -> Self {
        Self {
            format_version: MANIFEST_FORMAT_VERSION,
            artifact_type,
            jvm_component,
            description,
            roots: BTreeMap::new(),
        }
    }

    /// Pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// # Errors
    ///
    /// Returns an error if `json` is not a valid manifest.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
