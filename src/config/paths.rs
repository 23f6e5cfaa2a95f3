// avail-pack: Avail Artifact Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Path resolution against the project directory.
//!
//! ```text
//! <project_dir>/
//!   avail.toml
//!   roots/         project.roots_directory (dependency jars, created roots)
//!   build/libs/    artifact.output_directory
//! ```
//!
//! Absolute paths are kept; relative ones are joined onto the project
//! directory. Root locations are URI-like strings and are resolved when the
//! project is built, not here.

use std::path::{Path, PathBuf};

use super::Config;

/// Joins `path` onto `base` unless it is already absolute.
#[must_use]
pub fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

impl Config {
    /// Makes every filesystem path in the configuration absolute.
    pub(super) fn resolve_paths(&mut self, project_dir: &Path) {
        let resolve = |path: &mut PathBuf| *path = resolve_against(project_dir, path);

        if let Some(log_file) = &mut self.global.log_file {
            resolve(log_file);
        }
        resolve(&mut self.project.roots_directory);
        resolve(&mut self.artifact.output_directory);
        for file in &mut self.artifact.files {
            resolve(&mut file.source);
        }
        for directory in &mut self.artifact.directories {
            resolve(&mut directory.source);
        }
        for archive in &mut self.artifact.archives {
            resolve(archive);
        }
    }
}
