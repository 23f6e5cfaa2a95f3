// avail-pack: Avail Artifact Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Artifact packaging.
//!
//! ```text
//! ArtifactPackager::package(dependencies)
//!   1. create output parent, delete stale artifact
//!   2. META-INF/MANIFEST.MF
//!   3. roots      <root>/...          (digested)
//!   4. inclusions files, directories, archives
//!   5. dependencies  .jar/.zip merged, directories copied
//!   6. META-INF/avail-artifact-manifest.json
//!   7. finish
//! ```
//!
//! The first entry written under a name wins. Nested `META-INF/MANIFEST.MF`
//! files are dropped; nested artifact manifests, from archives, directories
//! or single files, contribute their roots and are never copied. Digests
//! cover exactly the entries written. A failed run leaves no file behind.

pub mod writer;


use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::Context;
use bon::Builder;
use tracing::{debug, info, warn};

use crate::error::{ArtifactError, PackError, Result};
use crate::model::manifest::ARTIFACT_MANIFEST_PATH;
use crate::model::{ArtifactManifest, Root, RootLocation};
use crate::project::{ArtifactOptions, AvailProject};
use crate::utility::fs::guard::PartialFileGuard;
use crate::utility::fs::walk::{WalkOptions, entry_name, walk_files};

use writer::{JarWriter, MANIFEST_MF_PATH, read_archive_tree};

/// Builds one artifact from a project's roots, inclusions and dependencies.
#[derive(Debug, Clone, Builder)]
pub struct ArtifactPackager {
    options: ArtifactOptions,
    /// Roots packaged under `<name>/`.
    #[builder(default)]
    roots: Vec<Root>,
    /// Replaces the path derived from the options.
    #[builder(setters(name = with_output))]
    output: Option<PathBuf>,
}

impl ArtifactPackager {
    /// Packager for the declared and created roots of `project`.
    #[must_use]
    pub fn for_project(project: &AvailProject) -> Self {
        Self::builder()
            .options(project.options().clone())
            .roots(project.packaged_roots())
            .build()
    }

    /// Same packager writing to `path`.
    #[must_use]
    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.options.output_path())
    }

    #[must_use]
    pub const fn options(&self) -> &ArtifactOptions {
        &self.options
    }

    #[must_use]
    pub fn roots(&self) -> &[Root] {
        &self.roots
    }

    /// Text of `META-INF/MANIFEST.MF`.
    #[must_use]
    pub fn jvm_manifest(&self) -> String {
        let mut out = String::new();
        let _ = write!(out, "Manifest-Version: 1.0\r\n");
        let _ = write!(
            out,
            "Created-By: avail-pack {}\r\n",
            env!("CARGO_PKG_VERSION")
        );
        let _ = write!(out, "Implementation-Title: {}\r\n", self.options.title());
        if !self.options.version.trim().is_empty() {
            let _ = write!(
                out,
                "Implementation-Version: {}\r\n",
                self.options.version.trim()
            );
        }
        if let Some(main_class) = &self.options.main_class {
            let _ = write!(out, "Main-Class: {main_class}\r\n");
        }
        out.push_str("\r\n");
        out
    }

    /// Writes the artifact and returns its path.
    ///
    /// Blocking; async callers should run it on a blocking thread.
    ///
    /// # Errors
    ///
    /// Returns `ArtifactError::RootNotFound` or `InclusionNotFound` for
    /// missing sources, `ArtifactError::UnsupportedDependency` for a
    /// dependency that is neither an archive nor a directory, and I/O or zip
    /// errors otherwise.
    pub fn package(&self, dependencies: &[PathBuf]) -> Result<PathBuf> {
        let output = self.output_path();

        if let Some(parent) = output.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        if output.exists() {
            debug!(path = %output.display(), "removing previous artifact");
            std::fs::remove_file(&output)
                .with_context(|| format!("failed to remove {}", output.display()))?;
        }

        let file = File::create(&output)
            .with_context(|| format!("failed to create {}", output.display()))?;
        let mut guard = PartialFileGuard::new(output.clone());
        let mut jar = JarWriter::new(file);

        let mut manifest = ArtifactManifest::new(
            self.options.artifact_type,
            self.options.jvm_component.clone(),
            self.options.description.clone(),
        );

        jar.write_file(MANIFEST_MF_PATH, self.jvm_manifest().as_bytes())?;

        for root in &self.roots {
            self.add_root(&mut jar, &mut manifest, root)?;
        }

        self.add_inclusions(&mut jar, &mut manifest)?;

        for dependency in dependencies {
            add_dependency(&mut jar, &mut manifest, dependency)?;
        }

        let json = manifest
            .to_json()
            .map_err(|e| PackError::from(ArtifactError::from(e)))?;
        jar.write_artifact_manifest(&json)?;
        jar.finish()?;
        guard.keep();

        info!(
            path = %output.display(),
            roots = manifest.roots.len(),
            dependencies = dependencies.len(),
            "artifact written"
        );
        Ok(output)
    }

    fn add_root(
        &self,
        jar: &mut JarWriter,
        manifest: &mut ArtifactManifest,
        root: &Root,
    ) -> Result<()> {
        let algorithm = self.options.digest_algorithm;
        let mut digests = BTreeMap::new();
        let mut add = |jar: &mut JarWriter, relative: &str, contents: &[u8]| -> Result<()> {
            let name = format!("{}/{relative}", root.name());
            if jar.write_file(&name, contents)? {
                digests.insert(relative.to_string(), algorithm.digest_hex(contents));
            } else {
                warn!(root = %root.name(), entry = %name, "entry already present, not recorded");
            }
            Ok(())
        };

        match root.location() {
            RootLocation::Directory(dir) => {
                if !dir.is_dir() {
                    if root.is_pending_creation() {
                        warn!(root = %root.name(), path = %dir.display(), "root not created yet, skipping");
                        return Ok(());
                    }
                    return Err(root_not_found(root, dir));
                }
                jar.add_directory(root.name())?;
                for path in walk_files(dir, &WalkOptions::for_packaging())? {
                    let Some(relative) = entry_name(dir, &path) else {
                        warn!(path = %path.display(), "skipping file with non UTF-8 name");
                        continue;
                    };
                    let contents = std::fs::read(&path)
                        .with_context(|| format!("failed to read {}", path.display()))?;
                    add(jar, &relative, &contents)?;
                }
            }
            RootLocation::Jar { archive, prefix } => {
                if !archive.is_file() {
                    return Err(root_not_found(root, archive));
                }
                jar.add_directory(root.name())?;
                for (relative, contents) in read_archive_tree(archive, prefix)? {
                    add(jar, &relative, &contents)?;
                }
            }
        }

        debug!(root = %root.name(), files = digests.len(), "root packaged");
        manifest.roots.insert(
            root.name().to_string(),
            root.manifest_root(algorithm, digests),
        );
        Ok(())
    }

    fn add_inclusions(&self, jar: &mut JarWriter, manifest: &mut ArtifactManifest) -> Result<()> {
        let inclusions = &self.options.inclusions;

        for file in &inclusions.files {
            if !file.source.is_file() {
                return Err(inclusion_not_found(&file.source));
            }
            add_file(jar, manifest, &file.entry_name(), &file.source)?;
        }

        for dir in &inclusions.directories {
            if !dir.source.is_dir() {
                return Err(inclusion_not_found(&dir.source));
            }
            add_directory_tree(jar, manifest, &dir.source, &dir.target)?;
        }

        for archive in &inclusions.archives {
            if !archive.is_file() {
                return Err(inclusion_not_found(archive));
            }
            merge(jar, manifest, archive)?;
        }

        Ok(())
    }
}

fn root_not_found(root: &Root, path: &Path) -> anyhow::Error {
    PackError::from(ArtifactError::RootNotFound {
        root: root.name().to_string(),
        path: path.display().to_string(),
    })
    .into()
}

fn inclusion_not_found(path: &Path) -> anyhow::Error {
    PackError::from(ArtifactError::InclusionNotFound(path.display().to_string())).into()
}

/// Copies `source` recursively below `prefix` (empty for the archive root).
fn add_directory_tree(
    jar: &mut JarWriter,
    manifest: &mut ArtifactManifest,
    source: &Path,
    prefix: &str,
) -> Result<()> {
    jar.add_directory(prefix)?;
    for path in walk_files(source, &WalkOptions::for_packaging())? {
        let Some(relative) = entry_name(source, &path) else {
            warn!(path = %path.display(), "skipping file with non UTF-8 name");
            continue;
        };
        let name = if prefix.is_empty() {
            relative
        } else {
            format!("{prefix}/{relative}")
        };
        add_file(jar, manifest, &name, &path)?;
    }
    Ok(())
}

/// Copies one file to `name`; an artifact manifest is folded instead.
fn add_file(
    jar: &mut JarWriter,
    manifest: &mut ArtifactManifest,
    name: &str,
    path: &Path,
) -> Result<()> {
    if name == ARTIFACT_MANIFEST_PATH {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        fold_nested(manifest, &json, path);
        return Ok(());
    }
    jar.write_path(name, path)?;
    Ok(())
}

/// Merges an archive, folding roots of a nested artifact manifest into
/// `manifest` unless a root of that name is already recorded.
fn merge(jar: &mut JarWriter, manifest: &mut ArtifactManifest, archive: &Path) -> Result<()> {
    if let Some(json) = jar.merge_archive(archive)? {
        fold_nested(manifest, &json, archive);
    }
    Ok(())
}

/// Adds the roots of a nested artifact manifest that are not yet recorded.
fn fold_nested(manifest: &mut ArtifactManifest, json: &str, origin: &Path) {
    match ArtifactManifest::from_json(json) {
        Ok(nested) => {
            for (name, root) in nested.roots {
                manifest.roots.entry(name).or_insert(root);
            }
        }
        Err(e) => {
            warn!(origin = %origin.display(), error = %e, "ignoring unreadable artifact manifest");
        }
    }
}

/// How a resolved dependency file is folded into the artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyKind {
    Archive,
    Directory,
}

impl DependencyKind {
    /// Classifies by file system type and extension.
    ///
    /// # Errors
    ///
    /// Returns `ArtifactError::UnsupportedDependency` for anything but a
    /// `.jar`/`.zip` file or a directory.
    pub fn of(path: &Path) -> Result<Self> {
        if path.is_dir() {
            return Ok(Self::Directory);
        }
        let is_archive = path.extension().and_then(|e| e.to_str()).is_some_and(|e| {
            e.eq_ignore_ascii_case("jar") || e.eq_ignore_ascii_case("zip")
        });
        if is_archive && path.is_file() {
            return Ok(Self::Archive);
        }
        Err(PackError::from(ArtifactError::UnsupportedDependency {
            path: path.display().to_string(),
        })
        .into())
    }
}

fn add_dependency(jar: &mut JarWriter, manifest: &mut ArtifactManifest, path: &Path) -> Result<()> {
    match DependencyKind::of(path)? {
        DependencyKind::Archive => merge(jar, manifest, path)?,
        DependencyKind::Directory => add_directory_tree(jar, manifest, path, "")?,
    }
    debug!(dependency = %path.display(), "dependency merged");
    Ok(())
}
