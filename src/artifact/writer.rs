// avail-pack: Avail Artifact Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Jar writer with first-writer-wins entry names.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use anyhow::Context;
use tracing::trace;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::error::{ArtifactError, PackError, Result};
use crate::model::manifest::ARTIFACT_MANIFEST_PATH;

/// Path of the JVM manifest.
pub const MANIFEST_MF_PATH: &str = "META-INF/MANIFEST.MF";

fn zip_error(error: zip::result::ZipError) -> PackError {
    PackError::from(ArtifactError::from(error))
}

/// Streams entries into a jar-compatible zip file.
///
/// Parent directory entries are added on demand. Writing a name that is
/// already present is a no-op. The artifact manifest path is reserved for
/// [`JarWriter::write_artifact_manifest`].
pub struct JarWriter {
    zip: ZipWriter<File>,
    options: SimpleFileOptions,
    names: BTreeSet<String>,
}

impl JarWriter {
    #[must_use]
    pub fn new(file: File) -> Self {
        Self {
            zip: ZipWriter::new(file),
            options: SimpleFileOptions::default().compression_method(CompressionMethod::Deflated),
            names: BTreeSet::new(),
        }
    }

    /// Whether an entry of that name (file or `dir/`) was written.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Adds `dir/` and every missing ancestor.
    ///
    /// # Errors
    ///
    /// Returns `ArtifactError::Zip` if the entry cannot be written.
    pub fn add_directory(&mut self, name: &str) -> Result<()> {
        let name = name.trim_matches('/');
        if name.is_empty() {
            return Ok(());
        }
        let mut prefix = String::new();
        for part in name.split('/') {
            prefix.push_str(part);
            prefix.push('/');
            if self.names.insert(prefix.clone()) {
                self.zip
                    .add_directory(prefix.as_str(), self.options)
                    .map_err(zip_error)?;
            }
        }
        Ok(())
    }

    /// Writes a file entry; returns `false` if the name was already taken.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry cannot be written.
    pub fn write_file(&mut self, name: &str, contents: &[u8]) -> Result<bool> {
        if name == ARTIFACT_MANIFEST_PATH {
            trace!(entry = %name, "reserved entry skipped");
            return Ok(false);
        }
        self.write_entry(name, contents)
    }

    /// Writes the artifact manifest, once.
    ///
    /// # Errors
    ///
    /// Returns `ArtifactError::DuplicateEntry` on a second call, or an
    /// error if the entry cannot be written.
    pub fn write_artifact_manifest(&mut self, json: &str) -> Result<()> {
        if !self.write_entry(ARTIFACT_MANIFEST_PATH, json.as_bytes())? {
            return Err(PackError::from(ArtifactError::DuplicateEntry(
                ARTIFACT_MANIFEST_PATH.to_string(),
            ))
            .into());
        }
        Ok(())
    }

    fn write_entry(&mut self, name: &str, contents: &[u8]) -> Result<bool> {
        if self.names.contains(name) {
            trace!(entry = %name, "duplicate entry skipped");
            return Ok(false);
        }
        if let Some((parent, _)) = name.rsplit_once('/') {
            self.add_directory(parent)?;
        }
        self.zip.start_file(name, self.options).map_err(zip_error)?;
        self.zip
            .write_all(contents)
            .with_context(|| format!("failed to write entry {name}"))?;
        self.names.insert(name.to_string());
        Ok(true)
    }

    /// Copies a file from disk; returns `false` if the name was already taken.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the entry written.
    pub fn write_path(&mut self, name: &str, path: &Path) -> Result<bool> {
        if name == ARTIFACT_MANIFEST_PATH || self.names.contains(name) {
            trace!(entry = %name, "duplicate entry skipped");
            return Ok(false);
        }
        let contents =
            std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
        self.write_file(name, &contents)
    }

    /// Copies every entry of another archive.
    ///
    /// Its `META-INF/MANIFEST.MF` and artifact manifest are never copied; the
    /// artifact manifest's contents, if any, are returned instead.
    ///
    /// # Errors
    ///
    /// Returns an error if the archive cannot be opened or read.
    pub fn merge_archive(&mut self, path: &Path) -> Result<Option<String>> {
        let file =
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
        let mut archive = ZipArchive::new(file)
            .map_err(zip_error)
            .with_context(|| format!("failed to read archive {}", path.display()))?;

        let mut nested_manifest = None;
        let mut merged = 0usize;
        for index in 0..archive.len() {
            let mut entry = archive.by_index(index).map_err(zip_error)?;
            let name = entry.name().to_string();
            if entry.is_dir() {
                self.add_directory(&name)?;
                continue;
            }
            if name == MANIFEST_MF_PATH {
                continue;
            }
            let mut contents = Vec::new();
            entry
                .read_to_end(&mut contents)
                .with_context(|| format!("failed to read {name} from {}", path.display()))?;
            if name == ARTIFACT_MANIFEST_PATH {
                nested_manifest = Some(String::from_utf8_lossy(&contents).into_owned());
                continue;
            }
            if self.write_file(&name, &contents)? {
                merged += 1;
            }
        }

        trace!(archive = %path.display(), entries = merged, "archive merged");
        Ok(nested_manifest)
    }

    /// Writes the central directory and closes the file.
    ///
    /// # Errors
    ///
    /// Returns `ArtifactError::Zip` if finalization fails.
    pub fn finish(self) -> Result<()> {
        let file = self.zip.finish().map_err(zip_error)?;
        file.sync_all().context("failed to flush artifact")?;
        Ok(())
    }
}

/// Reads every file entry below `prefix` of an archive, keyed by the
/// prefix-relative name, in archive order.
///
/// With an empty prefix, `META-INF/` is left out.
///
/// # Errors
///
/// Returns an error if the archive cannot be opened or read.
pub fn read_archive_tree(path: &Path, prefix: &str) -> Result<Vec<(String, Vec<u8>)>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let mut archive = ZipArchive::new(file)
        .map_err(zip_error)
        .with_context(|| format!("failed to read archive {}", path.display()))?;

    let prefix = prefix.trim_matches('/');
    let mut entries = Vec::new();
    for index in 0..archive.len() {
        let mut entry = archive.by_index(index).map_err(zip_error)?;
        if entry.is_dir() {
            continue;
        }
        let name = entry.name().to_string();
        let relative = if prefix.is_empty() {
            if name.starts_with("META-INF/") {
                continue;
            }
            name.as_str()
        } else {
            match name
                .strip_prefix(prefix)
                .and_then(|rest| rest.strip_prefix('/'))
            {
                Some(rest) => rest,
                None => continue,
            }
        };
        if relative.is_empty() {
            continue;
        }
        let relative = relative.to_string();
        let mut contents = Vec::new();
        entry
            .read_to_end(&mut contents)
            .with_context(|| format!("failed to read {name} from {}", path.display()))?;
        entries.push((relative, contents));
    }
    Ok(entries)
}
