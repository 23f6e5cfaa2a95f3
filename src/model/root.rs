// avail-pack: Avail Artifact Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Avail roots and the scaffolding payload for roots that do not exist yet.
//!
//! ```text
//! Root { name, location, extensions, entry points, description }
//!   creation: Option<PendingCreation>   <- "to be created" roots only
//!   action:   Option<RootAction>        <- runs after materialization
//!
//! materialize(base):
//!   package  Foo.avail/Foo.avail    (directory + representative module)
//!   module   Bar.avail
//! ```

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use tracing::debug;

use super::digest::DigestAlgorithm;
use super::manifest::ManifestRoot;
use crate::error::Result;

/// Default Avail source file extension.
pub const DEFAULT_EXTENSION: &str = "avail";

/// Where a root's sources live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RootLocation {
    /// A directory on the local file system.
    Directory(PathBuf),
    /// A directory inside an archive; an empty prefix means the archive root.
    Jar { archive: PathBuf, prefix: String },
}

impl RootLocation {
    /// Parses a URI-like location.
    ///
    /// `file:` URIs and bare paths denote directories. `jar:<archive>` and
    /// `jar:<archive>!/<prefix>` denote a directory inside an archive.
    /// Returns `None` for an empty location.
    #[must_use]
    pub fn parse(location: &str) -> Option<Self> {
        let location = location.trim();
        if let Some(rest) = location.strip_prefix("jar:") {
            let rest = rest.strip_prefix("file://").unwrap_or(rest);
            let (archive, prefix) = rest.split_once("!/").unwrap_or((rest, ""));
            if archive.is_empty() {
                return None;
            }
            return Some(Self::Jar {
                archive: PathBuf::from(archive),
                prefix: prefix.trim_matches('/').to_string(),
            });
        }

        let path = location
            .strip_prefix("file://")
            .or_else(|| location.strip_prefix("file:"))
            .unwrap_or(location);
        if path.is_empty() {
            None
        } else {
            Some(Self::Directory(PathBuf::from(path)))
        }
    }

    /// Resolves a relative location against `base`.
    #[must_use]
    pub fn resolved_against(&self, base: &Path) -> Self {
        match self {
            Self::Directory(path) if path.is_relative() => Self::Directory(base.join(path)),
            Self::Jar { archive, prefix } if archive.is_relative() => Self::Jar {
                archive: base.join(archive),
                prefix: prefix.clone(),
            },
            other => other.clone(),
        }
    }

    /// Directory path, if this is a file system location.
    #[must_use]
    pub fn as_directory(&self) -> Option<&Path> {
        match self {
            Self::Directory(path) => Some(path),
            Self::Jar { .. } => None,
        }
    }
}

impl fmt::Display for RootLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Directory(path) => write!(f, "file:{}", path.display()),
            Self::Jar { archive, prefix } if prefix.is_empty() => {
                write!(f, "jar:{}", archive.display())
            }
            Self::Jar { archive, prefix } => write!(f, "jar:{}!/{prefix}", archive.display()),
        }
    }
}

/// A module or module package to scaffold.
///
/// Identity is the `(name, extension)` pair; the header does not participate.
#[derive(Debug, Clone)]
pub struct ModuleSpec {
    name: String,
    extension: String,
    header: Option<String>,
}

impl ModuleSpec {
    #[must_use]
    pub fn new(name: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extension: extension.into(),
            header: None,
        }
    }

    /// Sets a header that overrides the root's header template.
    #[must_use]
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn extension(&self) -> &str {
        &self.extension
    }

    #[must_use]
    pub fn header(&self) -> Option<&str> {
        self.header.as_deref()
    }

    /// File (or directory) name on disk: `<name>.<extension>`.
    #[must_use]
    pub fn file_name(&self) -> String {
        if self.extension.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.name, self.extension)
        }
    }

    fn contents(&self, template: Option<&str>) -> String {
        let mut text = String::new();
        if let Some(header) = self.header.as_deref().or(template) {
            text.push_str(header);
            if !header.ends_with('\n') {
                text.push('\n');
            }
            text.push('\n');
        }
        text.push_str(&format!("Module \"{}\"\nUses\n\t\"Avail\"\nBody\n", self.name));
        text
    }
}

impl PartialEq for ModuleSpec {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.extension == other.extension
    }
}

impl Eq for ModuleSpec {}

/// What happened when a root was written to disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterializeReport {
    /// Files and directories that were created.
    pub created: Vec<PathBuf>,
    /// Files that already existed and were left untouched.
    pub skipped: Vec<PathBuf>,
}

/// Modules and module packages of a root that should be created on disk.
///
/// Both collections behave as insertion-ordered sets: adding the same
/// `(name, extension)` twice keeps the first entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingCreation {
    modules: Vec<ModuleSpec>,
    module_packages: Vec<ModuleSpec>,
}

impl PendingCreation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a module file. Returns `false` if it was already present.
    pub fn add_module(&mut self, name: impl Into<String>, extension: impl Into<String>) -> bool {
        self.add_module_spec(ModuleSpec::new(name, extension))
    }

    /// Adds a module package directory. Returns `false` if it was already present.
    pub fn add_module_package(
        &mut self,
        name: impl Into<String>,
        extension: impl Into<String>,
    ) -> bool {
        self.add_module_package_spec(ModuleSpec::new(name, extension))
    }

    pub fn add_module_spec(&mut self, spec: ModuleSpec) -> bool {
        insert_unique(&mut self.modules, spec)
    }

    pub fn add_module_package_spec(&mut self, spec: ModuleSpec) -> bool {
        insert_unique(&mut self.module_packages, spec)
    }

    #[must_use]
    pub fn modules(&self) -> &[ModuleSpec] {
        &self.modules
    }

    #[must_use]
    pub fn module_packages(&self) -> &[ModuleSpec] {
        &self.module_packages
    }

    /// Writes the module tree below `base_dir`.
    ///
    /// Existing files are never overwritten. `header_template` is used for
    /// every module that has no header of its own.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory or file cannot be created.
    pub fn materialize(
        &self,
        base_dir: &Path,
        header_template: Option<&str>,
    ) -> Result<MaterializeReport> {
        let mut report = MaterializeReport::default();
        create_dir(base_dir, &mut report)?;

        for package in &self.module_packages {
            let package_dir = base_dir.join(package.file_name());
            create_dir(&package_dir, &mut report)?;
            let representative = package_dir.join(package.file_name());
            write_module(&representative, package, header_template, &mut report)?;
        }

        for module in &self.modules {
            let path = base_dir.join(module.file_name());
            write_module(&path, module, header_template, &mut report)?;
        }

        Ok(report)
    }
}

fn insert_unique(specs: &mut Vec<ModuleSpec>, spec: ModuleSpec) -> bool {
    if specs.contains(&spec) {
        false
    } else {
        specs.push(spec);
        true
    }
}

fn create_dir(path: &Path, report: &mut MaterializeReport) -> Result<()> {
    if path.is_dir() {
        return Ok(());
    }
    std::fs::create_dir_all(path)
        .with_context(|| format!("failed to create directory {}", path.display()))?;
    report.created.push(path.to_path_buf());
    Ok(())
}

fn write_module(
    path: &Path,
    spec: &ModuleSpec,
    template: Option<&str>,
    report: &mut MaterializeReport,
) -> Result<()> {
    if path.exists() {
        debug!(path = %path.display(), "Module already exists, leaving it alone");
        report.skipped.push(path.to_path_buf());
        return Ok(());
    }
    std::fs::write(path, spec.contents(template))
        .with_context(|| format!("failed to write module {}", path.display()))?;
    report.created.push(path.to_path_buf());
    Ok(())
}

/// Callback run against a root after it has been materialized.
#[derive(Clone)]
pub struct RootAction(Arc<dyn Fn(&Root) -> Result<()> + Send + Sync>);

impl RootAction {
    pub fn new(action: impl Fn(&Root) -> Result<()> + Send + Sync + 'static) -> Self {
        Self(Arc::new(action))
    }
}

impl fmt::Debug for RootAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RootAction(..)")
    }
}

/// A named Avail source root.
///
/// Two roots are equal when name and location match. Display order is given
/// by [`Root::display_order`], not by `Ord`, since it also looks at whether
/// the root is still to be created.
#[derive(Debug, Clone)]
pub struct Root {
    name: String,
    location: RootLocation,
    module_extensions: Vec<String>,
    entry_points: Vec<String>,
    description: String,
    creation: Option<PendingCreation>,
    action: Option<RootAction>,
}

impl Root {
    /// Creates a root with the default `avail` extension.
    #[must_use]
    pub fn new(name: impl Into<String>, location: RootLocation) -> Self {
        Self {
            name: name.into(),
            location,
            module_extensions: vec![DEFAULT_EXTENSION.to_string()],
            entry_points: Vec::new(),
            description: String::new(),
            creation: None,
            action: None,
        }
    }

    /// Rebuilds a root from a manifest entry read back from an artifact.
    #[must_use]
    pub fn from_manifest_root(
        name: impl Into<String>,
        location: RootLocation,
        manifest: &ManifestRoot,
    ) -> Self {
        Self::new(name, location)
            .with_extensions(manifest.extensions.iter().cloned())
            .with_entry_points(manifest.entry_points.iter().cloned())
            .with_description(manifest.description.clone())
    }

    /// Replaces the module extensions; duplicates are dropped, order kept.
    #[must_use]
    pub fn with_extensions(mut self, extensions: impl IntoIterator<Item = String>) -> Self {
        self.module_extensions.clear();
        for extension in extensions {
            if !self.module_extensions.contains(&extension) {
                self.module_extensions.push(extension);
            }
        }
        self
    }

    #[must_use]
    pub fn with_entry_points(mut self, entry_points: impl IntoIterator<Item = String>) -> Self {
        self.entry_points = entry_points.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Marks this root as "to be created" with the given module tree.
    #[must_use]
    pub fn with_creation(mut self, creation: PendingCreation) -> Self {
        self.creation = Some(creation);
        self
    }

    #[must_use]
    pub fn with_action(mut self, action: RootAction) -> Self {
        self.action = Some(action);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn location(&self) -> &RootLocation {
        &self.location
    }

    #[must_use]
    pub fn module_extensions(&self) -> &[String] {
        &self.module_extensions
    }

    #[must_use]
    pub fn entry_points(&self) -> &[String] {
        &self.entry_points
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub const fn pending_creation(&self) -> Option<&PendingCreation> {
        self.creation.as_ref()
    }

    pub const fn pending_creation_mut(&mut self) -> Option<&mut PendingCreation> {
        self.creation.as_mut()
    }

    #[must_use]
    pub const fn is_pending_creation(&self) -> bool {
        self.creation.is_some()
    }

    /// `name=location`, the form used in diagnostics and root path lists.
    #[must_use]
    pub fn canonical(&self) -> String {
        format!("{}={}", self.name, self.location)
    }

    /// Plain roots first, then roots to be created; by name within each group.
    #[must_use]
    pub fn display_order(&self, other: &Self) -> Ordering {
        (self.is_pending_creation(), self.name.as_str())
            .cmp(&(other.is_pending_creation(), other.name.as_str()))
    }

    /// Projects this root into the artifact manifest.
    #[must_use]
    pub fn manifest_root(
        &self,
        algorithm: DigestAlgorithm,
        digests: BTreeMap<String, String>,
    ) -> ManifestRoot {
        ManifestRoot {
            extensions: self.module_extensions.clone(),
            entry_points: self.entry_points.clone(),
            description: self.description.clone(),
            digest_algorithm: algorithm.name().to_string(),
            digests,
        }
    }

    /// Runs the post-registration callback, if any.
    ///
    /// # Errors
    ///
    /// Propagates the callback's error.
    pub fn run_action(&self) -> Result<()> {
        self.action.as_ref().map_or(Ok(()), |action| (action.0)(self))
    }
}

impl PartialEq for Root {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.location == other.location
    }
}

impl Eq for Root {}

impl fmt::Display for Root {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.location)
    }
}
