// avail-pack: Avail Artifact Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Project aggregator.
//!
//! ```text
//! Config ──from_config()──> AvailProject
//!                             roots          name -> Root
//!                             created_roots  name -> Root + PendingCreation
//!                             dependencies   [LibraryDependency]
//!                             runtime        Option<LibraryDependency>
//!                             options        ArtifactOptions
//!                                 |
//!                   roots() sorted: plain (incl. dependency jars), then created
//!                   render() human-readable summary
//! ```
//!
//! Root names are unique across plain and created roots; registering a name
//! again replaces the earlier root.

pub mod options;

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::Config;
use crate::error::{ConfigError, Result};
use crate::model::{LibraryDependency, ModuleSpec, PendingCreation, Root, RootLocation};
use crate::resolve::Repository;

pub use options::{
    ArtifactOptions, DirectoryInclusion, FileInclusion, Inclusions, PackagingOption,
};

/// Everything known about one Avail project.
#[derive(Debug, Clone)]
pub struct AvailProject {
    name: String,
    version: String,
    project_dir: PathBuf,
    roots_directory: PathBuf,
    roots: BTreeMap<String, Root>,
    created_roots: BTreeMap<String, Root>,
    dependencies: Vec<LibraryDependency>,
    runtime: Option<LibraryDependency>,
    repositories: Vec<Repository>,
    options: ArtifactOptions,
}

impl AvailProject {
    /// Empty project; the artifact defaults to `<project_dir>/build/libs/<name>.jar`.
    #[must_use]
    pub fn new(name: impl Into<String>, project_dir: impl Into<PathBuf>) -> Self {
        let name = name.into();
        let project_dir = project_dir.into();
        Self {
            options: ArtifactOptions::new(name.clone(), project_dir.join("build").join("libs")),
            roots_directory: project_dir.join("roots"),
            name,
            version: String::new(),
            project_dir,
            roots: BTreeMap::new(),
            created_roots: BTreeMap::new(),
            dependencies: Vec::new(),
            runtime: None,
            repositories: Vec::new(),
        }
    }

    /// Builds the project from a loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` for an unparsable root location, digest
    /// algorithm or coordinate.
    pub fn from_config(config: &Config) -> Result<Self> {
        let project_dir = config.project_dir();
        let mut project = Self::new(config.project.name.clone(), project_dir)
            .with_version(config.project.version.clone())
            .with_roots_directory(config.project.roots_directory.clone());

        for (name, root) in &config.roots {
            let location = parse_location(name, &root.location, project_dir)?;
            project.add_root(
                Root::new(name.clone(), location)
                    .with_extensions(root.extensions.iter().cloned())
                    .with_entry_points(root.entry_points.iter().cloned())
                    .with_description(root.description.clone()),
            );
        }

        for (name, root) in &config.create_roots {
            let location = match &root.location {
                Some(location) => parse_location(name, location, project_dir)?,
                None => RootLocation::Directory(project.roots_directory.join(name)),
            };
            let extension = root
                .extensions
                .first()
                .map_or(crate::model::root::DEFAULT_EXTENSION, String::as_str);

            let mut creation = PendingCreation::new();
            let spec = |module: &String| {
                let spec = ModuleSpec::new(module, extension);
                match &root.module_header {
                    Some(header) => spec.with_header(header.clone()),
                    None => spec,
                }
            };
            for module in &root.modules {
                creation.add_module_spec(spec(module));
            }
            for package in &root.packages {
                creation.add_module_package_spec(spec(package));
            }

            project.add_created_root(
                Root::new(name.clone(), location)
                    .with_extensions(root.extensions.iter().cloned())
                    .with_entry_points(root.entry_points.iter().cloned())
                    .with_description(root.description.clone())
                    .with_creation(creation),
            );
        }

        project.dependencies = config.library_dependencies()?;
        project.runtime = config.runtime()?;
        project.repositories = config.repositories();
        project.options = ArtifactOptions::from_config(
            &config.artifact,
            config.artifact_name(),
            &config.project.version,
            config.digest_algorithm()?,
            config.embedded_dependencies()?,
        );

        debug!(
            project = %project.name,
            roots = project.roots.len(),
            created_roots = project.created_roots.len(),
            dependencies = project.dependencies.len(),
            "project configured"
        );
        Ok(project)
    }

    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self.options.version.clone_from(&self.version);
        self
    }

    #[must_use]
    pub fn with_roots_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.roots_directory = dir.into();
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    #[must_use]
    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// Where dependency jars are resolved to and created roots default to.
    #[must_use]
    pub fn roots_directory(&self) -> &Path {
        &self.roots_directory
    }

    /// Registers an existing root, replacing any root of the same name.
    pub fn add_root(&mut self, root: Root) {
        self.created_roots.remove(root.name());
        if let Some(previous) = self.roots.insert(root.name().to_string(), root) {
            debug!(root = %previous.name(), "root replaced");
        }
    }

    /// Registers a root to be scaffolded, replacing any root of the same name.
    ///
    /// A root without a creation payload gets an empty one.
    pub fn add_created_root(&mut self, root: Root) {
        let root = if root.is_pending_creation() {
            root
        } else {
            root.with_creation(PendingCreation::new())
        };
        self.roots.remove(root.name());
        if let Some(previous) = self.created_roots.insert(root.name().to_string(), root) {
            debug!(root = %previous.name(), "root to be created replaced");
        }
    }

    /// Adds `name = "group:artifact:version"`, replacing a dependency of the
    /// same name.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidCoordinate` for a malformed coordinate.
    pub fn add_library_dependency(
        &mut self,
        name: &str,
        coordinate: &str,
    ) -> std::result::Result<&LibraryDependency, ConfigError> {
        let dependency = LibraryDependency::parse(name, coordinate)?;
        let index = match self.dependencies.iter().position(|d| d.name() == name) {
            Some(index) => {
                self.dependencies[index] = dependency;
                index
            }
            None => {
                self.dependencies.push(dependency);
                self.dependencies.len() - 1
            }
        };
        Ok(&self.dependencies[index])
    }

    pub fn set_option(&mut self, option: PackagingOption) {
        self.options.apply(option);
    }

    pub fn set_runtime(&mut self, runtime: Option<LibraryDependency>) {
        self.runtime = runtime;
    }

    pub fn set_repositories(&mut self, repositories: Vec<Repository>) {
        self.repositories = repositories;
    }

    #[must_use]
    pub const fn options(&self) -> &ArtifactOptions {
        &self.options
    }

    #[must_use]
    pub fn dependencies(&self) -> &[LibraryDependency] {
        &self.dependencies
    }

    #[must_use]
    pub const fn runtime(&self) -> Option<&LibraryDependency> {
        self.runtime.as_ref()
    }

    #[must_use]
    pub fn repositories(&self) -> &[Repository] {
        &self.repositories
    }

    /// Looks a root up by name, created or not.
    #[must_use]
    pub fn root(&self, name: &str) -> Option<&Root> {
        self.roots.get(name).or_else(|| self.created_roots.get(name))
    }

    /// Roots still to be scaffolded, by name.
    pub fn created_roots(&self) -> impl Iterator<Item = &Root> {
        self.created_roots.values()
    }

    /// Roots whose sources belong in this project's artifact: declared and
    /// created, in display order. Dependency roots are excluded.
    #[must_use]
    pub fn packaged_roots(&self) -> Vec<Root> {
        let mut roots: Vec<Root> = self
            .roots
            .values()
            .chain(self.created_roots.values())
            .cloned()
            .collect();
        roots.sort_by(Root::display_order);
        roots
    }

    /// Every root: declared, dependency and created, plain roots first, each
    /// group by name.
    ///
    /// A declared root shadows a dependency root of the same name.
    #[must_use]
    pub fn roots(&self) -> Vec<Root> {
        let mut roots: Vec<Root> = self.roots.values().cloned().collect();
        for dependency in &self.dependencies {
            if !self.roots.contains_key(dependency.name())
                && !self.created_roots.contains_key(dependency.name())
            {
                roots.push(dependency.to_root(&self.roots_directory));
            }
        }
        roots.extend(self.created_roots.values().cloned());
        roots.sort_by(Root::display_order);
        roots
    }

    /// Deterministic multi-line summary of the project.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        let title = if self.version.is_empty() {
            self.name.clone()
        } else {
            format!("{} {}", self.name, self.version)
        };
        let _ = writeln!(out, "Avail project {title}");
        let _ = writeln!(out, "  directory:       {}", self.project_dir.display());
        let _ = writeln!(out, "  roots directory: {}", self.roots_directory.display());
        if let Some(runtime) = &self.runtime {
            let _ = writeln!(out, "  runtime:         {}", runtime.coordinate());
        }

        let roots = self.roots();
        let _ = writeln!(out, "\nRoots ({}):", roots.len());
        let width = roots.iter().map(|r| r.name().len()).max().unwrap_or(0);
        for root in &roots {
            let _ = write!(
                out,
                "  {:<width$}  {}  [{}]",
                root.name(),
                root.location(),
                root.module_extensions().join(", ")
            );
            if !root.entry_points().is_empty() {
                let _ = write!(out, "  entry points: {}", root.entry_points().join(", "));
            }
            if let Some(creation) = root.pending_creation() {
                let _ = write!(
                    out,
                    "  (to be created: {} modules, {} packages)",
                    creation.modules().len(),
                    creation.module_packages().len()
                );
            }
            let _ = writeln!(out);
        }

        let _ = writeln!(out, "\nDependencies ({}):", self.dependencies.len());
        for dependency in &self.dependencies {
            let _ = writeln!(out, "  {} = {}", dependency.name(), dependency.coordinate());
        }

        if !self.repositories.is_empty() {
            let _ = writeln!(out, "\nRepositories:");
            for repository in &self.repositories {
                let _ = writeln!(out, "  {repository}");
            }
        }

        let _ = writeln!(out, "\nPackaging:");
        for line in self.format_options() {
            let _ = writeln!(out, "  {line}");
        }
        out
    }

    /// Packaging options as aligned `key = value` lines, sorted by key.
    fn format_options(&self) -> Vec<String> {
        let o = &self.options;
        let mut options = BTreeMap::new();
        options.insert("artifact_type", o.artifact_type.to_string());
        options.insert("digest_algorithm", o.digest_algorithm.to_string());
        options.insert("output", o.output_path().display().to_string());
        options.insert("implementation_title", o.title().to_string());
        if let Some(main_class) = &o.main_class {
            options.insert("main_class", main_class.clone());
        }
        if let Some(jvm) = &o.jvm_component {
            options.insert("jvm_component", jvm.description.clone());
        }
        if !o.description.is_empty() {
            options.insert("description", o.description.clone());
        }
        if !o.embed.is_empty() {
            let embed: Vec<String> = o.embed.iter().map(LibraryDependency::coordinate).collect();
            options.insert("embed", embed.join(", "));
        }
        let inclusions = &o.inclusions;
        if !inclusions.is_empty() {
            options.insert(
                "inclusions",
                format!(
                    "{} files, {} directories, {} archives",
                    inclusions.files.len(),
                    inclusions.directories.len(),
                    inclusions.archives.len()
                ),
            );
        }

        let max_key_len = options.keys().map(|k| k.len()).max().unwrap_or(0);
        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }
}

fn parse_location(root: &str, location: &str, project_dir: &Path) -> Result<RootLocation> {
    let parsed = RootLocation::parse(location).ok_or_else(|| ConfigError::InvalidLocation {
        root: root.to_string(),
        location: location.to_string(),
    })?;
    Ok(parsed.resolved_against(project_dir))
}
