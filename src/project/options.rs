// avail-pack: Avail Artifact Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Packaging options.

use std::path::PathBuf;

use crate::config::types::{ArtifactConfig, DirectoryInclusionConfig, FileInclusionConfig};
use crate::model::{ArtifactType, DigestAlgorithm, JvmComponent, LibraryDependency};

/// One file copied into the artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInclusion {
    pub source: PathBuf,
    /// Entry name; a trailing `/` appends the source file name.
    pub target: String,
}

impl FileInclusion {
    #[must_use]
    pub fn new(source: impl Into<PathBuf>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    /// Final entry name inside the archive.
    #[must_use]
    pub fn entry_name(&self) -> String {
        let target = self.target.trim_start_matches('/');
        if target.is_empty() || target.ends_with('/') {
            let file_name = self
                .source
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            format!("{target}{file_name}")
        } else {
            target.to_string()
        }
    }
}

impl From<&FileInclusionConfig> for FileInclusion {
    fn from(config: &FileInclusionConfig) -> Self {
        Self::new(config.source.clone(), config.target.clone())
    }
}

/// A directory copied recursively under `target`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryInclusion {
    pub source: PathBuf,
    /// Entry prefix without surrounding slashes; empty is the archive root.
    pub target: String,
}

impl DirectoryInclusion {
    #[must_use]
    pub fn new(source: impl Into<PathBuf>, target: &str) -> Self {
        Self {
            source: source.into(),
            target: target.trim_matches('/').to_string(),
        }
    }
}

impl From<&DirectoryInclusionConfig> for DirectoryInclusion {
    fn from(config: &DirectoryInclusionConfig) -> Self {
        Self::new(config.source.clone(), &config.target)
    }
}

/// Extra content beyond roots and dependencies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inclusions {
    pub files: Vec<FileInclusion>,
    pub directories: Vec<DirectoryInclusion>,
    /// Archives merged entry by entry.
    pub archives: Vec<PathBuf>,
}

impl Inclusions {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.directories.is_empty() && self.archives.is_empty()
    }
}

/// A single change to [`ArtifactOptions`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackagingOption {
    ArtifactName(String),
    Version(String),
    OutputDirectory(PathBuf),
    ArtifactType(ArtifactType),
    DigestAlgorithm(DigestAlgorithm),
    JvmComponent(Option<JvmComponent>),
    MainClass(Option<String>),
    ImplementationTitle(Option<String>),
    Description(String),
    ModuleHeader(Option<String>),
    /// Resolve and merge this coordinate into the artifact.
    Embed(LibraryDependency),
    IncludeFile(FileInclusion),
    IncludeDirectory(DirectoryInclusion),
    IncludeArchive(PathBuf),
}

/// Everything that shapes the produced artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactOptions {
    pub name: String,
    pub version: String,
    pub output_directory: PathBuf,
    pub artifact_type: ArtifactType,
    pub digest_algorithm: DigestAlgorithm,
    pub jvm_component: Option<JvmComponent>,
    pub main_class: Option<String>,
    pub implementation_title: Option<String>,
    pub description: String,
    pub module_header: Option<String>,
    pub embed: Vec<LibraryDependency>,
    pub inclusions: Inclusions,
}

impl ArtifactOptions {
    #[must_use]
    pub fn new(name: impl Into<String>, output_directory: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            version: String::new(),
            output_directory: output_directory.into(),
            artifact_type: ArtifactType::default(),
            digest_algorithm: DigestAlgorithm::default(),
            jvm_component: None,
            main_class: None,
            implementation_title: None,
            description: String::new(),
            module_header: None,
            embed: Vec::new(),
            inclusions: Inclusions::default(),
        }
    }

    /// Builds options from an already validated `[artifact]` section.
    pub(crate) fn from_config(
        config: &ArtifactConfig,
        name: &str,
        version: &str,
        digest_algorithm: DigestAlgorithm,
        embed: Vec<LibraryDependency>,
    ) -> Self {
        Self {
            name: name.to_string(),
            version: version.to_string(),
            output_directory: config.output_directory.clone(),
            artifact_type: config.artifact_type,
            digest_algorithm,
            jvm_component: config.jvm_component.clone(),
            main_class: config.main_class.clone(),
            implementation_title: config.implementation_title.clone(),
            description: config.description.clone(),
            module_header: config.module_header.clone(),
            embed,
            inclusions: Inclusions {
                files: config.files.iter().map(FileInclusion::from).collect(),
                directories: config
                    .directories
                    .iter()
                    .map(DirectoryInclusion::from)
                    .collect(),
                archives: config.archives.clone(),
            },
        }
    }

    /// Applies one option; collection options append.
    pub fn apply(&mut self, option: PackagingOption) {
        match option {
            PackagingOption::ArtifactName(name) => self.name = name,
            PackagingOption::Version(version) => self.version = version,
            PackagingOption::OutputDirectory(dir) => self.output_directory = dir,
            PackagingOption::ArtifactType(artifact_type) => self.artifact_type = artifact_type,
            PackagingOption::DigestAlgorithm(algorithm) => self.digest_algorithm = algorithm,
            PackagingOption::JvmComponent(component) => self.jvm_component = component,
            PackagingOption::MainClass(class) => self.main_class = class,
            PackagingOption::ImplementationTitle(title) => self.implementation_title = title,
            PackagingOption::Description(description) => self.description = description,
            PackagingOption::ModuleHeader(header) => self.module_header = header,
            PackagingOption::Embed(dependency) => self.embed.push(dependency),
            PackagingOption::IncludeFile(file) => self.inclusions.files.push(file),
            PackagingOption::IncludeDirectory(dir) => self.inclusions.directories.push(dir),
            PackagingOption::IncludeArchive(archive) => self.inclusions.archives.push(archive),
        }
    }

    /// `<name>-<version>.jar`, or `<name>.jar` when the version is blank.
    #[must_use]
    pub fn file_name(&self) -> String {
        let version = self.version.trim();
        if version.is_empty() {
            format!("{}.jar", self.name)
        } else {
            format!("{}-{version}.jar", self.name)
        }
    }

    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        self.output_directory.join(self.file_name())
    }

    /// `Implementation-Title`, defaulting to the artifact name.
    #[must_use]
    pub fn title(&self) -> &str {
        self.implementation_title.as_deref().unwrap_or(&self.name)
    }
}
