// avail-pack: Avail Artifact Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::Result;
use bon::Builder;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Options for directory traversal.
#[derive(Debug, Clone, Builder)]
pub struct WalkOptions {
    /// Maximum depth to traverse (None = unlimited)
    #[builder(setters(name = with_max_depth))]
    max_depth: Option<usize>,
    /// Follow symbolic links
    #[builder(setters(name = with_follow_links), default = false)]
    follow_links: bool,
    /// Include hidden files/directories
    #[builder(setters(name = with_include_hidden), default = false)]
    include_hidden: bool,
    /// Respect .gitignore and .ignore files
    #[builder(setters(name = with_respect_gitignore), default = true)]
    respect_gitignore: bool,
    /// Skip directories matching these names (exact match)
    #[builder(setters(name = with_skip_dirs), default)]
    skip_dirs: Vec<String>,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl WalkOptions {
    #[must_use]
    pub const fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    #[must_use]
    pub const fn follow_links(&self) -> bool {
        self.follow_links
    }

    #[must_use]
    pub const fn include_hidden(&self) -> bool {
        self.include_hidden
    }

    #[must_use]
    pub const fn respect_gitignore(&self) -> bool {
        self.respect_gitignore
    }

    #[must_use]
    pub fn skip_dirs(&self) -> &[String] {
        &self.skip_dirs
    }

    /// Options used when copying roots and extra directories into an
    /// artifact.
    ///
    /// - Includes hidden files; every file on disk is packaged and hashed
    /// - Does not consult ignore files, so the archive only depends on
    ///   what is on disk
    /// - Follows symbolic links
    #[must_use]
    pub fn for_packaging() -> Self {
        Self::builder()
            .with_include_hidden(true)
            .with_respect_gitignore(false)
            .with_follow_links(true)
            .build()
    }
}

/// Builds a `WalkBuilder` with the given options, using `filter_entry` for directory skipping.
pub(super) fn build_walker(root: &Path, options: &WalkOptions) -> WalkBuilder {
    let mut builder = WalkBuilder::new(root);

    if let Some(depth) = options.max_depth() {
        builder.max_depth(Some(depth));
    }

    builder.follow_links(options.follow_links());
    builder.hidden(!options.include_hidden());

    builder.ignore(options.respect_gitignore());
    builder.parents(options.respect_gitignore());
    builder.git_ignore(options.respect_gitignore());
    builder.git_global(options.respect_gitignore());
    builder.git_exclude(options.respect_gitignore());

    // Stable sibling order.
    builder.sort_by_file_name(|a, b| a.cmp(b));

    // Evaluated before descending
    if !options.skip_dirs().is_empty() {
        let skip_dirs: Arc<Vec<String>> = Arc::new(options.skip_dirs().to_vec());
        builder.filter_entry(move |entry| {
            if entry.file_type().is_some_and(|ft| ft.is_dir())
                && let Some(name) = entry.file_name().to_str()
                && skip_dirs.iter().any(|skip| skip == name)
            {
                return false;
            }
            true
        });
    }

    builder
}

/// Lists every regular file below `root` in a stable, sorted order.
///
/// # Errors
///
/// Returns an error if the root directory does not exist, or for the first
/// entry that cannot be read (unreadable directory, dangling link).
///
/// # Example
/// ```no_run
/// use avail_pack::utility::fs::walk::{walk_files, WalkOptions};
///
/// let files = walk_files("/path/to/root", &WalkOptions::for_packaging())?;
/// for file in files {
///     println!("{}", file.display());
/// }
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn walk_files<P: AsRef<Path>>(root: P, options: &WalkOptions) -> Result<Vec<PathBuf>> {
    let root = root.as_ref();

    if !root.is_dir() {
        anyhow::bail!("root directory does not exist: {}", root.display());
    }

    let mut files = Vec::new();
    for entry_result in build_walker(root, options).build() {
        match entry_result {
            Ok(entry) => {
                if entry.file_type().is_some_and(|ft| ft.is_file()) {
                    files.push(entry.into_path());
                }
            }
            Err(e) => {
                return Err(anyhow::Error::new(e)
                    .context(format!("failed to walk {}", root.display())));
            }
        }
    }

    Ok(files)
}

/// Archive entry name for `path` below `base`, always `/`-separated.
///
/// Returns `None` if `path` is not inside `base` or is not valid UTF-8.
#[must_use]
pub fn entry_name(base: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(base).ok()?;
    let parts: Option<Vec<&str>> = relative
        .components()
        .map(|component| component.as_os_str().to_str())
        .collect();
    let parts = parts?;
    if parts.is_empty() {
        return None;
    }
    Some(parts.join("/"))
}
