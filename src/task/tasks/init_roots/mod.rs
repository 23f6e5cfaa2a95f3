// avail-pack: Avail Artifact Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Root initialization task.
//!
//! ```text
//! InitRootsTask
//! created root "scratch" at roots/scratch
//!   Fetch: no-op
//!   Run:   materialize modules / packages --> run the root's action
//! ```
//!
//! Existing files are left alone, so running the task twice is harmless.

use std::path::Path;

use futures_util::future::BoxFuture;
use tracing::info;

use crate::error::{PackError, Result, TaskError};
use crate::model::{PendingCreation, Root, RootLocation};
use crate::task::{TaskContext, Taskable};

/// Scaffolds the roots marked "to be created".
#[derive(Debug, Clone)]
pub struct InitRootsTask {
    name: String,
    /// Only these roots; empty means all of them.
    only: Vec<String>,
}

impl Default for InitRootsTask {
    fn default() -> Self {
        Self::new()
    }
}

impl InitRootsTask {
    #[must_use]
    pub fn new() -> Self {
        Self {
            name: "init-roots".to_string(),
            only: Vec::new(),
        }
    }

    /// Restricts the task to the named roots.
    #[must_use]
    pub fn with_roots(mut self, names: impl IntoIterator<Item = String>) -> Self {
        self.only = names.into_iter().collect();
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    fn failed(&self, message: String) -> anyhow::Error {
        PackError::from(TaskError::ExecutionFailed {
            name: self.name.clone(),
            message,
        })
        .into()
    }

    /// Selected roots in name order.
    fn selected<'a>(&self, ctx: &'a TaskContext) -> Result<Vec<&'a Root>> {
        let roots: Vec<&Root> = ctx.project().created_roots().collect();
        if self.only.is_empty() {
            return Ok(roots);
        }
        if let Some(unknown) = self
            .only
            .iter()
            .find(|name| !roots.iter().any(|root| root.name() == name.as_str()))
        {
            return Err(self.failed(format!("no root to be created named '{unknown}'")));
        }
        Ok(roots
            .into_iter()
            .filter(|root| self.only.iter().any(|name| name == root.name()))
            .collect())
    }

    fn initialize(
        &self,
        ctx: &TaskContext,
        root: &Root,
        dir: &Path,
        creation: &PendingCreation,
    ) -> Result<()> {
        if ctx.is_dry_run() {
            info!(
                root = %root.name(),
                path = %dir.display(),
                modules = creation.modules().len(),
                packages = creation.module_packages().len(),
                "[DRY-RUN] would create root"
            );
            return Ok(());
        }

        let header = ctx.project().options().module_header.as_deref();
        let report = creation.materialize(dir, header)?;
        info!(
            root = %root.name(),
            path = %dir.display(),
            created = report.created.len(),
            skipped = report.skipped.len(),
            "root initialized"
        );
        root.run_action()
    }

    /// Execute the run phase.
    ///
    /// # Errors
    ///
    /// Returns an error if a requested root is unknown, a root lives inside an
    /// archive, or a file cannot be written.
    pub fn do_run(&self, ctx: &TaskContext) -> Result<()> {
        let roots = self.selected(ctx)?;
        if roots.is_empty() {
            info!("no roots to create");
            return Ok(());
        }

        for root in roots {
            if ctx.is_cancelled() {
                return Err(PackError::from(TaskError::Interrupted(self.name.clone())).into());
            }
            let Some(creation) = root.pending_creation() else {
                continue;
            };
            let RootLocation::Directory(dir) = root.location() else {
                return Err(self.failed(format!(
                    "root '{}' cannot be created inside an archive ({})",
                    root.name(),
                    root.location()
                )));
            };
            self.initialize(ctx, root, dir, creation)?;
        }
        Ok(())
    }
}

impl Taskable for InitRootsTask {
    fn name(&self) -> &str {
        &self.name
    }

    fn do_fetch<'a>(&'a self, _ctx: &'a TaskContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(std::future::ready(Ok(())))
    }

    fn do_run<'a>(&'a self, ctx: &'a TaskContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move { self.do_run(ctx) })
    }
}
