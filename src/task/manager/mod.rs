// avail-pack: Avail Artifact Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Task manager for orchestrating task execution.
//!
//! ```text
//! TaskManager::new(project)
//!   .add()  .with_cancel_token()  .with_dry_run()  .with_resolver()
//!   .run_all().await
//!       per task: Fetch --> Run, one task at a time
//! ```

use std::sync::Arc;

use crate::error::Result;
use anyhow::Context;
use tokio_util::sync::CancellationToken;

use crate::project::AvailProject;
use crate::resolve::{DependencyResolver, LatestVersionSource};

use super::{Task, TaskContext, Taskable};

/// Runs tasks sequentially in the order they were added.
pub struct TaskManager {
    tasks: Vec<Task>,
    cancel_token: CancellationToken,
    project: Arc<AvailProject>,
    dry_run: bool,
    resolver: Option<Arc<dyn DependencyResolver>>,
    versions: Option<Arc<dyn LatestVersionSource>>,
}

impl TaskManager {
    #[must_use]
    pub fn new(project: Arc<AvailProject>) -> Self {
        Self {
            tasks: Vec::new(),
            cancel_token: CancellationToken::new(),
            project,
            dry_run: false,
            resolver: None,
            versions: None,
        }
    }

    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Shares an externally owned token, e.g. one cancelled on Ctrl+C.
    #[must_use]
    pub fn with_cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel_token = token;
        self
    }

    /// Replaces the default Maven resolver.
    #[must_use]
    pub fn with_resolver(mut self, resolver: Arc<dyn DependencyResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Replaces the default `maven-metadata.xml` lookup.
    #[must_use]
    pub fn with_version_source(mut self, versions: Arc<dyn LatestVersionSource>) -> Self {
        self.versions = Some(versions);
        self
    }

    pub fn add(&mut self, task: Task) {
        self.tasks.push(task);
    }

    #[must_use]
    pub const fn task_count(&self) -> usize {
        self.tasks.len()
    }

    #[must_use]
    pub fn task_names(&self) -> Vec<&str> {
        self.tasks.iter().map(Taskable::name).collect()
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }

    #[must_use]
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    #[must_use]
    pub const fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Signals running tasks to stop at their next checkpoint.
    pub fn interrupt_all(&self) {
        tracing::info!("Interrupting all tasks");
        self.cancel_token.cancel();
    }

    fn create_context(&self) -> TaskContext {
        let mut ctx = TaskContext::new(Arc::clone(&self.project), self.cancel_token.clone())
            .with_dry_run(self.dry_run);
        if let Some(resolver) = &self.resolver {
            ctx = ctx.with_resolver(Arc::clone(resolver));
        }
        if let Some(versions) = &self.versions {
            ctx = ctx.with_version_source(Arc::clone(versions));
        }
        ctx
    }

    /// Runs all tasks sequentially, checking for cancellation between them.
    ///
    /// # Errors
    ///
    /// Returns an error if any task fails or if cancellation is requested.
    pub async fn run_all(&self) -> Result<()> {
        if self.tasks.is_empty() {
            tracing::debug!("No tasks to run");
            return Ok(());
        }

        tracing::info!(task_count = self.tasks.len(), "Starting task execution");

        let ctx = self.create_context();

        for (i, task) in self.tasks.iter().enumerate() {
            if self.is_cancelled() {
                anyhow::bail!("Task execution interrupted before task {}", i + 1);
            }

            tracing::info!(
                task = %task.name(),
                index = i + 1,
                total = self.tasks.len(),
                "Running task"
            );

            task.run(&ctx)
                .await
                .with_context(|| format!("Task '{}' failed", task.name()))?;
        }

        tracing::info!("All tasks completed successfully");
        Ok(())
    }
}

#[cfg(test)]
mod tests;
