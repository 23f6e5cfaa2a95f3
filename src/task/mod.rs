// avail-pack: Avail Artifact Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Task execution system.
//!
//! # Architecture
//!
//! ```text
//! TaskManager
//!      |
//!      v
//!   Task enum ----> TaskContext (project, resolver, version source, cancel token)
//!      |
//!      v
//!    Phases
//!   Fetch --> Run
//!
//! Task variants: InitRoots, Package, PrintConfig, CheckUpdates
//! ```
//!
//! # Key Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`TaskManager`](manager::TaskManager) | Runs tasks in order with cancellation |
//! | [`Task`] | Enum dispatching to concrete task implementations |
//! | [`Taskable`] | Trait defining the common task interface |
//! | [`Phase`] | Two-phase lifecycle: Fetch → Run |
//! | [`TaskContext`] | Project, collaborators and cancellation token |
//!
//! The [`Task`] enum implements `Taskable` via `impl_taskable_for_task!`,
//! which generates one match arm per variant.
//!
//! ## Adding a New Task
//!
//! 1. Create the task struct in `tasks/`
//! 2. Implement `Taskable` for it
//! 3. Add a variant to the `Task` enum and to `impl_taskable_for_task!`
//! 4. Give it a name in [`Task::from_name`]

pub mod manager;
pub mod select;
pub mod tasks;

use futures_util::future::BoxFuture;
use std::fmt;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::error::{Result, TaskError};
use crate::project::AvailProject;
use crate::resolve::{DependencyResolver, LatestVersionSource, MavenMetadataSource, MavenResolver};

use tasks::check_updates::CheckUpdatesTask;
use tasks::init_roots::InitRootsTask;
use tasks::package::PackageArtifactTask;
use tasks::print_config::PrintConfigTask;

/// Task execution phase, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Make inputs available: resolve dependencies.
    Fetch,
    /// Do the actual work.
    Run,
}

impl Phase {
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Fetch, Self::Run]
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Fetch => "fetch",
            Self::Run => "run",
        }
    }
}

/// Trait for task implementations.
///
/// Methods return `BoxFuture` so the `Task` enum can delegate without
/// knowing the concrete future types.
pub trait Taskable {
    fn name(&self) -> &str;

    /// Whether the task has anything to do for this context.
    fn enabled(&self, _ctx: &TaskContext) -> bool {
        true
    }

    fn do_fetch<'a>(&'a self, ctx: &'a TaskContext) -> BoxFuture<'a, Result<()>>;

    fn do_run<'a>(&'a self, ctx: &'a TaskContext) -> BoxFuture<'a, Result<()>>;
}

/// Context provided to tasks during execution.
#[derive(Clone)]
pub struct TaskContext {
    project: Arc<AvailProject>,
    cancel_token: CancellationToken,
    dry_run: bool,
    resolver: Arc<dyn DependencyResolver>,
    versions: Arc<dyn LatestVersionSource>,
}

impl fmt::Debug for TaskContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskContext")
            .field("project", &self.project.name())
            .field("dry_run", &self.dry_run)
            .field("cancelled", &self.cancel_token.is_cancelled())
            .finish_non_exhaustive()
    }
}

impl TaskContext {
    /// Context resolving against the project's repositories.
    #[must_use]
    pub fn new(project: Arc<AvailProject>, cancel_token: CancellationToken) -> Self {
        let repositories = project.repositories().to_vec();
        Self {
            resolver: Arc::new(
                MavenResolver::new(repositories.clone()).with_cancel_token(cancel_token.clone()),
            ),
            versions: Arc::new(
                MavenMetadataSource::new(repositories).with_cancel_token(cancel_token.clone()),
            ),
            project,
            cancel_token,
            dry_run: false,
        }
    }

    #[must_use]
    pub const fn project(&self) -> &Arc<AvailProject> {
        &self.project
    }

    #[must_use]
    pub const fn cancel_token(&self) -> &CancellationToken {
        &self.cancel_token
    }

    #[must_use]
    pub const fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    #[must_use]
    pub fn resolver(&self) -> &dyn DependencyResolver {
        self.resolver.as_ref()
    }

    #[must_use]
    pub fn versions(&self) -> &dyn LatestVersionSource {
        self.versions.as_ref()
    }

    /// Sets dry-run mode; the default Maven resolver follows along.
    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        if dry_run {
            self.resolver = Arc::new(
                MavenResolver::new(self.project.repositories().to_vec())
                    .with_cancel_token(self.cancel_token.clone())
                    .with_dry_run(true),
            );
        }
        self
    }

    #[must_use]
    pub fn with_resolver(mut self, resolver: Arc<dyn DependencyResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    #[must_use]
    pub fn with_version_source(mut self, versions: Arc<dyn LatestVersionSource>) -> Self {
        self.versions = versions;
        self
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }
}

/// A runnable task.
#[derive(Debug, Clone)]
pub enum Task {
    /// Scaffold roots marked "to be created".
    InitRoots(InitRootsTask),
    /// Write the artifact.
    Package(PackageArtifactTask),
    /// Print the project summary.
    PrintConfig(PrintConfigTask),
    /// Log advisories for outdated dependencies.
    CheckUpdates(CheckUpdatesTask),
}

impl Task {
    /// Names accepted by [`Task::from_name`].
    pub const NAMES: &'static [&'static str] =
        &["check-updates", "init-roots", "package", "print-config"];

    /// Default-configured task for a registered name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "init-roots" => Some(Self::InitRoots(InitRootsTask::new())),
            "package" => Some(Self::Package(PackageArtifactTask::new())),
            "print-config" => Some(Self::PrintConfig(PrintConfigTask)),
            "check-updates" => Some(Self::CheckUpdates(CheckUpdatesTask)),
            _ => None,
        }
    }

    /// Runs the task through both phases, checking for cancellation
    /// before each.
    ///
    /// # Errors
    ///
    /// Returns an error if a phase fails or the task is interrupted.
    pub async fn run(&self, ctx: &TaskContext) -> Result<()> {
        if !Taskable::enabled(self, ctx) {
            tracing::debug!(task = %Taskable::name(self), "Skipping disabled task");
            return Ok(());
        }

        for phase in Phase::all() {
            if ctx.is_cancelled() {
                return Err(crate::error::PackError::from(TaskError::Interrupted(
                    Taskable::name(self).to_string(),
                ))
                .into());
            }
            tracing::debug!(task = %Taskable::name(self), phase = phase.name(), "Starting phase");
            match phase {
                Phase::Fetch => Taskable::do_fetch(self, ctx).await?,
                Phase::Run => Taskable::do_run(self, ctx).await?,
            }
        }

        Ok(())
    }
}

/// Implements Taskable for the Task enum by delegating to the inner types.
macro_rules! impl_taskable_for_task {
    ($($variant:ident),+ $(,)?) => {
        impl Taskable for Task {
            fn name(&self) -> &str {
                match self {
                    $(Task::$variant(t) => Taskable::name(t),)+
                }
            }

            fn enabled(&self, ctx: &TaskContext) -> bool {
                match self {
                    $(Task::$variant(t) => Taskable::enabled(t, ctx),)+
                }
            }

            fn do_fetch<'a>(&'a self, ctx: &'a TaskContext) -> BoxFuture<'a, Result<()>> {
                match self {
                    $(Task::$variant(t) => Taskable::do_fetch(t, ctx),)+
                }
            }

            fn do_run<'a>(&'a self, ctx: &'a TaskContext) -> BoxFuture<'a, Result<()>> {
                match self {
                    $(Task::$variant(t) => Taskable::do_run(t, ctx),)+
                }
            }
        }
    };
}

impl_taskable_for_task!(InitRoots, Package, PrintConfig, CheckUpdates);

#[cfg(test)]
mod tests;
