// avail-pack: Avail Artifact Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `init` and `package` commands.

use std::sync::Arc;

use crate::cli::package::{InitArgs, PackageArgs};
use crate::cmd::run::run_with_interrupt;
use crate::error::Result;
use crate::project::AvailProject;
use crate::task::Task;
use crate::task::manager::TaskManager;
use crate::task::tasks::init_roots::InitRootsTask;
use crate::task::tasks::package::PackageArtifactTask;

/// Creates the roots marked to be created.
///
/// # Errors
///
/// Returns an error if a named root is unknown or creating it fails.
pub async fn run_init_command(args: &InitArgs, project: AvailProject, dry_run: bool) -> Result<()> {
    let mut manager = TaskManager::new(Arc::new(project)).with_dry_run(dry_run);
    manager.add(Task::InitRoots(
        InitRootsTask::new().with_roots(args.roots.iter().cloned()),
    ));
    run_with_interrupt(manager).await
}

/// Writes the artifact, optionally creating missing roots first.
///
/// # Errors
///
/// Returns an error if a dependency cannot be resolved or packaging fails.
pub async fn run_package_command(
    args: &PackageArgs,
    project: AvailProject,
    dry_run: bool,
) -> Result<()> {
    let mut manager = TaskManager::new(Arc::new(project)).with_dry_run(dry_run);
    if args.init {
        manager.add(Task::InitRoots(InitRootsTask::new()));
    }
    manager.add(Task::Package(
        PackageArtifactTask::new().with_output(args.output.clone()),
    ));
    run_with_interrupt(manager).await
}
