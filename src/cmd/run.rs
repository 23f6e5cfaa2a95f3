// avail-pack: Avail Artifact Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Run command implementation for avail-pack.

use std::sync::Arc;

use anyhow::anyhow;

use crate::cli::run::RunArgs;
use crate::config::types::Aliases;
use crate::error::Result;
use crate::project::AvailProject;
use crate::task::manager::TaskManager;
use crate::task::select::TaskSelector;
use crate::task::{Task, Taskable};

/// Resolves task names, globs and aliases to tasks, in order.
///
/// # Errors
///
/// Returns an error for an invalid glob or when nothing matches.
pub fn resolve_tasks(aliases: &Aliases, patterns: &[String]) -> Result<Vec<Task>> {
    let tasks = TaskSelector::new(aliases).tasks(patterns)?;
    if tasks.is_empty() {
        return Err(anyhow!("No tasks matched: {}", patterns.join(" ")));
    }
    let names: Vec<_> = tasks.iter().map(Taskable::name).collect();
    tracing::info!(tasks = ?names, "Resolved tasks to run");
    Ok(tasks)
}

/// Runs the manager's tasks, cancelling them on Ctrl+C.
///
/// # Errors
///
/// Returns the first task failure, or an error if interrupted.
pub async fn run_with_interrupt(manager: TaskManager) -> Result<()> {
    let cancel_token = manager.cancel_token();
    let watcher = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Received Ctrl+C, interrupting tasks...");
            cancel_token.cancel();
        }
    });

    let result = manager.run_all().await;
    watcher.abort();
    result
}

/// Main handler for run command.
///
/// # Errors
///
/// Returns an error if task resolution fails or a task fails.
pub async fn run_tasks_command(
    args: &RunArgs,
    project: AvailProject,
    aliases: &Aliases,
    dry_run: bool,
) -> Result<()> {
    let tasks = resolve_tasks(aliases, &args.tasks)?;

    let mut manager = TaskManager::new(Arc::new(project)).with_dry_run(dry_run);
    for task in tasks {
        manager.add(task);
    }

    run_with_interrupt(manager).await?;
    tracing::info!("Tasks completed successfully");
    Ok(())
}
