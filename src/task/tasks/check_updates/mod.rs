// avail-pack: Avail Artifact Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Update advisory task.
//!
//! ```text
//! CheckUpdatesTask
//!   Run: runtime (runtime ordering) + [dependencies] (library ordering)
//!        vs. LatestVersionSource --> warnings only
//! ```
//!
//! Never fails because of a lookup; an unreachable repository only costs a
//! log line.

use futures_util::future::BoxFuture;
use tracing::info;

use crate::error::Result;
use crate::resolve::check_updates;
use crate::task::{TaskContext, Taskable};

#[derive(Debug, Clone, Copy, Default)]
pub struct CheckUpdatesTask;

impl CheckUpdatesTask {
    /// Execute the run phase.
    ///
    /// # Errors
    ///
    /// This function is currently infallible and always returns `Ok(())`.
    pub async fn do_run(self, ctx: &TaskContext) -> Result<()> {
        let project = ctx.project();
        if project.runtime().is_none() && project.dependencies().is_empty() {
            info!("nothing to check");
            return Ok(());
        }

        let advisories = check_updates(project, ctx.versions()).await;
        if advisories.is_empty() {
            info!("all dependencies are up to date");
        } else {
            info!(count = advisories.len(), "updates available");
        }
        Ok(())
    }
}

impl Taskable for CheckUpdatesTask {
    fn name(&self) -> &'static str {
        "check-updates"
    }

    fn do_fetch<'a>(&'a self, _ctx: &'a TaskContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(std::future::ready(Ok(())))
    }

    fn do_run<'a>(&'a self, ctx: &'a TaskContext) -> BoxFuture<'a, Result<()>> {
        Box::pin((*self).do_run(ctx))
    }
}
