// avail-pack: Avail Artifact Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Prints the project summary to stdout.

use futures_util::future::BoxFuture;

use crate::error::Result;
use crate::task::{TaskContext, Taskable};

#[derive(Debug, Clone, Copy, Default)]
pub struct PrintConfigTask;

impl Taskable for PrintConfigTask {
    fn name(&self) -> &'static str {
        "print-config"
    }

    fn do_fetch<'a>(&'a self, _ctx: &'a TaskContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(std::future::ready(Ok(())))
    }

    fn do_run<'a>(&'a self, ctx: &'a TaskContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            print!("{}", ctx.project().render());
            Ok(())
        })
    }
}
