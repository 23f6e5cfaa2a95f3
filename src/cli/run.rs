// avail-pack: Avail Artifact Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Arguments for `run` and `list`.
//!
//! ```text
//! run release            alias from [aliases]
//! run 'init-*' package   globs over task names
//! list -a 'p*'           what `run 'p*'` would execute
//! ```

use clap::Args;

/// Arguments for the `run` command.
#[derive(Debug, Clone, Default, Args)]
pub struct RunArgs {
    /// Tasks to run, in order. Aliases and globs like 'check-*' are supported.
    #[arg(value_name = "TASK", required = true)]
    pub tasks: Vec<String>,
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, Args)]
pub struct ListArgs {
    /// With task patterns, shows only the tasks `run` would execute.
    #[arg(short = 'a', long)]
    pub all: bool,

    /// Shows only aliases.
    #[arg(short = 'i', long)]
    pub aliases: bool,

    /// Task patterns to resolve, see --all.
    #[arg(value_name = "TASK")]
    pub tasks: Vec<String>,
}
