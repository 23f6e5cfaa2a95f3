// avail-pack: Avail Artifact Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Arguments for `init` and `package`.

use std::path::PathBuf;

use clap::Args;

/// Arguments for the `init` command.
#[derive(Debug, Clone, Default, Args)]
pub struct InitArgs {
    /// Roots to create; all roots under [create_roots] when omitted.
    #[arg(value_name = "ROOT")]
    pub roots: Vec<String>,
}

/// Arguments for the `package` command.
#[derive(Debug, Clone, Default, Args)]
pub struct PackageArgs {
    /// Writes the artifact here instead of the configured output directory.
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Runs `init` for roots that do not exist yet before packaging.
    #[arg(long)]
    pub init: bool,
}
