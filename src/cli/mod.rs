// avail-pack: Avail Artifact Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for avail-pack using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! avail-pack [global options] <command>
//! version
//! config
//! inis
//! init [ROOT...]
//! package [--output FILE] [--init]
//! outdated
//! run <TASK...>
//! list [-a] [--aliases] [TASK...]
//! ```

pub mod global;
pub mod package;
pub mod run;

#[cfg(test)]
mod tests;

use crate::cli::global::GlobalOptions;
use crate::cli::package::{InitArgs, PackageArgs};
use crate::cli::run::{ListArgs, RunArgs};
use clap::{Parser, Subcommand};

/// Avail Artifact Packaging Tool
///
/// Configures Avail module roots and packages them into jar artifacts.
#[derive(Debug, Parser)]
#[command(
    name = "avail-pack",
    author,
    version,
    about = "Avail Artifact Packaging Tool",
    long_about = "avail-pack Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Configures Avail module roots and packages them, together\n\
                  with their library dependencies, into a jar artifact.\n\n\
                  Invoking `avail-pack package` in a project directory writes\n\
                  the artifact. Do `avail-pack run <task>...` to run specific\n\
                  tasks. See `avail-pack <command> --help` for more information\n\
                  about a command.",
    after_help = "CONFIGURATION:\n\n\
                  By default, avail-pack loads `avail.toml` from the project\n\
                  directory (the current directory, or the one given with -C).\n\
                  Additional files can be specified with --ini, those are loaded\n\
                  after it and override it. AVAIL_PACK_* environment variables\n\
                  (AVAIL_PACK_SECTION__KEY, e.g. AVAIL_PACK_GLOBAL__DRY=true)\n\
                  and --set options are applied last. Use --no-default-inis to\n\
                  skip avail.toml and only use --ini."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Shows the project: roots, dependencies and packaging options.
    Config,

    /// Lists the configuration files in use.
    Inis,

    /// Creates roots marked to be created, with their modules.
    Init(InitArgs),

    /// Writes the artifact.
    Package(PackageArgs),

    /// Reports dependencies with newer versions available.
    Outdated,

    /// Runs tasks.
    Run(RunArgs),

    /// Lists available tasks.
    List(ListArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
