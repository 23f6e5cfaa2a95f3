// avail-pack: Avail Artifact Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   config, inis, init, package, outdated, run, list
//! ```

pub mod config;
pub mod list;
pub mod outdated;
pub mod package;
pub mod run;

#[cfg(test)]
mod tests;
