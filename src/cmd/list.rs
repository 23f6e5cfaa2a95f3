// avail-pack: Avail Artifact Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! List command implementation for avail-pack.

use crate::cli::run::ListArgs;
use crate::config::types::Aliases;
use crate::error::Result;
use crate::task::select::TaskSelector;

/// Lines printed by `list`.
///
/// # Errors
///
/// Returns an error if task resolution fails.
pub fn list_lines(args: &ListArgs, aliases: &Aliases) -> Result<Vec<String>> {
    if args.aliases {
        if aliases.is_empty() {
            return Ok(vec!["No aliases defined".to_string()]);
        }
        return Ok(aliases
            .iter()
            .map(|(name, targets)| format!("{} = {}", name, targets.join(", ")))
            .collect());
    }

    let selector = TaskSelector::new(aliases);
    let tasks = if args.all && !args.tasks.is_empty() {
        selector.select(&args.tasks)?
    } else {
        selector.names().to_vec()
    };

    if tasks.is_empty() {
        Ok(vec!["No tasks found".to_string()])
    } else {
        Ok(tasks.into_iter().map(str::to_string).collect())
    }
}

/// Main handler for list command.
///
/// # Errors
///
/// Returns an error if task resolution fails.
pub fn run_list_command(args: &ListArgs, aliases: &Aliases) -> Result<()> {
    let lines = list_lines(args, aliases).inspect_err(|e| {
        eprintln!("Failed to resolve task patterns: {e}");
    })?;
    for line in lines {
        println!("{line}");
    }
    Ok(())
}
