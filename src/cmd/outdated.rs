// avail-pack: Avail Artifact Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Outdated command implementation for avail-pack.

use crate::project::AvailProject;
use crate::resolve::{LatestVersionSource, UpdateAdvisory, check_updates};

/// One line per advisory, or a note that everything is current.
#[must_use]
pub fn format_advisories(advisories: &[UpdateAdvisory]) -> Vec<String> {
    if advisories.is_empty() {
        return vec!["All dependencies are up to date".to_string()];
    }
    advisories.iter().map(ToString::to_string).collect()
}

/// Main handler for outdated command.
///
/// Lookups that fail are logged, never fatal.
pub async fn run_outdated_command(project: &AvailProject, versions: &dyn LatestVersionSource) {
    let advisories = check_updates(project, versions).await;
    for line in format_advisories(&advisories) {
        println!("{line}");
    }
}
