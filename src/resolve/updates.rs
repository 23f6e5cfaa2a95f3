// avail-pack: Avail Artifact Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Advisory "newer version available" checks.

use std::fmt;

use tracing::{debug, warn};

use super::LatestVersionSource;
use crate::model::LibraryDependency;
use crate::model::version::{VersionFamily, is_newer};
use crate::project::AvailProject;

/// A dependency with a newer published version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateAdvisory {
    pub name: String,
    pub group: String,
    pub artifact: String,
    pub current: String,
    pub latest: String,
    pub family: VersionFamily,
}

impl fmt::Display for UpdateAdvisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}:{}) {} -> {}",
            self.name, self.group, self.artifact, self.current, self.latest
        )
    }
}

async fn check_one(
    source: &dyn LatestVersionSource,
    dependency: &LibraryDependency,
    family: VersionFamily,
) -> Option<UpdateAdvisory> {
    let latest = match source
        .latest_version(dependency.group(), dependency.artifact())
        .await
    {
        Ok(Some(latest)) => latest,
        Ok(None) => {
            debug!(dependency = %dependency, "no published versions found");
            return None;
        }
        Err(e) => {
            warn!(dependency = %dependency, error = %e, "update check failed");
            return None;
        }
    };

    match is_newer(family, dependency.version(), &latest) {
        Ok(true) => Some(UpdateAdvisory {
            name: dependency.name().to_string(),
            group: dependency.group().to_string(),
            artifact: dependency.artifact().to_string(),
            current: dependency.version().to_string(),
            latest,
            family,
        }),
        Ok(false) => {
            debug!(dependency = %dependency, latest = %latest, "up to date");
            None
        }
        Err(e) => {
            warn!(dependency = %dependency, error = %e, "cannot compare versions");
            None
        }
    }
}

/// Compares the runtime and every library dependency with the latest
/// published version.
///
/// Lookup or parse failures are logged and skipped; this never fails.
pub async fn check_updates(
    project: &AvailProject,
    source: &dyn LatestVersionSource,
) -> Vec<UpdateAdvisory> {
    let mut advisories = Vec::new();

    if let Some(runtime) = project.runtime()
        && let Some(advisory) = check_one(source, runtime, VersionFamily::Runtime).await
    {
        warn!(
            current = %advisory.current,
            latest = %advisory.latest,
            "a newer Avail runtime is available"
        );
        advisories.push(advisory);
    }

    for dependency in project.dependencies() {
        if let Some(advisory) = check_one(source, dependency, VersionFamily::Library).await {
            warn!(
                dependency = %advisory.name,
                current = %advisory.current,
                latest = %advisory.latest,
                "a newer library version is available"
            );
            advisories.push(advisory);
        }
    }

    advisories
}
