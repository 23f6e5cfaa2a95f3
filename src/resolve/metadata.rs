// avail-pack: Avail Artifact Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Latest published versions from `maven-metadata.xml`.

use std::sync::OnceLock;

use anyhow::{Context, anyhow};
use futures_util::future::BoxFuture;
use regex::Regex;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::maven::is_missing;
use super::{Repository, module_path};
use crate::error::Result;
use crate::net::Downloader;

/// Looks up the newest published version of `group:artifact`.
pub trait LatestVersionSource: Send + Sync {
    /// `Ok(None)` when no repository knows the artifact.
    fn latest_version<'a>(
        &'a self,
        group: &'a str,
        artifact: &'a str,
    ) -> BoxFuture<'a, Result<Option<String>>>;
}

type CachedRegex = OnceLock<std::result::Result<Regex, regex::Error>>;

/// `<tag>version</tag>`, compiled on first use.
pub(crate) fn version_tag(tag: &str) -> Result<&'static Regex> {
    static RELEASE: CachedRegex = OnceLock::new();
    static LATEST: CachedRegex = OnceLock::new();
    let cell = if tag == "release" { &RELEASE } else { &LATEST };
    cell.get_or_init(|| Regex::new(&format!(r"<{tag}>\s*([^<\s]+)\s*</{tag}>")))
        .as_ref()
        .map_err(|e| anyhow!("failed to compile <{tag}> regex: {e}"))
}

/// Extracts `<release>`, falling back to `<latest>`.
///
/// # Errors
///
/// Returns an error if the pattern fails to compile.
pub fn parse_latest_version(xml: &str) -> Result<Option<String>> {
    for tag in ["release", "latest"] {
        if let Some(version) = version_tag(tag)?.captures(xml).and_then(|c| c.get(1)) {
            return Ok(Some(version.as_str().to_string()));
        }
    }
    Ok(None)
}

/// Reads `maven-metadata.xml` from each repository until one answers.
#[derive(Debug, Clone)]
pub struct MavenMetadataSource {
    repositories: Vec<Repository>,
    cancel_token: CancellationToken,
}

impl MavenMetadataSource {
    #[must_use]
    pub fn new(repositories: Vec<Repository>) -> Self {
        Self {
            repositories,
            cancel_token: CancellationToken::new(),
        }
    }

    #[must_use]
    pub fn with_cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel_token = token;
        self
    }

    async fn lookup(&self, group: &str, artifact: &str) -> Result<Option<String>> {
        let relative = format!("{}/maven-metadata.xml", module_path(group, artifact));

        for repository in &self.repositories {
            let xml = match repository {
                Repository::Remote(base) => {
                    let url = format!("{base}/{relative}");
                    match Downloader::new()
                        .url(&url)
                        .silent()
                        .cancel_token(self.cancel_token.clone())
                        .download_string()
                        .await
                    {
                        Ok(xml) => xml,
                        Err(e) if is_missing(&e) => {
                            debug!(url = %url, "no metadata");
                            continue;
                        }
                        Err(e) => return Err(e).with_context(|| format!("failed to read {url}")),
                    }
                }
                Repository::Local(dir) => {
                    let path = dir.join(&relative);
                    if !path.is_file() {
                        debug!(path = %path.display(), "no metadata");
                        continue;
                    }
                    tokio::fs::read_to_string(&path)
                        .await
                        .with_context(|| format!("failed to read {}", path.display()))?
                }
            };

            if let Some(version) = parse_latest_version(&xml)? {
                return Ok(Some(version));
            }
        }

        Ok(None)
    }
}

impl LatestVersionSource for MavenMetadataSource {
    fn latest_version<'a>(
        &'a self,
        group: &'a str,
        artifact: &'a str,
    ) -> BoxFuture<'a, Result<Option<String>>> {
        Box::pin(self.lookup(group, artifact))
    }
}
