// avail-pack: Avail Artifact Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Network module with async downloads.
//!
//! ```text
//! Downloader::new()
//!   .url() .file() .header()
//!   .progress() .silent() .cancel_token()
//!        |
//!     fetch()  GET + status check (404 -> HttpError{404})
//!        |
//!        +-----------------+
//!        v                 v
//!   download()        download_string()
//!   jar -> roots dir  maven-metadata.xml
//!        |
//!        v
//!   Progress display
//!     Bar     [=====>     ] 50MB/100MB
//!     Spinner * 50MB @ 5MB/s
//!     Silent  (none)
//!
//! Global client: OnceLock, connection pool, keep-alive
//! Cancellation:  CancellationToken -> cleanup partial -> Interrupted
//! ```

use crate::error::{NetworkError, PackResult};
use crate::utility::fs::guard::PartialFileGuard;
use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::{Client, Response};
use std::path::PathBuf;
use std::sync::OnceLock;
use tokio::io::AsyncWriteExt;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Global HTTP client - initialized once, reused across all downloads.
/// Falls back to a basic client if custom configuration fails.
fn global_client() -> &'static Client {
    static CLIENT: OnceLock<Client> = OnceLock::new();
    CLIENT.get_or_init(|| {
        Client::builder()
            .user_agent(format!("avail-pack/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| Client::new())
    })
}

fn bar_style() -> ProgressStyle {
    static STYLE: OnceLock<ProgressStyle> = OnceLock::new();
    STYLE
        .get_or_init(|| {
            ProgressStyle::with_template(
                "{msg} [{wide_bar:.cyan/blue}] {bytes}/{total_bytes} @ {binary_bytes_per_sec}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-")
        })
        .clone()
}

fn spinner_style() -> ProgressStyle {
    static STYLE: OnceLock<ProgressStyle> = OnceLock::new();
    STYLE
        .get_or_init(|| {
            ProgressStyle::with_template("{spinner:.green} {msg} {bytes}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
        })
        .clone()
}

/// Progress display style for downloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProgressDisplay {
    /// Progress bar when the size is known, spinner otherwise
    #[default]
    Bar,
    /// Always a spinner
    Spinner,
    /// No visual progress
    Silent,
}

/// Async HTTP downloader with builder pattern.
///
/// # Example
/// ```ignore
/// use avail_pack::net::Downloader;
///
/// Downloader::new()
///     .url("https://repo.example.org/org/availlang/avail-stdlib/2.0.0/avail-stdlib-2.0.0.jar")
///     .file("roots/avail-stdlib-2.0.0.jar")
///     .download()
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct Downloader {
    client: Client,
    url: Option<String>,
    output_file: Option<PathBuf>,
    headers: Vec<(String, String)>,
    cancel: CancellationToken,
    progress_display: ProgressDisplay,
}

impl Default for Downloader {
    fn default() -> Self {
        Self::new()
    }
}

impl Downloader {
    /// User-Agent is set to "avail-pack/VERSION"
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: global_client().clone(),
            url: None,
            output_file: None,
            headers: Vec::new(),
            cancel: CancellationToken::new(),
            progress_display: ProgressDisplay::default(),
        }
    }

    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    #[must_use]
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_file = Some(path.into());
        self
    }

    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub const fn progress(mut self, style: ProgressDisplay) -> Self {
        self.progress_display = style;
        self
    }

    #[must_use]
    pub const fn silent(mut self) -> Self {
        self.progress_display = ProgressDisplay::Silent;
        self
    }

    /// Abort the transfer when `token` is cancelled.
    #[must_use]
    pub fn cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    fn create_progress_bar(&self, total_size: u64, label: String) -> Option<ProgressBar> {
        let pb = match self.progress_display {
            ProgressDisplay::Silent => return None,
            ProgressDisplay::Bar if total_size > 0 => {
                let pb = ProgressBar::new(total_size);
                pb.set_style(bar_style());
                pb
            }
            ProgressDisplay::Bar | ProgressDisplay::Spinner => {
                let pb = ProgressBar::new_spinner();
                pb.set_style(spinner_style());
                pb
            }
        };
        pb.set_message(label);
        Some(pb)
    }

    /// Sends the GET request and rejects non-success statuses.
    async fn fetch(&self) -> PackResult<(&str, Response)> {
        let url = self
            .url
            .as_deref()
            .ok_or_else(|| NetworkError::InvalidUrl("no URL provided".to_string()))?;

        if self.cancel.is_cancelled() {
            return Err(NetworkError::Interrupted.into());
        }

        let mut request = self.client.get(url);
        for (name, value) in &self.headers {
            request = request.header(name.as_str(), value.as_str());
        }

        debug!(url, "GET");
        let response = request.send().await.map_err(NetworkError::Reqwest)?;

        if !response.status().is_success() {
            return Err(NetworkError::HttpError {
                status: response.status().as_u16(),
                url: url.to_string(),
            }
            .into());
        }

        Ok((url, response))
    }

    /// Download to the configured file.
    ///
    /// The file is removed again if anything fails after it was created.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No URL or output file is configured.
    /// - The network request fails or returns a non-success status code.
    /// - Parent directories cannot be created.
    /// - The output file cannot be created or written to.
    /// - The download is cancelled.
    pub async fn download(&self) -> PackResult<()> {
        let (url, response) = self.fetch().await?;
        let output = self
            .output_file
            .as_ref()
            .ok_or_else(|| NetworkError::DownloadFailed {
                url: url.to_string(),
                message: "no output file specified".to_string(),
            })?;
        let failed = |action: &str, e: std::io::Error| NetworkError::DownloadFailed {
            url: url.to_string(),
            message: format!("failed to {action} {}: {e}", output.display()),
        };

        if let Some(parent) = output.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| failed("create parent directory of", e))?;
        }

        let mut file = tokio::fs::File::create(output)
            .await
            .map_err(|e| failed("create", e))?;
        let mut guard = PartialFileGuard::new(output.clone());

        let label = output
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let progress_bar =
            self.create_progress_bar(response.content_length().unwrap_or(0), label);

        let mut stream = response.bytes_stream();
        loop {
            let chunk = tokio::select! {
                () = self.cancel.cancelled() => {
                    if let Some(pb) = &progress_bar {
                        pb.abandon_with_message("interrupted");
                    }
                    return Err(NetworkError::Interrupted.into());
                }
                chunk = stream.next() => chunk,
            };
            let Some(chunk) = chunk else { break };

            let chunk = chunk.map_err(NetworkError::Reqwest)?;
            file.write_all(&chunk)
                .await
                .map_err(|e| failed("write to", e))?;

            if let Some(pb) = &progress_bar {
                pb.inc(chunk.len() as u64);
            }
        }

        file.flush().await.map_err(|e| failed("flush", e))?;
        guard.keep();

        if let Some(pb) = progress_bar {
            pb.finish_and_clear();
        }

        Ok(())
    }

    /// Download and return content as string.
    ///
    /// # Errors
    ///
    /// Returns an error if the network request fails, returns a non-success status code,
    /// or if the download is cancelled.
    pub async fn download_string(&self) -> PackResult<String> {
        let (_, response) = self.fetch().await?;

        tokio::select! {
            () = self.cancel.cancelled() => Err(NetworkError::Interrupted.into()),
            text = response.text() => Ok(text.map_err(NetworkError::Reqwest)?),
        }
    }
}
