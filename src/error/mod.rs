// avail-pack: Avail Artifact Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!              PackError (~24 bytes)
//!                     |
//!   +------+------+---+---+------+----+----+
//!   |      |      |       |      |    |    |
//!   v      v      v       v      v    v    v
//! Bail    Cfg  Artifact  Net   Task  Fs  Io/Other
//!         Box    Box     Box   Box   Box Box<str>
//!
//! Sub-errors (unboxed internally):
//!   Config   ParseError, MissingKey, InvalidValue,
//!            InvalidCoordinate, UnknownDigestAlgorithm, InvalidVersion
//!   Artifact UnsupportedDependency, RootNotFound, DuplicateEntry,
//!            Zip, Manifest
//!   Network  Reqwest, HttpError, NotFound
//!   Task     NotFound, ExecutionFailed, Interrupted
//!   Fs       NotFound, PermissionDenied, IoError
//!
//! All variants boxed => PackError fits in 24 bytes.
//! ```

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`PackError`].
pub type PackResult<T> = std::result::Result<T, PackError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum PackError {
    /// Fatal error that should terminate the application.
    #[error("fatal error: {0}")]
    Bailed(Box<str>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Artifact packaging error.
    #[error("artifact error: {0}")]
    Artifact(#[from] Box<ArtifactError>),

    /// Network operation failed.
    #[error("network error: {0}")]
    Network(#[from] Box<NetworkError>),

    /// Task execution error.
    #[error("task error: {0}")]
    Task(#[from] Box<TaskError>),

    /// Filesystem error.
    #[error("filesystem error: {0}")]
    Fs(#[from] Box<FsError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),

    /// Generic error with message.
    #[error("{0}")]
    Other(Box<str>),
}

/// Create a fatal [`PackError::Bailed`] that terminates the application.
pub fn bail_out(message: impl Into<String>) -> PackError {
    PackError::Bailed(message.into().into_boxed_str())
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for PackError {
                fn from(err: $error) -> Self {
                    PackError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    ConfigError => Config,
    ArtifactError => Artifact,
    NetworkError => Network,
    TaskError => Task,
    FsError => Fs,
    std::io::Error => Io,
}

// --- Config Errors ---

/// Configuration-related errors.
///
/// Everything here is raised before any file is written.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Missing required configuration key.
    #[error("missing required config key '{key}' in section '[{section}]'")]
    MissingKey { section: String, key: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },

    /// Dependency coordinate is not `group:artifact:version`.
    #[error("invalid dependency coordinate '{coordinate}': expected 'group:artifact:version'")]
    InvalidCoordinate { coordinate: String },

    /// Digest algorithm name is not supported.
    #[error("unknown digest algorithm '{0}' (expected SHA-224, SHA-256, SHA-384 or SHA-512)")]
    UnknownDigestAlgorithm(String),

    /// Version string could not be parsed.
    #[error("invalid version '{version}': {message}")]
    InvalidVersion { version: String, message: String },

    /// Root location could not be interpreted.
    #[error("invalid location '{location}' for root '{root}'")]
    InvalidLocation { root: String, location: String },
}

// --- Artifact Errors ---

/// Artifact packaging errors.
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// A resolved dependency is neither a jar, a zip nor a directory.
    #[error("unsupported dependency '{path}': expected a .jar, .zip or directory")]
    UnsupportedDependency { path: String },

    /// A root's source location does not exist.
    #[error("root '{root}' not found at {path}")]
    RootNotFound { root: String, path: String },

    /// An entry that must be written exactly once was already present.
    #[error("entry '{0}' written twice")]
    DuplicateEntry(String),

    /// An extra inclusion does not exist.
    #[error("inclusion not found: {0}")]
    InclusionNotFound(String),

    /// Error from the zip library.
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Artifact manifest could not be serialized.
    #[error("failed to serialize artifact manifest: {0}")]
    Manifest(#[from] serde_json::Error),
}

// --- Network Errors ---

/// Network operation errors.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// Download failed.
    #[error("download failed: {url} - {message}")]
    DownloadFailed { url: String, message: String },

    /// Download was interrupted by user or signal.
    #[error("download interrupted")]
    Interrupted,

    /// HTTP error response.
    #[error("http error {status}: {url}")]
    HttpError { status: u16, url: String },

    /// Error from reqwest library.
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// Invalid URL.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// No repository provides the requested coordinate.
    #[error("'{coordinate}' not found in any repository")]
    NotFound { coordinate: String },
}

// --- Task Errors ---

/// Task execution errors.
#[derive(Debug, Error)]
pub enum TaskError {
    /// Task was not found.
    #[error("task '{0}' not found")]
    NotFound(String),

    /// Task execution failed.
    #[error("task '{name}' failed: {message}")]
    ExecutionFailed { name: String, message: String },

    /// Task was interrupted.
    #[error("task '{0}' was interrupted")]
    Interrupted(String),
}

// --- Filesystem Errors ---

/// Filesystem operation errors.
#[derive(Debug, Error)]
pub enum FsError {
    /// Path not found.
    #[error("path not found: {0}")]
    NotFound(String),

    /// Permission denied.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// General I/O error.
    #[error("I/O error on '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl FsError {
    /// Wraps an I/O error with the path it occurred on.
    pub fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(path.display().to_string()),
            std::io::ErrorKind::PermissionDenied => {
                Self::PermissionDenied(path.display().to_string())
            }
            _ => Self::IoError {
                path: path.display().to_string(),
                source,
            },
        }
    }
}
