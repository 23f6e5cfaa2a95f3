// avail-pack: Avail Artifact Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Version ordering for update advisories.
//!
//! ```text
//! RuntimeVersion  "1.6.1"          -> [1, 6, 1]
//! LibraryVersion  "2.0.0.alpha23"  -> [2, 0, 0] + pre-release "alpha23"
//!                 "1.2.3-rc.1"     -> [1, 2, 3] + pre-release "rc.1"
//!
//! numeric parts compared with zero padding: 1.2 == 1.2.0 < 1.2.1
//! equal numerics: release > any pre-release
//! ```
//!
//! Nothing here gates an operation; results only decide whether an
//! "update available" message is logged.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

fn invalid(version: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::InvalidVersion {
        version: version.to_string(),
        message: message.into(),
    }
}

fn compare_numeric(a: &[u64], b: &[u64]) -> Ordering {
    let len = a.len().max(b.len());
    (0..len)
        .map(|i| {
            let x = a.get(i).copied().unwrap_or(0);
            let y = b.get(i).copied().unwrap_or(0);
            x.cmp(&y)
        })
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// Plain dotted-numeric version of the Avail runtime.
#[derive(Debug, Clone)]
pub struct RuntimeVersion {
    parts: Vec<u64>,
}

impl RuntimeVersion {
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidVersion` if any component is not a
    /// non-negative integer.
    pub fn parse(version: &str) -> std::result::Result<Self, ConfigError> {
        let version = version.trim();
        if version.is_empty() {
            return Err(invalid(version, "empty version"));
        }
        let parts = version
            .split('.')
            .map(|part| {
                part.parse::<u64>()
                    .map_err(|_| invalid(version, format!("'{part}' is not a number")))
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self { parts })
    }

    #[must_use]
    pub fn parts(&self) -> &[u64] {
        &self.parts
    }
}

impl PartialEq for RuntimeVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other).is_eq()
    }
}

impl Eq for RuntimeVersion {}

impl PartialOrd for RuntimeVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RuntimeVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_numeric(&self.parts, &other.parts)
    }
}

impl FromStr for RuntimeVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RuntimeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text: Vec<String> = self.parts.iter().map(u64::to_string).collect();
        f.write_str(&text.join("."))
    }
}

/// One run of a pre-release label: `alpha23` is `[Word("alpha"), Number(23)]`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Segment {
    // Numbers sort before words, as in semver identifiers.
    Number(u64),
    Word(String),
}

fn segments(label: &str) -> Vec<Segment> {
    let mut result = Vec::new();
    let mut current = String::new();
    let mut digits = false;

    let mut flush = |current: &mut String, digits: bool| {
        if current.is_empty() {
            return;
        }
        let segment = if digits {
            current
                .parse()
                .map_or_else(|_| Segment::Word(current.clone()), Segment::Number)
        } else {
            Segment::Word(current.to_ascii_lowercase())
        };
        result.push(segment);
        current.clear();
    };

    for c in label.chars() {
        if c == '.' || c == '-' || c == '_' || c == '+' {
            flush(&mut current, digits);
            continue;
        }
        let is_digit = c.is_ascii_digit();
        if !current.is_empty() && is_digit != digits {
            flush(&mut current, digits);
        }
        digits = is_digit;
        current.push(c);
    }
    flush(&mut current, digits);
    result
}

/// Dotted-numeric version with an optional pre-release suffix, as used by
/// published Avail libraries.
#[derive(Debug, Clone)]
pub struct LibraryVersion {
    parts: Vec<u64>,
    pre_release: Option<String>,
}

impl LibraryVersion {
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidVersion` if the version does not start
    /// with a numeric component.
    pub fn parse(version: &str) -> std::result::Result<Self, ConfigError> {
        let version = version.trim();
        let (numeric, mut suffix) = match version.split_once('-') {
            Some((numeric, suffix)) => (numeric, Some(suffix.to_string())),
            None => (version, None),
        };

        let mut parts = Vec::new();
        let mut components = numeric.split('.');
        while let Some(component) = components.next() {
            if let Ok(value) = component.parse::<u64>() {
                parts.push(value);
            } else {
                // First non-numeric component starts the pre-release label.
                let rest: Vec<&str> = std::iter::once(component)
                    .chain(components.by_ref())
                    .collect();
                let label = rest.join(".");
                suffix = Some(match suffix {
                    Some(existing) => format!("{label}-{existing}"),
                    None => label,
                });
                break;
            }
        }

        if parts.is_empty() {
            return Err(invalid(version, "expected a leading numeric component"));
        }
        Ok(Self {
            parts,
            pre_release: suffix.filter(|s| !s.is_empty()),
        })
    }

    #[must_use]
    pub fn parts(&self) -> &[u64] {
        &self.parts
    }

    #[must_use]
    pub fn pre_release(&self) -> Option<&str> {
        self.pre_release.as_deref()
    }

    #[must_use]
    pub const fn is_pre_release(&self) -> bool {
        self.pre_release.is_some()
    }
}

impl PartialEq for LibraryVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other).is_eq()
    }
}

impl Eq for LibraryVersion {}

impl PartialOrd for LibraryVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LibraryVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_numeric(&self.parts, &other.parts).then_with(|| {
            match (&self.pre_release, &other.pre_release) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(a), Some(b)) => segments(a).cmp(&segments(b)),
            }
        })
    }
}

impl FromStr for LibraryVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for LibraryVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text: Vec<String> = self.parts.iter().map(u64::to_string).collect();
        f.write_str(&text.join("."))?;
        if let Some(pre_release) = &self.pre_release {
            write!(f, "-{pre_release}")?;
        }
        Ok(())
    }
}

/// Which parsing policy a version string follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionFamily {
    /// Plain dotted numeric (the Avail runtime).
    Runtime,
    /// Dotted numeric with optional pre-release suffix (libraries).
    Library,
}

/// Returns `true` if `latest` orders strictly after `current`.
///
/// # Errors
///
/// Returns `ConfigError::InvalidVersion` if either version does not parse
/// under `family`.
pub fn is_newer(
    family: VersionFamily,
    current: &str,
    latest: &str,
) -> std::result::Result<bool, ConfigError> {
    Ok(match family {
        VersionFamily::Runtime => RuntimeVersion::parse(latest)? > RuntimeVersion::parse(current)?,
        VersionFamily::Library => LibraryVersion::parse(latest)? > LibraryVersion::parse(current)?,
    })
}
