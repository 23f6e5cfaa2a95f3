// avail-pack: Avail Artifact Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Data model shared by configuration, packaging and scaffolding.
//!
//! ```text
//! Root ---------------- name, location, extensions, entry points
//!   +-- PendingCreation  modules / module packages to scaffold
//! LibraryDependency --> Root (jar:<roots>/<artifact>-<version>.jar)
//! ManifestRoot <------- Root + DigestAlgorithm + digests
//! RuntimeVersion / LibraryVersion   advisory ordering only
//! ```

pub mod dependency;
pub mod digest;
pub mod manifest;
pub mod root;
pub mod version;

pub use dependency::LibraryDependency;
pub use digest::DigestAlgorithm;
pub use manifest::{ArtifactManifest, ArtifactType, JvmComponent, ManifestRoot};
pub use root::{ModuleSpec, PendingCreation, Root, RootLocation};
