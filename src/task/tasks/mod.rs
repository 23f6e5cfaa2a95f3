// avail-pack: Avail Artifact Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Concrete task implementations.
//!
//! ```text
//! task::tasks
//! init-roots     InitRootsTask        scaffold "to be created" roots
//! package        PackageArtifactTask  resolve embeds --> write the jar
//! print-config   PrintConfigTask      project summary on stdout
//! check-updates  CheckUpdatesTask     advisory version checks
//! ```

pub mod check_updates;
pub mod init_roots;
pub mod package;
pub mod print_config;
