// avail-pack: Avail Artifact Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Utility modules.
//!
//! ```text
//! fs
//!   walk:  walk_files(), entry_name(), WalkOptions
//!   guard: PartialFileGuard
//! ```

pub mod fs;
