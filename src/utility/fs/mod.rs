// avail-pack: Avail Artifact Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Filesystem traversal.
//!
//! ```text
//! walk:  walk_files()   ignore::Walk, sorted by file name
//!        entry_name()   path -> "a/b/c" archive entry
//!        WalkOptions    max_depth, hidden, gitignore
//! guard: PartialFileGuard  remove half-written output on error
//! ```

pub mod guard;
pub mod walk;
