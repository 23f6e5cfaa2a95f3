// avail-pack: Avail Artifact Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::PathBuf;

/// RAII guard that removes a partially written file on Drop unless kept.
///
/// Covers every error path of a download or an archive write, not just
/// interrupts. Deletion is blocking; it only runs on failure.
#[derive(Debug)]
pub struct PartialFileGuard {
    path: PathBuf,
    keep: bool,
}

impl PartialFileGuard {
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path, keep: false }
    }

    /// Mark the file as complete; it will NOT be deleted on drop.
    pub const fn keep(&mut self) {
        self.keep = true;
    }
}

impl Drop for PartialFileGuard {
    fn drop(&mut self) {
        if !self.keep {
            let _ = std::fs::remove_file(&self.path);
        }
    }
}
