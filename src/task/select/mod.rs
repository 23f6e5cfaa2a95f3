// avail-pack: Avail Artifact Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command-line words to pipeline tasks.
//!
//! ```text
//! ["release", "check-*"]
//!   aliases   release --> init-roots, package   (nested, cycle-safe)
//!   names     exact task name, else a glob over Task::NAMES
//!   result    command-line order, each task once
//! ```

use anyhow::Context;
use wax::{Glob, Program};

use super::Task;
use crate::config::types::Aliases;
use crate::error::{PackError, Result, TaskError};

/// Picks tasks for `run` and `list` from names, globs and `[aliases]`.
#[derive(Debug, Clone, Copy)]
pub struct TaskSelector<'a> {
    aliases: &'a Aliases,
}

impl<'a> TaskSelector<'a> {
    #[must_use]
    pub const fn new(aliases: &'a Aliases) -> Self {
        Self { aliases }
    }

    /// Every task name, sorted.
    #[must_use]
    pub const fn names(&self) -> &'static [&'static str] {
        Task::NAMES
    }

    /// Replaces alias words by their targets, recursively.
    ///
    /// An alias met again inside its own expansion stays a plain word.
    #[must_use]
    pub fn expand<'w>(&self, words: &'w [String]) -> Vec<&'w str>
    where
        'a: 'w,
    {
        let mut expanded = Vec::with_capacity(words.len());
        self.expand_into(words, &mut Vec::new(), &mut expanded);
        expanded
    }

    fn expand_into<'w>(
        &self,
        words: &'w [String],
        open: &mut Vec<&'w str>,
        expanded: &mut Vec<&'w str>,
    ) where
        'a: 'w,
    {
        for word in words.iter().map(String::as_str) {
            let Some(targets) = self.aliases.get(word) else {
                expanded.push(word);
                continue;
            };
            if open.contains(&word) {
                tracing::warn!(alias = %word, "alias expands to itself");
                expanded.push(word);
                continue;
            }
            open.push(word);
            self.expand_into(targets, open, expanded);
            open.pop();
        }
    }

    /// Task names matching one expanded word.
    ///
    /// # Errors
    ///
    /// Returns an error if `word` is neither a task name nor a valid glob.
    pub fn matching(&self, word: &str) -> Result<Vec<&'static str>> {
        if let Some(name) = self.names().iter().find(|name| **name == word) {
            return Ok(vec![*name]);
        }
        let glob = Glob::new(word).with_context(|| format!("Invalid glob pattern: {word}"))?;
        Ok(self
            .names()
            .iter()
            .copied()
            .filter(|name| glob.is_match(*name))
            .collect())
    }

    /// Names selected by the command-line words, first occurrence wins.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid glob.
    pub fn select(&self, words: &[String]) -> Result<Vec<&'static str>> {
        let mut selected: Vec<&'static str> = Vec::new();
        for word in self.expand(words) {
            let names = self.matching(word)?;
            if names.is_empty() {
                tracing::warn!(pattern = %word, "pattern matched no tasks");
            }
            for name in names {
                if !selected.contains(&name) {
                    selected.push(name);
                }
            }
        }
        Ok(selected)
    }

    /// Default-configured tasks for the command-line words.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid glob.
    pub fn tasks(&self, words: &[String]) -> Result<Vec<Task>> {
        self.select(words)?
            .into_iter()
            .map(|name| {
                Task::from_name(name).ok_or_else(|| {
                    anyhow::Error::from(PackError::from(TaskError::NotFound(name.to_string())))
                })
            })
            .collect()
    }
}
