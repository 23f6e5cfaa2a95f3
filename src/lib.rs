// avail-pack: Avail Artifact Packaging Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |        init / package / run / outdated
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |   TOML, layered settings  |
//!              '-------------+-------------'
//!                            v
//!                         project
//!              roots, dependencies, options
//!                            |
//!                            v
//!                      task manager
//!          init-roots / package / check-updates
//!                 |                   |
//!                 v                   v
//!             resolve             artifact
//!          Maven, updates      jar writer, manifest
//!                 |
//!                 v
//!                net
//!             HTTP/DL
//!
//!   +-----------------------------------------+
//!   |  model   roots, coordinates, versions   |
//!   +-----------------------------------------+
//!   |  foundation   error, logging, utility   |
//!   +-----------------------------------------+
//! ```

pub mod artifact;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod net;
pub mod project;
pub mod resolve;
pub mod task;
pub mod utility;
