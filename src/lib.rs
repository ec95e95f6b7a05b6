// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! autoimport - load provider profiles and global settings from a file.
//!
//! The crate exposes the import pipeline used by the `autoimport` CLI
//! (`src/main.rs`):
//! - `importer`: startup auto-import, explicit import, and export
//! - `document`: the import document format, its validation, and profile merging
//! - `host`: collaborator traits plus in-memory, file, and console implementations
//! - `config`: the importer's own settings
//! - `paths`: resolution of user-supplied paths against the home directory

pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod host;
pub mod importer;
pub mod paths;

pub use error::{AutoImportError, Result};
