// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Configuration module for autoimport
//!
//! Handles loading, saving, and managing the importer's own settings.

pub mod settings;

pub use settings::*;
