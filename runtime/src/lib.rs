// Copyright 2026 Sitemirror Contributors
// SPDX-License-Identifier: Apache-2.0

//! Sitemirror library: mirror web pages and their assets to disk.
//!
//! This library crate exposes the core modules for integration testing.

pub mod acquisition;
pub mod cli;
pub mod error;
pub mod mirror;
pub mod progress;
pub mod renderer;
