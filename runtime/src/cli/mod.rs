// Copyright 2026 Sitemirror Contributors
// SPDX-License-Identifier: Apache-2.0

//! CLI subcommand implementations for the sitemirror binary.

pub mod doctor;
pub mod fetch_cmd;
pub mod output;
