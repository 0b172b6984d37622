// Copyright 2026 Sitemirror Contributors
// SPDX-License-Identifier: Apache-2.0

//! Output mode flags shared by all subcommands.
//!
//! `main` records the global `--json`, `--quiet` and `--verbose` flags in the
//! environment so every command can check them without threading options
//! through.

pub const JSON_ENV: &str = "SITEMIRROR_JSON";
pub const QUIET_ENV: &str = "SITEMIRROR_QUIET";
pub const VERBOSE_ENV: &str = "SITEMIRROR_VERBOSE";

fn flag(name: &str) -> bool {
    std::env::var(name).map(|v| v == "1").unwrap_or(false)
}

/// Machine-readable output requested.
pub fn is_json() -> bool {
    flag(JSON_ENV)
}

pub fn is_quiet() -> bool {
    flag(QUIET_ENV)
}

pub fn is_verbose() -> bool {
    flag(VERBOSE_ENV)
}

/// Print one JSON document on a single line.
pub fn print_json(value: &serde_json::Value) {
    println!("{value}");
}
