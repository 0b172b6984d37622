// Copyright 2026 Sitemirror Contributors
// SPDX-License-Identifier: Apache-2.0

//! Environment readiness check.

use crate::renderer::chromium::{find_chromium, CHROMIUM_PATH_ENV};
use anyhow::Result;

/// Check whether `fetch --render` can find a browser.
pub async fn run() -> Result<()> {
    println!("Sitemirror Doctor");
    println!("=================");
    println!();

    // OS and architecture
    let os = std::env::consts::OS;
    let arch = std::env::consts::ARCH;
    println!("OS:   {os}");
    println!("Arch: {arch}");
    println!();

    println!("[OK] Static fetch available");

    let chromium_path = find_chromium();
    match &chromium_path {
        Some(path) => println!("[OK] Chromium found: {}", path.display()),
        None => println!(
            "[!!] Chromium NOT found. Install Chrome/Chromium or set {CHROMIUM_PATH_ENV}."
        ),
    }

    println!();
    if chromium_path.is_some() {
        println!("Status: READY");
    } else {
        println!("Status: NOT READY");
        println!("  `fetch --render` is unavailable; plain `fetch` still works.");
    }

    Ok(())
}
