// Copyright 2026 Sitemirror Contributors
// SPDX-License-Identifier: Apache-2.0

//! `sitemirror fetch <url>...`: mirror pages and their assets to disk.

use crate::cli::output;
use crate::mirror::{MirrorOptions, MirrorResult, PageMirror, RenderedMirror, StaticMirror};
use crate::progress::{self, ProgressReceiver};
use crate::renderer::chromium::ChromiumRenderer;
use crate::renderer::Renderer;
use anyhow::{bail, Context, Result};
use chrono::{DateTime, Local};
use serde::Serialize;
use tokio::sync::broadcast::error::RecvError;

/// A mirrored page as reported to the user.
#[derive(Debug, Clone, Serialize)]
pub struct MirrorReport {
    pub url: String,
    pub fetched_at: DateTime<Local>,
    pub result: MirrorResult,
}

impl MirrorReport {
    /// The lines printed for a successful fetch.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![format!(
            "Fetched {} at {}",
            self.url,
            self.fetched_at.format("%Y-%m-%d %H:%M:%S")
        )];
        lines.extend(self.result.summary_lines());
        lines
    }
}

/// Run the fetch command over `urls`, one page at a time.
pub async fn run(urls: &[String], render: bool, options: &MirrorOptions) -> Result<()> {
    let client = options
        .http_client()
        .context("failed to build HTTP client")?;

    let (progress_tx, printer) = if output::is_verbose() && !output::is_json() {
        let (tx, rx) = progress::channel();
        (Some(tx), Some(tokio::spawn(print_progress(rx))))
    } else {
        (None, None)
    };

    let failures = if render {
        let renderer = ChromiumRenderer::new()
            .await
            .context("--render needs a Chromium browser (see `sitemirror doctor`)")?;
        let mut mirror = RenderedMirror::new(renderer, client)
            .with_navigation_timeout(options.navigation_timeout_ms());
        if let Some(tx) = progress_tx.clone() {
            mirror = mirror.with_progress(tx);
        }
        let failures = run_batch(&mirror, urls, options).await;
        mirror.renderer().shutdown().await?;
        failures
    } else {
        let mut mirror = StaticMirror::new(client);
        if let Some(tx) = progress_tx.clone() {
            mirror = mirror.with_progress(tx);
        }
        run_batch(&mirror, urls, options).await
    };

    // Closing the last sender lets the printer drain and exit.
    drop(progress_tx);
    if let Some(handle) = printer {
        let _ = handle.await;
    }

    if failures > 0 {
        bail!("{failures} of {} page(s) could not be mirrored", urls.len());
    }
    Ok(())
}

/// Mirror each URL in order. A failed page is reported and the batch moves on.
///
/// Returns the number of pages that failed.
pub async fn run_batch<M: PageMirror>(mirror: &M, urls: &[String], options: &MirrorOptions) -> usize {
    let mut failures = 0;

    for url in urls {
        let outcome = match options.request(url) {
            Ok(request) => mirror.mirror(&request).await,
            Err(e) => Err(e),
        };

        match outcome {
            Ok(result) => report_success(MirrorReport {
                url: url.clone(),
                fetched_at: Local::now(),
                result,
            }),
            Err(e) => {
                failures += 1;
                report_failure(url, &e);
            }
        }
    }

    failures
}

fn report_success(report: MirrorReport) {
    if output::is_json() {
        match serde_json::to_value(&report) {
            Ok(value) => output::print_json(&value),
            Err(e) => tracing::warn!("could not serialize report for {}: {e}", report.url),
        }
    } else if !output::is_quiet() {
        for line in report.lines() {
            println!("{line}");
        }
        println!();
    }
}

fn report_failure(url: &str, err: &dyn std::error::Error) {
    if output::is_json() {
        output::print_json(&serde_json::json!({
            "url": url,
            "error": err.to_string(),
        }));
    } else {
        eprintln!("Error fetching {url}: {err}");
    }
}

async fn print_progress(mut rx: ProgressReceiver) {
    loop {
        match rx.recv().await {
            Ok(event) => println!("    {}", event.event),
            Err(RecvError::Lagged(_)) => continue,
            Err(RecvError::Closed) => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_report_lines() {
        let report = MirrorReport {
            url: "http://example.com".to_string(),
            fetched_at: Local.with_ymd_and_hms(2026, 3, 1, 9, 30, 5).unwrap(),
            result: MirrorResult {
                filename: "example.com.html".to_string(),
                links_num: 1,
                images_num: 2,
                script_num: None,
            },
        };

        assert_eq!(
            report.lines(),
            vec![
                "Fetched http://example.com at 2026-03-01 09:30:05",
                "  - Saved as example.com.html",
                "  - Links found on the page: 1",
                "  - Images found on the page: 2",
            ]
        );
    }
}
