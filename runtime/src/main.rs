// Copyright 2026 Sitemirror Contributors
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use sitemirror::acquisition::http_client::DEFAULT_TIMEOUT_MS;
use sitemirror::cli;
use sitemirror::cli::output::{self, JSON_ENV, QUIET_ENV, VERBOSE_ENV};
use sitemirror::mirror::{MirrorOptions, DEFAULT_OUTPUT_DIR};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "sitemirror",
    about = "Sitemirror: save web pages for offline viewing",
    version,
    after_help = "Run 'sitemirror <command> --help' for details on each command."
)]
struct Cli {
    /// Output results as JSON (machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Enable verbose/debug logging and per-asset progress
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Mirror one or more pages to disk
    Fetch {
        /// Page URLs, processed in order
        #[arg(required = true)]
        urls: Vec<String>,
        /// Load pages in headless Chromium so script-generated markup is kept
        #[arg(long)]
        render: bool,
        /// Destination root for <host>.html files and <host>/ asset directories
        #[arg(long, short, default_value = DEFAULT_OUTPUT_DIR)]
        output: PathBuf,
        /// Per-request and per-navigation timeout in milliseconds
        #[arg(long, default_value_t = DEFAULT_TIMEOUT_MS)]
        timeout: u64,
    },
    /// Check whether a browser is available for --render
    Doctor,
    /// Generate shell completion scripts
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        shell: Shell,
    },
}

fn init_tracing(json: bool, verbose: bool, quiet: bool) {
    let default_directive = if verbose {
        "sitemirror=debug"
    } else if quiet {
        "sitemirror=warn"
    } else {
        "sitemirror=info"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.with_target(false).init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global flags via environment variables so all modules can check them
    if cli.json {
        std::env::set_var(JSON_ENV, "1");
    }
    if cli.quiet {
        std::env::set_var(QUIET_ENV, "1");
    }
    if cli.verbose {
        std::env::set_var(VERBOSE_ENV, "1");
    }

    init_tracing(cli.json, cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Fetch {
            urls,
            render,
            output,
            timeout,
        } => {
            let options = MirrorOptions::default()
                .with_root(output)
                .with_request_timeout(timeout)
                .with_navigation_timeout(timeout);
            cli::fetch_cmd::run(&urls, render, &options).await
        }
        Commands::Doctor => cli::doctor::run().await,
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "sitemirror", &mut std::io::stdout());
            Ok(())
        }
    };

    // Consistent exit codes: 0=success, 1=error
    if let Err(e) = &result {
        if !output::is_quiet() && !output::is_json() {
            eprintln!("  Error: {e:#}");
        }
        if output::is_json() {
            output::print_json(&serde_json::json!({
                "error": true,
                "message": format!("{e:#}"),
            }));
        }
        std::process::exit(1);
    }

    result
}
