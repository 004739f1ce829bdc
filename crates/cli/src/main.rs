// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Walkthrough recorder binary entry point.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use walkthrough::catalog::EpisodeCatalog;
use walkthrough::cli::Cli;
use walkthrough::config::{FileConfig, RunConfig};
use walkthrough::driver::chromium::ChromiumDriver;
use walkthrough::error::{exit_codes, RunError};
use walkthrough::orchestrator::Orchestrator;
use walkthrough::output_diagnostic::print_error;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let catalog = EpisodeCatalog::build();
    if cli.list {
        print!("{}", catalog.listing());
        return;
    }

    let code = match run(&cli, &catalog).await {
        Ok(()) => exit_codes::SUCCESS,
        Err(e) => {
            print_error(&e);
            e.exit_code()
        }
    };
    std::process::exit(code);
}

async fn run(cli: &Cli, catalog: &EpisodeCatalog) -> Result<(), RunError> {
    let file = match &cli.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };
    let config = RunConfig::resolve(cli, file, catalog)?;

    let driver = ChromiumDriver::new();
    Orchestrator::new(&config, catalog, &driver)?.run().await?;
    Ok(())
}

/// `RUST_LOG` wins; otherwise `info`, or `debug` with `--verbose`.
fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{level},chromiumoxide=warn")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}
