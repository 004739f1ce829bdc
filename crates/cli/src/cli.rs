// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI argument parsing.

use clap::Parser;
use std::path::PathBuf;

/// Record an unattended screenshot and video walkthrough of the wallet.
///
/// Without `--episode` every chapter is recorded into one continuous session.
/// With `--episode` each selected episode gets its own session, output
/// directory and video.
#[derive(Parser, Debug)]
#[command(name = "walkthrough", version, about)]
pub struct Cli {
    /// Wallet project directory, .csproj or executable to launch
    #[arg(value_name = "TARGET")]
    pub target: Option<PathBuf>,

    /// Attach to an already-running wallet instead of launching one
    #[arg(long, env = "WALKTHROUGH_URL")]
    pub url: Option<String>,

    /// 55-character funded seed for live transaction demos
    #[arg(long, env = "WALKTHROUGH_SEED", hide_env_values = true)]
    pub seed: Option<String>,

    /// Output directory for screenshots and video [default: output]
    #[arg(long, env = "WALKTHROUGH_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Episodes to record: `all` or comma-separated numbers
    #[arg(long, env = "WALKTHROUGH_EPISODE", value_name = "SPEC")]
    pub episode: Option<String>,

    /// Delay after each action in ms [default: 2500]
    #[arg(long, value_name = "MS")]
    pub pace: Option<u64>,

    /// Hold on important screens in ms [default: 5000]
    #[arg(long, value_name = "MS")]
    pub hold: Option<u64>,

    /// Hold on each tab in ms [default: 3000]
    #[arg(long, value_name = "MS")]
    pub hold_tab: Option<u64>,

    /// Pause between chapters in ms [default: 4000]
    #[arg(long, value_name = "MS")]
    pub chapter_gap: Option<u64>,

    /// Run the browser without a window
    #[arg(long)]
    pub headless: bool,

    /// Take screenshots only
    #[arg(long)]
    pub no_video: bool,

    /// Disable the click ripple overlay
    #[arg(long)]
    pub no_cursor: bool,

    /// Seconds to wait for a launched wallet to report its URL [default: 60]
    #[arg(long, value_name = "SECS")]
    pub ready_timeout: Option<u64>,

    /// TOML file with defaults for any of the above
    #[arg(long, env = "WALKTHROUGH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print the episode catalog and exit
    #[arg(long)]
    pub list: bool,

    /// Log debug output
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
