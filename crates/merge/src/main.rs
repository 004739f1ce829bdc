// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Narration merge binary entry point.

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use walkthrough::catalog::EpisodeCatalog;
use walkthrough::config::DEFAULT_OUTPUT;
use walkthrough::error::exit_codes;
use walkthrough::output_diagnostic::print_error;
use walkthrough_merge::ffmpeg::{EncodeOptions, Resolution};
use walkthrough_merge::{merge, InputArgs, MergeError, MergeInputs, DEFAULT_NARRATION_DIR};

/// Merge narration audio with walkthrough screenshots into a synced video.
#[derive(Parser, Debug)]
#[command(name = "walkthrough-merge", version, about)]
struct Cli {
    /// Episode number; derives any path not given explicitly
    #[arg(short, long)]
    episode: Option<usize>,

    /// Narration audio (MP3)
    #[arg(long)]
    audio: Option<PathBuf>,

    /// `.scenes` timing file
    #[arg(long)]
    scenes: Option<PathBuf>,

    /// Directory of screenshots for this episode
    #[arg(long)]
    screenshots: Option<PathBuf>,

    /// Burn in the `.srt` that sits next to the scenes file
    #[arg(long)]
    subtitles: bool,

    /// Output video path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Where narration files live
    #[arg(long, default_value = DEFAULT_NARRATION_DIR)]
    narration_dir: PathBuf,

    /// Base directory of recorded episodes
    #[arg(long, default_value = DEFAULT_OUTPUT)]
    screenshot_dir: PathBuf,

    /// Output resolution
    #[arg(long, default_value_t = Resolution::default())]
    resolution: Resolution,

    /// Output frame rate
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    fps: u32,

    /// Log debug output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let code = match run(cli).await {
        Ok(()) => exit_codes::SUCCESS,
        Err(e) => {
            print_error(&e);
            if e.is_usage() {
                exit_codes::USAGE
            } else {
                exit_codes::ERROR
            }
        }
    };
    std::process::exit(code);
}

async fn run(cli: Cli) -> Result<(), MergeError> {
    let catalog = EpisodeCatalog::build();
    let inputs = MergeInputs::resolve(
        InputArgs {
            episode: cli.episode,
            audio: cli.audio,
            scenes: cli.scenes,
            screenshots: cli.screenshots,
            output: cli.output,
            narration_dir: cli.narration_dir,
            screenshot_dir: cli.screenshot_dir,
        },
        &catalog,
    )?;
    inputs.check()?;

    let options = EncodeOptions {
        resolution: cli.resolution,
        fps: cli.fps,
        subtitles: if cli.subtitles { inputs.subtitles() } else { None },
    };
    let summary = merge(&inputs, &options).await?;

    if summary.missing > 0 {
        tracing::warn!("{} scene(s) had no screenshot", summary.missing);
    }
    tracing::info!(
        "  Done! {:.1} MB → {}",
        summary.bytes as f64 / (1024.0 * 1024.0),
        summary.output.display()
    );
    Ok(())
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}
