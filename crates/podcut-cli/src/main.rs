//! Podcast ad removal CLI.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod error;
mod pipeline;
mod skip_script;

use config::AppConfig;
use pipeline::{process_input, ProcessOptions};

#[derive(Parser)]
#[command(name = "podcut", version, about = "Detect and strip ads from podcast episodes")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one or more episodes and cut the flagged segments out.
    Process {
        /// Local media files or URLs.
        #[arg(required = true)]
        inputs: Vec<String>,

        /// Directory for cleaned media, transcripts, and the cache.
        #[arg(long, default_value = "./output")]
        output_dir: PathBuf,

        /// Whisper-style transcript JSON (required for local files).
        #[arg(long)]
        transcript: Option<PathBuf>,

        /// Analyze and report only; do not cut the media.
        #[arg(long)]
        dry_run: bool,

        /// Write an mpv skip script instead of cutting the media.
        #[arg(long)]
        skip_script: bool,

        /// Launch mpv with the skip script after analysis.
        #[arg(long)]
        play: bool,

        /// Audio-only download and playback.
        #[arg(long)]
        audio_only: bool,

        /// Ignore any cached analysis and re-run detection.
        #[arg(long)]
        no_cache: bool,

        /// Analysis window length in seconds.
        #[arg(long)]
        window_secs: Option<f64>,

        /// Overlap between adjacent windows in seconds.
        #[arg(long)]
        overlap_secs: Option<f64>,

        /// Ceiling on a single remove-span's duration in seconds.
        #[arg(long)]
        max_segment_secs: Option<f64>,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Process {
            inputs,
            output_dir,
            transcript,
            dry_run,
            skip_script,
            play,
            audio_only,
            no_cache,
            window_secs,
            overlap_secs,
            max_segment_secs,
        } => {
            let mut config = AppConfig::from_env();
            if let Some(secs) = window_secs {
                config.window_secs = secs;
            }
            if let Some(secs) = overlap_secs {
                config.overlap_secs = secs;
            }
            if let Some(secs) = max_segment_secs {
                config.max_segment_secs = secs;
            }

            let options = ProcessOptions {
                output_dir,
                transcript,
                dry_run,
                skip_script,
                play,
                audio_only,
                no_cache,
            };

            let mut failed = 0usize;
            for input in &inputs {
                if let Err(err) = process_input(input, &options, &config).await {
                    error!(input = %input, error = %err, "processing failed");
                    failed += 1;
                }
            }

            if failed > 0 {
                error!(failed, total = inputs.len(), "batch finished with failures");
                std::process::exit(1);
            }
            info!(total = inputs.len(), "batch complete");
        }
    }
}

/// Colored output for dev, JSON when LOG_FORMAT=json.
fn init_tracing() {
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("podcut=info,podcut_cli=info"));

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }
}
