//! Caplit CLI: word-synchronized caption rendering from the command line.
//!
//! Usage:
//!   caplit render <VIDEOS>...    Render captioned copies of local videos
//!   caplit transcribe <VIDEO>    Transcribe a video and print the segments
//!   caplit check                 Check that required tools are installed

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "caplit",
    about = "Word-by-word highlighted captions for short videos",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render captioned, mirrored copies of one or more videos
    Render {
        /// Input video files
        #[arg(required = true)]
        videos: Vec<PathBuf>,

        /// Output directory for rendered artifacts
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Number of concurrent render workers
        #[arg(long)]
        workers: Option<usize>,

        /// Whisper model size: tiny, base, small, medium, large
        #[arg(long)]
        model: Option<String>,

        /// Language hint (ISO 639-1, e.g. "en"); default auto-detect
        #[arg(long)]
        language: Option<String>,
    },

    /// Transcribe a video and print the timed segments
    Transcribe {
        /// Input video file
        video: PathBuf,

        /// Whisper model size: tiny, base, small, medium, large
        #[arg(long)]
        model: Option<String>,

        /// Print raw JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Check that ffmpeg, ffprobe, and whisper are available
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut logging = caplit_common::config::AppConfig::load().logging;
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    caplit_common::logging::init_logging(&logging);

    match cli.command {
        Commands::Render {
            videos,
            output,
            workers,
            model,
            language,
        } => commands::render::run(videos, output, workers, model, language).await,
        Commands::Transcribe { video, model, json } => {
            commands::transcribe::run(video, model, json)
        }
        Commands::Check => commands::check::run(),
    }
}
