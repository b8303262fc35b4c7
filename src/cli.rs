//! Command-line interface for voxlog
//!
//! Provides argument parsing using clap derive macros.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Live microphone transcription with windowed Whisper inference
#[derive(Parser, Debug)]
#[command(
    name = "voxlog",
    version,
    about = "Live microphone transcription with windowed Whisper inference"
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Suppress status output (quiet mode)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Whisper model size: t/b/s/m/l or a catalog name (tiny, base, ...)
    #[arg(long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Input device index from the `devices` listing
    #[arg(long, value_name = "INDEX", conflicts_with = "file")]
    pub device: Option<usize>,

    /// Transcribe an existing WAV file instead of capturing live audio
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Also record the raw session audio to a WAV file
    #[arg(long, conflicts_with = "file")]
    pub record: bool,

    /// Language hint for transcription (e.g., en, de) or "auto"
    #[arg(long, value_name = "LANG")]
    pub language: Option<String>,

    /// Accumulation window duration. Examples: 5s, 2500ms, 1m
    #[arg(long, short = 'w', value_name = "DURATION", value_parser = parse_window_secs)]
    pub window: Option<u64>,

    /// Directory for transcripts and recordings (default: output)
    #[arg(long, value_name = "PATH")]
    pub output_dir: Option<PathBuf>,

    /// Fail instead of auto-downloading a missing model
    #[arg(long)]
    pub no_download: bool,
}

/// Parse a window duration string into whole seconds.
///
/// Supports bare numbers (seconds) and any format accepted by `humantime`
/// (`5s`, `2500ms`, `1m`). Sub-second values round up to one second so a
/// window is never zero.
fn parse_window_secs(s: &str) -> Result<u64, String> {
    let s = s.trim();
    let secs = if let Ok(secs) = s.parse::<u64>() {
        secs
    } else {
        let duration = humantime::parse_duration(s).map_err(|e| e.to_string())?;
        if duration.as_secs() == 0 && duration.subsec_nanos() > 0 {
            1
        } else {
            duration.as_secs()
        }
    };

    if secs == 0 {
        Err("window must be at least one second".to_string())
    } else {
        Ok(secs)
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List available audio input devices
    Devices,

    /// Manage Whisper models
    Models {
        /// Action to perform
        #[command(subcommand)]
        action: ModelsAction,
    },
}

/// Model management actions
#[derive(Subcommand, Debug)]
pub enum ModelsAction {
    /// List catalog models and their installation status
    List,

    /// Download and install a model
    Install {
        /// Model name (t/b/s/m/l or tiny, base, small, medium, large)
        name: String,
    },
}
