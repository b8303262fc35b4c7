//! Artifact paths and terminal rendering for live sessions.

use crate::error::Result;
use std::path::{Path, PathBuf};

/// Compact numeric basename for one session, e.g. `20260806143015`.
pub fn session_basename() -> String {
    chrono::Local::now().format("%Y%m%d%H%M%S").to_string()
}

/// Create the output directory if it does not exist.
pub fn ensure_output_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)?;
    Ok(())
}

/// Transcript path for a live session: `<dir>/<basename>.txt`.
pub fn transcript_path(dir: &Path, basename: &str) -> PathBuf {
    dir.join(format!("{basename}.txt"))
}

/// Recording path sharing the transcript basename: `<dir>/<basename>.wav`.
pub fn recording_path(dir: &Path, basename: &str) -> PathBuf {
    dir.join(format!("{basename}.wav"))
}

/// Transcript path for file mode: `<dir>/<input stem>.txt`.
pub fn file_transcript_path(dir: &Path, input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("transcript");
    dir.join(format!("{stem}.txt"))
}

/// Print the stop hint that the transcription line overwrites.
pub fn render_listening() {
    eprintln!("Listening... (press Enter to stop)");
}

/// Overwrite the status line with a fresh transcription, then restore the
/// stop hint below it.
pub fn render_transcription(text: &str) {
    // Move the cursor up over the stop hint and clear it.
    eprint!("\x1b[A\x1b[K");
    eprintln!("Transcription: {}", text);
    eprintln!("(press Enter to stop)");
}
