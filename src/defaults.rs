//! Default configuration constants for voxlog.
//!
//! Shared across config, CLI, and pipeline code so the numbers live in
//! exactly one place.

use std::time::Duration;

/// Default audio sample rate in Hz.
///
/// 16kHz is the standard for speech recognition and what Whisper models
/// are trained on.
pub const SAMPLE_RATE: u32 = 16000;

/// Default accumulation window in seconds.
///
/// Audio is collected until one full window is buffered, then the whole
/// window goes to the model in a single call. Five seconds keeps latency
/// tolerable while giving Whisper enough context to be accurate.
pub const WINDOW_SECS: u64 = 5;

/// Bounded wait for a frame on the queue before re-checking shutdown.
///
/// The consumer loop never blocks longer than this, so a stop request is
/// observed within one interval even when the queue is empty.
pub const QUEUE_POLL_TIMEOUT: Duration = Duration::from_secs(1);

/// Default Whisper model name.
pub const DEFAULT_MODEL: &str = "base";

/// Default language hint for transcription.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Language value that triggers automatic language detection.
pub const AUTO_LANGUAGE: &str = "auto";

/// Default directory for transcripts and recordings.
pub const OUTPUT_DIR: &str = "output";

/// Number of samples in one accumulation window.
pub fn window_samples(window_secs: u64, sample_rate: u32) -> usize {
    window_secs as usize * sample_rate as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_samples_default_is_five_seconds_at_16khz() {
        assert_eq!(window_samples(WINDOW_SECS, SAMPLE_RATE), 80_000);
    }

    #[test]
    fn window_samples_scales_with_duration() {
        assert_eq!(window_samples(1, SAMPLE_RATE), 16_000);
        assert_eq!(window_samples(10, SAMPLE_RATE), 160_000);
    }
}
