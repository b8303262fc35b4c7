//! Error types for voxlog.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VoxlogError {
    // Configuration errors
    #[error("Invalid configuration value for {key}: {message}")]
    ConfigInvalidValue { key: String, message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    // Audio capture errors
    #[error("Audio device not found: {device}")]
    AudioDeviceNotFound { device: String },

    #[error("Audio capture failed: {message}")]
    AudioCapture { message: String },

    // Transcription errors
    #[error("Transcription model not found at {path}")]
    ModelNotFound { path: String },

    #[error("Transcription inference failed: {message}")]
    TranscriptionInferenceFailed { message: String },

    #[error("Transcription error: {message}")]
    Transcription { message: String },

    // Transcript/recording output errors
    #[error("Failed to write transcript: {message}")]
    TranscriptWrite { message: String },

    #[error("Failed to write recording: {message}")]
    RecordingWrite { message: String },

    // General I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Generic error for cases not covered above
    #[error("{0}")]
    Other(String),
}

// Type alias for convenience
pub type Result<T> = std::result::Result<T, VoxlogError>;
