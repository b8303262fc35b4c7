//! voxlog - Live microphone transcription with windowed Whisper inference
//!
//! Capture callback → frame queue → coordinator loop → Whisper → transcript
//! file, with an optional parallel raw-audio recorder.

// Error handling discipline: worker loops log and continue, they never unwrap.
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

#[cfg(all(feature = "cpal-audio", feature = "cli"))]
pub mod app;
pub mod audio;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod defaults;
pub mod error;
pub mod models;
pub mod output;
pub mod pipeline;
pub mod stt;

// Core traits (source → process → sink)
pub use audio::recorder::AudioSource;
pub use pipeline::sink::{CollectorSink, TextSink, TranscriptFileSink};
pub use pipeline::types::{AudioFrame, FrameSink};
pub use stt::transcriber::Transcriber;

// Pipeline
pub use pipeline::coordinator::{Coordinator, CoordinatorConfig};
pub use pipeline::queue::{FrameConsumer, FrameProducer, frame_queue};
pub use pipeline::shutdown::ShutdownSignal;

// Error handling
pub use error::{Result, VoxlogError};

// Config
pub use config::Config;
