//! Audio capture, WAV handling, and session recording.

#[cfg(feature = "cpal-audio")]
pub mod capture;
pub mod recorder;
pub mod wav;

pub use recorder::{AudioSource, Recorder};
