use crate::error::{Result, VoxlogError};
use std::sync::Arc;

/// Result of one transcription call.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptionResult {
    /// The transcribed text, trimmed.
    pub text: String,
    /// Detected (or configured) language code.
    pub language: String,
}

/// Trait for speech-to-text transcription.
///
/// This trait allows swapping implementations (real Whisper vs mock).
/// The call is synchronous and may block for the full inference duration;
/// callers decide where that blocking is acceptable.
pub trait Transcriber: Send + Sync {
    /// Transcribe audio samples to text.
    ///
    /// # Arguments
    /// * `audio` - Audio samples as 16-bit PCM at 16kHz mono
    fn transcribe(&self, audio: &[i16]) -> Result<TranscriptionResult>;

    /// Get the name of the loaded model.
    fn model_name(&self) -> &str;
}

/// Implement Transcriber for Arc<T> so one loaded model can be shared
/// across sessions and threads.
impl<T: Transcriber + ?Sized> Transcriber for Arc<T> {
    fn transcribe(&self, audio: &[i16]) -> Result<TranscriptionResult> {
        (**self).transcribe(audio)
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}

/// Mock transcriber for testing.
#[derive(Debug, Clone)]
pub struct MockTranscriber {
    model_name: String,
    response: String,
    language: String,
    should_fail: bool,
}

impl MockTranscriber {
    /// Create a new mock transcriber with default settings.
    pub fn new(model_name: &str) -> Self {
        Self {
            model_name: model_name.to_string(),
            response: "mock transcription".to_string(),
            language: "en".to_string(),
            should_fail: false,
        }
    }

    /// Configure the mock to return a specific response.
    pub fn with_response(mut self, response: &str) -> Self {
        self.response = response.to_string();
        self
    }

    /// Configure the reported language.
    pub fn with_language(mut self, language: &str) -> Self {
        self.language = language.to_string();
        self
    }

    /// Configure the mock to fail on transcribe.
    pub fn with_failure(mut self) -> Self {
        self.should_fail = true;
        self
    }
}

impl Transcriber for MockTranscriber {
    fn transcribe(&self, _audio: &[i16]) -> Result<TranscriptionResult> {
        if self.should_fail {
            Err(VoxlogError::Transcription {
                message: "mock transcription failure".to_string(),
            })
        } else {
            Ok(TranscriptionResult {
                text: self.response.clone(),
                language: self.language.clone(),
            })
        }
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}
