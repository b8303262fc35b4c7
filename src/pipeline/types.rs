//! Data types shared between the capture callback and the consumer loop.

/// A frame of raw audio samples as delivered by one capture callback.
///
/// Frames are immutable after creation; ownership moves into the queue.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioFrame {
    /// PCM samples (16-bit signed integers, mono, 16kHz).
    pub samples: Vec<i16>,
    /// Sequence number for ordering and gap detection.
    pub sequence: u64,
}

impl AudioFrame {
    /// Creates a new audio frame.
    pub fn new(samples: Vec<i16>, sequence: u64) -> Self {
        Self { samples, sequence }
    }
}

/// Destination for frames produced by a capture callback.
///
/// The callback runs on the audio subsystem's real-time thread, so `push`
/// must not block. Implementations other than the frame queue exist only
/// in tests, which is the point: the capture backend can be swapped or
/// mocked without touching the consumer side.
pub trait FrameSink: Send + Sync {
    /// Accept one frame. Never blocks.
    fn push(&self, frame: AudioFrame);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct VecSink(Mutex<Vec<AudioFrame>>);

    impl FrameSink for VecSink {
        fn push(&self, frame: AudioFrame) {
            if let Ok(mut frames) = self.0.lock() {
                frames.push(frame);
            }
        }
    }

    #[test]
    fn test_audio_frame_creation() {
        let frame = AudioFrame::new(vec![100, 200, 300], 42);
        assert_eq!(frame.samples, vec![100, 200, 300]);
        assert_eq!(frame.sequence, 42);
    }

    #[test]
    fn test_frame_sink_is_object_safe() {
        let sink: Box<dyn FrameSink> = Box::new(VecSink(Mutex::new(Vec::new())));
        sink.push(AudioFrame::new(vec![1, 2], 0));
    }

    #[test]
    fn test_frame_sink_preserves_push_order() {
        let sink = VecSink(Mutex::new(Vec::new()));
        for seq in 0..5 {
            sink.push(AudioFrame::new(vec![seq as i16], seq));
        }
        let frames = sink.0.into_inner().unwrap();
        let sequences: Vec<u64> = frames.iter().map(|f| f.sequence).collect();
        assert_eq!(sequences, vec![0, 1, 2, 3, 4]);
    }
}
