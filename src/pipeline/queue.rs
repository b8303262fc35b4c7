//! Unbounded frame queue between the capture callback and the consumer loop.
//!
//! Single producer (the audio callback), single consumer (the coordinator
//! thread). The queue is unbounded on purpose: when transcription runs
//! slower than real time the backlog grows and lag increases, but no audio
//! is ever dropped.

use crate::pipeline::types::{AudioFrame, FrameSink};
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, unbounded};
use std::time::Duration;

/// Sending half of the frame queue. Lives inside the capture callback.
#[derive(Debug, Clone)]
pub struct FrameProducer {
    tx: Sender<AudioFrame>,
}

/// Receiving half of the frame queue. Owned by the coordinator thread.
#[derive(Debug)]
pub struct FrameConsumer {
    rx: Receiver<AudioFrame>,
}

/// Creates a connected producer/consumer pair.
pub fn frame_queue() -> (FrameProducer, FrameConsumer) {
    let (tx, rx) = unbounded();
    (FrameProducer { tx }, FrameConsumer { rx })
}

impl FrameSink for FrameProducer {
    fn push(&self, frame: AudioFrame) {
        // Send on an unbounded channel never blocks. A send error means the
        // consumer is gone; the callback has nowhere to report that, so the
        // frame is dropped silently and stream teardown follows shortly.
        self.tx.send(frame).ok();
    }
}

impl FrameConsumer {
    /// Waits up to `timeout` for the next frame.
    ///
    /// `Timeout` is the normal idle case; `Disconnected` means the producer
    /// (and with it the capture stream) is gone for good.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<AudioFrame, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }

    /// Number of frames currently queued.
    pub fn backlog(&self) -> usize {
        self.rx.len()
    }
}
