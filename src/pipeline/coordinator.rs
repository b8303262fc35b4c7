//! Consumer loop: drain the frame queue, accumulate, transcribe, emit.

use crate::defaults;
use crate::output;
use crate::pipeline::accumulator::WindowAccumulator;
use crate::pipeline::queue::FrameConsumer;
use crate::pipeline::shutdown::ShutdownSignal;
use crate::pipeline::sink::TextSink;
use crate::stt::transcriber::Transcriber;
use crossbeam_channel::RecvTimeoutError;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Tuning for the consumer loop.
#[derive(Debug, Clone)]
pub struct CoordinatorConfig {
    /// Samples per transcription window (duration × sample rate).
    pub window_samples: usize,
    /// Bounded wait per dequeue before re-checking the stop flag.
    pub poll_timeout: Duration,
    /// Suppress console rendering of results.
    pub quiet: bool,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            window_samples: defaults::window_samples(defaults::WINDOW_SECS, defaults::SAMPLE_RATE),
            poll_timeout: defaults::QUEUE_POLL_TIMEOUT,
            quiet: false,
        }
    }
}

/// Owns the consuming end of the session: queue receiver, accumulator, and
/// transcript sink, driven on its own thread until the stop flag is set.
///
/// The transcription call is synchronous and runs inline in the loop, so no
/// frames are drained while the model works. The unbounded queue absorbs
/// the backlog; lag grows instead of audio being dropped.
pub struct Coordinator {
    frames: FrameConsumer,
    shutdown: ShutdownSignal,
    transcriber: Arc<dyn Transcriber>,
    sink: Box<dyn TextSink>,
    window: WindowAccumulator,
    config: CoordinatorConfig,
}

impl Coordinator {
    pub fn new(
        frames: FrameConsumer,
        shutdown: ShutdownSignal,
        transcriber: Arc<dyn Transcriber>,
        sink: Box<dyn TextSink>,
        config: CoordinatorConfig,
    ) -> Self {
        let window = WindowAccumulator::new(config.window_samples);
        Self {
            frames,
            shutdown,
            transcriber,
            sink,
            window,
            config,
        }
    }

    /// Spawns the loop on a dedicated thread.
    pub fn spawn(self) -> JoinHandle<()> {
        thread::Builder::new()
            .name("voxlog-coordinator".to_string())
            .spawn(move || self.run())
            .unwrap_or_else(|e| {
                // Thread spawn only fails when the process is out of
                // resources; nothing sensible left to do.
                panic!("failed to spawn coordinator thread: {}", e);
            })
    }

    /// Runs the loop until the stop flag is set or the producer disconnects.
    ///
    /// The flag is checked once per iteration, so with an empty queue the
    /// loop exits within one poll timeout of the request. Frames still
    /// queued at that point, and any partial window below the threshold,
    /// are discarded.
    pub fn run(mut self) {
        loop {
            if self.shutdown.is_stopped() {
                break;
            }

            match self.frames.recv_timeout(self.config.poll_timeout) {
                Ok(frame) => {
                    self.window.extend(&frame.samples);
                    if self.window.is_full() {
                        self.flush_window();
                    }
                }
                // Idle: nothing captured within the bounded wait. Loop
                // around so the stop flag is observed promptly.
                Err(RecvTimeoutError::Timeout) => continue,
                // Producer gone: the capture stream is dead and no further
                // frames can arrive.
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    }

    /// Transcribes the accumulated window and emits the result.
    ///
    /// Errors from the model or the sink are reported and swallowed: one
    /// bad window must not end the session. The window is reset either way.
    fn flush_window(&mut self) {
        let samples = self.window.take();

        match self.transcriber.transcribe(&samples) {
            Ok(result) => {
                if !self.config.quiet {
                    output::render_transcription(&result.text);
                }
                if let Err(e) = self.sink.append(&result.text) {
                    eprintln!("voxlog: {}: {}", self.sink.name(), e);
                }
            }
            Err(e) => {
                eprintln!("voxlog: {}", e);
            }
        }
    }
}
