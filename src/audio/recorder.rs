//! Raw session recording, independent of the transcription path.

use crate::audio::wav;
use crate::defaults;
use crate::error::{Result, VoxlogError};
use crate::pipeline::shutdown::ShutdownSignal;
use std::path::PathBuf;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Trait for audio source devices.
///
/// This trait allows swapping implementations (real audio device vs mock).
pub trait AudioSource: Send {
    /// Start capturing audio from the source.
    fn start(&mut self) -> Result<()>;

    /// Stop capturing audio from the source.
    fn stop(&mut self) -> Result<()>;

    /// Read whatever samples have accumulated since the last read.
    ///
    /// An empty result means nothing arrived yet; callers poll.
    fn read_samples(&mut self) -> Result<Vec<i16>>;
}

/// Records the raw sample stream to a WAV file.
///
/// Runs on its own thread with its own tap on the device, so it is
/// unaffected by transcription backpressure. Every chunk read is kept in
/// memory until the stop flag is set, then the whole history is written in
/// a single encode pass.
pub struct Recorder {
    source: Box<dyn AudioSource>,
    shutdown: ShutdownSignal,
    path: PathBuf,
    sample_rate: u32,
    poll_interval: Duration,
}

impl Recorder {
    pub fn new(source: Box<dyn AudioSource>, shutdown: ShutdownSignal, path: PathBuf) -> Self {
        Self {
            source,
            shutdown,
            path,
            sample_rate: defaults::SAMPLE_RATE,
            poll_interval: Duration::from_millis(10),
        }
    }

    /// Poll interval used while the source has nothing to deliver.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Spawns the recording loop on a dedicated thread.
    ///
    /// Failures (device open, write) are reported to stderr and abort only
    /// this thread; the rest of the session keeps running.
    pub fn spawn(self, quiet: bool) -> JoinHandle<()> {
        thread::Builder::new()
            .name("voxlog-recorder".to_string())
            .spawn(move || match self.run() {
                Ok(path) => {
                    if !quiet {
                        eprintln!("Recording saved to {}", path.display());
                    }
                }
                Err(e) => {
                    eprintln!("voxlog: recorder: {}", e);
                }
            })
            .unwrap_or_else(|e| panic!("failed to spawn recorder thread: {}", e))
    }

    /// Runs the capture loop until the stop flag is set, then writes the
    /// accumulated history as one WAV file and returns its path.
    pub fn run(mut self) -> Result<PathBuf> {
        self.source.start()?;

        let mut history: Vec<i16> = Vec::new();
        while !self.shutdown.is_stopped() {
            let samples = self.source.read_samples()?;
            if samples.is_empty() {
                thread::sleep(self.poll_interval);
                continue;
            }
            history.extend_from_slice(&samples);
        }

        if let Err(e) = self.source.stop() {
            eprintln!("voxlog: failed to stop recorder source: {}", e);
        }

        wav::write_samples(&self.path, &history, self.sample_rate)?;
        Ok(self.path)
    }
}

/// Mock audio source for testing.
#[derive(Debug, Clone, Default)]
pub struct MockAudioSource {
    frames: Vec<Vec<i16>>,
    next: usize,
    started: bool,
    fail_start: bool,
    fail_read: bool,
}

impl MockAudioSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue frames to be returned one per read, then empty reads.
    pub fn with_frames(mut self, frames: Vec<Vec<i16>>) -> Self {
        self.frames = frames;
        self
    }

    /// Configure the mock to fail on start.
    pub fn with_start_failure(mut self) -> Self {
        self.fail_start = true;
        self
    }

    /// Configure the mock to fail on read.
    pub fn with_read_failure(mut self) -> Self {
        self.fail_read = true;
        self
    }

    pub fn is_started(&self) -> bool {
        self.started
    }
}

impl AudioSource for MockAudioSource {
    fn start(&mut self) -> Result<()> {
        if self.fail_start {
            Err(VoxlogError::AudioCapture {
                message: "mock start failure".to_string(),
            })
        } else {
            self.started = true;
            Ok(())
        }
    }

    fn stop(&mut self) -> Result<()> {
        self.started = false;
        Ok(())
    }

    fn read_samples(&mut self) -> Result<Vec<i16>> {
        if self.fail_read {
            return Err(VoxlogError::AudioCapture {
                message: "mock read failure".to_string(),
            });
        }
        if self.next < self.frames.len() {
            let frame = self.frames[self.next].clone();
            self.next += 1;
            Ok(frame)
        } else {
            Ok(Vec::new())
        }
    }
}
