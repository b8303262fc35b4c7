//! Streaming transcription pipeline.
//!
//! Capture callback → frame queue → coordinator loop → transcriber → sink.
//! One producer, one consumer, one shared stop flag; everything else is
//! single-thread owned.

pub mod accumulator;
pub mod coordinator;
pub mod queue;
pub mod shutdown;
pub mod sink;
pub mod types;

pub use accumulator::WindowAccumulator;
pub use coordinator::{Coordinator, CoordinatorConfig};
pub use queue::{FrameConsumer, FrameProducer, frame_queue};
pub use shutdown::ShutdownSignal;
pub use sink::{CollectorSink, TextSink, TranscriptFileSink};
pub use types::{AudioFrame, FrameSink};
