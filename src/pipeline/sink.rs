//! Transcript output handlers.

use crate::error::{Result, VoxlogError};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Pluggable transcript destination for the consumer loop.
///
/// Pairs with `FrameSink` on the input side: frames go in, lines come out.
pub trait TextSink: Send {
    /// Append one transcribed line. Called once per flushed window.
    fn append(&mut self, line: &str) -> Result<()>;

    /// Name for logging/debugging.
    fn name(&self) -> &'static str {
        "sink"
    }
}

/// Append-only transcript file, one line per flush.
///
/// Each append opens, writes, and closes the file, so a crash mid-session
/// loses at most the line being written and an external `tail -f` always
/// sees complete lines.
#[derive(Debug)]
pub struct TranscriptFileSink {
    path: PathBuf,
}

impl TranscriptFileSink {
    /// Creates the sink and touches the file so the artifact exists from
    /// session start even if no window ever flushes.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| VoxlogError::TranscriptWrite {
                message: format!("{}: {}", path.display(), e),
            })?;
        Ok(Self { path })
    }

    /// Path of the transcript file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TextSink for TranscriptFileSink {
    fn append(&mut self, line: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| VoxlogError::TranscriptWrite {
                message: format!("{}: {}", self.path.display(), e),
            })?;
        writeln!(file, "{}", line).map_err(|e| VoxlogError::TranscriptWrite {
            message: format!("{}: {}", self.path.display(), e),
        })
    }

    fn name(&self) -> &'static str {
        "transcript-file"
    }
}

/// Sink that collects lines in memory, for tests.
///
/// The sink itself moves into the coordinator thread; `lines()` returns a
/// shared handle the test keeps to inspect what arrived.
#[derive(Debug, Clone, Default)]
pub struct CollectorSink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl CollectorSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle onto the collected lines.
    pub fn lines(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.lines)
    }
}

impl TextSink for CollectorSink {
    fn append(&mut self, line: &str) -> Result<()> {
        self.lines
            .lock()
            .map_err(|e| VoxlogError::Other(format!("collector lock poisoned: {}", e)))?
            .push(line.to_string());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "collector"
    }
}

/// Sink whose appends always fail, for error-policy tests.
#[derive(Debug, Default)]
pub struct FailingSink;

impl TextSink for FailingSink {
    fn append(&mut self, _line: &str) -> Result<()> {
        Err(VoxlogError::TranscriptWrite {
            message: "sink write rejected".to_string(),
        })
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_create_touches_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.txt");

        let sink = TranscriptFileSink::create(&path).unwrap();
        assert!(path.exists());
        assert_eq!(sink.path(), path);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_append_writes_one_line_per_call() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.txt");

        let mut sink = TranscriptFileSink::create(&path).unwrap();
        sink.append("hello").unwrap();
        sink.append("world").unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "hello\nworld\n");
    }

    #[test]
    fn test_append_preserves_existing_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.txt");
        std::fs::write(&path, "earlier\n").unwrap();

        let mut sink = TranscriptFileSink::create(&path).unwrap();
        sink.append("later").unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "earlier\nlater\n");
    }

    #[test]
    fn test_create_fails_for_unwritable_path() {
        let result = TranscriptFileSink::create("/nonexistent-dir/deep/session.txt");
        assert!(result.is_err());
        match result {
            Err(VoxlogError::TranscriptWrite { message }) => {
                assert!(message.contains("session.txt"));
            }
            _ => panic!("Expected TranscriptWrite error"),
        }
    }

    #[test]
    fn test_collector_sink_accumulates() {
        let sink = CollectorSink::new();
        let lines = sink.lines();

        let mut moved = sink;
        moved.append("one").unwrap();
        moved.append("two").unwrap();

        assert_eq!(*lines.lock().unwrap(), vec!["one", "two"]);
    }

    #[test]
    fn test_failing_sink_reports_write_error() {
        let mut sink = FailingSink;
        let result = sink.append("anything");
        assert!(matches!(
            result,
            Err(VoxlogError::TranscriptWrite { .. })
        ));
    }

    #[test]
    fn test_sinks_are_object_safe() {
        let dir = TempDir::new().unwrap();
        let mut sinks: Vec<Box<dyn TextSink>> = vec![
            Box::new(TranscriptFileSink::create(dir.path().join("t.txt")).unwrap()),
            Box::new(CollectorSink::new()),
        ];
        for sink in &mut sinks {
            sink.append("line").unwrap();
        }
    }
}
