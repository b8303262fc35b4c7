//! File-mode transcription tests: one adapter call on the whole file,
//! output overwritten rather than appended.

use std::path::Path;
use tempfile::TempDir;
use voxlog::app::transcribe_file_to;
use voxlog::stt::transcriber::MockTranscriber;

fn write_wav(path: &Path, sample_rate: u32, samples: &[i16]) {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    for &s in samples {
        writer.write_sample(s).unwrap();
    }
    writer.finalize().unwrap();
}

#[test]
fn whole_file_yields_exactly_the_adapter_output() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("meeting.wav");
    let out_dir = dir.path().join("out");
    // 10 seconds of audio — twice the live window; file mode must still
    // make a single call with no per-window accumulation.
    write_wav(&input, 16000, &vec![0i16; 160_000]);

    let transcriber = MockTranscriber::new("mock").with_response("fixed output");
    let out_path = transcribe_file_to(&transcriber, &input, &out_dir).unwrap();

    assert_eq!(out_path, out_dir.join("meeting.txt"));
    assert_eq!(
        std::fs::read_to_string(&out_path).unwrap(),
        "fixed output"
    );
}

#[test]
fn rerun_overwrites_instead_of_appending() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("talk.wav");
    let out_dir = dir.path().join("out");
    write_wav(&input, 16000, &vec![100i16; 16_000]);

    let first = MockTranscriber::new("mock").with_response("first pass");
    transcribe_file_to(&first, &input, &out_dir).unwrap();

    let second = MockTranscriber::new("mock").with_response("second pass");
    let out_path = transcribe_file_to(&second, &input, &out_dir).unwrap();

    assert_eq!(
        std::fs::read_to_string(&out_path).unwrap(),
        "second pass"
    );
}

#[test]
fn non_16khz_input_is_accepted() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("hifi.wav");
    let out_dir = dir.path().join("out");
    write_wav(&input, 48000, &vec![500i16; 48_000]);

    let transcriber = MockTranscriber::new("mock").with_response("resampled fine");
    let out_path = transcribe_file_to(&transcriber, &input, &out_dir).unwrap();

    assert_eq!(
        std::fs::read_to_string(&out_path).unwrap(),
        "resampled fine"
    );
}

#[test]
fn missing_input_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let transcriber = MockTranscriber::new("mock");

    let result = transcribe_file_to(
        &transcriber,
        Path::new("/nonexistent/input.wav"),
        dir.path(),
    );
    assert!(result.is_err());
}

#[test]
fn adapter_failure_propagates_and_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("bad.wav");
    let out_dir = dir.path().join("out");
    write_wav(&input, 16000, &vec![0i16; 1600]);

    let transcriber = MockTranscriber::new("mock").with_failure();
    assert!(transcribe_file_to(&transcriber, &input, &out_dir).is_err());
    assert!(!out_dir.join("bad.txt").exists());
}
