//! WAV decode for file-mode input and encode for recording artifacts.

use crate::defaults::SAMPLE_RATE;
use crate::error::{Result, VoxlogError};
use std::io::Read;
use std::path::Path;

/// Read a WAV file into 16kHz mono i16 samples.
///
/// Accepts any source rate and channel count; stereo is downmixed by
/// averaging and other rates are resampled with linear interpolation.
pub fn read_samples_from_path(path: &Path) -> Result<Vec<i16>> {
    let data = std::fs::read(path).map_err(|e| VoxlogError::AudioCapture {
        message: format!("Failed to read {}: {}", path.display(), e),
    })?;
    read_samples(Box::new(std::io::Cursor::new(data)))
}

/// Read WAV data from any reader into 16kHz mono i16 samples.
pub fn read_samples(reader: Box<dyn Read + Send>) -> Result<Vec<i16>> {
    let mut wav_reader = hound::WavReader::new(reader).map_err(|e| VoxlogError::AudioCapture {
        message: format!("Failed to parse WAV file: {}", e),
    })?;

    let spec = wav_reader.spec();
    let source_rate = spec.sample_rate;
    let source_channels = spec.channels as usize;

    let raw_samples: Vec<i16> = wav_reader
        .samples::<i16>()
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| VoxlogError::AudioCapture {
            message: format!("Failed to read WAV samples: {}", e),
        })?;

    let mono_samples = if source_channels > 1 {
        raw_samples
            .chunks_exact(source_channels)
            .map(|frame| {
                let sum: i32 = frame.iter().map(|&s| s as i32).sum();
                (sum / source_channels as i32) as i16
            })
            .collect()
    } else {
        raw_samples
    };

    if source_rate != SAMPLE_RATE {
        Ok(resample(&mono_samples, source_rate, SAMPLE_RATE))
    } else {
        Ok(mono_samples)
    }
}

/// Write mono i16 samples as a 16-bit PCM WAV file.
pub fn write_samples(path: &Path, samples: &[i16], sample_rate: u32) -> Result<()> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer =
        hound::WavWriter::create(path, spec).map_err(|e| VoxlogError::RecordingWrite {
            message: format!("{}: {}", path.display(), e),
        })?;

    for &sample in samples {
        writer
            .write_sample(sample)
            .map_err(|e| VoxlogError::RecordingWrite {
                message: format!("{}: {}", path.display(), e),
            })?;
    }

    writer.finalize().map_err(|e| VoxlogError::RecordingWrite {
        message: format!("{}: {}", path.display(), e),
    })
}

/// Simple linear interpolation resampling.
pub fn resample(samples: &[i16], from_rate: u32, to_rate: u32) -> Vec<i16> {
    if from_rate == to_rate {
        return samples.to_vec();
    }

    let ratio = from_rate as f64 / to_rate as f64;
    let output_len = (samples.len() as f64 / ratio).ceil() as usize;

    (0..output_len)
        .map(|i| {
            let source_pos = i as f64 * ratio;
            let source_idx = source_pos.floor() as usize;
            let fraction = source_pos - source_idx as f64;

            if source_idx + 1 >= samples.len() {
                samples[source_idx]
            } else {
                let left = samples[source_idx] as f64;
                let right = samples[source_idx + 1] as f64;
                (left + (right - left) * fraction) as i16
            }
        })
        .collect()
}
