//! Microphone capture using CPAL (Cross-Platform Audio Library).
//!
//! Two taps exist on the same device family: `MicStream` pushes frames to a
//! `FrameSink` for transcription, and `CpalAudioSource` buffers samples for
//! the recorder's poll loop. They open independent streams, so the recorder
//! never feels transcription backpressure.

use crate::audio::recorder::AudioSource;
use crate::defaults;
use crate::error::{Result, VoxlogError};
use crate::pipeline::types::{AudioFrame, FrameSink};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// Run a closure with stderr temporarily redirected to /dev/null.
///
/// Suppresses the ALSA/JACK/PipeWire messages CPAL triggers while probing
/// backends. The messages are harmless but drown the prompt.
///
/// # Safety
/// Uses `libc::dup`/`libc::dup2` to save and restore file descriptor 2.
/// Safe as long as no other thread is concurrently manipulating fd 2.
fn with_suppressed_stderr<F, R>(f: F) -> R
where
    F: FnOnce() -> R,
{
    unsafe {
        let saved_fd = libc::dup(2);
        let devnull = libc::open(c"/dev/null".as_ptr(), libc::O_WRONLY);
        if saved_fd >= 0 && devnull >= 0 {
            libc::dup2(devnull, 2);
            libc::close(devnull);
        }

        let result = f();

        if saved_fd >= 0 {
            libc::dup2(saved_fd, 2);
            libc::close(saved_fd);
        }

        result
    }
}

/// Quiet down JACK/ALSA probing before the first CPAL call.
///
/// # Safety
/// Modifies environment variables; must run before any thread is spawned.
pub fn suppress_audio_warnings() {
    // SAFETY: called at startup before spawning threads
    unsafe {
        std::env::set_var("JACK_NO_START_SERVER", "1");
        std::env::set_var("ALSA_DEBUG", "0");
        std::env::set_var("PW_LOG", "0");
    }
}

/// List the names of all available input devices, in enumeration order.
///
/// The position in this list is the device index accepted by `--device`.
pub fn list_input_devices() -> Result<Vec<String>> {
    let devices = with_suppressed_stderr(|| {
        let host = cpal::default_host();
        host.input_devices()
    })
    .map_err(|e| VoxlogError::AudioCapture {
        message: format!("Failed to enumerate input devices: {}", e),
    })?;

    Ok(devices.filter_map(|d| d.name().ok()).collect())
}

/// Resolve an input device by its enumeration index, or the system default.
pub fn input_device(index: Option<usize>) -> Result<cpal::Device> {
    with_suppressed_stderr(|| {
        let host = cpal::default_host();

        match index {
            Some(index) => {
                let mut devices =
                    host.input_devices()
                        .map_err(|e| VoxlogError::AudioCapture {
                            message: format!("Failed to enumerate input devices: {}", e),
                        })?;
                devices
                    .nth(index)
                    .ok_or_else(|| VoxlogError::AudioDeviceNotFound {
                        device: index.to_string(),
                    })
            }
            None => host
                .default_input_device()
                .ok_or_else(|| VoxlogError::AudioDeviceNotFound {
                    device: "default".to_string(),
                }),
        }
    })
}

/// Build an input stream delivering 16kHz mono i16 chunks to `on_samples`.
///
/// Tries in order:
/// 1. i16/16kHz/mono — PipeWire/PulseAudio convert transparently
/// 2. f32/16kHz/mono — devices that only expose float formats
/// 3. Device native config — software channel mixing + resampling
fn build_input_stream<F>(device: &cpal::Device, on_samples: F) -> Result<cpal::Stream>
where
    F: Fn(Vec<i16>) + Send + Clone + 'static,
{
    let preferred = cpal::StreamConfig {
        channels: 1,
        sample_rate: cpal::SampleRate(defaults::SAMPLE_RATE),
        buffer_size: cpal::BufferSize::Default,
    };

    let err_callback = |err| {
        eprintln!("voxlog: audio stream error: {}", err);
    };

    let deliver = on_samples.clone();
    if let Ok(stream) = device.build_input_stream(
        &preferred,
        move |data: &[i16], _: &cpal::InputCallbackInfo| {
            deliver(data.to_vec());
        },
        err_callback,
        None,
    ) {
        return Ok(stream);
    }

    let deliver = on_samples.clone();
    if let Ok(stream) = device.build_input_stream(
        &preferred,
        move |data: &[f32], _: &cpal::InputCallbackInfo| {
            deliver(f32_to_i16(data));
        },
        err_callback,
        None,
    ) {
        return Ok(stream);
    }

    build_native_stream(device, on_samples)
}

/// Fallback: capture at the device's native config and convert in software.
fn build_native_stream<F>(device: &cpal::Device, on_samples: F) -> Result<cpal::Stream>
where
    F: Fn(Vec<i16>) + Send + Clone + 'static,
{
    use cpal::SampleFormat;

    let default_config = device
        .default_input_config()
        .map_err(|e| VoxlogError::AudioCapture {
            message: format!("Failed to query default input config: {}", e),
        })?;

    let native_rate = default_config.sample_rate().0;
    let native_channels = default_config.channels() as usize;
    let stream_config: cpal::StreamConfig = default_config.clone().into();

    let err_callback = |err| {
        eprintln!("voxlog: audio stream error: {}", err);
    };

    match default_config.sample_format() {
        SampleFormat::I16 => device
            .build_input_stream(
                &stream_config,
                move |data: &[i16], _: &cpal::InputCallbackInfo| {
                    on_samples(convert_to_mono_16khz(data, native_channels, native_rate));
                },
                err_callback,
                None,
            )
            .map_err(|e| VoxlogError::AudioCapture {
                message: format!("Failed to build native i16 stream: {}", e),
            }),
        SampleFormat::F32 => device
            .build_input_stream(
                &stream_config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    let i16_data = f32_to_i16(data);
                    on_samples(convert_to_mono_16khz(&i16_data, native_channels, native_rate));
                },
                err_callback,
                None,
            )
            .map_err(|e| VoxlogError::AudioCapture {
                message: format!("Failed to build native f32 stream: {}", e),
            }),
        fmt => Err(VoxlogError::AudioCapture {
            message: format!(
                "Unsupported native sample format: {:?}. Try another --device.",
                fmt
            ),
        }),
    }
}

fn f32_to_i16(data: &[f32]) -> Vec<i16> {
    data.iter()
        .map(|&s| (s.clamp(-1.0, 1.0) * i16::MAX as f32) as i16)
        .collect()
}

/// Mix multi-channel audio to mono and resample to 16kHz.
fn convert_to_mono_16khz(samples: &[i16], channels: usize, source_rate: u32) -> Vec<i16> {
    let mono: Vec<i16> = if channels <= 1 {
        samples.to_vec()
    } else {
        samples
            .chunks_exact(channels)
            .map(|frame| {
                let sum: i32 = frame.iter().map(|&s| s as i32).sum();
                (sum / channels as i32) as i16
            })
            .collect()
    };

    if source_rate == defaults::SAMPLE_RATE {
        mono
    } else {
        crate::audio::wav::resample(&mono, source_rate, defaults::SAMPLE_RATE)
    }
}

/// Push-style capture stream feeding the transcription queue.
///
/// The callback runs on the audio subsystem's thread and does exactly one
/// `FrameSink::push` per invocation — no I/O, no blocking. Device and
/// stream-open failures surface here at open time, never inside the
/// callback.
pub struct MicStream {
    stream: cpal::Stream,
}

impl MicStream {
    /// Open a capture stream on the given device index (None = default)
    /// and wire its callback to `sink`.
    pub fn open(device_index: Option<usize>, sink: Arc<dyn FrameSink>) -> Result<Self> {
        let device = input_device(device_index)?;
        let sequence = Arc::new(AtomicU64::new(0));

        let stream = build_input_stream(&device, move |samples| {
            let seq = sequence.fetch_add(1, Ordering::Relaxed);
            sink.push(AudioFrame::new(samples, seq));
        })?;

        Ok(Self { stream })
    }

    /// Start delivering frames.
    pub fn start(&self) -> Result<()> {
        self.stream.play().map_err(|e| VoxlogError::AudioCapture {
            message: format!("Failed to start audio stream: {}", e),
        })
    }

    /// Stop the stream. Also happens implicitly on drop.
    pub fn stop(&self) -> Result<()> {
        self.stream.pause().map_err(|e| VoxlogError::AudioCapture {
            message: format!("Failed to stop audio stream: {}", e),
        })
    }
}

/// Wrapper for cpal::Stream to make it Send.
///
/// SAFETY: the stream is only touched from one thread at a time; the
/// recorder owns its source exclusively.
struct SendableStream(cpal::Stream);

unsafe impl Send for SendableStream {}

/// Poll-style capture source for the recorder.
///
/// The callback appends into an internal buffer; `read_samples` swaps the
/// buffer out. Used where a blocking-read loop fits better than a push
/// callback.
pub struct CpalAudioSource {
    device: cpal::Device,
    stream: Option<SendableStream>,
    buffer: Arc<Mutex<Vec<i16>>>,
}

impl CpalAudioSource {
    /// Create a source on the given device index (None = default).
    ///
    /// The device is resolved eagerly so a bad index fails at session
    /// startup; the stream itself is built on `start`.
    pub fn new(device_index: Option<usize>) -> Result<Self> {
        let device = input_device(device_index)?;
        Ok(Self {
            device,
            stream: None,
            buffer: Arc::new(Mutex::new(Vec::new())),
        })
    }
}

impl AudioSource for CpalAudioSource {
    fn start(&mut self) -> Result<()> {
        if self.stream.is_some() {
            return Ok(());
        }

        let buffer = Arc::clone(&self.buffer);
        let stream = build_input_stream(&self.device, move |samples| {
            if let Ok(mut buf) = buffer.lock() {
                buf.extend_from_slice(&samples);
            }
        })?;

        stream.play().map_err(|e| VoxlogError::AudioCapture {
            message: format!("Failed to start audio stream: {}", e),
        })?;

        self.stream = Some(SendableStream(stream));
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        if let Some(stream) = self.stream.take() {
            stream.0.pause().map_err(|e| VoxlogError::AudioCapture {
                message: format!("Failed to stop audio stream: {}", e),
            })?;
        }
        Ok(())
    }

    fn read_samples(&mut self) -> Result<Vec<i16>> {
        let mut buffer = self.buffer.lock().map_err(|e| VoxlogError::AudioCapture {
            message: format!("Failed to lock audio buffer: {}", e),
        })?;
        Ok(std::mem::take(&mut *buffer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_f32_to_i16_clamps_and_scales() {
        let converted = f32_to_i16(&[0.0, 0.5, -0.5, 1.0, -1.0, 2.0, -2.0]);
        assert_eq!(converted[0], 0);
        assert!((converted[1] - i16::MAX / 2).abs() <= 1);
        assert!((converted[2] + i16::MAX / 2).abs() <= 1);
        assert_eq!(converted[3], i16::MAX);
        // Out-of-range input clamps instead of wrapping.
        assert_eq!(converted[5], i16::MAX);
        assert_eq!(converted[6], -i16::MAX);
    }

    #[test]
    fn test_convert_mono_16khz_is_identity() {
        let samples = vec![10i16, 20, 30];
        assert_eq!(convert_to_mono_16khz(&samples, 1, 16000), samples);
    }

    #[test]
    fn test_convert_stereo_averages_channels() {
        // Pairs (100, 300) and (-50, 50)
        let samples = vec![100i16, 300, -50, 50];
        assert_eq!(convert_to_mono_16khz(&samples, 2, 16000), vec![200, 0]);
    }

    #[test]
    fn test_convert_resamples_48khz_down() {
        let samples = vec![0i16; 4800]; // 100ms at 48kHz
        let converted = convert_to_mono_16khz(&samples, 1, 48000);
        assert!((1590..=1610).contains(&converted.len()));
    }

    #[test]
    #[ignore] // Requires audio hardware
    fn test_list_input_devices_returns_names() {
        let devices = list_input_devices().unwrap();
        assert!(!devices.is_empty(), "Expected at least one input device");
    }

    #[test]
    #[ignore] // Requires audio hardware
    fn test_input_device_out_of_range_index() {
        let result = input_device(Some(usize::MAX));
        match result {
            Err(VoxlogError::AudioDeviceNotFound { device }) => {
                assert_eq!(device, usize::MAX.to_string());
            }
            _ => panic!("Expected AudioDeviceNotFound error"),
        }
    }

    #[test]
    #[ignore] // Requires audio hardware
    fn test_cpal_source_start_read_stop() {
        let mut source = CpalAudioSource::new(None).unwrap();
        source.start().unwrap();
        std::thread::sleep(std::time::Duration::from_millis(100));
        let _samples = source.read_samples().unwrap();
        source.stop().unwrap();
    }
}
