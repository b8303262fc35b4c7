//! Session control: resolve model, device, and output paths, then run the
//! capture/transcribe/record threads until the user stops the session.

use crate::audio::capture::{CpalAudioSource, MicStream, list_input_devices, suppress_audio_warnings};
use crate::audio::recorder::Recorder;
use crate::audio::wav;
use crate::config::Config;
use crate::defaults;
use crate::error::{Result, VoxlogError};
use crate::models;
use crate::models::catalog::{list_models, resolve_name};
use crate::output;
use crate::pipeline::coordinator::{Coordinator, CoordinatorConfig};
use crate::pipeline::queue::frame_queue;
use crate::pipeline::shutdown::ShutdownSignal;
use crate::pipeline::sink::TranscriptFileSink;
use crate::stt::transcriber::Transcriber;
use crate::stt::whisper::{WhisperConfig, WhisperTranscriber};
use std::io::{BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::JoinHandle;

/// Run a live capture session: microphone → windowed transcription, with
/// an optional parallel raw recording.
///
/// Flags override the config file; choices still missing are prompted for
/// interactively when stdin is a terminal, as the session cannot start
/// without a model and a device.
#[allow(clippy::too_many_arguments)]
pub async fn run_live_command(
    mut config: Config,
    model: Option<String>,
    device: Option<usize>,
    language: Option<String>,
    record: bool,
    window: Option<u64>,
    output_dir: Option<PathBuf>,
    quiet: bool,
    no_download: bool,
) -> Result<()> {
    // Quiet ALSA/JACK probing before the first CPAL call.
    suppress_audio_warnings();

    apply_overrides(&mut config, language, window, output_dir);
    let interactive = std::io::stdin().is_terminal() && !quiet;

    // Resolve every choice before any thread starts; startup failures must
    // abort here with nothing to join.
    let model_choice = match model {
        Some(m) => m,
        None if interactive => prompt_model(&mut std::io::stdin().lock(), &config.stt.model)?,
        None => config.stt.model.clone(),
    };

    let device_index = match device.or(config.audio.device) {
        Some(index) => Some(index),
        None if interactive => {
            let devices = list_input_devices()?;
            Some(prompt_device(&mut std::io::stdin().lock(), &devices)?)
        }
        None => None,
    };

    let record = record
        || config.session.record
        || (interactive
            && prompt_yes_no(
                &mut std::io::stdin().lock(),
                "Do you want to record live audio?",
            )?);

    let transcriber = load_transcriber(&model_choice, &config, quiet, no_download).await?;

    output::ensure_output_dir(&config.session.output_dir)?;
    let basename = output::session_basename();
    let transcript_path = output::transcript_path(&config.session.output_dir, &basename);
    let sink = TranscriptFileSink::create(&transcript_path)?;

    // Session state: one queue, one stop flag, both owned here and handed
    // to the workers.
    let (producer, consumer) = frame_queue();
    let shutdown = ShutdownSignal::new();

    let coordinator = Coordinator::new(
        consumer,
        shutdown.clone(),
        transcriber,
        Box::new(sink),
        CoordinatorConfig {
            window_samples: defaults::window_samples(
                config.session.window_secs,
                config.audio.sample_rate,
            ),
            poll_timeout: defaults::QUEUE_POLL_TIMEOUT,
            quiet,
        },
    );
    let coordinator_handle = coordinator.spawn();

    // The recorder taps the device through its own stream, so it keeps
    // running even when transcription falls behind.
    let recorder_handle = if record {
        let recording_path = output::recording_path(&config.session.output_dir, &basename);
        match CpalAudioSource::new(device_index) {
            Ok(tap) => Some(
                Recorder::new(Box::new(tap), shutdown.clone(), recording_path).spawn(quiet),
            ),
            Err(e) => {
                eprintln!("voxlog: recorder disabled: {}", e);
                None
            }
        }
    } else {
        None
    };

    let stream = MicStream::open(device_index, Arc::new(producer))
        .and_then(|stream| stream.start().map(|_| stream));
    let stream = match stream {
        Ok(stream) => stream,
        Err(e) => {
            // Capture never came up; unwind the workers before reporting.
            shutdown.request_stop();
            join_worker(coordinator_handle, "coordinator");
            if let Some(handle) = recorder_handle {
                join_worker(handle, "recorder");
            }
            return Err(e);
        }
    };

    if !quiet {
        output::render_listening();
    }

    wait_for_stop().await;
    shutdown.request_stop();

    if !quiet {
        eprintln!("\nStopping...");
    }

    if let Err(e) = stream.stop() {
        eprintln!("voxlog: {}", e);
    }
    drop(stream);

    join_worker(coordinator_handle, "coordinator");
    if let Some(handle) = recorder_handle {
        join_worker(handle, "recorder");
    }

    if !quiet {
        eprintln!("Transcript saved to {}", transcript_path.display());
    }
    Ok(())
}

/// Transcribe an existing WAV file in one adapter call.
///
/// No windowing is involved: the whole decoded buffer goes to the model at
/// once and the output file is overwritten, not appended.
pub async fn run_file_command(
    mut config: Config,
    model: Option<String>,
    language: Option<String>,
    file: PathBuf,
    output_dir: Option<PathBuf>,
    quiet: bool,
    no_download: bool,
) -> Result<()> {
    apply_overrides(&mut config, language, None, output_dir);
    let interactive = std::io::stdin().is_terminal() && !quiet;

    let model_choice = match model {
        Some(m) => m,
        None if interactive => prompt_model(&mut std::io::stdin().lock(), &config.stt.model)?,
        None => config.stt.model.clone(),
    };

    let transcriber = load_transcriber(&model_choice, &config, quiet, no_download).await?;

    if !quiet {
        eprintln!("Transcribing {}...", file.display());
    }

    let out_path = transcribe_file_to(transcriber.as_ref(), &file, &config.session.output_dir)?;

    if !quiet {
        eprintln!(
            "Transcription completed. Output saved to {}",
            out_path.display()
        );
    }
    Ok(())
}

/// File-mode variant of the transcribe capability: decode the whole file,
/// make one adapter call, overwrite `<output_dir>/<stem>.txt`.
pub fn transcribe_file_to(
    transcriber: &dyn Transcriber,
    file: &Path,
    output_dir: &Path,
) -> Result<PathBuf> {
    let samples = wav::read_samples_from_path(file)?;
    let result = transcriber.transcribe(&samples)?;

    output::ensure_output_dir(output_dir)?;
    let out_path = output::file_transcript_path(output_dir, file);
    std::fs::write(&out_path, &result.text).map_err(|e| VoxlogError::TranscriptWrite {
        message: format!("{}: {}", out_path.display(), e),
    })?;
    Ok(out_path)
}

fn apply_overrides(
    config: &mut Config,
    language: Option<String>,
    window: Option<u64>,
    output_dir: Option<PathBuf>,
) {
    if let Some(language) = language {
        config.stt.language = language;
    }
    if let Some(window) = window {
        config.session.window_secs = window;
    }
    if let Some(output_dir) = output_dir {
        config.session.output_dir = output_dir;
    }
}

/// Resolve the model choice, download it if missing, and load it.
async fn load_transcriber(
    choice: &str,
    config: &Config,
    quiet: bool,
    no_download: bool,
) -> Result<Arc<dyn Transcriber>> {
    let name = resolve_name(choice);
    let model_path = models::ensure_model(name, no_download, quiet).await?;

    if !quiet {
        eprintln!("Loading model '{}'...", name);
    }
    let transcriber = WhisperTranscriber::new(WhisperConfig {
        model_path,
        language: config.stt.language.clone(),
        threads: None,
    })?;
    Ok(Arc::new(transcriber))
}

/// Block until the user presses Enter or the process receives Ctrl-C.
async fn wait_for_stop() {
    let enter = tokio::task::spawn_blocking(|| {
        let mut line = String::new();
        let _ = std::io::stdin().read_line(&mut line);
    });

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {}
        _ = enter => {}
    }
}

fn join_worker(handle: JoinHandle<()>, name: &str) {
    if handle.join().is_err() {
        eprintln!("voxlog: {} thread panicked", name);
    }
}

/// Show the model menu and read a choice; empty input keeps the default.
fn prompt_model(input: &mut dyn BufRead, default_model: &str) -> Result<String> {
    eprintln!("Available Whisper model sizes:");
    for model in list_models() {
        eprintln!("  {}: {} ({})", &model.name[..1], model.name, model.hint);
    }
    eprint!("Select model size (e.g., 'b' for base) [{}]: ", default_model);
    let _ = std::io::stderr().flush();

    let mut line = String::new();
    input.read_line(&mut line)?;
    let choice = line.trim();
    if choice.is_empty() {
        Ok(default_model.to_string())
    } else {
        Ok(choice.to_string())
    }
}

/// Show the numbered device menu and read an index.
fn prompt_device(input: &mut dyn BufRead, devices: &[String]) -> Result<usize> {
    if devices.is_empty() {
        return Err(VoxlogError::AudioDeviceNotFound {
            device: "default".to_string(),
        });
    }

    eprintln!("Available input devices:");
    for (index, name) in devices.iter().enumerate() {
        eprintln!("  {}: {}", index, name);
    }
    eprint!("Select device number: ");
    let _ = std::io::stderr().flush();

    let mut line = String::new();
    input.read_line(&mut line)?;
    let choice = line.trim();

    let index: usize = choice
        .parse()
        .map_err(|_| VoxlogError::AudioDeviceNotFound {
            device: choice.to_string(),
        })?;
    if index >= devices.len() {
        return Err(VoxlogError::AudioDeviceNotFound {
            device: choice.to_string(),
        });
    }
    Ok(index)
}

/// Ask a y/n question; default is no.
fn prompt_yes_no(input: &mut dyn BufRead, question: &str) -> Result<bool> {
    eprint!("{} (y/n): ", question);
    let _ = std::io::stderr().flush();

    let mut line = String::new();
    input.read_line(&mut line)?;
    let answer = line.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}
