use crate::defaults;
use crate::error::{Result, VoxlogError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub audio: AudioConfig,
    pub stt: SttConfig,
    pub session: SessionConfig,
}

/// Audio capture configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AudioConfig {
    /// Input device index from the `devices` listing; None = default device
    pub device: Option<usize>,
    pub sample_rate: u32,
}

/// Speech-to-text configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SttConfig {
    pub model: String,
    pub language: String,
}

/// Session output configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SessionConfig {
    /// Accumulation window in seconds
    pub window_secs: u64,
    pub output_dir: PathBuf,
    /// Also record the raw session audio to WAV
    pub record: bool,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            device: None,
            sample_rate: defaults::SAMPLE_RATE,
        }
    }
}

impl Default for SttConfig {
    fn default() -> Self {
        Self {
            model: defaults::DEFAULT_MODEL.to_string(),
            language: defaults::DEFAULT_LANGUAGE.to_string(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            window_secs: defaults::WINDOW_SECS,
            output_dir: PathBuf::from(defaults::OUTPUT_DIR),
            record: false,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// Missing fields take their default values; invalid TOML is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file, or return defaults when the file is missing.
    ///
    /// A present-but-invalid file is still an error: silently ignoring a
    /// broken config hides typos from the user.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Reject values that would break the session at runtime.
    pub fn validate(&self) -> Result<()> {
        if self.session.window_secs == 0 {
            return Err(VoxlogError::ConfigInvalidValue {
                key: "session.window_secs".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.audio.sample_rate == 0 {
            return Err(VoxlogError::ConfigInvalidValue {
                key: "audio.sample_rate".to_string(),
                message: "must be positive".to_string(),
            });
        }
        Ok(())
    }

    /// Apply environment variable overrides.
    ///
    /// Supported:
    /// - VOXLOG_MODEL → stt.model
    /// - VOXLOG_LANGUAGE → stt.language
    /// - VOXLOG_AUDIO_DEVICE → audio.device (index)
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(model) = std::env::var("VOXLOG_MODEL")
            && !model.is_empty()
        {
            self.stt.model = model;
        }

        if let Ok(language) = std::env::var("VOXLOG_LANGUAGE")
            && !language.is_empty()
        {
            self.stt.language = language;
        }

        if let Ok(device) = std::env::var("VOXLOG_AUDIO_DEVICE")
            && let Ok(index) = device.parse::<usize>()
        {
            self.audio.device = Some(index);
        }

        self
    }

    /// Default configuration file path (`~/.config/voxlog/config.toml`).
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join("voxlog")
            .join("config.toml")
    }
}
