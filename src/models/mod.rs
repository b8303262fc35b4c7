//! Whisper model catalog, cache locations, and downloads.

pub mod catalog;
#[cfg(feature = "model-download")]
pub mod download;

use crate::error::{Result, VoxlogError};
use catalog::resolve_name;
use std::path::PathBuf;

/// Directory where models are stored (`~/.cache/voxlog/models/`).
pub fn models_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from(".cache"))
        .join("voxlog")
        .join("models")
}

/// Full path for a model file, whether or not it exists yet.
pub fn model_path(name: &str) -> PathBuf {
    let resolved = resolve_name(name);
    models_dir().join(format!("ggml-{resolved}.bin"))
}

/// Check if a model is installed.
pub fn is_model_installed(name: &str) -> bool {
    model_path(name).exists()
}

/// Resolve a model to an installed file, downloading it if needed.
///
/// With `no_download` (or without the `model-download` feature) a missing
/// model is a startup error instead.
#[cfg(feature = "model-download")]
pub async fn ensure_model(name: &str, no_download: bool, quiet: bool) -> Result<PathBuf> {
    let path = model_path(name);
    if path.exists() {
        return Ok(path);
    }
    if no_download {
        return Err(VoxlogError::ModelNotFound {
            path: path.to_string_lossy().to_string(),
        });
    }
    download::download_model(name, !quiet).await
}

#[cfg(not(feature = "model-download"))]
pub async fn ensure_model(name: &str, _no_download: bool, _quiet: bool) -> Result<PathBuf> {
    let path = model_path(name);
    if path.exists() {
        Ok(path)
    } else {
        Err(VoxlogError::ModelNotFound {
            path: path.to_string_lossy().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_path_uses_ggml_naming() {
        let path = model_path("base");
        assert!(path.to_string_lossy().ends_with("ggml-base.bin"));
        assert!(path.to_string_lossy().contains("voxlog"));
    }

    #[test]
    fn test_model_path_resolves_letters() {
        assert_eq!(model_path("t"), model_path("tiny"));
        assert_eq!(model_path("l"), model_path("large"));
    }

    #[test]
    fn test_models_dir_is_under_voxlog_cache() {
        assert!(models_dir().ends_with("voxlog/models"));
    }

    #[tokio::test]
    async fn test_ensure_model_no_download_fails_for_missing() {
        let result = ensure_model("tiny", true, true).await;
        if !is_model_installed("tiny") {
            match result {
                Err(VoxlogError::ModelNotFound { path }) => {
                    assert!(path.ends_with("ggml-tiny.bin"));
                }
                _ => panic!("Expected ModelNotFound error"),
            }
        }
    }
}
