//! Model download and installation management.
//!
//! Downloads ggml models from HuggingFace into the user cache directory,
//! with streaming writes, a progress bar, and optional SHA-1 verification.

use crate::error::{Result, VoxlogError};
use crate::models::catalog::{get_model, resolve_name};
use crate::models::model_path;
use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use sha1::{Digest, Sha1};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Download a model by catalog name, returning its installed path.
///
/// Already-installed models return immediately.
///
/// # Errors
/// Unknown model name, network failure, checksum mismatch, or a file that
/// cannot be written.
pub async fn download_model(name: &str, progress: bool) -> Result<PathBuf> {
    let path = model_path(name);
    if path.exists() {
        return Ok(path);
    }

    let resolved = resolve_name(name);
    let info = get_model(resolved).ok_or_else(|| {
        VoxlogError::Other(format!(
            "Unknown model '{name}'. Run 'voxlog models list' to see available models."
        ))
    })?;

    download_to_path(info.name, info.url, info.sha1, info.size_mb, &path, progress).await?;
    Ok(path)
}

/// Core download: fetch url, stream to path, verify sha1 if non-empty.
async fn download_to_path(
    name: &str,
    url: &str,
    sha1: &str,
    size_mb: u32,
    output_path: &Path,
    progress: bool,
) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| VoxlogError::Other(format!("Failed to create models directory: {e}")))?;
    }

    if progress {
        eprintln!("Downloading {name} ({size_mb} MB)...");
    }

    let client = reqwest::Client::new();
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| VoxlogError::Other(format!("Failed to start download: {e}")))?;

    if !response.status().is_success() {
        return Err(VoxlogError::Other(format!(
            "Download failed with status: {}",
            response.status()
        )));
    }

    let total_size = response.content_length().unwrap_or(0);

    let pb = if progress {
        let pb = ProgressBar::new(total_size);
        pb.set_style(
            // SAFETY: hardcoded template string — always valid
            #[allow(clippy::expect_used)]
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
                .expect("hardcoded progress bar template")
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let mut hasher = Sha1::new();
    let mut stream = response.bytes_stream();
    let mut file = fs::File::create(output_path)
        .map_err(|e| VoxlogError::Other(format!("Failed to create output file: {e}")))?;

    while let Some(chunk) = stream.next().await {
        let chunk =
            chunk.map_err(|e| VoxlogError::Other(format!("Failed to read download chunk: {e}")))?;

        file.write_all(&chunk)
            .map_err(|e| VoxlogError::Other(format!("Failed to write to file: {e}")))?;

        hasher.update(&chunk);

        if let Some(ref pb) = pb {
            pb.inc(chunk.len() as u64);
        }
    }

    if let Some(pb) = pb {
        pb.finish_with_message("Downloaded");
    }

    if !sha1.is_empty() {
        let calculated_hash = format!("{:x}", hasher.finalize());
        if calculated_hash != sha1 {
            if let Err(e) = fs::remove_file(output_path) {
                eprintln!("voxlog: failed to remove corrupted download: {e}");
            }
            return Err(VoxlogError::Other(format!(
                "SHA-1 checksum mismatch. Expected: {sha1}, got: {calculated_hash}"
            )));
        }
    }

    if progress {
        eprintln!("Model installed to: {}", output_path.display());
    }

    Ok(())
}
