use anyhow::Result;
use clap::Parser;
use owo_colors::OwoColorize;
use voxlog::cli::{Cli, Commands, ModelsAction};
use voxlog::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        None => {
            let config = load_config(cli.config.as_deref())?;
            if let Some(file) = cli.file {
                voxlog::app::run_file_command(
                    config,
                    cli.model,
                    cli.language,
                    file,
                    cli.output_dir,
                    cli.quiet,
                    cli.no_download,
                )
                .await?;
            } else {
                voxlog::app::run_live_command(
                    config,
                    cli.model,
                    cli.device,
                    cli.language,
                    cli.record,
                    cli.window,
                    cli.output_dir,
                    cli.quiet,
                    cli.no_download,
                )
                .await?;
            }
        }
        Some(Commands::Devices) => {
            list_audio_devices()?;
        }
        Some(Commands::Models { action }) => {
            handle_models_command(action).await?;
        }
    }

    Ok(())
}

/// Load configuration from --config, the default path, or built-in
/// defaults, then apply environment overrides.
fn load_config(custom_path: Option<&std::path::Path>) -> Result<Config> {
    let config = if let Some(path) = custom_path {
        Config::load(path)?
    } else {
        Config::load_or_default(&Config::default_path())?
    };
    Ok(config.with_env_overrides())
}

fn list_audio_devices() -> Result<()> {
    voxlog::audio::capture::suppress_audio_warnings();
    let devices = voxlog::audio::capture::list_input_devices()?;

    if devices.is_empty() {
        eprintln!("{}", "No audio input devices found.".yellow());
        return Ok(());
    }

    println!("Available input devices:");
    for (index, name) in devices.iter().enumerate() {
        println!("  {}: {}", index, name);
    }
    Ok(())
}

async fn handle_models_command(action: ModelsAction) -> Result<()> {
    match action {
        ModelsAction::List => {
            println!("Available Whisper models:");
            for model in voxlog::models::catalog::list_models() {
                let status = if voxlog::models::is_model_installed(model.name) {
                    format!("{}", "installed".green())
                } else {
                    format!("{} MB", model.size_mb)
                };
                println!("  {:<8} {:<28} {}", model.name, model.hint, status);
            }
        }
        ModelsAction::Install { name } => {
            let path = voxlog::models::download::download_model(&name, true).await?;
            println!("{} {}", "Installed:".green(), path.display());
        }
    }
    Ok(())
}
