//! Runs the window manager on the pipe display server.
use anyhow::{Context, Result};
use clap::{arg, command};
use std::path::{Path, PathBuf};
use tallwm::pipe_display_server::PipeDisplayServer;
use tallwm_core::{ExitReason, Manager};

fn main() -> Result<()> {
    let matches = command!("tallwm")
        .about("A tiling window manager")
        .help_template(tallwm::utils::get_help_template())
        .args(&[
            arg!(-c --config <FILE> "Read the configuration from FILE instead of the default location."),
            arg!(--pipe <PATH> "Create the event pipe at PATH instead of the runtime directory."),
        ])
        .get_matches();
    let config_path = matches.get_one::<String>("config").map(PathBuf::from);
    let pipe_path = matches.get_one::<String>("pipe").map(PathBuf::from);

    // Configuration errors are fatal before anything is managed.
    let config = load_config(config_path.as_deref())?;
    tallwm::utils::log::setup_logging(&config.log_level);
    tracing::info!("tallwm booting...");

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("couldn't init Tokio runtime")?;
    rt.block_on(run(config, config_path, pipe_path))
}

fn load_config(path: Option<&Path>) -> Result<tallwm::Config> {
    match path {
        Some(path) => tallwm::load_from_path(path),
        None => tallwm::load(),
    }
}

async fn run(
    config: tallwm::Config,
    config_path: Option<PathBuf>,
    pipe_path: Option<PathBuf>,
) -> Result<()> {
    let pipe_file = match pipe_path {
        Some(path) => tallwm::expand_path(&path),
        None => PipeDisplayServer::pipe_path().context("couldn't place the event pipe")?,
    };
    let server = PipeDisplayServer::new(pipe_file.clone())
        .await
        .with_context(|| format!("couldn't create {}", pipe_file.display()))?;
    tracing::info!("Listening on {}", pipe_file.display());

    let mut manager = Manager::new(config, server).context("invalid configuration")?;
    manager.register_child_hook();

    loop {
        match manager.event_loop().await {
            ExitReason::Shutdown => break,
            ExitReason::Restart => {
                let reloaded = load_config(config_path.as_deref()).and_then(|config| {
                    manager
                        .reload_config(config)
                        .context("invalid configuration")
                });
                if let Err(err) = reloaded {
                    tracing::error!("Keeping the current configuration: {:#}", err);
                }
            }
        }
    }
    tracing::info!("Completed");
    Ok(())
}
