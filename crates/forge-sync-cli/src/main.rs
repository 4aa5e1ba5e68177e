mod commands;
mod config;
#[cfg(unix)]
mod signal;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use forge_sync::Reconfigure;
use forge_sync_gitlab::GitlabBackend;
use forge_sync_store::ProjectCache;

use crate::config::SyncConfig;

#[derive(Parser)]
#[command(name = "forge-sync")]
#[command(about = "Keep a CI platform's project cache and forge webhooks in sync")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Refresh the local project cache from the forge
    Reload,
    /// Ensure every cached project has a webhook pointing at the platform
    Provision,
    /// Reload, provision, then ask the host process to reconfigure
    Run,
}

fn config_file(cli: &Cli) -> Result<PathBuf> {
    if let Some(path) = &cli.config {
        return Ok(path.clone());
    }
    config::config_path().context("could not determine config directory")
}

fn reconfigure_for(config: &SyncConfig) -> Box<dyn Reconfigure> {
    #[cfg(unix)]
    if let Some(pid_file) = &config.host_pid_file {
        return Box::new(signal::PidFileReconfigure::new(pid_file.clone()));
    }

    #[cfg(not(unix))]
    if config.host_pid_file.is_some() {
        log::warn!("host_pid_file is set but signal delivery is unix-only; skipping");
    }

    Box::new(forge_sync::NoopReconfigure)
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = SyncConfig::load(&config_file(&cli)?)?;

    let backend = GitlabBackend::new(config.forge_url.clone(), config.token()?);
    let cache = ProjectCache::new(config.cache_file()?);

    match cli.command {
        Command::Reload => {
            commands::reload::run(&backend, &cache, config.topic.as_deref()).await
        }
        Command::Provision => {
            commands::provision::run(
                &backend,
                &cache,
                &config.callback_base_url,
                &config.webhook_secret()?,
                reconfigure_for(&config).as_ref(),
            )
            .await
        }
        Command::Run => {
            commands::reload::run(&backend, &cache, config.topic.as_deref()).await?;
            commands::provision::run(
                &backend,
                &cache,
                &config.callback_base_url,
                &config.webhook_secret()?,
                reconfigure_for(&config).as_ref(),
            )
            .await
        }
    }
}
