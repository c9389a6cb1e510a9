use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use newsdesk::app::AppContext;
use newsdesk::cli::{commands, Cli, Commands};
use newsdesk::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let command = cli.command();

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::default_config_path()?,
    };

    if command == Commands::ConfigPath {
        commands::print_config_path(&config_path);
        return Ok(());
    }

    let config = Config::load_from(&config_path)?;

    // The TUI owns the terminal, so its logs go to a file.
    match (&command, config.log_path()) {
        (Commands::Tui, Some(log_path)) => init_file_tracing(&log_path)?,
        (Commands::Tui, None) => {}
        _ => init_stderr_tracing(),
    }

    let ctx = AppContext::new(config, &cli.overrides())?;

    match command {
        Commands::Tui => {
            newsdesk::tui::run(ctx).await?;
        }
        Commands::Headlines { json } => {
            commands::print_headlines(&ctx, json).await?;
        }
        Commands::ConfigPath => {}
    }

    Ok(())
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

fn init_stderr_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter())
        .init();
}

fn init_file_tracing(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .with(env_filter())
        .init();

    Ok(())
}
