mod browse;
mod cli;
mod error;
mod render;

use std::process::ExitCode;

use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use shiori_api::{CatalogSource, JikanClient};
use shiori_core::config::AppConfig;
use shiori_core::screen::ScreenSettings;

use crate::cli::{Cli, Command};
use crate::error::CliError;

const DEFAULT_FILTER: &str = "shiori=info";

fn init_logging(to_stderr: bool) -> Option<WorkerGuard> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let dir = AppConfig::log_dir();
    if !to_stderr && std::fs::create_dir_all(&dir).is_ok() {
        let appender = tracing_appender::rolling::daily(&dir, "shiori.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(writer)
            .init();
        return Some(guard);
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    None
}

fn load_config(cli: &Cli) -> Result<AppConfig, CliError> {
    let config = match cli.config {
        Some(ref path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };
    Ok(config)
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = load_config(&cli)?;
    tracing::debug!(?config, "configuration loaded");

    match cli.command.unwrap_or(Command::Browse) {
        Command::Browse => {
            let client = JikanClient::from_config(&config.api)?;
            browse::run(client, ScreenSettings::from(&config)).await?;
        }
        Command::Top { page } => {
            let client = JikanClient::from_config(&config.api)?;
            let fetched = client.fetch_page(page, config.api.page_size).await?;
            if fetched.entries.is_empty() {
                println!("No entries on page {page}.");
            }
            for entry in &fetched.entries {
                println!("{}", render::entry_block(entry, false));
            }
        }
        Command::Config => {
            let path = cli.config.unwrap_or_else(AppConfig::config_path);
            println!("# {}", path.display());
            print!("{}", toml::to_string_pretty(&config)?);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let _guard = init_logging(cli.log_stderr);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
