use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "shiori", version, about = "Browse top anime movies and keep favorites")]
pub struct Cli {
    /// Config file to use instead of the per-user one.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log to stderr instead of the log file.
    #[arg(long, global = true)]
    pub log_stderr: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactive browser (default).
    Browse,
    /// Fetch and print a single catalog page.
    Top {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Print the effective configuration.
    Config,
}
