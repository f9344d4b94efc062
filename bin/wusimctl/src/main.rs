//! ---
//! wusim_section: "05-command-line"
//! wusim_subsection: "binary"
//! wusim_type: "source"
//! wusim_scope: "code"
//! wusim_description: "Control CLI for the workunit simulation harness."
//! wusim_version: "v0.1.0"
//! wusim_owner: "tbd"
//! ---
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use wusim_common::{init_tracing, HarnessConfig, LogFormat};

mod run;
mod setup;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormatArg {
    Pretty,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(value: LogFormatArg) -> Self {
        match value {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Json => LogFormat::StructuredJson,
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Stage workunit fixtures and fake model runs for controller testing",
    long_about = None
)]
struct Cli {
    /// Harness configuration file (TOML).
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the configured log format.
    #[arg(long = "log-format", global = true, value_enum)]
    log_format: Option<LogFormatArg>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Lay out the application and slot directories.
    Setup(setup::SetupArgs),
    /// Fake a model run inside a slot directory.
    Run(run::RunArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = HarnessConfig::load_or_default(cli.config.as_deref())
        .context("failed to load harness configuration")?;
    if let Some(format) = cli.log_format {
        config.logging.format = format.into();
    }
    init_tracing(env!("CARGO_PKG_NAME"), &config.logging)?;

    match cli.command {
        Commands::Setup(args) => setup::run(args, &config)?,
        Commands::Run(args) => run::run(args, &config)?,
    }
    Ok(())
}
