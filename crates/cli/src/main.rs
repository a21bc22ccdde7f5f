use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use stencil_kernel::project::{ProjectConfig, PROJECT_CONFIG_FILE};
use tracing::level_filters::LevelFilter;

const USAGE: &str = "\
Usage: check-config [github_pages|show|--verbose]
  github_pages: Check if GitHub Pages is enabled
  show: Display full configuration
  --verbose: Show detailed logging and configuration";

/// Read and report the project configuration
#[derive(Debug, Parser)]
#[command(name = "check-config", version)]
struct Cli {
    /// Show detailed logging and the full configuration
    #[arg(long, global = true)]
    verbose: bool,

    /// Configuration file to read
    #[arg(long, global = true, default_value = PROJECT_CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print `true` or `false` depending on documentation.github_pages_enabled
    #[command(name = "github_pages")]
    GithubPages,
    /// Print the full configuration as JSON
    Show,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    if cli.command.is_none() && !cli.verbose {
        println!("{USAGE}");
        return Ok(());
    }

    if cli.verbose {
        tracing::info!("verbose mode enabled");
    }

    let config = ProjectConfig::load_from(&cli.config)?;

    match cli.command {
        Some(Command::GithubPages) => {
            println!("{}", config.github_pages_enabled());
        }
        Some(Command::Show) | None => {
            let rendered = config
                .to_pretty_json()
                .context("failed to render configuration")?;
            println!("{rendered}");
        }
    }

    Ok(())
}

/// Warnings and errors only, unless verbose
fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init()
        .ok();
}
