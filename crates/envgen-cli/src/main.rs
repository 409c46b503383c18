//! envgen CLI - inspect the parameter layout and drive the control surface
//! against an in-process backend.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use envgen_config::{EditorConfig, editor_config_path};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "envgen")]
#[command(author, version, about = "envgen control surface CLI", long_about = None)]
struct Cli {
    /// Editor settings file (defaults to the user config directory)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List host parameters and their ranges
    Params(commands::params::ParamsArgs),

    /// Convert a value between normalized, real and slider units
    Convert(commands::convert::ConvertArgs),

    /// Run scripted edits against a loopback backend and show the surface
    Session(commands::session::SessionArgs),

    /// Show configuration and snapshot locations
    Paths,
}

fn init_tracing(config: &EditorConfig) {
    let fallback = config.log_filter.as_deref().unwrap_or("info");
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(editor_config_path);
    let config = EditorConfig::load_or_default(&config_path)?;
    init_tracing(&config);
    tracing::debug!("settings from {}", config_path.display());

    match cli.command {
        Commands::Params(args) => commands::params::run(args),
        Commands::Convert(args) => commands::convert::run(args, &config),
        Commands::Session(args) => commands::session::run(args, config),
        Commands::Paths => commands::paths::run(&config_path),
    }
}
