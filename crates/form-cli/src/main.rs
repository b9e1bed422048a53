//! # form-cli
//!
//! Command-line front end for the dynamic form wizard.
//!
//! Registers a user with the form service, fetches the form schema for that
//! user, and walks through it section by section on the terminal. The
//! `check` command validates saved values against a local schema file
//! without touching the network.

mod commands;
mod prompt;

use clap::{Parser, Subcommand};
use form_client::ClientConfig;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "formwiz")]
#[command(about = "Dynamic form wizard CLI")]
#[command(version)]
struct Cli {
    /// Path to configuration file (YAML or JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Base URL of the form service
    #[arg(long, env = "FORMWIZ_BASE_URL", global = true)]
    base_url: Option<String>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a user with the form service
    Register {
        /// Roll number identifying the user
        #[arg(short, long)]
        roll_number: String,

        /// Display name of the user
        #[arg(short, long)]
        name: String,
    },

    /// Fetch the form schema for a user and print it as JSON
    Fetch {
        /// Roll number identifying the user
        #[arg(short, long)]
        roll_number: String,

        /// Write the schema to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check saved values against a local schema file
    Check {
        /// Schema file path (JSON or YAML)
        #[arg(short, long)]
        schema: PathBuf,

        /// Values file path (JSON or YAML map of field id to value)
        #[arg(long)]
        values: PathBuf,
    },

    /// Log in and fill the form interactively
    Fill {
        /// Roll number identifying the user
        #[arg(short, long)]
        roll_number: String,

        /// Display name of the user
        #[arg(short, long)]
        name: String,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Defaults, then the config file, then `--base-url` / `FORMWIZ_BASE_URL`
fn client_config(cli: &Cli) -> anyhow::Result<ClientConfig> {
    let mut config = match &cli.config {
        Some(path) => ClientConfig::from_file(path)?,
        None => ClientConfig::default(),
    };
    if let Some(base_url) = &cli.base_url {
        config = config.base_url(base_url.clone());
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Register { roll_number, name } => {
            let config = client_config(&cli)?;
            commands::register(&config, roll_number, name).await
        }
        Commands::Fetch {
            roll_number,
            output,
        } => {
            let config = client_config(&cli)?;
            commands::fetch(&config, roll_number, output.as_deref()).await
        }
        Commands::Check { schema, values } => commands::check(schema, values),
        Commands::Fill { roll_number, name } => {
            let config = client_config(&cli)?;
            commands::fill(&config, roll_number, name).await
        }
    }
}
