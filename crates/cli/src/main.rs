//! Solace CLI: the main entry point.
//!
//! Commands:
//! - `serve`: Start the HTTP chat server
//! - `chat`: Interactive chat or single-message mode
//! - `onboard`: Write a default config
//! - `doctor`: Diagnose configuration and collaborators
//! - `extract-sentences`: Build a sentence pool from the knowledge base

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(
    name = "solace",
    about = "Solace: emotion-aware supportive chat service",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use this config file instead of ~/.solace/config.toml
    #[arg(short, long, global = true, env = "SOLACE_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP chat server
    Serve {
        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Chat in the terminal
    Chat {
        /// Send a single message instead of entering interactive mode
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Write a default configuration file
    Onboard,

    /// Diagnose configuration and collaborators
    Doctor,

    /// Extract candidate sentences from the knowledge base, one per line
    ExtractSentences {
        /// Knowledge base directory (defaults to knowledge.dir)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file
        #[arg(short, long, default_value = "sentence_pool.txt")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Serve { port } => commands::serve::run(config_path, port).await?,
        Commands::Chat { message } => commands::chat::run(config_path, message).await?,
        Commands::Onboard => commands::onboard::run(config_path).await?,
        Commands::Doctor => commands::doctor::run(config_path).await?,
        Commands::ExtractSentences { input, output } => {
            commands::extract_sentences::run(config_path, input, &output).await?
        }
    }

    Ok(())
}
