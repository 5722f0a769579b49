//! CampusDesk CLI: the main entry point.
//!
//! Commands:
//! - `chat`    Interactive chat or single-message mode
//! - `config`  Print the default configuration or validate the current one

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(
    name = "campusdesk",
    about = "CampusDesk — a campus assistant for questions, tasks, appointments and menus",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Chat with the assistant
    Chat {
        /// Send a single message instead of entering interactive mode
        #[arg(short, long)]
        message: Option<String>,

        /// Identity the assistant acts for
        #[arg(short, long, env = "CAMPUSDESK_USER", default_value = "cli-user")]
        user: String,

        /// JSON file with knowledge documents and menus
        #[arg(long)]
        seed: Option<PathBuf>,
    },

    /// Print the default configuration, or check the current one
    Config {
        /// Load and validate ~/.campusdesk/config.toml instead
        #[arg(long)]
        validate: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Chat {
            message,
            user,
            seed,
        } => commands::chat::run(message, user, seed).await?,
        Commands::Config { validate } => {
            if validate {
                commands::config_cmd::validate()?
            } else {
                commands::config_cmd::print_default()
            }
        }
    }

    Ok(())
}
