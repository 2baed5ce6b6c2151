use anyhow::{Context, Result};
use asisten::{commands, ui, Config};
use clap::{Parser, Subcommand};
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "asisten")]
#[command(version)]
#[command(about = "Chat with a hosted AI assistant from the terminal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive chat (default)
    Chat,
    /// Send one message and print the reply
    Ask {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Show the effective configuration
    Config {
        /// Write the default config file if none exists
        #[arg(long)]
        init: bool,
    },
}

/// Logs go to a file while the chat owns the terminal, stderr otherwise
fn init_tracing(log_file: Option<&Path>, default_filter: &str) -> Result<()> {
    let filter = EnvFilter::try_from_env("ASISTEN_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    match log_file {
        Some(path) => {
            if let Some(dir) = path.parent() {
                fs::create_dir_all(dir).context("Failed to create log directory")?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => {
            init_tracing(Some(config.log_path().as_path()), "asisten=info")?;
            ui::run_chat(&config).await?;
        }
        Commands::Ask { text } => {
            init_tracing(None, "asisten=warn")?;
            let ok = commands::ask(&config, &text.join(" ")).await?;
            if !ok {
                std::process::exit(1);
            }
        }
        Commands::Config { init } => {
            init_tracing(None, "asisten=warn")?;
            commands::show_config(&config, init)?;
        }
    }

    Ok(())
}
