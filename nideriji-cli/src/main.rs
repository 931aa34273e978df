use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod session;

use commands::{ConfigCommand, ListCommand, LoginCommand, ShowCommand, WriteCommand};
use config::Config;

#[derive(Parser)]
#[command(name = "diary")]
#[command(version)]
#[command(about = "A command-line client for the nideriji diary service", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// Log requests and failures to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and show account summary
    Login(LoginCommand),

    /// List your or your partner's diaries
    List(ListCommand),

    /// Show a single diary
    Show(ShowCommand),

    /// Write a new diary
    Write(WriteCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Load configuration
    let config = Config::load(cli.config)?;

    match cli.command {
        Some(Commands::Login(cmd)) => {
            cmd.run(&config).await?;
        }
        Some(Commands::List(cmd)) => {
            cmd.run(&config).await?;
        }
        Some(Commands::Show(cmd)) => {
            cmd.run(&config).await?;
        }
        Some(Commands::Write(cmd)) => {
            cmd.run(&config).await?;
        }
        Some(Commands::Config(cmd)) => {
            cmd.run(&config)?;
        }
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}

/// Logs go to stderr so command output on stdout stays clean.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "nideriji_core=debug" } else { "error" };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}
