//! Curio server - chat endpoint for stray-animal rescue reports

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use curio::config::Config;
use curio::error::Result;
use curio::server::ChatServer;

/// Curio - stray-animal rescue chat assistant
#[derive(Parser)]
#[command(name = "curio")]
#[command(about = "Chat assistant that triages stray-animal rescue reports")]
#[command(version)]
pub struct Cli {
    /// Path to config file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the chat server (default command)
    #[command(name = "serve")]
    Serve {
        /// Override the configured listen address
        #[arg(long)]
        listen: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    init_logging();

    let cli = Cli::parse();

    match cli.command {
        None => serve(cli.config, None).await,
        Some(Command::Serve { listen }) => serve(cli.config, listen).await,
    }
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,curio=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn serve(config_path: Option<PathBuf>, listen: Option<String>) -> Result<()> {
    tracing::info!("Starting Curio");

    let mut config = Config::load(config_path.as_deref())?;
    if let Some(addr) = listen {
        config.server.listen_addr = addr;
    }
    tracing::debug!("Config loaded: {:?}", config);

    let server = ChatServer::new(&config)?;
    server.serve().await?;

    tracing::info!("Curio stopped");
    Ok(())
}
