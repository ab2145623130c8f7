use std::path::PathBuf;

use clap::{Parser, Subcommand};
use curio::config::{ClientConfig, Config};
use curio_cli::commands::{ChatCommand, ConfigCommand, SendCommand};
use curio_cli::error::CliResult;
use curio_cli::output::OutputFormat;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "curio-cli")]
#[command(about = "Curio CLI - Terminal client for the Curio rescue assistant")]
#[command(version)]
pub struct Cli {
    #[clap(long, short, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[clap(long, short = 'c', global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    #[clap(long, short = 's', global = true, help = "Curio server URL")]
    pub server: Option<String>,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    #[clap(about = "Start an interactive rescue conversation")]
    Chat(ChatCommand),

    #[clap(about = "Send a single message and print the reply")]
    Send(SendCommand),

    #[clap(about = "Configuration commands")]
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() {
    init_logging();

    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run() -> CliResult<()> {
    let cli = Cli::parse();

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Table
    };

    match &cli.command {
        Command::Config(cmd) => cmd.execute(cli.config.as_deref(), format).await,
        Command::Chat(cmd) => cmd.execute(&client_config(&cli)?).await,
        Command::Send(cmd) => cmd.execute(&client_config(&cli)?, format).await,
    }
}

fn client_config(cli: &Cli) -> CliResult<ClientConfig> {
    let mut config = Config::load(cli.config.as_deref())?.client;
    if let Some(url) = &cli.server {
        config.server_url = url.clone();
    }
    Ok(config)
}
