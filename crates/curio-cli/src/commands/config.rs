use std::path::Path;

use clap::Parser;
use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};
use curio::config::Config;

use crate::error::CliResult;
use crate::output::OutputFormat;

#[derive(Parser)]
pub struct ConfigCommand {
    #[clap(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Parser)]
pub enum ConfigSubcommand {
    #[clap(about = "Show current configuration")]
    Show,
}

impl ConfigCommand {
    pub async fn execute(&self, config_path: Option<&Path>, format: OutputFormat) -> CliResult<()> {
        match &self.command {
            ConfigSubcommand::Show => Self::show(config_path, format),
        }
    }

    fn show(config_path: Option<&Path>, format: OutputFormat) -> CliResult<()> {
        let config = Config::load(config_path)?;
        let key_set = std::env::var(&config.completion.api_key_env)
            .map(|v| !v.is_empty())
            .unwrap_or(false);

        match format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "server": {
                        "listen_addr": config.server.listen_addr,
                    },
                    "completion": {
                        "api_url": config.completion.api_url,
                        "api_key_env": config.completion.api_key_env,
                        "api_key_set": key_set,
                        "model": config.completion.model,
                        "timeout_secs": config.completion.timeout_secs,
                    },
                    "pipeline": {
                        "extraction_history": config.pipeline.extraction_history,
                        "response_history": config.pipeline.response_history,
                    },
                    "client": {
                        "server_url": config.client.server_url,
                        "timeout_secs": config.client.timeout_secs,
                    }
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Table => {
                match config_path {
                    Some(path) => println!("Configuration from: {}", path.display()),
                    None => println!("Configuration: (search paths or defaults)"),
                }
                println!("==============================\n");

                println!("[Server]");
                let mut server_table = settings_table();
                server_table.add_row(["listen_addr", &config.server.listen_addr]);
                println!("{server_table}\n");

                println!("[Completion]");
                let mut completion_table = settings_table();
                completion_table.add_row(["api_url", &config.completion.api_url]);
                completion_table.add_row([
                    "api_key_env",
                    &format!(
                        "{} ({})",
                        config.completion.api_key_env,
                        if key_set { "set" } else { "not set" }
                    ),
                ]);
                completion_table.add_row(["model", &config.completion.model]);
                completion_table.add_row([
                    "timeout_secs",
                    &config.completion.timeout_secs.to_string(),
                ]);
                println!("{completion_table}\n");

                println!("[Pipeline]");
                let mut pipeline_table = settings_table();
                pipeline_table.add_row([
                    "extraction_history",
                    &config.pipeline.extraction_history.to_string(),
                ]);
                pipeline_table.add_row([
                    "response_history",
                    &config.pipeline.response_history.to_string(),
                ]);
                println!("{pipeline_table}\n");

                println!("[Client]");
                let mut client_table = settings_table();
                client_table.add_row(["server_url", &config.client.server_url]);
                client_table.add_row(["timeout_secs", &config.client.timeout_secs.to_string()]);
                println!("{client_table}");
            }
        }

        Ok(())
    }
}

fn settings_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(["Setting", "Value"]);
    table
}
