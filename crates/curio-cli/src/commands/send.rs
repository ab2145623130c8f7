use clap::Parser;
use curio::config::ClientConfig;

use crate::client::ChatClient;
use crate::error::CliResult;
use crate::output::{OutputFormat, render_message, render_report};
use crate::session::ChatSession;

#[derive(Parser)]
pub struct SendCommand {
    #[clap(help = "Message describing the animal and its situation")]
    pub message: String,
}

impl SendCommand {
    pub async fn execute(&self, config: &ClientConfig, format: OutputFormat) -> CliResult<()> {
        let Some((_, turn)) = ChatSession::new().submit(&self.message) else {
            return Err("Message must not be empty".into());
        };

        let client = ChatClient::new(config)?;
        let reply = client.process_message(&turn.message, &turn.history).await?;

        match format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&reply)?);
            }
            OutputFormat::Table => {
                let bubble = curio::chat::Message::assistant(reply.content);
                println!("{}", render_message(&bubble));
                if let Some(record) = &reply.rescue_data {
                    println!("\n{}", render_report(record));
                }
            }
        }

        Ok(())
    }
}
