//! HTTP client for the `/api/chat` endpoint

use std::time::Duration;

use curio::chat::{ChatReply, ChatRequest, Message};
use curio::config::ClientConfig;
use reqwest::Client;
use tracing::{debug, warn};

use crate::error::ClientError;

/// Sends conversation turns to a running Curio server
pub struct ChatClient {
    client: Client,
    endpoint: String,
}

impl ChatClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ClientError::Setup(format!("Failed to create HTTP client: {e}")))?;

        let endpoint = format!("{}/api/chat", config.server_url.trim_end_matches('/'));

        Ok(Self { client, endpoint })
    }

    /// Run one turn against the server
    ///
    /// Every failure (transport, status, body) collapses into
    /// [`ClientError::ProcessingFailed`]; the cause goes to the log.
    pub async fn process_message(
        &self,
        message: &str,
        history: &[Message],
    ) -> Result<ChatReply, ClientError> {
        let request = ChatRequest {
            message: message.to_string(),
            conversation_history: history.to_vec(),
        };

        debug!(endpoint = %self.endpoint, history_len = history.len(), "Sending chat turn");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!("Chat request failed: {e}");
                ClientError::ProcessingFailed
            })?;

        let status = response.status();
        let body: serde_json::Value = response.json().await.map_err(|e| {
            warn!("Failed to read chat response ({status}): {e}");
            ClientError::ProcessingFailed
        })?;

        if !status.is_success() {
            warn!("Chat server returned {status}: {body}");
            return Err(ClientError::ProcessingFailed);
        }

        if let Some(error) = body.get("error").filter(|e| !e.is_null()) {
            warn!("Chat server reported an error: {error}");
            return Err(ClientError::ProcessingFailed);
        }

        serde_json::from_value(body).map_err(|e| {
            warn!("Unexpected chat response shape: {e}");
            ClientError::ProcessingFailed
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let config = ClientConfig {
            server_url: "http://localhost:3000/".to_string(),
            timeout_secs: 5,
        };

        let client = ChatClient::new(&config).unwrap();
        assert_eq!(client.endpoint, "http://localhost:3000/api/chat");
    }
}
