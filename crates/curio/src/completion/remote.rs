//! Remote completion provider using OpenAI-compatible APIs
//!
//! Sends each prompt as a single user message to `{api_url}/chat/completions`.
//! The API key is read from the environment variable named in the config.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use tracing::{debug, info};

use crate::completion::CompletionProvider;
use crate::completion::types::{CompletionError, CompletionRequest};
use crate::config::CompletionConfig;

/// Completion client for OpenAI-compatible HTTP APIs
#[derive(Debug)]
pub struct RemoteCompletion {
    client: Client,
    config: CompletionConfig,
    api_key: String,
}

/// OpenAI-compatible chat completion request
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// OpenAI-compatible chat completion response
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

impl RemoteCompletion {
    /// Create a client, reading the API key from `config.api_key_env`
    ///
    /// Returns a `ConfigError` if the variable is unset or empty.
    pub fn from_env(config: &CompletionConfig) -> Result<Self, CompletionError> {
        let api_key = env::var(&config.api_key_env)
            .ok()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                CompletionError::ConfigError(format!(
                    "API key env var '{}' not set",
                    config.api_key_env
                ))
            })?;

        Self::with_api_key(config, api_key)
    }

    /// Create a client with an explicit API key
    pub fn with_api_key(
        config: &CompletionConfig,
        api_key: impl Into<String>,
    ) -> Result<Self, CompletionError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CompletionError::ApiError(e.to_string()))?;

        info!(
            "RemoteCompletion initialized with model: {}, api_url: {}",
            config.model, config.api_url
        );

        Ok(Self {
            client,
            config: config.clone(),
            api_key: api_key.into(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.api_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl CompletionProvider for RemoteCompletion {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        let body = ChatCompletionRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &request.prompt,
            }],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let url = self.endpoint();
        debug!(
            "Calling completion API at: {} (temperature={}, max_tokens={})",
            url, request.temperature, request.max_tokens
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CompletionError::ApiError(format!("Request timed out: {e}"))
                } else if e.is_connect() {
                    CompletionError::ApiError(format!("Failed to connect: {e}"))
                } else {
                    CompletionError::ApiError(format!("Request failed: {e}"))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(CompletionError::ApiError(format!(
                "API returned {status}: {error_text}"
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::ParseError(e.to_string()))?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        if content.is_empty() {
            debug!("Completion API returned no content");
        }

        Ok(content)
    }

    fn name(&self) -> &'static str {
        "remote"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_test_config(api_url: String) -> CompletionConfig {
        CompletionConfig {
            api_url,
            api_key_env: "CURIO_TEST_REMOTE_KEY".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            timeout_secs: 5,
        }
    }

    fn completion_body(content: &str) -> serde_json::Value {
        serde_json::json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": content
                }
            }]
        })
    }

    #[tokio::test]
    async fn test_from_env_missing_api_key() {
        let mut config = create_test_config("https://api.example.com/v1".to_string());
        config.api_key_env = "CURIO_TEST_UNSET_KEY".to_string();
        unsafe { env::remove_var("CURIO_TEST_UNSET_KEY") };

        let result = RemoteCompletion::from_env(&config);

        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("CURIO_TEST_UNSET_KEY"));
    }

    #[tokio::test]
    async fn test_from_env_reads_api_key() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("Authorization", "Bearer env-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("YES")))
            .mount(&mock_server)
            .await;

        let mut config = create_test_config(mock_server.uri());
        config.api_key_env = "CURIO_TEST_SET_KEY".to_string();
        unsafe { env::set_var("CURIO_TEST_SET_KEY", "env-key") };

        let client = RemoteCompletion::from_env(&config).unwrap();
        let text = client
            .complete(&CompletionRequest::new("prompt", 0.0, 10))
            .await
            .unwrap();

        assert_eq!(text, "YES");
    }

    #[tokio::test]
    async fn test_complete_sends_sampling_parameters() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("Authorization", "Bearer test-key"))
            .and(body_partial_json(serde_json::json!({
                "model": "gpt-3.5-turbo",
                "messages": [{"role": "user", "content": "Describe the dog"}],
                "max_tokens": 400
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(completion_body("  A brown dog.  ")),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let config = create_test_config(mock_server.uri());
        let client = RemoteCompletion::with_api_key(&config, "test-key").unwrap();

        let text = client
            .complete(&CompletionRequest::new("Describe the dog", 0.7, 400))
            .await
            .unwrap();

        // Trimming is the caller's job
        assert_eq!(text, "  A brown dog.  ");
    }

    #[tokio::test]
    async fn test_complete_trailing_slash_in_api_url() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("NO")))
            .mount(&mock_server)
            .await;

        let config = create_test_config(format!("{}/", mock_server.uri()));
        let client = RemoteCompletion::with_api_key(&config, "test-key").unwrap();

        let text = client
            .complete(&CompletionRequest::new("prompt", 0.0, 10))
            .await
            .unwrap();
        assert_eq!(text, "NO");
    }

    #[tokio::test]
    async fn test_complete_api_error_is_not_retried() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let config = create_test_config(mock_server.uri());
        let client = RemoteCompletion::with_api_key(&config, "test-key").unwrap();

        let result = client
            .complete(&CompletionRequest::new("prompt", 0.0, 10))
            .await;

        let err = result.unwrap_err().to_string();
        assert!(err.contains("500"));
    }

    #[tokio::test]
    async fn test_complete_rate_limit_is_an_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(429))
            .expect(1)
            .mount(&mock_server)
            .await;

        let config = create_test_config(mock_server.uri());
        let client = RemoteCompletion::with_api_key(&config, "test-key").unwrap();

        let result = client
            .complete(&CompletionRequest::new("prompt", 0.0, 10))
            .await;
        assert!(matches!(result, Err(CompletionError::ApiError(_))));
    }

    #[tokio::test]
    async fn test_complete_empty_choices_yields_empty_text() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})),
            )
            .mount(&mock_server)
            .await;

        let config = create_test_config(mock_server.uri());
        let client = RemoteCompletion::with_api_key(&config, "test-key").unwrap();

        let text = client
            .complete(&CompletionRequest::new("prompt", 0.0, 10))
            .await
            .unwrap();
        assert!(text.is_empty());
    }

    #[tokio::test]
    async fn test_complete_null_content_yields_empty_text() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"role": "assistant", "content": null}}]
            })))
            .mount(&mock_server)
            .await;

        let config = create_test_config(mock_server.uri());
        let client = RemoteCompletion::with_api_key(&config, "test-key").unwrap();

        let text = client
            .complete(&CompletionRequest::new("prompt", 0.0, 10))
            .await
            .unwrap();
        assert!(text.is_empty());
    }

    #[tokio::test]
    async fn test_complete_invalid_response_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
            .mount(&mock_server)
            .await;

        let config = create_test_config(mock_server.uri());
        let client = RemoteCompletion::with_api_key(&config, "test-key").unwrap();

        let result = client
            .complete(&CompletionRequest::new("prompt", 0.0, 10))
            .await;
        assert!(matches!(result, Err(CompletionError::ParseError(_))));
    }

    #[tokio::test]
    async fn test_remote_completion_name() {
        let config = create_test_config("https://api.example.com/v1".to_string());
        let client = RemoteCompletion::with_api_key(&config, "test-key").unwrap();

        assert_eq!(client.name(), "remote");
    }
}
