use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::{CurioError, Result};

/// Main configuration structure for Curio
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Completion service configuration
    #[serde(default)]
    pub completion: CompletionConfig,
    /// Turn pipeline configuration
    #[serde(default)]
    pub pipeline: PipelineConfig,
    /// Terminal client configuration
    #[serde(default)]
    pub client: ClientConfig,
}

impl Config {
    /// Load configuration from an explicit path, or from the default search paths
    ///
    /// Falls back to `Config::default()` when no file exists at any default location.
    /// An explicit path that cannot be read is an error.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = config_path {
            tracing::info!("Loading config from: {}", path.display());
            return Self::from_file(path);
        }

        for path in default_config_paths() {
            if path.exists() {
                tracing::info!("Loading config from: {}", path.display());
                return Self::from_file(&path);
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Config::default())
    }

    /// Read and validate a TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CurioError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| CurioError::Config(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Check addresses and URLs before anything binds or connects
    pub fn validate(&self) -> Result<()> {
        self.server.socket_addr()?;

        Url::parse(&self.completion.api_url).map_err(|e| {
            CurioError::Config(format!(
                "Invalid completion api_url '{}': {e}",
                self.completion.api_url
            ))
        })?;

        Url::parse(&self.client.server_url).map_err(|e| {
            CurioError::Config(format!(
                "Invalid client server_url '{}': {e}",
                self.client.server_url
            ))
        })?;

        Ok(())
    }
}

fn default_config_paths() -> Vec<PathBuf> {
    [
        dirs::home_dir().map(|h| h.join(".curio").join("config.toml")),
        dirs::config_dir().map(|c| c.join("curio").join("config.toml")),
        Some(PathBuf::from("config.toml")),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "127.0.0.1:3000")
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

impl ServerConfig {
    /// Parse the listen address
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.listen_addr
            .parse()
            .map_err(|e| CurioError::Config(format!("Invalid listen address: {e}")))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
        }
    }
}

fn default_listen_addr() -> String {
    "127.0.0.1:3000".to_string()
}

/// Completion service configuration (OpenAI-compatible API)
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionConfig {
    /// API base URL; `/chat/completions` is appended
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Environment variable name for the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,
    /// Request timeout in seconds
    #[serde(default = "default_completion_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_key_env: default_api_key_env(),
            model: default_model(),
            timeout_secs: default_completion_timeout_secs(),
        }
    }
}

fn default_api_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_completion_timeout_secs() -> u64 {
    30
}

/// How much conversation history each pipeline stage sees
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// History entries rendered into the extraction prompt
    #[serde(default = "default_extraction_history")]
    pub extraction_history: usize,
    /// History entries rendered into the response prompt
    #[serde(default = "default_response_history")]
    pub response_history: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            extraction_history: default_extraction_history(),
            response_history: default_response_history(),
        }
    }
}

fn default_extraction_history() -> usize {
    5
}

fn default_response_history() -> usize {
    3
}

/// Terminal client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Base URL of a running Curio server
    #[serde(default = "default_server_url")]
    pub server_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_client_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            timeout_secs: default_client_timeout_secs(),
        }
    }
}

fn default_server_url() -> String {
    "http://127.0.0.1:3000".to_string()
}

fn default_client_timeout_secs() -> u64 {
    60
}
