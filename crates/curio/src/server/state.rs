//! Shared application state for the chat server

use std::sync::Arc;
use tracing::warn;

use crate::completion::{CompletionError, CompletionProvider, RemoteCompletion};
use crate::config::{CompletionConfig, PipelineConfig};
use crate::error::Result;
use crate::pipeline::TurnOrchestrator;

/// Read-only state shared by every request
///
/// `orchestrator` is `None` when the completion credential was missing at
/// startup; the chat route then answers with a configuration error.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Option<TurnOrchestrator>,
}

impl AppState {
    /// Build state backed by the remote completion API
    ///
    /// A missing API key is not fatal here; it is reported per request.
    pub fn from_config(completion: &CompletionConfig, pipeline: &PipelineConfig) -> Result<Self> {
        match RemoteCompletion::from_env(completion) {
            Ok(remote) => Ok(Self::with_provider(Arc::new(remote), pipeline)),
            Err(CompletionError::ConfigError(msg)) => {
                warn!("{msg}; chat requests will fail until it is set");
                Ok(Self::unconfigured())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Build state over any completion provider
    pub fn with_provider(provider: Arc<dyn CompletionProvider>, pipeline: &PipelineConfig) -> Self {
        Self {
            orchestrator: Some(TurnOrchestrator::new(provider, pipeline)),
        }
    }

    /// State with no credential configured
    pub fn unconfigured() -> Self {
        Self { orchestrator: None }
    }
}
