pub mod analyze;
pub mod render;
pub mod shell;

use anyhow::{Context, Result};
use std::sync::Arc;
use studyflow_application::ViewOrchestrator;
use studyflow_interaction::{AnalysisApiClient, ChatApiClient, ClientConfig};

/// Loads `config.toml` and the environment, then applies the `--api-url` flag.
pub fn load_config(api_url: Option<String>) -> Result<ClientConfig> {
    let config = ClientConfig::load()
        .context("Failed to load client configuration")?
        .with_base_url_override(api_url);
    tracing::debug!(base_url = %config.base_url, "Client configuration loaded");
    Ok(config)
}

/// Wires the HTTP clients into a fresh orchestrator.
pub fn build_orchestrator(config: &ClientConfig) -> Result<ViewOrchestrator> {
    let analysis = AnalysisApiClient::from_config(config)
        .context("Failed to build analysis client")?;
    let chat = ChatApiClient::from_config(config).context("Failed to build chat client")?;
    Ok(ViewOrchestrator::new(Arc::new(analysis), Arc::new(chat)))
}
