//! ChatApiClient - JSON client for `POST /api/chat`.

use crate::config::ClientConfig;
use crate::dto::{ChatRequestDto, parse_chat_body};
use crate::http::{build_http_client, error_message};
use async_trait::async_trait;
use reqwest::Client;
use studyflow_core::chat::{ChatService, ChatTurn};
use studyflow_core::{ChatError, Result};

const CHAT_PATH: &str = "/api/chat";

/// Asks the mentor service about a topic.
#[derive(Clone)]
pub struct ChatApiClient {
    client: Client,
    endpoint: String,
}

impl ChatApiClient {
    /// Creates a client that reuses an existing reqwest client.
    pub fn new(client: Client, config: &ClientConfig) -> Self {
        Self {
            client,
            endpoint: config.endpoint(CHAT_PATH),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Ok(Self::new(build_http_client(config)?, config))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChatService for ChatApiClient {
    async fn reply(&self, turn: &ChatTurn) -> std::result::Result<String, ChatError> {
        let payload = ChatRequestDto {
            topic: &turn.topic,
            message: &turn.message,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|err| ChatError::unavailable(format!("Chat request failed: {err}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| ChatError::unavailable(format!("Failed to read chat response: {err}")))?;

        if !status.is_success() {
            return Err(ChatError::unavailable(format!(
                "HTTP {status}: {}",
                error_message(&body)
            )));
        }

        parse_chat_body(&body)
            .ok_or_else(|| ChatError::unavailable("Chat response has no 'response' text"))
    }
}
