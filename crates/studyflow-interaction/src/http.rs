//! Shared HTTP plumbing for the API clients.

use crate::config::ClientConfig;
use reqwest::Client;
use serde::Deserialize;
use studyflow_core::{Result, StudyflowError};

/// Builds the reqwest client shared by both API clients.
pub fn build_http_client(config: &ClientConfig) -> Result<Client> {
    Client::builder()
        .timeout(config.timeout())
        .build()
        .map_err(|e| StudyflowError::config(format!("Failed to build HTTP client: {e}")))
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Extracts the `error` field of a failure body, falling back to the raw text.
pub(crate) fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|wrapper| wrapper.error)
        .unwrap_or_else(|| body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_prefers_error_field() {
        assert_eq!(error_message(r#"{"error": "No file uploaded"}"#), "No file uploaded");
        assert_eq!(error_message("Bad Gateway\n"), "Bad Gateway");
    }
}
