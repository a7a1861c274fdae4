//! AnalysisApiClient - multipart client for `POST /api/analyze`.

use crate::config::ClientConfig;
use crate::dto::parse_analysis_body;
use crate::http::{build_http_client, error_message};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use studyflow_core::analysis::{AnalysisRequest, AnalysisResult, AnalysisService};
use studyflow_core::{AnalysisError, Result};

const ANALYZE_PATH: &str = "/api/analyze";

/// Sends the document and constraints to the analysis service.
#[derive(Clone)]
pub struct AnalysisApiClient {
    client: Client,
    endpoint: String,
}

impl AnalysisApiClient {
    /// Creates a client that reuses an existing reqwest client.
    pub fn new(client: Client, config: &ClientConfig) -> Self {
        Self {
            client,
            endpoint: config.endpoint(ANALYZE_PATH),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Ok(Self::new(build_http_client(config)?, config))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn build_form(request: &AnalysisRequest) -> std::result::Result<Form, AnalysisError> {
        let document = &request.document;
        let mime_type = document
            .validate()
            .map(|kind| kind.mime_type())
            .unwrap_or("application/octet-stream");

        let file = Part::bytes(document.bytes().to_vec())
            .file_name(document.file_name().to_string())
            .mime_str(mime_type)
            .map_err(|e| AnalysisError::unavailable(format!("Failed to build upload: {e}")))?;

        let constraints = request.constraints;
        Ok(Form::new()
            .part("file", file)
            .text("weeks", constraints.weeks().to_string())
            .text("hours", constraints.hours_per_day().to_string())
            .text("level", constraints.level().as_str()))
    }
}

#[async_trait]
impl AnalysisService for AnalysisApiClient {
    async fn analyze(
        &self,
        request: &AnalysisRequest,
    ) -> std::result::Result<AnalysisResult, AnalysisError> {
        let form = Self::build_form(request)?;

        tracing::debug!(
            endpoint = %self.endpoint,
            file_name = request.document.file_name(),
            "Sending analysis request"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|err| AnalysisError::unavailable(format!("Analysis request failed: {err}")))?;

        let status = response.status();
        let body = response.text().await.map_err(|err| {
            AnalysisError::unavailable(format!("Failed to read analysis response: {err}"))
        })?;

        if !status.is_success() {
            let message = error_message(&body);
            tracing::warn!("Analysis service responded with {}: {}", status, message);
            return Err(AnalysisError::unavailable(format!("HTTP {status}: {message}")));
        }

        parse_analysis_body(&body)
    }
}
