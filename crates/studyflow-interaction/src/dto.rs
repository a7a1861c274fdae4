//! Wire formats of `/api/analyze` and `/api/chat`.
//!
//! The analysis body is deserialized into [`AnalysisResponseDto`] first and then
//! converted into the validated domain model, so a missing field and a broken
//! invariant both end up as `MalformedResponse`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use studyflow_core::AnalysisError;
use studyflow_core::analysis::{AnalysisResult, DependencyGraph, TopicDetail, WeekPlan};

/// Response body of `POST /api/analyze`.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisResponseDto {
    pub mentor_summary: String,
    pub topics: Vec<String>,
    pub topic_details: HashMap<String, TopicDetail>,
    pub schedule: Vec<WeekPlan>,
    #[serde(default)]
    pub graph: Option<DependencyGraph>,
}

impl AnalysisResponseDto {
    pub fn into_domain(self) -> Result<AnalysisResult, AnalysisError> {
        AnalysisResult::new(
            self.mentor_summary,
            self.topics,
            self.topic_details,
            self.schedule,
            self.graph,
        )
    }
}

/// Parses and validates an analysis response body.
pub fn parse_analysis_body(body: &str) -> Result<AnalysisResult, AnalysisError> {
    let dto: AnalysisResponseDto = serde_json::from_str(body)
        .map_err(|e| AnalysisError::malformed(format!("invalid analysis body: {e}")))?;
    dto.into_domain()
}

/// Request body of `POST /api/chat`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequestDto<'a> {
    pub topic: &'a str,
    pub message: &'a str,
}

/// Response body of `POST /api/chat`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponseDto {
    #[serde(default)]
    pub response: Option<String>,
}

/// Extracts the reply text, `None` when the field is missing or not a string.
pub fn parse_chat_body(body: &str) -> Option<String> {
    serde_json::from_str::<ChatResponseDto>(body)
        .ok()
        .and_then(|dto| dto.response)
}
