//! Boundary to the external analysis collaborator.

use super::model::AnalysisResult;
use crate::error::AnalysisError;
use crate::upload::{Document, StudyConstraints};
use async_trait::async_trait;

/// One analysis submission: the document plus the constraints it was planned for.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    pub document: Document,
    pub constraints: StudyConstraints,
}

impl AnalysisRequest {
    pub fn new(document: Document, constraints: StudyConstraints) -> Self {
        Self {
            document,
            constraints,
        }
    }
}

/// Turns a syllabus document into a study plan.
///
/// Implementations issue exactly one request per call and never retry.
/// Transport failures and non-success statuses map to
/// [`AnalysisError::ServiceUnavailable`]; unreadable or inconsistent bodies map to
/// [`AnalysisError::MalformedResponse`].
#[async_trait]
pub trait AnalysisService: Send + Sync {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError>;
}
