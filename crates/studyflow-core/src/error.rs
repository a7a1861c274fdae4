//! Error types for the StudyFlow client.
//!
//! The taxonomy is layered the same way failures propagate through the shell:
//!
//! - [`ValidationError`] never leaves the upload stage.
//! - [`AnalysisError`] is surfaced as a failure notice and leaves the shell re-submittable.
//! - [`ChatError`] is absorbed into the conversation as a scripted reply.
//! - [`StudyflowError`] covers everything else (configuration, IO, misuse of transitions).

use thiserror::Error;

/// Rejection reasons raised while collecting a submission.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The candidate document is neither a PDF nor plain text.
    #[error("Unsupported file type: '{file_name}' ({mime_type})")]
    UnsupportedFileType { file_name: String, mime_type: String },

    /// A study constraint was zero, negative or not a finite number.
    #[error("Invalid constraint: {field} = {value}")]
    InvalidConstraint { field: &'static str, value: String },
}

/// Failures of the single in-flight analysis request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// Transport failure or non-success response status.
    #[error("Analysis service unavailable: {0}")]
    ServiceUnavailable(String),

    /// The response body is missing required fields or violates result invariants.
    #[error("Malformed analysis response: {0}")]
    MalformedResponse(String),

    /// Another analysis is still in flight on the same controller.
    #[error("An analysis request is already in flight")]
    AlreadyInFlight,
}

impl AnalysisError {
    /// Creates a ServiceUnavailable error
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Creates a MalformedResponse error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }

    /// Short user-facing notice for the failure banner.
    pub fn notice(&self) -> &'static str {
        match self {
            Self::ServiceUnavailable(_) => {
                "Analysis failed. Make sure the backend is running."
            }
            Self::MalformedResponse(_) => {
                "Analysis failed. The service returned an unreadable plan."
            }
            Self::AlreadyInFlight => "An analysis is already running.",
        }
    }
}

/// Failures of a chat turn. Malformed replies are treated as unavailability.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChatError {
    #[error("Chat service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl ChatError {
    /// Creates a ServiceUnavailable error
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }
}

/// Shared error type for the StudyFlow workspace.
#[derive(Error, Debug, Clone)]
pub enum StudyflowError {
    /// Validation failure (only escapes the stage when loading documents directly)
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Analysis request failure
    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    /// Chat turn failure
    #[error(transparent)]
    Chat(#[from] ChatError),

    /// A topic name that is not part of the current result
    #[error("Unknown topic: '{0}'")]
    UnknownTopic(String),

    /// A transition was requested from a view that does not allow it
    #[error("Transition '{transition}' is not allowed from the {view} view")]
    InvalidTransition {
        transition: &'static str,
        view: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl StudyflowError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an InvalidTransition error
    pub fn invalid_transition(transition: &'static str, view: impl ToString) -> Self {
        Self::InvalidTransition {
            transition,
            view: view.to_string(),
        }
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is an UnknownTopic error
    pub fn is_unknown_topic(&self) -> bool {
        matches!(self, Self::UnknownTopic(_))
    }

    /// Check if this is an InvalidTransition error
    pub fn is_invalid_transition(&self) -> bool {
        matches!(self, Self::InvalidTransition { .. })
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for StudyflowError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

/// A type alias for `Result<T, StudyflowError>`.
pub type Result<T> = std::result::Result<T, StudyflowError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion_keeps_kind() {
        let err: StudyflowError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "syllabus.pdf").into();
        match err {
            StudyflowError::Io { message } => assert!(message.contains("NotFound")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_analysis_error_is_transparent() {
        let err: StudyflowError = AnalysisError::unavailable("HTTP 500").into();
        assert_eq!(err.to_string(), "Analysis service unavailable: HTTP 500");
    }

    #[test]
    fn test_notice_is_stable_per_kind() {
        assert_eq!(
            AnalysisError::unavailable("a").notice(),
            AnalysisError::unavailable("b").notice()
        );
        assert_ne!(
            AnalysisError::unavailable("a").notice(),
            AnalysisError::malformed("a").notice()
        );
    }
}
