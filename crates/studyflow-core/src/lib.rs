//! Domain layer of the StudyFlow client.
//!
//! Holds the data contract of the analysis service, the pure computations
//! derived from it, the upload stage, chat message types and the traits behind
//! which the two network collaborators sit.

pub mod analysis;
pub mod chat;
pub mod error;
pub mod upload;
pub mod view;

// Re-export common error type
pub use error::{AnalysisError, ChatError, Result, StudyflowError, ValidationError};
