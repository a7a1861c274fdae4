//! Upload/configure domain module.
//!
//! # Module Structure
//!
//! - `document`: Candidate documents and the pdf/plain-text allow-list
//! - `constraints`: Weeks, daily hours and level (`StudyConstraints`)
//! - `stage`: The stage that gates submission (`UploadStage`)

mod constraints;
mod document;
mod stage;

// Re-export public API
pub use constraints::{Level, StudyConstraints};
pub use document::{Document, DocumentKind};
pub use stage::UploadStage;
