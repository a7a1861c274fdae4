//! Application layer for StudyFlow.
//!
//! This crate composes the domain types of `studyflow-core` into the client
//! shell: the analysis request controller, topic chat sessions and the view
//! orchestrator that drives them.

pub mod analysis_controller;
pub mod chat_session;
pub mod orchestrator;

pub use analysis_controller::{AnalysisController, ControllerStatus, PendingAnalysis, RequestToken};
pub use chat_session::{ChatSession, SendOutcome, SessionId, TurnState};
pub use orchestrator::{SubmitOutcome, ViewOrchestrator};
