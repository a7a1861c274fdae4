//! HTTP collaborators of the StudyFlow client.
//!
//! [`AnalysisApiClient`] and [`ChatApiClient`] implement the service traits of
//! `studyflow-core` against the REST API; [`ClientConfig`] tells them where it lives.

pub mod analysis_api_client;
pub mod chat_api_client;
pub mod config;
pub mod dto;
pub mod http;

pub use analysis_api_client::AnalysisApiClient;
pub use chat_api_client::ChatApiClient;
pub use config::ClientConfig;
pub use http::build_http_client;
