//! Analysis domain module.
//!
//! # Module Structure
//!
//! - `model`: The validated plan returned by the service (`AnalysisResult`)
//! - `derived`: Histogram, lookups and view models computed from a result
//! - `service`: Trait for the analysis collaborator (`AnalysisService`)

mod derived;
mod model;
mod service;

// Re-export public API
pub use derived::{
    DifficultyHistogram, HistogramBucket, ResultView, RoadmapEntry, TopicDetailView, TopicLookup,
    WeekCard,
};
pub use model::{
    AnalysisResult, DependencyGraph, Difficulty, GraphLink, GraphNode, Resource, TopicDetail,
    WeekPlan,
};
pub use service::{AnalysisRequest, AnalysisService};
