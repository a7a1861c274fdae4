//! Analysis result domain model.
//!
//! An [`AnalysisResult`] is the complete plan returned by the analysis service for
//! one submission. It is validated once at construction and never mutated after.

use crate::error::AnalysisError;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Difficulty tier assigned to a topic by the analysis service.
///
/// Serialized as the integers `1`, `2`, `3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// All tiers in histogram order.
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Numeric score used on the wire.
    pub fn score(self) -> u8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }

    /// Label of the roadmap badge.
    pub fn badge(self) -> &'static str {
        match self {
            Difficulty::Easy => "Focus",
            Difficulty::Medium => "Moderate",
            Difficulty::Hard => "Elite",
        }
    }

    /// Label of the histogram bucket.
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl TryFrom<u8> for Difficulty {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Difficulty::Easy),
            2 => Ok(Difficulty::Medium),
            3 => Ok(Difficulty::Hard),
            other => Err(format!("difficulty must be 1, 2 or 3 (got {other})")),
        }
    }
}

impl From<Difficulty> for u8 {
    fn from(value: Difficulty) -> Self {
        value.score()
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A study resource recommended for a topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub name: String,
    pub url: String,
}

/// Per-topic detail: difficulty, mentor advice and resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicDetail {
    pub difficulty: Difficulty,
    pub advice: String,
    pub resources: Vec<Resource>,
}

/// Topics assigned to one study week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekPlan {
    pub week: u32,
    pub topics: Vec<String>,
}

/// A node of the prerequisite graph. `group` mirrors the topic's difficulty score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub group: u8,
}

/// A directed prerequisite edge: `source` should be studied before `target`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphLink {
    pub source: String,
    pub target: String,
}

/// Prerequisite graph between topics, as reported by the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyGraph {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
}

impl DependencyGraph {
    /// Topics that link into `topic`, in link order.
    pub fn prerequisites_of(&self, topic: &str) -> Vec<&str> {
        self.links
            .iter()
            .filter(|link| link.target == topic)
            .map(|link| link.source.as_str())
            .collect()
    }
}

/// The complete, validated plan for one submission.
///
/// Invariants enforced by [`AnalysisResult::new`]:
/// - `topics` has no duplicates
/// - every topic has an entry in `topic_details`
/// - every week number is positive and every scheduled topic is in `topics`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    mentor_summary: String,
    topics: Vec<String>,
    topic_details: HashMap<String, TopicDetail>,
    schedule: Vec<WeekPlan>,
    graph: Option<DependencyGraph>,
}

impl AnalysisResult {
    /// Builds a result, rejecting any invariant violation as a malformed response.
    pub fn new(
        mentor_summary: String,
        topics: Vec<String>,
        topic_details: HashMap<String, TopicDetail>,
        schedule: Vec<WeekPlan>,
        graph: Option<DependencyGraph>,
    ) -> Result<Self, AnalysisError> {
        let mut seen = HashSet::with_capacity(topics.len());
        for topic in &topics {
            if !seen.insert(topic.as_str()) {
                return Err(AnalysisError::malformed(format!(
                    "duplicate topic '{topic}'"
                )));
            }
            if !topic_details.contains_key(topic) {
                return Err(AnalysisError::malformed(format!(
                    "topic '{topic}' has no entry in topic_details"
                )));
            }
        }

        for plan in &schedule {
            if plan.week == 0 {
                return Err(AnalysisError::malformed("week numbers must be positive"));
            }
            if let Some(unknown) = plan.topics.iter().find(|t| !seen.contains(t.as_str())) {
                return Err(AnalysisError::malformed(format!(
                    "week {} schedules unknown topic '{unknown}'",
                    plan.week
                )));
            }
        }

        Ok(Self {
            mentor_summary,
            topics,
            topic_details,
            schedule,
            graph,
        })
    }

    pub fn mentor_summary(&self) -> &str {
        &self.mentor_summary
    }

    /// Topic names in roadmap order.
    pub fn topics(&self) -> &[String] {
        &self.topics
    }

    pub fn topic_details(&self) -> &HashMap<String, TopicDetail> {
        &self.topic_details
    }

    pub fn schedule(&self) -> &[WeekPlan] {
        &self.schedule
    }

    pub fn graph(&self) -> Option<&DependencyGraph> {
        self.graph.as_ref()
    }

    /// Returns true if `topic` is part of this result.
    pub fn contains_topic(&self, topic: &str) -> bool {
        self.topic_details.contains_key(topic) && self.topics.iter().any(|t| t == topic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(difficulty: Difficulty) -> TopicDetail {
        TopicDetail {
            difficulty,
            advice: "Practice daily".to_string(),
            resources: Vec::new(),
        }
    }

    fn details(names: &[&str]) -> HashMap<String, TopicDetail> {
        names
            .iter()
            .map(|n| (n.to_string(), detail(Difficulty::Easy)))
            .collect()
    }

    #[test]
    fn test_difficulty_from_wire_score() {
        let parsed: Difficulty = serde_json::from_str("2").unwrap();
        assert_eq!(parsed, Difficulty::Medium);
        assert!(serde_json::from_str::<Difficulty>("4").is_err());
        assert!(serde_json::from_str::<Difficulty>("0").is_err());
        assert_eq!(serde_json::to_string(&Difficulty::Hard).unwrap(), "3");
    }

    #[test]
    fn test_badges() {
        assert_eq!(Difficulty::Easy.badge(), "Focus");
        assert_eq!(Difficulty::Medium.badge(), "Moderate");
        assert_eq!(Difficulty::Hard.badge(), "Elite");
    }

    #[test]
    fn test_new_accepts_consistent_result() {
        let result = AnalysisResult::new(
            "Focus on basics".to_string(),
            vec!["Algebra".to_string(), "Calculus".to_string()],
            details(&["Algebra", "Calculus"]),
            vec![WeekPlan {
                week: 1,
                topics: vec!["Algebra".to_string()],
            }],
            None,
        )
        .expect("consistent result");

        assert!(result.contains_topic("Algebra"));
        assert!(!result.contains_topic("Geometry"));
    }

    #[test]
    fn test_new_rejects_topic_without_detail() {
        let err = AnalysisResult::new(
            String::new(),
            vec!["Algebra".to_string(), "Geometry".to_string()],
            details(&["Algebra"]),
            Vec::new(),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedResponse(_)));
    }

    #[test]
    fn test_new_rejects_duplicate_topics() {
        let err = AnalysisResult::new(
            String::new(),
            vec!["Algebra".to_string(), "Algebra".to_string()],
            details(&["Algebra"]),
            Vec::new(),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedResponse(_)));
    }

    #[test]
    fn test_new_rejects_schedule_outside_topics() {
        let err = AnalysisResult::new(
            String::new(),
            vec!["Algebra".to_string()],
            details(&["Algebra"]),
            vec![WeekPlan {
                week: 1,
                topics: vec!["Topology".to_string()],
            }],
            None,
        )
        .unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedResponse(_)));
    }

    #[test]
    fn test_new_rejects_week_zero() {
        let err = AnalysisResult::new(
            String::new(),
            vec!["Algebra".to_string()],
            details(&["Algebra"]),
            vec![WeekPlan {
                week: 0,
                topics: Vec::new(),
            }],
            None,
        )
        .unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedResponse(_)));
    }

    #[test]
    fn test_prerequisites_of() {
        let graph = DependencyGraph {
            nodes: Vec::new(),
            links: vec![
                GraphLink {
                    source: "Algebra".to_string(),
                    target: "Calculus".to_string(),
                },
                GraphLink {
                    source: "Limits".to_string(),
                    target: "Calculus".to_string(),
                },
                GraphLink {
                    source: "Calculus".to_string(),
                    target: "Physics".to_string(),
                },
            ],
        };
        assert_eq!(graph.prerequisites_of("Calculus"), vec!["Algebra", "Limits"]);
        assert!(graph.prerequisites_of("Algebra").is_empty());
    }
}
