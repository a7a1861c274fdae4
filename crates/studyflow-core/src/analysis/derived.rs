//! Chart-ready aggregates and lookups derived from an [`AnalysisResult`].
//!
//! Everything here is recomputed from the result on each call. Nothing is cached,
//! so a replaced result can never be rendered through stale aggregates.

use super::model::{AnalysisResult, Difficulty, Resource, TopicDetail};
use std::collections::HashMap;

/// One histogram bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistogramBucket {
    pub difficulty: Difficulty,
    pub count: usize,
}

impl HistogramBucket {
    pub fn label(&self) -> &'static str {
        self.difficulty.label()
    }
}

/// Topic counts per difficulty, always in Easy/Medium/Hard order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DifficultyHistogram {
    buckets: [HistogramBucket; 3],
}

impl DifficultyHistogram {
    /// Counts every topic of the roadmap. Empty buckets are kept.
    pub fn compute(result: &AnalysisResult) -> Self {
        let lookup = TopicLookup::new(result);
        let mut buckets = Difficulty::ALL.map(|difficulty| HistogramBucket {
            difficulty,
            count: 0,
        });

        for topic in result.topics() {
            let index = match lookup.resolve(topic).difficulty {
                Difficulty::Easy => 0,
                Difficulty::Medium => 1,
                Difficulty::Hard => 2,
            };
            buckets[index].count += 1;
        }

        Self { buckets }
    }

    pub fn buckets(&self) -> &[HistogramBucket; 3] {
        &self.buckets
    }

    pub fn total(&self) -> usize {
        self.buckets.iter().map(|b| b.count).sum()
    }

    pub fn count(&self, difficulty: Difficulty) -> usize {
        self.buckets
            .iter()
            .find(|b| b.difficulty == difficulty)
            .map_or(0, |b| b.count)
    }
}

/// O(1) access to topic details by name.
#[derive(Debug, Clone, Copy)]
pub struct TopicLookup<'a> {
    details: &'a HashMap<String, TopicDetail>,
}

impl<'a> TopicLookup<'a> {
    pub fn new(result: &'a AnalysisResult) -> Self {
        Self {
            details: result.topic_details(),
        }
    }

    /// Returns the detail for `topic`, or `None` when it is not part of the result.
    pub fn get(&self, topic: &str) -> Option<&'a TopicDetail> {
        self.details.get(topic)
    }

    /// Returns the detail for `topic`.
    ///
    /// # Panics
    ///
    /// Panics if `topic` is not part of the result. Callers only pass names taken
    /// from the same result, so a miss is a bug and must not render as blank.
    pub fn resolve(&self, topic: &str) -> &'a TopicDetail {
        self.details
            .get(topic)
            .unwrap_or_else(|| panic!("topic '{topic}' is not part of the analysis result"))
    }
}

/// One row of the roadmap, in presentation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoadmapEntry {
    /// 1-based position on the roadmap.
    pub position: usize,
    pub topic: String,
    pub difficulty: Difficulty,
    pub badge: &'static str,
}

/// One week card of the schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekCard {
    pub week: u32,
    pub topics: Vec<String>,
}

/// Everything the result view renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub mentor_summary: String,
    pub roadmap: Vec<RoadmapEntry>,
    pub week_cards: Vec<WeekCard>,
    pub histogram: DifficultyHistogram,
}

impl ResultView {
    pub fn from_result(result: &AnalysisResult) -> Self {
        let lookup = TopicLookup::new(result);

        let roadmap = result
            .topics()
            .iter()
            .enumerate()
            .map(|(index, topic)| {
                let difficulty = lookup.resolve(topic).difficulty;
                RoadmapEntry {
                    position: index + 1,
                    topic: topic.clone(),
                    difficulty,
                    badge: difficulty.badge(),
                }
            })
            .collect();

        let week_cards = result
            .schedule()
            .iter()
            .map(|plan| WeekCard {
                week: plan.week,
                topics: plan.topics.clone(),
            })
            .collect();

        Self {
            mentor_summary: result.mentor_summary().to_string(),
            roadmap,
            week_cards,
            histogram: DifficultyHistogram::compute(result),
        }
    }
}

/// Content of the topic-detail overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicDetailView {
    pub topic: String,
    pub difficulty: Difficulty,
    pub badge: &'static str,
    pub advice: String,
    pub resources: Vec<Resource>,
    /// Weeks in which the topic is scheduled, ascending in schedule order.
    pub scheduled_weeks: Vec<u32>,
    /// Prerequisites reported by the dependency graph, empty if none was sent.
    pub prerequisites: Vec<String>,
}

impl TopicDetailView {
    /// Builds the overlay content for `topic`.
    ///
    /// # Panics
    ///
    /// Panics if `topic` is not part of `result` (see [`TopicLookup::resolve`]).
    pub fn build(result: &AnalysisResult, topic: &str) -> Self {
        let detail = TopicLookup::new(result).resolve(topic);

        let scheduled_weeks = result
            .schedule()
            .iter()
            .filter(|plan| plan.topics.iter().any(|t| t == topic))
            .map(|plan| plan.week)
            .collect();

        let prerequisites = result
            .graph()
            .map(|graph| {
                graph
                    .prerequisites_of(topic)
                    .into_iter()
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            topic: topic.to_string(),
            difficulty: detail.difficulty,
            badge: detail.difficulty.badge(),
            advice: detail.advice.clone(),
            resources: detail.resources.clone(),
            scheduled_weeks,
            prerequisites,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::model::{DependencyGraph, GraphLink, WeekPlan};

    fn result_with(entries: &[(&str, Difficulty)]) -> AnalysisResult {
        let topics = entries.iter().map(|(name, _)| name.to_string()).collect();
        let details = entries
            .iter()
            .map(|(name, difficulty)| {
                (
                    name.to_string(),
                    TopicDetail {
                        difficulty: *difficulty,
                        advice: format!("Study {name}"),
                        resources: vec![Resource {
                            name: "Khan".to_string(),
                            url: "https://x".to_string(),
                        }],
                    },
                )
            })
            .collect();
        let schedule = vec![
            WeekPlan {
                week: 1,
                topics: entries.iter().take(1).map(|(n, _)| n.to_string()).collect(),
            },
            WeekPlan {
                week: 2,
                topics: entries.iter().skip(1).map(|(n, _)| n.to_string()).collect(),
            },
        ];
        AnalysisResult::new(
            "Focus on basics".to_string(),
            topics,
            details,
            schedule,
            Some(DependencyGraph {
                nodes: Vec::new(),
                links: vec![GraphLink {
                    source: "Algebra".to_string(),
                    target: "Calculus".to_string(),
                }],
            }),
        )
        .unwrap()
    }

    #[test]
    fn test_histogram_keeps_zero_buckets_in_order() {
        let result = result_with(&[("Algebra", Difficulty::Easy), ("Calculus", Difficulty::Hard)]);
        let histogram = DifficultyHistogram::compute(&result);

        let labels: Vec<_> = histogram.buckets().iter().map(|b| b.label()).collect();
        assert_eq!(labels, vec!["Easy", "Medium", "Hard"]);
        assert_eq!(histogram.count(Difficulty::Easy), 1);
        assert_eq!(histogram.count(Difficulty::Medium), 0);
        assert_eq!(histogram.count(Difficulty::Hard), 1);
    }

    #[test]
    fn test_histogram_sums_to_topic_count() {
        let result = result_with(&[
            ("Algebra", Difficulty::Easy),
            ("Calculus", Difficulty::Hard),
            ("Limits", Difficulty::Medium),
            ("Series", Difficulty::Medium),
        ]);
        assert_eq!(
            DifficultyHistogram::compute(&result).total(),
            result.topics().len()
        );
    }

    #[test]
    fn test_lookup_get_misses_quietly() {
        let result = result_with(&[("Algebra", Difficulty::Easy)]);
        assert!(TopicLookup::new(&result).get("Geometry").is_none());
    }

    #[test]
    #[should_panic(expected = "not part of the analysis result")]
    fn test_lookup_resolve_fails_loudly() {
        let result = result_with(&[("Algebra", Difficulty::Easy)]);
        TopicLookup::new(&result).resolve("Geometry");
    }

    #[test]
    fn test_result_view_roadmap_and_weeks() {
        let result = result_with(&[("Algebra", Difficulty::Easy), ("Calculus", Difficulty::Medium)]);
        let view = ResultView::from_result(&result);

        assert_eq!(view.mentor_summary, "Focus on basics");
        assert_eq!(view.roadmap.len(), 2);
        assert_eq!(view.roadmap[0].position, 1);
        assert_eq!(view.roadmap[0].badge, "Focus");
        assert_eq!(view.roadmap[1].badge, "Moderate");
        assert_eq!(view.week_cards.len(), 2);
        assert_eq!(view.week_cards[1].topics, vec!["Calculus".to_string()]);
    }

    #[test]
    fn test_topic_detail_view() {
        let result = result_with(&[("Algebra", Difficulty::Easy), ("Calculus", Difficulty::Hard)]);
        let view = TopicDetailView::build(&result, "Calculus");

        assert_eq!(view.badge, "Elite");
        assert_eq!(view.advice, "Study Calculus");
        assert_eq!(view.resources.len(), 1);
        assert_eq!(view.scheduled_weeks, vec![2]);
        assert_eq!(view.prerequisites, vec!["Algebra".to_string()]);
    }
}
