#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use studyflow_application::ViewOrchestrator;
use studyflow_core::analysis::{
    AnalysisRequest, AnalysisResult, AnalysisService, Difficulty, Resource, TopicDetail, WeekPlan,
};
use studyflow_core::chat::{ChatService, ChatTurn};
use studyflow_core::upload::Document;
use studyflow_core::{AnalysisError, ChatError};

/// Plays back queued outcomes; falls back to the Algebra plan when the queue is empty.
pub struct FakeAnalysisService {
    outcomes: Mutex<VecDeque<Result<AnalysisResult, AnalysisError>>>,
    requests: Mutex<Vec<AnalysisRequest>>,
    calls: AtomicUsize,
    delay: Duration,
}

impl FakeAnalysisService {
    pub fn new() -> Self {
        Self::with_delay(Duration::ZERO)
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            outcomes: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            delay,
        }
    }

    pub fn push_outcome(&self, outcome: Result<AnalysisResult, AnalysisError>) {
        self.outcomes.lock().unwrap().push_back(outcome);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<AnalysisRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl AnalysisService for FakeAnalysisService {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let queued = self.outcomes.lock().unwrap().pop_front();
        queued.unwrap_or_else(|| Ok(algebra_result()))
    }
}

/// Answers "re: <message>" after a fixed delay.
pub struct FakeChatService {
    delay: Duration,
    turns: Mutex<Vec<ChatTurn>>,
}

impl FakeChatService {
    pub fn new() -> Self {
        Self::with_delay(Duration::ZERO)
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            turns: Mutex::new(Vec::new()),
        }
    }

    pub fn turns(&self) -> Vec<ChatTurn> {
        self.turns.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatService for FakeChatService {
    async fn reply(&self, turn: &ChatTurn) -> Result<String, ChatError> {
        self.turns.lock().unwrap().push(turn.clone());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(format!("re: {}", turn.message))
    }
}

/// The single-topic plan returned for the Algebra syllabus.
pub fn algebra_result() -> AnalysisResult {
    let mut details = HashMap::new();
    details.insert(
        "Algebra".to_string(),
        TopicDetail {
            difficulty: Difficulty::Easy,
            advice: "Practice daily".to_string(),
            resources: vec![Resource {
                name: "Khan".to_string(),
                url: "https://x".to_string(),
            }],
        },
    );
    AnalysisResult::new(
        "Focus on basics".to_string(),
        vec!["Algebra".to_string()],
        details,
        vec![WeekPlan {
            week: 1,
            topics: vec!["Algebra".to_string()],
        }],
        None,
    )
    .unwrap()
}

/// A three-topic plan spread over two weeks.
pub fn calculus_result() -> AnalysisResult {
    let entries = [
        ("Limits", Difficulty::Medium),
        ("Derivatives", Difficulty::Medium),
        ("Integrals", Difficulty::Hard),
    ];
    let details = entries
        .iter()
        .map(|(name, difficulty)| {
            (
                name.to_string(),
                TopicDetail {
                    difficulty: *difficulty,
                    advice: format!("Work through {name} problems"),
                    resources: Vec::new(),
                },
            )
        })
        .collect();
    AnalysisResult::new(
        "Balanced learning".to_string(),
        entries.iter().map(|(name, _)| name.to_string()).collect(),
        details,
        vec![
            WeekPlan {
                week: 1,
                topics: vec!["Limits".to_string(), "Derivatives".to_string()],
            },
            WeekPlan {
                week: 2,
                topics: vec!["Integrals".to_string()],
            },
        ],
        None,
    )
    .unwrap()
}

pub fn syllabus_txt() -> Document {
    Document::new("syllabus.txt", "text/plain", b"Unit 1: Algebra".to_vec())
}

pub fn orchestrator(
    analysis: Arc<FakeAnalysisService>,
    chat: Arc<FakeChatService>,
) -> ViewOrchestrator {
    ViewOrchestrator::new(analysis, chat)
}

/// Landing → Configuring with the text syllabus selected.
pub async fn configured(orchestrator: &ViewOrchestrator) {
    orchestrator.get_started().await.unwrap();
    assert!(orchestrator.select_document(syllabus_txt()).await);
}
