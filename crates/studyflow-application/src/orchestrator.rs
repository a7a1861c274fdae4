//! Top-level view state machine of the client shell.
//!
//! `ViewOrchestrator` owns the whole observable state behind one lock and only
//! changes it through the transition methods below. The lock is never held
//! across a network call: `submit` releases it while the analysis runs and
//! re-checks the submission token before applying the response.

use std::sync::Arc;

use studyflow_core::analysis::{
    AnalysisRequest, AnalysisResult, AnalysisService, ResultView, TopicDetailView,
};
use studyflow_core::chat::ChatService;
use studyflow_core::upload::{Document, Level, StudyConstraints, UploadStage};
use studyflow_core::view::{ShellSnapshot, Theme, View};
use studyflow_core::{AnalysisError, Result, StudyflowError};
use tokio::sync::RwLock;

use crate::analysis_controller::{AnalysisController, ControllerStatus, RequestToken};
use crate::chat_session::{ChatSession, SendOutcome, SessionId};

/// What happened to one `submit` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Not submit-enabled (wrong view, no document, or an analysis in flight).
    Ignored,
    /// The result is now displayed.
    Succeeded,
    /// Back in Configuring with a failure notice.
    Failed(AnalysisError),
    /// The shell moved on while the request was in flight; the response was dropped.
    Discarded,
}

struct TopicOverlay {
    topic: String,
    session: Arc<ChatSession>,
}

/// The single state object. Only touched under the orchestrator's lock.
struct ShellState {
    view: View,
    theme: Theme,
    stage: UploadStage,
    result: Option<Arc<AnalysisResult>>,
    overlay: Option<TopicOverlay>,
    failure: Option<AnalysisError>,
    current_submission: Option<RequestToken>,
    next_session_id: u64,
}

impl ShellState {
    fn new() -> Self {
        Self {
            view: View::Landing,
            theme: Theme::default(),
            stage: UploadStage::new(),
            result: None,
            overlay: None,
            failure: None,
            current_submission: None,
            next_session_id: 1,
        }
    }

    fn close_overlay(&mut self) {
        if let Some(overlay) = self.overlay.take() {
            overlay.session.close();
        }
    }

    /// Drops the result, document, overlay and notice, and orphans any in-flight submission.
    fn discard_work(&mut self) {
        self.close_overlay();
        self.result = None;
        self.failure = None;
        self.current_submission = None;
        self.stage.clear_document();
    }
}

/// Coordinates the upload stage, the analysis controller and topic chat sessions.
pub struct ViewOrchestrator {
    state: Arc<RwLock<ShellState>>,
    analysis: Arc<AnalysisController>,
    chat_service: Arc<dyn ChatService>,
}

impl ViewOrchestrator {
    pub fn new(
        analysis_service: Arc<dyn AnalysisService>,
        chat_service: Arc<dyn ChatService>,
    ) -> Self {
        Self {
            state: Arc::new(RwLock::new(ShellState::new())),
            analysis: Arc::new(AnalysisController::new(analysis_service)),
            chat_service,
        }
    }

    // ============================================================================
    // Queries
    // ============================================================================

    pub async fn view(&self) -> View {
        self.state.read().await.view
    }

    pub async fn theme(&self) -> Theme {
        self.state.read().await.theme
    }

    pub async fn snapshot(&self) -> ShellSnapshot {
        let state = self.state.read().await;
        ShellSnapshot {
            view: state.view,
            theme: state.theme,
            constraints: state.stage.constraints(),
            document_name: state.stage.document().map(|d| d.file_name().to_string()),
            submit_enabled: state.view == View::Configuring
                && state.stage.submit_enabled(self.analysis.is_in_flight()),
            failure_notice: state.failure.as_ref().map(|e| e.notice().to_string()),
            selected_topic: state.overlay.as_ref().map(|o| o.topic.clone()),
            has_result: state.result.is_some(),
        }
    }

    /// Lifecycle of the most recent analysis request, including orphaned ones.
    pub fn analysis_status(&self) -> ControllerStatus {
        self.analysis.status()
    }

    /// The failure of the last analysis, cleared by the next submission or a reset.
    pub async fn last_failure(&self) -> Option<AnalysisError> {
        self.state.read().await.failure.clone()
    }

    pub async fn result(&self) -> Option<Arc<AnalysisResult>> {
        self.state.read().await.result.clone()
    }

    /// Roadmap, histogram and week cards, recomputed from the current result.
    pub async fn result_view(&self) -> Option<ResultView> {
        let state = self.state.read().await;
        state.result.as_deref().map(ResultView::from_result)
    }

    /// Content of the open topic overlay.
    pub async fn topic_detail(&self) -> Option<TopicDetailView> {
        let state = self.state.read().await;
        let result = state.result.as_deref()?;
        let overlay = state.overlay.as_ref()?;
        Some(TopicDetailView::build(result, &overlay.topic))
    }

    pub async fn chat_session(&self) -> Option<Arc<ChatSession>> {
        let state = self.state.read().await;
        state.overlay.as_ref().map(|o| o.session.clone())
    }

    // ============================================================================
    // Transitions
    // ============================================================================

    /// Landing → Configuring. A no-op when already configuring.
    pub async fn get_started(&self) -> Result<()> {
        let mut state = self.state.write().await;
        match state.view {
            View::Landing => {
                state.view = View::Configuring;
                tracing::info!("View: Landing -> Configuring");
                Ok(())
            }
            View::Configuring => Ok(()),
            other => Err(StudyflowError::invalid_transition("get_started", other)),
        }
    }

    /// Offers a document to the stage. Only accepted while configuring.
    pub async fn select_document(&self, document: Document) -> bool {
        let mut state = self.state.write().await;
        if state.view != View::Configuring {
            tracing::debug!(view = %state.view, "Ignoring document outside Configuring");
            return false;
        }
        state.stage.select_document(document)
    }

    pub async fn set_weeks(&self, weeks: u32) -> bool {
        self.configure(|stage| stage.set_weeks(weeks)).await
    }

    pub async fn set_hours_per_day(&self, hours: f64) -> bool {
        self.configure(|stage| stage.set_hours_per_day(hours)).await
    }

    pub async fn set_level(&self, level: Level) -> bool {
        self.configure(|stage| {
            stage.set_level(level);
            true
        })
        .await
    }

    pub async fn constraints(&self) -> StudyConstraints {
        self.state.read().await.stage.constraints()
    }

    /// Configuring → Analyzing → Result | Configuring.
    ///
    /// Has no effect unless submit-enabled. A response that arrives after a
    /// reset or back-to-home is discarded.
    pub async fn submit(&self) -> SubmitOutcome {
        let pending = {
            let mut state = self.state.write().await;
            if state.view != View::Configuring {
                tracing::debug!(view = %state.view, "Ignoring submit outside Configuring");
                return SubmitOutcome::Ignored;
            }
            if !state.stage.submit_enabled(self.analysis.is_in_flight()) {
                tracing::debug!("Ignoring submit: no document or analysis in flight");
                return SubmitOutcome::Ignored;
            }
            let Some(document) = state.stage.document().cloned() else {
                return SubmitOutcome::Ignored;
            };

            let request = AnalysisRequest::new(document, state.stage.constraints());
            let pending = match self.analysis.start(request) {
                Ok(pending) => pending,
                Err(err) => {
                    tracing::debug!("Ignoring submit: {}", err);
                    return SubmitOutcome::Ignored;
                }
            };

            state.close_overlay();
            state.result = None;
            state.failure = None;
            state.current_submission = Some(pending.token());
            state.view = View::Analyzing;
            tracing::info!(token = pending.token().value(), "View: Configuring -> Analyzing");
            pending
        };

        let token = pending.token();
        let outcome = pending.finish().await;

        let mut state = self.state.write().await;
        if state.current_submission != Some(token) {
            tracing::warn!(token = token.value(), "Discarding stale analysis response");
            return SubmitOutcome::Discarded;
        }
        state.current_submission = None;

        match outcome {
            Ok(result) => {
                state.result = Some(Arc::new(result));
                state.view = View::Result;
                tracing::info!("View: Analyzing -> Result");
                SubmitOutcome::Succeeded
            }
            Err(err) => {
                state.failure = Some(err.clone());
                state.view = View::Configuring;
                tracing::info!("View: Analyzing -> Configuring (failed)");
                SubmitOutcome::Failed(err)
            }
        }
    }

    /// Result → Configuring, discarding the result, document and overlay.
    pub async fn reset(&self) -> Result<()> {
        let mut state = self.state.write().await;
        if state.view != View::Result {
            return Err(StudyflowError::invalid_transition("reset", state.view));
        }
        state.discard_work();
        state.view = View::Configuring;
        tracing::info!("View: Result -> Configuring (reset)");
        Ok(())
    }

    /// Any view → Landing. Discards all in-progress work but keeps the constraints.
    pub async fn back_to_home(&self) {
        let mut state = self.state.write().await;
        let from = state.view;
        state.discard_work();
        state.view = View::Landing;
        tracing::info!("View: {} -> Landing", from);
    }

    /// Opens the detail overlay for `topic` with a fresh chat session.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` outside the Result view
    /// - `UnknownTopic` if `topic` is not in the current result
    pub async fn select_topic(&self, topic: &str) -> Result<Arc<ChatSession>> {
        let mut state = self.state.write().await;
        if state.view != View::Result {
            return Err(StudyflowError::invalid_transition("select_topic", state.view));
        }
        let known = state
            .result
            .as_ref()
            .is_some_and(|result| result.contains_topic(topic));
        if !known {
            return Err(StudyflowError::UnknownTopic(topic.to_string()));
        }

        state.close_overlay();
        let id = SessionId::new(state.next_session_id);
        state.next_session_id += 1;

        let session = Arc::new(ChatSession::new(id, topic, self.chat_service.clone()));
        state.overlay = Some(TopicOverlay {
            topic: topic.to_string(),
            session: session.clone(),
        });
        tracing::info!(session = id.value(), "Opened topic overlay for '{}'", topic);
        Ok(session)
    }

    /// Closes the overlay and discards its chat session.
    pub async fn close_topic(&self) {
        self.state.write().await.close_overlay();
    }

    /// Sends a question to the open topic's chat session.
    ///
    /// # Errors
    ///
    /// `InvalidTransition` if no topic overlay is open.
    pub async fn send_chat(&self, text: &str) -> Result<SendOutcome> {
        let session = {
            let state = self.state.read().await;
            match state.overlay.as_ref() {
                Some(overlay) => overlay.session.clone(),
                None => return Err(StudyflowError::invalid_transition("send_chat", state.view)),
            }
        };
        Ok(session.send(text).await)
    }

    pub async fn toggle_theme(&self) -> Theme {
        let mut state = self.state.write().await;
        state.theme = state.theme.toggled();
        state.theme
    }

    async fn configure(&self, apply: impl FnOnce(&mut UploadStage) -> bool) -> bool {
        let mut state = self.state.write().await;
        if state.view != View::Configuring {
            tracing::debug!(view = %state.view, "Ignoring constraint change outside Configuring");
            return false;
        }
        apply(&mut state.stage)
    }
}
