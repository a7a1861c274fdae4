//! Owner of the single in-flight analysis request.
//!
//! A controller runs at most one request at a time. A call made while another
//! is pending is rejected before it reaches the network. The in-flight flag is
//! held by an RAII guard, so it is released exactly once whether the request
//! succeeds, fails, or the caller drops the future.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use studyflow_core::AnalysisError;
use studyflow_core::analysis::{AnalysisRequest, AnalysisResult, AnalysisService};
use studyflow_core::upload::{Document, StudyConstraints};

/// Monotonically increasing tag of one analysis request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Lifecycle of the controller's most recent request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerStatus {
    Idle,
    Pending(RequestToken),
    Succeeded(RequestToken),
    Failed(RequestToken),
}

impl std::fmt::Display for ControllerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::Pending(token) => write!(f, "pending (#{})", token.value()),
            Self::Succeeded(token) => write!(f, "succeeded (#{})", token.value()),
            Self::Failed(token) => write!(f, "failed (#{})", token.value()),
        }
    }
}

pub struct AnalysisController {
    service: Arc<dyn AnalysisService>,
    in_flight: AtomicBool,
    next_token: AtomicU64,
    status: Mutex<ControllerStatus>,
}

impl AnalysisController {
    pub fn new(service: Arc<dyn AnalysisService>) -> Self {
        Self {
            service,
            in_flight: AtomicBool::new(false),
            next_token: AtomicU64::new(1),
            status: Mutex::new(ControllerStatus::Idle),
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn status(&self) -> ControllerStatus {
        *self.status.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs one analysis from start to finish.
    ///
    /// # Errors
    ///
    /// - [`AnalysisError::AlreadyInFlight`] if another request is pending
    /// - [`AnalysisError::ServiceUnavailable`] / [`AnalysisError::MalformedResponse`] from the service
    pub async fn analyze(
        &self,
        document: Document,
        constraints: StudyConstraints,
    ) -> Result<AnalysisResult, AnalysisError> {
        self.start(AnalysisRequest::new(document, constraints))?
            .finish()
            .await
    }

    /// Claims the in-flight slot and tags the request without sending it yet.
    ///
    /// Callers that must record the token before suspending (the orchestrator does,
    /// to recognise stale responses) use this instead of [`Self::analyze`].
    pub fn start(&self, request: AnalysisRequest) -> Result<PendingAnalysis<'_>, AnalysisError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("Rejecting analysis request: another one is in flight");
            return Err(AnalysisError::AlreadyInFlight);
        }

        let token = RequestToken(self.next_token.fetch_add(1, Ordering::Relaxed));
        self.set_status(ControllerStatus::Pending(token));
        tracing::info!(
            token = token.value(),
            file_name = request.document.file_name(),
            weeks = request.constraints.weeks(),
            "Analysis request pending"
        );

        Ok(PendingAnalysis {
            guard: InFlightGuard {
                controller: self,
                token,
                resolved: false,
            },
            request,
        })
    }

    fn set_status(&self, status: ControllerStatus) {
        *self.status.lock().unwrap_or_else(PoisonError::into_inner) = status;
    }
}

/// A claimed but not yet resolved analysis request.
pub struct PendingAnalysis<'a> {
    guard: InFlightGuard<'a>,
    request: AnalysisRequest,
}

impl PendingAnalysis<'_> {
    pub fn token(&self) -> RequestToken {
        self.guard.token
    }

    /// Issues the request and records the outcome. The slot is released on return.
    pub async fn finish(mut self) -> Result<AnalysisResult, AnalysisError> {
        let controller = self.guard.controller;
        let token = self.guard.token;

        let outcome = controller.service.analyze(&self.request).await;
        self.guard.resolved = true;
        match &outcome {
            Ok(result) => {
                tracing::info!(
                    token = token.value(),
                    topics = result.topics().len(),
                    "Analysis succeeded"
                );
                controller.set_status(ControllerStatus::Succeeded(token));
            }
            Err(err) => {
                tracing::warn!(token = token.value(), "Analysis failed: {}", err);
                controller.set_status(ControllerStatus::Failed(token));
            }
        }
        outcome
    }
}

struct InFlightGuard<'a> {
    controller: &'a AnalysisController,
    token: RequestToken,
    resolved: bool,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        // Unresolved means the caller dropped the request before or during send
        if !self.resolved {
            tracing::debug!(token = self.token.value(), "Analysis request abandoned");
            self.controller.set_status(ControllerStatus::Idle);
        }
        self.controller.in_flight.store(false, Ordering::Release);
    }
}
