//! Request orchestration. Owns the dashboard's single analysis state.
//!
//! `Idle → Loading → {Success | Failed}`, and back to `Loading` on every regenerate.
//! Only the most recent run may complete; a run superseded by a newer `begin`
//! finishes quietly and its outcome is dropped.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::analysis::service::{run_analysis, AnalysisError};
use crate::llm_client::TextGenerator;
use crate::models::analysis::AnalysisResult;
use crate::models::request::{AnalysisRequest, Selection};

/// The only failure text shown to users. Details go to the logs.
pub const FAILURE_MESSAGE: &str =
    "Failed to fetch analysis. Please try again or check your API key/connection.";

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalysisState {
    Idle,
    Loading {
        run_id: Uuid,
        request: AnalysisRequest,
        started_at: DateTime<Utc>,
    },
    Success {
        run_id: Uuid,
        request: AnalysisRequest,
        result: AnalysisResult,
        completed_at: DateTime<Utc>,
    },
    Failed {
        run_id: Uuid,
        request: AnalysisRequest,
        message: String,
        completed_at: DateTime<Utc>,
    },
}

impl AnalysisState {
    pub fn run_id(&self) -> Option<Uuid> {
        match self {
            AnalysisState::Idle => None,
            AnalysisState::Loading { run_id, .. }
            | AnalysisState::Success { run_id, .. }
            | AnalysisState::Failed { run_id, .. } => Some(*run_id),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, AnalysisState::Loading { .. })
    }
}

/// Handle for one started run. Consumed by `complete`.
#[derive(Debug, Clone)]
pub struct RunTicket {
    pub run_id: Uuid,
    pub request: AnalysisRequest,
}

struct Inner {
    state: AnalysisState,
    selection: Selection,
}

#[derive(Clone)]
pub struct AnalysisController {
    generator: Arc<dyn TextGenerator>,
    inner: Arc<RwLock<Inner>>,
}

impl AnalysisController {
    pub fn new(generator: Arc<dyn TextGenerator>, selection: Selection) -> Self {
        Self {
            generator,
            inner: Arc::new(RwLock::new(Inner {
                state: AnalysisState::Idle,
                selection,
            })),
        }
    }

    pub async fn snapshot(&self) -> AnalysisState {
        self.inner.read().await.state.clone()
    }

    /// The selection of the current or last run, or the startup default.
    pub async fn selection(&self) -> Selection {
        self.inner.read().await.selection
    }

    /// Moves to `Loading` for `request`, superseding any run still in flight.
    pub async fn begin(&self, request: AnalysisRequest) -> RunTicket {
        let ticket = RunTicket {
            run_id: Uuid::new_v4(),
            request,
        };

        let mut inner = self.inner.write().await;
        if let AnalysisState::Loading { run_id, .. } = &inner.state {
            debug!("Run {run_id} superseded by {}", ticket.run_id);
        }
        inner.selection = ticket.request.selection();
        inner.state = AnalysisState::Loading {
            run_id: ticket.run_id,
            request: ticket.request.clone(),
            started_at: Utc::now(),
        };
        info!("Analysis run {} started", ticket.run_id);

        ticket
    }

    /// Records the outcome of `ticket`. Returns false when the run was superseded.
    pub async fn complete(
        &self,
        ticket: RunTicket,
        outcome: Result<AnalysisResult, AnalysisError>,
    ) -> bool {
        let mut inner = self.inner.write().await;

        if !inner.state.is_loading() || inner.state.run_id() != Some(ticket.run_id) {
            debug!("Dropping outcome of superseded run {}", ticket.run_id);
            return false;
        }

        inner.state = match outcome {
            Ok(result) => {
                info!("Analysis run {} succeeded", ticket.run_id);
                AnalysisState::Success {
                    run_id: ticket.run_id,
                    request: ticket.request,
                    result,
                    completed_at: Utc::now(),
                }
            }
            Err(e) => {
                error!("Analysis run {} failed: {e}", ticket.run_id);
                if let AnalysisError::Parse(parse) = &e {
                    debug!("Unparseable AI response: {:?}", parse.attempts());
                    debug!("Raw AI response: {}", parse.raw());
                }
                AnalysisState::Failed {
                    run_id: ticket.run_id,
                    request: ticket.request,
                    message: FAILURE_MESSAGE.to_string(),
                    completed_at: Utc::now(),
                }
            }
        };

        true
    }

    /// Executes the pipeline for `ticket` and records the outcome.
    pub async fn run(&self, ticket: RunTicket) -> AnalysisState {
        let outcome = run_analysis(self.generator.as_ref(), &ticket.request).await;
        self.complete(ticket, outcome).await;
        self.snapshot().await
    }

    /// Runs `ticket` on the runtime without waiting for it.
    pub fn spawn(&self, ticket: RunTicket) -> JoinHandle<AnalysisState> {
        let controller = self.clone();
        tokio::spawn(async move { controller.run(ticket).await })
    }

    /// The user-facing regenerate action: enters `Loading`, starts the run in the
    /// background and returns the `Loading` snapshot.
    pub async fn regenerate(&self, request: AnalysisRequest) -> AnalysisState {
        let ticket = self.begin(request).await;
        let loading = self.snapshot().await;
        self.spawn(ticket);
        loading
    }
}
