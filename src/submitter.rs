//! Query submission lifecycle
//!
//! A submission is split in three steps so it can run on any async driver:
//! [`Submitter::begin`] validates and moves to `InFlight` synchronously,
//! [`Dispatch::send`] performs the single network call, and
//! [`Submitter::complete`] applies the outcome. Every dispatch carries a
//! ticket; only the latest ticket may change state.

use thiserror::Error;

use crate::backend::api::BackendClient;
use crate::backend::types::{RecommendRequest, RecommendationItem, Recommendations};
use crate::error::ClientError;
use crate::query::Query;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestState {
    #[default]
    Idle,
    InFlight,
    Succeeded {
        items: Vec<RecommendationItem>,
        message: Option<String>,
    },
    Failed(ClientError),
}

impl RequestState {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, RequestState::InFlight)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// A previous submission has not completed yet; state is untouched
    #[error("a submission is already in flight")]
    Busy,
    /// Nothing to send; state is now `Failed` with an input error
    #[error("query and url are both empty")]
    InvalidInput,
}

/// Identifies one dispatched request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// A request that has been admitted but not yet sent
pub struct Dispatch {
    ticket: Ticket,
    request: RecommendRequest,
    backend: BackendClient,
}

/// Outcome of one dispatch, handed back to [`Submitter::complete`]
#[derive(Debug, Clone)]
pub struct Completion {
    pub ticket: Ticket,
    pub outcome: Result<Recommendations, ClientError>,
}

impl Dispatch {
    pub async fn send(self) -> Completion {
        let outcome = self.backend.recommend(&self.request).await;
        Completion {
            ticket: self.ticket,
            outcome,
        }
    }
}

pub struct Submitter {
    backend: BackendClient,
    state: RequestState,
    /// Id of the most recently issued ticket
    latest: u64,
}

impl Submitter {
    pub fn new(backend: BackendClient) -> Self {
        Self {
            backend,
            state: RequestState::Idle,
            latest: 0,
        }
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn is_in_flight(&self) -> bool {
        self.state.is_in_flight()
    }

    /// Admit a new submission. Rejected with [`SubmitError::Busy`] while a
    /// previous one is in flight.
    pub fn begin(&mut self, query: &Query) -> Result<Dispatch, SubmitError> {
        if self.is_in_flight() {
            tracing::warn!("Submission rejected: previous request still in flight");
            return Err(SubmitError::Busy);
        }
        self.admit(query)
    }

    /// Admit a new submission even if one is in flight. The older request's
    /// completion will be discarded.
    pub fn supersede(&mut self, query: &Query) -> Result<Dispatch, SubmitError> {
        if self.is_in_flight() {
            tracing::debug!(abandoned = self.latest, "Superseding in-flight request");
        }
        self.admit(query)
    }

    fn admit(&mut self, query: &Query) -> Result<Dispatch, SubmitError> {
        self.latest += 1;

        let Some(request) = query.to_request() else {
            self.state = RequestState::Failed(ClientError::invalid_input());
            return Err(SubmitError::InvalidInput);
        };

        self.state = RequestState::InFlight;
        tracing::info!(ticket = self.latest, "Submitting recommendation request");
        Ok(Dispatch {
            ticket: Ticket(self.latest),
            request,
            backend: self.backend.clone(),
        })
    }

    /// Apply a completion. Returns `false` if it was stale and ignored.
    pub fn complete(&mut self, completion: Completion) -> bool {
        let Ticket(id) = completion.ticket;
        if id != self.latest || !self.is_in_flight() {
            tracing::debug!(ticket = id, latest = self.latest, "Discarding stale completion");
            return false;
        }

        self.state = match completion.outcome {
            Ok(Recommendations { items, message }) => {
                tracing::info!(ticket = id, count = items.len(), "Recommendations received");
                RequestState::Succeeded { items, message }
            }
            Err(err) => {
                tracing::warn!(ticket = id, kind = ?err.kind(), status = ?err.status(), "Recommendation request failed: {}", err);
                RequestState::Failed(err)
            }
        };
        true
    }

    /// Run one submission to completion
    pub async fn submit(&mut self, query: &Query) -> Result<&RequestState, SubmitError> {
        match self.begin(query) {
            Ok(dispatch) => {
                let completion = dispatch.send().await;
                self.complete(completion);
            }
            Err(SubmitError::InvalidInput) => {}
            Err(busy) => return Err(busy),
        }
        Ok(&self.state)
    }

    /// Clear a failure notice
    pub fn dismiss(&mut self) {
        if matches!(self.state, RequestState::Failed(_)) {
            self.state = RequestState::Idle;
        }
    }
}
