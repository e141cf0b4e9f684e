//! Generation request lifecycle. One state machine per panel.
//!
//! `submit` validates and moves to Pending synchronously. The backend
//! result arrives later through `complete`, tagged with the ticket that
//! `submit` returned. A newer submission bumps the sequence counter, so
//! any completion carrying an older ticket is dropped on arrival.

use std::sync::Arc;

use tracing::debug;

use super::error::{GenerationError, GenerationOutcome};
use super::{Flavor, GenerationRequest, GenerationResult};

/// Where a panel is in its request/response cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// Nothing submitted yet.
    Idle,
    /// Inside `submit`, checking the prompt. Never a rest state.
    Validating,
    /// Backend call outstanding.
    Pending,
    Succeeded,
    Failed,
}

/// Identity of one accepted submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn seq(self) -> u64 {
        self.0
    }
}

/// An accepted submission: the ticket to complete it with, and the request to send.
#[derive(Debug, Clone)]
pub struct Submission<P> {
    pub ticket: Ticket,
    pub request: Arc<GenerationRequest<P>>,
}

/// Per-panel lifecycle state machine.
#[derive(Debug)]
pub struct Lifecycle<F: Flavor> {
    state: LifecycleState,
    current: Option<Arc<GenerationRequest<F::Params>>>,
    result: Option<GenerationResult<F>>,
    error: Option<GenerationError>,
    seq: u64,
}

impl<F: Flavor> Default for Lifecycle<F> {
    fn default() -> Self {
        Self {
            state: LifecycleState::Idle,
            current: None,
            result: None,
            error: None,
            seq: 0,
        }
    }
}

impl<F: Flavor> Lifecycle<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Submit a prompt.
    ///
    /// An empty (after trim) prompt moves a resting lifecycle to Failed with
    /// `EmptyPrompt` and keeps the previous result and current request. While
    /// a request is Pending the rejection is only reported to the caller; the
    /// in-flight request is left alone.
    pub fn submit(
        &mut self,
        prompt: &str,
        params: F::Params,
    ) -> Result<Submission<F::Params>, GenerationError> {
        let resting = self.state;
        self.state = LifecycleState::Validating;

        if prompt.trim().is_empty() {
            if resting == LifecycleState::Pending {
                self.state = LifecycleState::Pending;
            } else {
                self.state = LifecycleState::Failed;
                self.error = Some(GenerationError::EmptyPrompt);
            }
            debug!(flavor = F::NAME, "rejected empty prompt");
            return Err(GenerationError::EmptyPrompt);
        }

        self.seq += 1;
        let request = Arc::new(GenerationRequest::new(prompt, params));
        self.current = Some(Arc::clone(&request));
        self.result = None;
        self.error = None;
        self.state = LifecycleState::Pending;

        debug!(
            flavor = F::NAME,
            seq = self.seq,
            request_id = %request.id,
            superseded = resting == LifecycleState::Pending,
            "submission accepted"
        );

        Ok(Submission {
            ticket: Ticket(self.seq),
            request,
        })
    }

    /// Apply a backend outcome. Returns false when the ticket is stale or
    /// nothing is pending; the lifecycle is untouched in that case.
    pub fn complete(&mut self, ticket: Ticket, outcome: GenerationOutcome<F::Output>) -> bool {
        if ticket.0 != self.seq || self.state != LifecycleState::Pending {
            debug!(
                flavor = F::NAME,
                seq = ticket.0,
                latest = self.seq,
                "discarding stale completion"
            );
            return false;
        }
        let Some(request) = self.current.clone() else {
            return false;
        };

        match outcome {
            Ok(payload) => {
                self.result = Some(GenerationResult { payload, request });
                self.error = None;
                self.state = LifecycleState::Succeeded;
            }
            Err(err) => {
                let err = match err {
                    GenerationError::GenerationFailed(_) => err,
                    other => GenerationError::GenerationFailed(other.to_string()),
                };
                self.result = None;
                self.error = Some(err);
                self.state = LifecycleState::Failed;
            }
        }
        debug!(flavor = F::NAME, seq = ticket.0, state = ?self.state, "completion applied");
        true
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == LifecycleState::Pending
    }

    /// Error of the last failed submission. Only set while Failed.
    pub fn error(&self) -> Option<&GenerationError> {
        match self.state {
            LifecycleState::Failed => self.error.as_ref(),
            _ => None,
        }
    }

    /// Latest result. Survives an `EmptyPrompt` rejection; cleared by the
    /// next accepted submission.
    pub fn result(&self) -> Option<&GenerationResult<F>> {
        self.result.as_ref()
    }

    /// The most recently accepted request.
    pub fn current_request(&self) -> Option<&GenerationRequest<F::Params>> {
        self.current.as_deref()
    }
}
