//! Observable session state.
//!
//! The presentation layer subscribes to a [`StateSnapshot`] stream and never
//! drives transitions itself. Transitions are made by the initializer and the
//! interaction paths, each tagged with the initialization generation they
//! belong to so that late completions from a replaced session are dropped.

use super::Session;
use crate::controller::QueryResult;
use crate::provider::TransactionReceipt;
use crate::SessionError;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

#[derive(Debug, Clone)]
pub enum SessionState {
    Uninitialized,
    Initializing,
    Ready(Arc<Session>),
    Failed(SessionError),
}

impl SessionState {
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Uninitialized => "uninitialized",
            SessionState::Initializing => "initializing",
            SessionState::Ready(_) => "ready",
            SessionState::Failed(_) => "failed",
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, SessionState::Ready(_))
    }
}

/// Read query sub-flow
#[derive(Debug, Clone, PartialEq)]
pub enum QueryState {
    Idle,
    Pending,
    Ready(QueryResult),
    Failed(SessionError),
}

/// Write submission sub-flow
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitState {
    Idle,
    Pending,
    Confirmed(TransactionReceipt),
    Failed(SessionError),
}

#[derive(Debug, Clone)]
pub struct StateSnapshot {
    /// Number of the initialization the rest of the snapshot belongs to
    pub generation: u64,
    pub session: SessionState,
    pub query: QueryState,
    pub submission: SubmitState,
}

impl Default for StateSnapshot {
    fn default() -> Self {
        Self {
            generation: 0,
            session: SessionState::Uninitialized,
            query: QueryState::Idle,
            submission: SubmitState::Idle,
        }
    }
}

pub struct SessionStateMachine {
    sender: watch::Sender<StateSnapshot>,
}

impl SessionStateMachine {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(StateSnapshot::default());
        Self { sender }
    }

    /// Subscribe to state changes
    pub fn subscribe(&self) -> watch::Receiver<StateSnapshot> {
        self.sender.subscribe()
    }

    pub fn snapshot(&self) -> StateSnapshot {
        self.sender.borrow().clone()
    }

    pub fn session_state(&self) -> SessionState {
        self.sender.borrow().session.clone()
    }

    pub fn query_state(&self) -> QueryState {
        self.sender.borrow().query.clone()
    }

    pub fn submit_state(&self) -> SubmitState {
        self.sender.borrow().submission.clone()
    }

    /// The published session with its generation, if one is ready
    pub fn ready_session(&self) -> Option<(u64, Arc<Session>)> {
        let state = self.sender.borrow();
        match &state.session {
            SessionState::Ready(session) => Some((state.generation, session.clone())),
            _ => None,
        }
    }

    /// Start a new initialization. Always permitted; resets every sub-flow.
    pub(crate) fn begin_initialization(&self) -> u64 {
        let mut generation = 0;
        self.sender.send_modify(|state| {
            state.generation += 1;
            generation = state.generation;
            state.session = SessionState::Initializing;
            state.query = QueryState::Idle;
            state.submission = SubmitState::Idle;
        });
        debug!(generation, "Session state: initializing");
        generation
    }

    /// Publish the outcome of initialization `generation`.
    ///
    /// Returns `false` without touching the state when a newer initialization
    /// has started since.
    pub(crate) fn commit_initialization(
        &self,
        generation: u64,
        outcome: Result<Arc<Session>, SessionError>,
    ) -> bool {
        self.sender.send_if_modified(|state| {
            if state.generation != generation {
                return false;
            }
            state.session = match outcome {
                Ok(session) => SessionState::Ready(session),
                Err(error) => SessionState::Failed(error),
            };
            debug!(generation, state = state.session.name(), "Session state committed");
            true
        })
    }

    pub(crate) fn begin_query(&self, generation: u64) -> bool {
        self.sender.send_if_modified(|state| {
            if state.generation != generation || !state.session.is_ready() {
                return false;
            }
            state.query = QueryState::Pending;
            true
        })
    }

    pub(crate) fn complete_query(
        &self,
        generation: u64,
        outcome: Result<QueryResult, SessionError>,
    ) -> bool {
        self.sender.send_if_modified(|state| {
            if state.generation != generation {
                return false;
            }
            state.query = match outcome {
                Ok(result) => QueryState::Ready(result),
                Err(error) => QueryState::Failed(error),
            };
            true
        })
    }

    pub(crate) fn begin_submission(&self, generation: u64) -> bool {
        self.sender.send_if_modified(|state| {
            if state.generation != generation || !state.session.is_ready() {
                return false;
            }
            state.submission = SubmitState::Pending;
            true
        })
    }

    pub(crate) fn complete_submission(
        &self,
        generation: u64,
        outcome: Result<TransactionReceipt, SessionError>,
    ) -> bool {
        self.sender.send_if_modified(|state| {
            if state.generation != generation {
                return false;
            }
            state.submission = match outcome {
                Ok(receipt) => SubmitState::Confirmed(receipt),
                Err(error) => SubmitState::Failed(error),
            };
            true
        })
    }
}

impl Default for SessionStateMachine {
    fn default() -> Self {
        Self::new()
    }
}
