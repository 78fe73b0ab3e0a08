//! Query state machine
//!
//! `Idle → Loading → (Success | Error) → Loading → ...`
//!
//! Every submission takes a fresh [`RequestGeneration`]. A result is applied
//! only if it carries the latest generation; anything older is stale and is
//! dropped without touching the visible state.

use crate::chat::query::ChatQuery;
use crate::chat::response::ChatResponse;
use serde::Serialize;

/// Monotonic token identifying one submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RequestGeneration(u64);

impl RequestGeneration {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for RequestGeneration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What the page currently shows
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum QueryPhase {
    #[default]
    Idle,
    Loading {
        generation: RequestGeneration,
        query: ChatQuery,
    },
    Success {
        generation: RequestGeneration,
        response: ChatResponse,
    },
    Error {
        generation: RequestGeneration,
        message: String,
    },
}

impl QueryPhase {
    pub fn is_loading(&self) -> bool {
        matches!(self, QueryPhase::Loading { .. })
    }

    pub fn response(&self) -> Option<&ChatResponse> {
        match self {
            QueryPhase::Success { response, .. } => Some(response),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            QueryPhase::Error { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn generation(&self) -> Option<RequestGeneration> {
        match self {
            QueryPhase::Idle => None,
            QueryPhase::Loading { generation, .. }
            | QueryPhase::Success { generation, .. }
            | QueryPhase::Error { generation, .. } => Some(*generation),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            QueryPhase::Idle => "idle",
            QueryPhase::Loading { .. } => "loading",
            QueryPhase::Success { .. } => "success",
            QueryPhase::Error { .. } => "error",
        }
    }
}

/// State container owned by the query controller
#[derive(Debug, Default)]
pub struct QueryState {
    phase: QueryPhase,
    latest: u64,
}

impl QueryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &QueryPhase {
        &self.phase
    }

    /// Generation of the most recent submission, if any
    pub fn latest_generation(&self) -> Option<RequestGeneration> {
        (self.latest > 0).then_some(RequestGeneration(self.latest))
    }

    /// Start a submission: clears any shown response or error
    pub fn begin(&mut self, query: ChatQuery) -> RequestGeneration {
        self.latest += 1;
        let generation = RequestGeneration(self.latest);
        self.phase = QueryPhase::Loading { generation, query };
        generation
    }

    /// Apply a result. Returns `false` (and changes nothing) when stale.
    pub fn resolve(
        &mut self,
        generation: RequestGeneration,
        outcome: Result<ChatResponse, String>,
    ) -> bool {
        if generation.0 != self.latest {
            return false;
        }
        self.phase = match outcome {
            Ok(response) => QueryPhase::Success {
                generation,
                response,
            },
            Err(message) => QueryPhase::Error {
                generation,
                message,
            },
        };
        true
    }
}
