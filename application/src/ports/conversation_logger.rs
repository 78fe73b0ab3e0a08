//! Port for the structured audit log.
//!
//! Defines the [`ConversationLogger`] trait for recording each exchange with
//! the backend (question, domain, outcome, cited norms) as machine-readable
//! records. `tracing` covers human-oriented diagnostics; this port keeps a
//! transcript that can be audited later.

use serde_json::Value;

/// A structured audit event.
pub struct ConversationEvent {
    /// Event type identifier (e.g., "query_answered", "query_failed").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging audit events.
///
/// `log` is synchronous and infallible; a failing sink must never break a
/// submission.
pub trait ConversationLogger: Send + Sync {
    fn log(&self, event: ConversationEvent);
}

/// No-op implementation for tests and when audit logging is disabled.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}
