//! Progress notification port
//!
//! Defines the interface for reporting the in-flight request to the user.

use regchat_domain::{ChatQuery, RequestGeneration};

/// Callback for progress updates while a query is in flight
///
/// Implementations live in the presentation layer (spinner, plain text).
pub trait QueryProgressNotifier: Send + Sync {
    /// Called right after the state switched to loading
    fn on_request_start(&self, generation: RequestGeneration, query: &ChatQuery);

    /// Called once the gateway call returned and its result was handled.
    /// `applied` is false when the result was stale and got dropped.
    fn on_request_end(&self, generation: RequestGeneration, success: bool, applied: bool);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl QueryProgressNotifier for NoProgress {
    fn on_request_start(&self, _generation: RequestGeneration, _query: &ChatQuery) {}
    fn on_request_end(&self, _generation: RequestGeneration, _success: bool, _applied: bool) {}
}
