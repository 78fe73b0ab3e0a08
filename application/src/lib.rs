//! Application layer for regchat
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::BehaviorConfig;
pub use ports::{
    chat_gateway::{ChatGateway, GatewayError},
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    progress::{NoProgress, QueryProgressNotifier},
};
pub use use_cases::check_health::CheckHealthUseCase;
pub use use_cases::reindex::{ReindexInput, ReindexUseCase};
pub use use_cases::run_smoke_suite::{
    NoSmokeProgress, RunSmokeError, RunSmokeSuiteUseCase, SmokeCaseResult, SmokeProgressNotifier,
    SmokeReport,
};
pub use use_cases::submit_query::{SubmitOutcome, SubmitQueryUseCase};
