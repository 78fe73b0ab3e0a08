//! Domain layer for regchat
//!
//! This crate contains the value objects and state machine of the
//! regulatory chat client. It has no dependencies on infrastructure or
//! presentation concerns.
//!
//! # Core Concepts
//!
//! - **Query**: a non-blank [`Question`] scoped to a [`RegulatoryDomain`]
//!   (Pix or Open Finance), optionally with [`RetrievalOptions`]
//! - **Response**: the backend's [`ChatResponse`] with citations and
//!   [`Source`] documents
//! - **Page state**: [`QueryState`] moves `idle → loading → success | error`
//!   and only accepts the result of the latest [`RequestGeneration`]

pub mod chat;
pub mod config;
pub mod core;
pub mod page;
pub mod smoke;

// Re-export commonly used types
pub use chat::{
    backend::{HealthReport, HealthStatus, ReindexReport},
    query::{ChatQuery, RetrievalOptions},
    response::{ChatResponse, ResponseShapeError, Source},
};
pub use config::OutputFormat;
pub use core::{
    error::DomainError, question::Question, regulatory_domain::RegulatoryDomain,
    string::preview,
};
pub use page::state::{QueryPhase, QueryState, RequestGeneration};
pub use smoke::{SmokeCase, SmokeVerdict, default_suite, referenced_articles};
