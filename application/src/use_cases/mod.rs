//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod check_health;
pub mod reindex;
pub mod run_smoke_suite;
pub mod submit_query;
