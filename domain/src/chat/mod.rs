//! Chat exchange with the regulatory backend.
//!
//! - [`query`] - what is sent (`ChatQuery`, `RetrievalOptions`)
//! - [`response`] - what comes back (`ChatResponse`, `Source`)
//! - [`backend`] - health and reindex reports

pub mod backend;
pub mod query;
pub mod response;
