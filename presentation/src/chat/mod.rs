//! Interactive chat module
//!
//! Provides a readline-based interactive chat interface for the backend.

mod repl;

pub use repl::ChatRepl;
