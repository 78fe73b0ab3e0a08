//! Configuration value objects for the domain layer
//!
//! Domain concepts related to configuration that are used across layers.

mod output_format;

pub use output_format::OutputFormat;
