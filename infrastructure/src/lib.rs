//! Infrastructure layer for regchat
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod http;
pub mod logging;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileApiConfig, FileChatConfig, FileConfig,
    FileLoggingConfig, FileOutputConfig, FileOutputFormat, FileReplConfig,
};
pub use http::{DEFAULT_API_BASE_URL, HttpChatGateway};
pub use logging::JsonlConversationLogger;
