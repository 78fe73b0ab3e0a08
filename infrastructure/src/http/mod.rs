//! HTTP adapter for the regulatory backend.

mod gateway;

pub use gateway::{DEFAULT_API_BASE_URL, HttpChatGateway};
