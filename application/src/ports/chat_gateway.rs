//! Chat gateway port
//!
//! Defines the interface for talking to the regulatory RAG backend.

use async_trait::async_trait;
use regchat_domain::{ChatQuery, ChatResponse, HealthReport, ReindexReport, RegulatoryDomain};
use thiserror::Error;

/// Errors that can occur during gateway operations.
///
/// The display strings are what the user sees in the error banner.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    /// Non-2xx status; `message` is the response body, or the status reason
    /// when the body is empty
    #[error("Erro {status}: {message}")]
    Http { status: u16, message: String },

    /// The request never produced a response
    #[error("Erro de conexão: {0}")]
    Connection(String),

    /// 2xx response without a usable `answer`
    #[error("Resposta inválida do servidor")]
    InvalidResponse,

    /// 2xx response that is not the expected JSON document
    #[error("Resposta inesperada do servidor: {0}")]
    Decode(String),

    #[error("Tempo limite excedido aguardando o servidor")]
    Timeout,
}

impl GatewayError {
    /// HTTP status, when the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Short machine-readable category for logs
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::Http { .. } => "http",
            GatewayError::Connection(_) => "connection",
            GatewayError::InvalidResponse => "invalid_response",
            GatewayError::Decode(_) => "decode",
            GatewayError::Timeout => "timeout",
        }
    }
}

/// Gateway to the regulatory backend
///
/// This port defines how the application layer reaches the backend.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// `POST /chat`: exactly one request per call, no retry
    async fn ask(&self, query: &ChatQuery) -> Result<ChatResponse, GatewayError>;

    /// `GET /health`
    async fn health(&self) -> Result<HealthReport, GatewayError>;

    /// `POST /reindex`
    async fn reindex(
        &self,
        domain: RegulatoryDomain,
        force: bool,
    ) -> Result<ReindexReport, GatewayError>;
}
