//! HTTP adapter for the [`ChatGateway`] port

use async_trait::async_trait;
use regchat_application::ports::chat_gateway::{ChatGateway, GatewayError};
use regchat_domain::{
    ChatQuery, ChatResponse, HealthReport, RegulatoryDomain, ReindexReport, ResponseShapeError,
};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// Base URL used when nothing is configured
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

const USER_AGENT: &str = concat!("regchat/", env!("CARGO_PKG_VERSION"));

/// Gateway talking JSON over HTTP to the regulatory backend.
///
/// No client-side timeout is set; callers that want one wrap the call (see
/// `BehaviorConfig`).
#[derive(Debug, Clone)]
pub struct HttpChatGateway {
    client: Client,
    base_url: String,
}

impl HttpChatGateway {
    /// Create a gateway for `base_url` (trailing slashes are ignored)
    pub fn new(base_url: impl Into<String>) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| GatewayError::Connection(e.to_string()))?;
        Ok(Self::with_client(client, base_url))
    }

    /// Create a gateway reusing an existing reqwest client
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Turn a non-2xx response into [`GatewayError::Http`].
    ///
    /// The body text is the message; an empty body falls back to the
    /// status reason phrase.
    async fn check_status(response: Response) -> Result<Response, GatewayError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = if body.trim().is_empty() {
            status.canonical_reason().unwrap_or("Unknown").to_string()
        } else {
            body
        };
        warn!("Backend answered {}: {}", status.as_u16(), message);
        Err(GatewayError::Http {
            status: status.as_u16(),
            message,
        })
    }

    async fn read_json(response: Response) -> Result<serde_json::Value, GatewayError> {
        response.json().await.map_err(|e| {
            if e.is_decode() {
                GatewayError::Decode(e.to_string())
            } else {
                map_transport_error(e)
            }
        })
    }

    async fn read_typed<T: DeserializeOwned>(response: Response) -> Result<T, GatewayError> {
        let value = Self::read_json(response).await?;
        serde_json::from_value(value).map_err(|e| GatewayError::Decode(e.to_string()))
    }
}

fn map_transport_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout
    } else {
        GatewayError::Connection(e.to_string())
    }
}

#[async_trait]
impl ChatGateway for HttpChatGateway {
    async fn ask(&self, query: &ChatQuery) -> Result<ChatResponse, GatewayError> {
        let url = self.endpoint("chat");
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(query)
            .send()
            .await
            .map_err(map_transport_error)?;
        let response = Self::check_status(response).await?;

        let value = match Self::read_json(response).await {
            Ok(value) => value,
            Err(GatewayError::Decode(detail)) => {
                warn!("Chat response is not JSON: {}", detail);
                return Err(GatewayError::InvalidResponse);
            }
            Err(e) => return Err(e),
        };

        ChatResponse::from_value(value).map_err(|e| {
            match &e {
                ResponseShapeError::MissingAnswer => warn!("Chat response has no answer"),
                ResponseShapeError::Malformed(detail) => {
                    warn!("Chat response is malformed: {}", detail)
                }
            }
            GatewayError::InvalidResponse
        })
    }

    async fn health(&self) -> Result<HealthReport, GatewayError> {
        let url = self.endpoint("health");
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(map_transport_error)?;
        let response = Self::check_status(response).await?;
        Self::read_typed(response).await
    }

    async fn reindex(
        &self,
        domain: RegulatoryDomain,
        force: bool,
    ) -> Result<ReindexReport, GatewayError> {
        let url = self.endpoint("reindex");
        debug!("POST {} (domain={}, force={})", url, domain, force);

        let response = self
            .client
            .post(&url)
            .query(&[("domain", domain.as_str()), ("force", if force { "true" } else { "false" })])
            .send()
            .await
            .map_err(map_transport_error)?;
        let response = Self::check_status(response).await?;
        Self::read_typed(response).await
    }
}
