//! Check Health use case

use crate::ports::chat_gateway::{ChatGateway, GatewayError};
use regchat_domain::HealthReport;
use std::sync::Arc;
use tracing::{info, warn};

/// Use case for querying the backend's `/health` endpoint
pub struct CheckHealthUseCase<G: ChatGateway + 'static> {
    gateway: Arc<G>,
}

impl<G: ChatGateway + 'static> CheckHealthUseCase<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    pub async fn execute(&self) -> Result<HealthReport, GatewayError> {
        match self.gateway.health().await {
            Ok(report) => {
                info!(
                    "Backend status: {} (qdrant connected: {})",
                    report.status.as_str(),
                    report.qdrant_connected
                );
                Ok(report)
            }
            Err(e) => {
                warn!("Health check failed: {}", e);
                Err(e)
            }
        }
    }
}
