//! Reindex use case
//!
//! Asks the backend to rebuild the document index of one domain.

use crate::ports::chat_gateway::{ChatGateway, GatewayError};
use regchat_domain::{RegulatoryDomain, ReindexReport};
use std::sync::Arc;
use tracing::info;

/// Input for the Reindex use case
#[derive(Debug, Clone, Copy)]
pub struct ReindexInput {
    pub domain: RegulatoryDomain,
    /// Drop the existing collection before ingesting
    pub force: bool,
}

impl ReindexInput {
    pub fn new(domain: RegulatoryDomain) -> Self {
        Self {
            domain,
            force: true,
        }
    }

    pub fn without_force(mut self) -> Self {
        self.force = false;
        self
    }
}

/// Use case for triggering a reindex
pub struct ReindexUseCase<G: ChatGateway + 'static> {
    gateway: Arc<G>,
}

impl<G: ChatGateway + 'static> ReindexUseCase<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    pub async fn execute(&self, input: ReindexInput) -> Result<ReindexReport, GatewayError> {
        info!(
            "Requesting reindex of {} (force: {})",
            input.domain, input.force
        );
        let report = self.gateway.reindex(input.domain, input.force).await?;
        info!(
            "Reindex of {} finished: {} documents, {} chunks",
            input.domain, report.documents_processed, report.chunks_created
        );
        Ok(report)
    }
}
