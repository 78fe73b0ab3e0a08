//! Submit Query use case
//!
//! The page controller: validates the question, drives the query state
//! machine and performs exactly one gateway call per submission.

use crate::config::BehaviorConfig;
use crate::ports::chat_gateway::{ChatGateway, GatewayError};
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::progress::{NoProgress, QueryProgressNotifier};
use regchat_domain::{
    ChatQuery, ChatResponse, DomainError, QueryPhase, QueryState, Question, RegulatoryDomain,
    RequestGeneration, RetrievalOptions, preview,
};
use serde_json::json;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Result of one call to [`SubmitQueryUseCase::submit`]
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Blank question: nothing was sent and the state is untouched
    Skipped,
    /// The result was applied; carries the new visible state
    Applied(QueryPhase),
    /// A newer submission superseded this one; its result was dropped
    Stale(RequestGeneration),
}

impl SubmitOutcome {
    pub fn phase(&self) -> Option<&QueryPhase> {
        match self {
            SubmitOutcome::Applied(phase) => Some(phase),
            _ => None,
        }
    }
}

/// Use case owning the query state of one page/session
pub struct SubmitQueryUseCase<G: ChatGateway + 'static> {
    gateway: Arc<G>,
    state: Mutex<QueryState>,
    behavior: BehaviorConfig,
    options: RetrievalOptions,
    logger: Arc<dyn ConversationLogger>,
}

impl<G: ChatGateway + 'static> SubmitQueryUseCase<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            state: Mutex::new(QueryState::new()),
            behavior: BehaviorConfig::default(),
            options: RetrievalOptions::default(),
            logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_behavior(mut self, behavior: BehaviorConfig) -> Self {
        self.behavior = behavior;
        self
    }

    /// Retrieval overrides attached to every submission
    pub fn with_options(mut self, options: RetrievalOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Snapshot of the visible state
    pub fn state(&self) -> QueryPhase {
        self.lock_state().phase().clone()
    }

    pub fn latest_generation(&self) -> Option<RequestGeneration> {
        self.lock_state().latest_generation()
    }

    /// Submit with default (no-op) progress
    pub async fn submit(
        &self,
        question: &str,
        domain: RegulatoryDomain,
    ) -> Result<SubmitOutcome, DomainError> {
        self.submit_with_progress(question, domain, &NoProgress)
            .await
    }

    /// Submit a question, reporting the in-flight request to `progress`.
    ///
    /// Fails only when the configured retrieval options are out of range, in
    /// which case nothing is sent and the state is untouched.
    pub async fn submit_with_progress(
        &self,
        question: &str,
        domain: RegulatoryDomain,
        progress: &dyn QueryProgressNotifier,
    ) -> Result<SubmitOutcome, DomainError> {
        let Some(question) = Question::try_new(question) else {
            debug!("Ignoring blank question");
            return Ok(SubmitOutcome::Skipped);
        };
        let query = ChatQuery::new(question, domain).with_options(self.options)?;

        let generation = self.lock_state().begin(query.clone());
        info!(
            "Submitting query {} [{}]: {}",
            generation,
            domain,
            preview(query.question.content(), 100)
        );
        progress.on_request_start(generation, &query);

        let started = Instant::now();
        let result = self.call_gateway(&query).await;
        let elapsed = started.elapsed();

        let success = result.is_ok();
        if let Err(e) = &result {
            warn!("Query {} failed ({}): {}", generation, e.kind(), e);
        }
        self.audit(generation, &query, &result, elapsed);

        let applied = {
            let mut state = self.lock_state();
            let outcome = result.map_err(|e| e.to_string());
            state
                .resolve(generation, outcome)
                .then(|| state.phase().clone())
        };
        progress.on_request_end(generation, success, applied.is_some());

        Ok(match applied {
            Some(phase) => {
                debug!("Query {} applied as {}", generation, phase.name());
                SubmitOutcome::Applied(phase)
            }
            None => {
                debug!("Discarding stale result of query {}", generation);
                SubmitOutcome::Stale(generation)
            }
        })
    }

    async fn call_gateway(&self, query: &ChatQuery) -> Result<ChatResponse, GatewayError> {
        match self.behavior.timeout {
            Some(limit) => tokio::time::timeout(limit, self.gateway.ask(query))
                .await
                .unwrap_or(Err(GatewayError::Timeout)),
            None => self.gateway.ask(query).await,
        }
    }

    fn audit(
        &self,
        generation: RequestGeneration,
        query: &ChatQuery,
        result: &Result<ChatResponse, GatewayError>,
        elapsed: Duration,
    ) {
        let event = match result {
            Ok(response) => ConversationEvent::new(
                "query_answered",
                json!({
                    "generation": generation.value(),
                    "question": query.question.content(),
                    "domain": query.domain,
                    "has_sufficient_context": response.has_sufficient_context,
                    "sources_count": response.sources.len(),
                    "citations": response.citations,
                    "elapsed_ms": elapsed.as_millis() as u64,
                }),
            ),
            Err(e) => ConversationEvent::new(
                "query_failed",
                json!({
                    "generation": generation.value(),
                    "question": query.question.content(),
                    "domain": query.domain,
                    "error_kind": e.kind(),
                    "status": e.status(),
                    "error": e.to_string(),
                    "elapsed_ms": elapsed.as_millis() as u64,
                }),
            ),
        };
        self.logger.log(event);
    }

    fn lock_state(&self) -> MutexGuard<'_, QueryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
