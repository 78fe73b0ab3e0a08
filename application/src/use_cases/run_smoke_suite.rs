//! Run Smoke Suite use case
//!
//! Checks a running backend end to end: health first, then each smoke case
//! in order, grading the answers.

use crate::config::BehaviorConfig;
use crate::ports::chat_gateway::{ChatGateway, GatewayError};
use regchat_domain::{ChatQuery, HealthReport, Question, SmokeCase, SmokeVerdict};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;
use tracing::{info, warn};

/// Bound on the initial health check
const SMOKE_HEALTH_TIMEOUT: Duration = Duration::from_secs(10);

/// Per-case bound when no request timeout is configured
const SMOKE_CASE_TIMEOUT: Duration = Duration::from_secs(60);

/// Errors that abort the whole suite
#[derive(Error, Debug)]
pub enum RunSmokeError {
    #[error("Health check failed: {0}")]
    HealthCheckFailed(#[source] GatewayError),

    #[error("No smoke cases to run")]
    NoCases,
}

/// Outcome of one case
#[derive(Debug, Clone)]
pub struct SmokeCaseResult {
    pub case: SmokeCase,
    pub elapsed: Duration,
    /// Verdict when the backend answered, error message otherwise
    pub outcome: Result<SmokeVerdict, String>,
}

impl SmokeCaseResult {
    pub fn passed(&self) -> bool {
        matches!(&self.outcome, Ok(verdict) if verdict.passed())
    }
}

/// Result of a full suite run
#[derive(Debug, Clone)]
pub struct SmokeReport {
    pub health: HealthReport,
    pub results: Vec<SmokeCaseResult>,
}

impl SmokeReport {
    pub fn passed_count(&self) -> usize {
        self.results.iter().filter(|r| r.passed()).count()
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn all_passed(&self) -> bool {
        self.passed_count() == self.total()
    }
}

/// Callback for per-case progress
pub trait SmokeProgressNotifier: Send + Sync {
    fn on_case_start(&self, index: usize, total: usize, case: &SmokeCase);
    fn on_case_complete(&self, index: usize, result: &SmokeCaseResult);
}

pub struct NoSmokeProgress;

impl SmokeProgressNotifier for NoSmokeProgress {
    fn on_case_start(&self, _index: usize, _total: usize, _case: &SmokeCase) {}
    fn on_case_complete(&self, _index: usize, _result: &SmokeCaseResult) {}
}

/// Use case for running the smoke suite
pub struct RunSmokeSuiteUseCase<G: ChatGateway + 'static> {
    gateway: Arc<G>,
    behavior: BehaviorConfig,
}

impl<G: ChatGateway + 'static> RunSmokeSuiteUseCase<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            behavior: BehaviorConfig::default(),
        }
    }

    pub fn with_behavior(mut self, behavior: BehaviorConfig) -> Self {
        self.behavior = behavior;
        self
    }

    pub async fn execute(&self, cases: Vec<SmokeCase>) -> Result<SmokeReport, RunSmokeError> {
        self.execute_with_progress(cases, &NoSmokeProgress).await
    }

    pub async fn execute_with_progress(
        &self,
        cases: Vec<SmokeCase>,
        progress: &dyn SmokeProgressNotifier,
    ) -> Result<SmokeReport, RunSmokeError> {
        if cases.is_empty() {
            return Err(RunSmokeError::NoCases);
        }

        let health = tokio::time::timeout(SMOKE_HEALTH_TIMEOUT, self.gateway.health())
            .await
            .unwrap_or(Err(GatewayError::Timeout))
            .map_err(RunSmokeError::HealthCheckFailed)?;
        info!("Backend is {}; running {} cases", health.status.as_str(), cases.len());

        let total = cases.len();
        let mut results = Vec::with_capacity(total);
        for (index, case) in cases.into_iter().enumerate() {
            progress.on_case_start(index, total, &case);
            let result = self.run_case(case).await;
            if !result.passed() {
                warn!("Smoke case {} did not pass", index + 1);
            }
            progress.on_case_complete(index, &result);
            results.push(result);
        }

        Ok(SmokeReport { health, results })
    }

    async fn run_case(&self, case: SmokeCase) -> SmokeCaseResult {
        let started = Instant::now();
        let outcome = match Question::parse(case.question.as_str()) {
            Ok(question) => {
                let query = ChatQuery::new(question, case.domain);
                let limit = self.behavior.timeout.unwrap_or(SMOKE_CASE_TIMEOUT);
                tokio::time::timeout(limit, self.gateway.ask(&query))
                    .await
                    .unwrap_or(Err(GatewayError::Timeout))
                    .map(|response| SmokeVerdict::evaluate(&case, &response))
                    .map_err(|e| e.to_string())
            }
            Err(e) => Err(e.to_string()),
        };
        SmokeCaseResult {
            case,
            elapsed: started.elapsed(),
            outcome,
        }
    }
}
