//! Execution with retry
//!
//! Runs an upstream operation against routed deployments, reporting every
//! outcome and retrying on a different deployment after a forced cooldown.

use super::classifier::{FailureDescriptor, RequestOutcome, UpstreamError};
use super::deployment::{Deployment, DeploymentId};
use super::error::RouterError;
use super::router::Router;
use std::future::Future;
use std::time::Instant;
use tracing::{debug, warn};

/// Execution result with metadata
#[derive(Debug, Clone)]
pub struct ExecutionResult<T> {
    /// The successful result value
    pub result: T,
    /// The deployment ID that successfully handled the request
    pub deployment_id: DeploymentId,
    /// Total number of attempts
    pub attempts: u32,
    /// The upstream model that served the request
    pub model_used: String,
    /// Total execution latency in microseconds (including retries)
    pub latency_us: u64,
}

impl Router {
    /// Execute a request for a model with retry
    ///
    /// Each attempt routes, runs `operation`, and reports the outcome. A
    /// failure is retried when it was escalated to a forced cooldown (the
    /// next snapshot no longer offers that deployment) or when its kind is
    /// retryable. Other failures are returned immediately.
    pub async fn execute<T, F, Fut>(
        &self,
        model_name: &str,
        operation: F,
    ) -> Result<ExecutionResult<T>, RouterError>
    where
        F: Fn(Deployment) -> Fut,
        Fut: Future<Output = Result<T, UpstreamError>>,
    {
        let start = Instant::now();
        let max_attempts = self.config.num_retries.saturating_add(1);

        for attempt in 1..=max_attempts {
            let deployment = self.route(model_name)?;
            let deployment_id = deployment.id.clone();
            let model_used = deployment.model.clone();

            let error = match operation(deployment.clone()).await {
                Ok(result) => {
                    self.report(RequestOutcome::success(deployment_id.clone()));
                    return Ok(ExecutionResult {
                        result,
                        deployment_id,
                        attempts: attempt,
                        model_used,
                        latency_us: u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX),
                    });
                }
                Err(error) => error,
            };

            let retryable = error.kind.is_retryable();
            let message = error
                .message
                .clone()
                .unwrap_or_else(|| format!("{:?}", error.kind));
            let signal = self.report(RequestOutcome::failure(FailureDescriptor::from_upstream(
                &deployment,
                error,
            )));

            if !(signal.is_forced_cooldown() || retryable) {
                return Err(RouterError::UpstreamFailure {
                    model: model_name.to_string(),
                    deployment_id,
                    message,
                });
            }

            if attempt < max_attempts {
                debug!(
                    model = model_name,
                    deployment_id = %deployment_id,
                    attempt,
                    forced_cooldown = signal.is_forced_cooldown(),
                    "retrying request"
                );
                let delay = self.config.retry_delay();
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
            }
        }

        warn!(model = model_name, attempts = max_attempts, "all attempts failed");
        Err(RouterError::RetriesExhausted {
            model: model_name.to_string(),
            attempts: max_attempts,
        })
    }
}
