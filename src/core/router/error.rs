//! Router error types
//!
//! This module defines error types for the router system including
//! routing errors and cooldown reasons.

use serde::Serialize;
use std::fmt;

/// Cooldown trigger reason
///
/// Defines the reasons why a deployment enters cooldown state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CooldownReason {
    /// Upstream rejected the request because the account ran out of credit
    BalanceExhausted,
    /// Ordinary failures reached `allowed_fails` within one minute
    ConsecutiveFailures,
    /// Manual cooldown
    Manual,
}

impl CooldownReason {
    /// Human readable reason
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BalanceExhausted => "provider balance exhausted",
            Self::ConsecutiveFailures => "allowed failures exceeded",
            Self::Manual => "manual cooldown",
        }
    }
}

impl fmt::Display for CooldownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Router error types
///
/// Defines errors that can occur during routing operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouterError {
    /// Selection was invoked with zero candidates
    #[error("No available deployment for model: {0}")]
    EmptyPool(String),

    /// Model not found in router configuration
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    /// Deployment not found by ID
    #[error("Deployment not found: {0}")]
    DeploymentNotFound(String),

    /// The upstream call failed and was not retried
    #[error("Request to {deployment_id} for model {model} failed: {message}")]
    UpstreamFailure {
        model: String,
        deployment_id: String,
        message: String,
    },

    /// Every attempt failed
    #[error("All {attempts} attempts failed for model: {model}")]
    RetriesExhausted { model: String, attempts: u32 },
}
