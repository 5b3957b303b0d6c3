//! Deployment data structures
//!
//! This module defines the values the selection strategy works on:
//! - `Deployment`: one configured backend capable of serving a model group
//! - `DeploymentParams`: the tiering metrics (weight, RPM limit, TPM limit)
//! - `HealthySet`: an ordered snapshot of deployments eligible for one selection
//!
//! Deployments carry no runtime state. Health and cooldown tracking live in
//! [`CooldownRegistry`](super::cooldown::CooldownRegistry), so a snapshot can be
//! cloned and handed to concurrent selections freely.

use super::provider::ProviderFamily;
use std::ops::Deref;

/// Deployment identifier (unique within a model group)
pub type DeploymentId = String;

/// Tiering metrics for a deployment
///
/// All three metrics are non-negative and `0` means "not set". Values are
/// normalized when they are written, so readers never need to handle
/// negative or non-finite numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DeploymentParams {
    weight: f64,
    rpm: f64,
    tpm: f64,
}

impl DeploymentParams {
    /// Create params from raw values; a negative or non-finite metric becomes `0`
    pub fn new(weight: f64, rpm: f64, tpm: f64) -> Self {
        Self {
            weight: normalize(weight),
            rpm: normalize(rpm),
            tpm: normalize(tpm),
        }
    }

    /// Set the weight (builder pattern)
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = normalize(weight);
        self
    }

    /// Set the requests-per-minute limit (builder pattern)
    pub fn with_rpm(mut self, rpm: f64) -> Self {
        self.rpm = normalize(rpm);
        self
    }

    /// Set the tokens-per-minute limit (builder pattern)
    pub fn with_tpm(mut self, tpm: f64) -> Self {
        self.tpm = normalize(tpm);
        self
    }

    /// Explicit operator preference
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Requests-per-minute limit
    pub fn rpm(&self) -> f64 {
        self.rpm
    }

    /// Tokens-per-minute limit
    pub fn tpm(&self) -> f64 {
        self.tpm
    }

    /// True when none of the three metrics is set
    pub fn is_unset(&self) -> bool {
        self.weight == 0.0 && self.rpm == 0.0 && self.tpm == 0.0
    }
}

fn normalize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Deployment - a concrete backend for a model group
///
/// Multiple deployments can serve the same `model_name` (e.g. "claude-sonnet"
/// backed by two Anthropic keys and one Vertex AI project).
///
/// ## Example
///
/// ```rust
/// use litellm_router::core::router::{Deployment, DeploymentParams};
///
/// let deployment = Deployment::new(
///     "anthropic-primary",
///     "claude-sonnet",
///     "anthropic/claude-sonnet-4-20250514",
/// )
/// .with_params(DeploymentParams::default().with_weight(3.0).with_rpm(100.0));
///
/// assert_eq!(deployment.params.weight(), 3.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Deployment {
    /// Unique deployment ID
    pub id: DeploymentId,

    /// User-facing model name / model group (e.g. "claude-sonnet")
    pub model_name: String,

    /// Upstream model string (e.g. "anthropic/claude-sonnet-4-20250514")
    pub model: String,

    /// Provider family serving this deployment
    pub provider: ProviderFamily,

    /// Tiering metrics
    pub params: DeploymentParams,
}

impl Deployment {
    /// Create a deployment with all metrics unset
    ///
    /// The provider family is inferred from `model`.
    pub fn new(
        id: impl Into<DeploymentId>,
        model_name: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        let model = model.into();
        Self {
            id: id.into(),
            model_name: model_name.into(),
            provider: ProviderFamily::from_model(&model),
            model,
            params: DeploymentParams::default(),
        }
    }

    /// Set deployment params (builder pattern)
    pub fn with_params(mut self, params: DeploymentParams) -> Self {
        self.params = params;
        self
    }

    /// Override the inferred provider family (builder pattern)
    pub fn with_provider(mut self, provider: ProviderFamily) -> Self {
        self.provider = provider;
        self
    }
}

/// Ordered snapshot of deployments eligible for one selection call
///
/// Order is only significant for tie-breaking: the first element wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HealthySet {
    deployments: Vec<Deployment>,
}

impl HealthySet {
    pub fn new(deployments: Vec<Deployment>) -> Self {
        Self { deployments }
    }

    pub fn into_inner(self) -> Vec<Deployment> {
        self.deployments
    }
}

impl Deref for HealthySet {
    type Target = [Deployment];

    fn deref(&self) -> &Self::Target {
        &self.deployments
    }
}

impl From<Vec<Deployment>> for HealthySet {
    fn from(deployments: Vec<Deployment>) -> Self {
        Self::new(deployments)
    }
}

impl FromIterator<Deployment> for HealthySet {
    fn from_iter<I: IntoIterator<Item = Deployment>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
