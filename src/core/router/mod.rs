//! Core router for deployment selection and failure handling
//!
//! ## Module Structure
//!
//! - `deployment` - Deployment records, tiering params and healthy snapshots
//! - `provider` - Provider family detection
//! - `strategy` - Highest-weight tiered selection
//! - `classifier` - Request outcomes and forced-cooldown classification
//! - `cooldown` - Cooldown sink contract and the in-memory registry
//! - `registry` - Deployments per model group
//! - `router` - Router wiring registry, strategy, classifier and cooldown
//! - `execution` - Execute with retry
//! - `config` - Router runtime settings
//! - `error` - Error types and cooldown reasons

pub mod classifier;
pub mod config;
pub mod cooldown;
pub mod deployment;
pub mod error;
pub mod execution;
pub mod provider;
pub mod registry;
pub mod router;
pub mod strategy;

#[cfg(test)]
mod tests;

pub use classifier::{
    BalanceExhaustionRule, FailureClassifier, FailureDescriptor, FailureSignal, ForcedCooldown,
    RequestOutcome, UpstreamError, UpstreamErrorKind, classify,
};
pub use config::RouterConfig;
pub use cooldown::{CooldownRegistry, CooldownSink};
pub use deployment::{Deployment, DeploymentId, DeploymentParams, HealthySet};
pub use error::{CooldownReason, RouterError};
pub use execution::ExecutionResult;
pub use provider::ProviderFamily;
pub use registry::DeploymentRegistry;
pub use router::Router;
pub use strategy::{Selection, SelectionTier, select, select_with_tier};
