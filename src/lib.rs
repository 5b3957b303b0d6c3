//! # LiteLLM Router
//!
//! Deployment selection and failure classification for a request router that
//! fronts several upstream LLM deployments of the same logical model.
//!
//! ## Features
//!
//! - **Tiered Selection**: Highest weight, then rpm, then tpm, then first in order
//! - **Failure Classification**: Provider balance exhaustion escalates a `400 Bad Request` into a forced cooldown
//! - **Cooldown Tracking**: Lock-free per-deployment failure counters and cooldown windows
//! - **litellm Config Format**: `model_list` / `router_settings` YAML
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use litellm_router::{Config, Router};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/router.yaml").await?;
//!     let router = Router::from_config(&config)?;
//!
//!     let deployment = router.route("claude-sonnet")?;
//!     println!("Routing to {} ({})", deployment.id, deployment.model);
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use core::router::{
    CooldownRegistry, CooldownSink, Deployment, DeploymentParams, DeploymentRegistry,
    FailureClassifier, FailureDescriptor, FailureSignal, ForcedCooldown, ProviderFamily,
    RequestOutcome, Router, RouterConfig, RouterError, SelectionTier, UpstreamError,
    UpstreamErrorKind, classify, select,
};
pub use utils::error::{GatewayError, Result};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
