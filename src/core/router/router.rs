//! Router core structure
//!
//! The router wires the two stateless decisions together: it asks the
//! registry for a healthy snapshot, lets the strategy pick a deployment, and
//! forwards classified failures to the cooldown sink.

use super::classifier::{FailureClassifier, FailureSignal, RequestOutcome};
use super::config::RouterConfig;
use super::cooldown::{CooldownRegistry, CooldownSink};
use super::deployment::Deployment;
use super::error::RouterError;
use super::registry::DeploymentRegistry;
use super::strategy::{Selection, SelectionTier, select_with_tier};
use crate::config::Config;
use std::sync::Arc;
use tracing::info;

/// Router
///
/// All collaborators are passed in at construction time; nothing is
/// registered globally.
pub struct Router {
    pub(crate) registry: DeploymentRegistry,
    pub(crate) cooldown: Arc<dyn CooldownSink>,
    pub(crate) classifier: FailureClassifier,
    pub(crate) config: RouterConfig,
}

impl Router {
    pub fn new(
        registry: DeploymentRegistry,
        cooldown: Arc<dyn CooldownSink>,
        classifier: FailureClassifier,
        config: RouterConfig,
    ) -> Self {
        Self {
            registry,
            cooldown,
            classifier,
            config,
        }
    }

    /// Router with an in-memory [`CooldownRegistry`] and default classifier rules
    pub fn with_registry(registry: DeploymentRegistry, config: RouterConfig) -> Self {
        let cooldown = Arc::new(CooldownRegistry::new(&config));
        Self::new(registry, cooldown, FailureClassifier::default(), config)
    }

    /// Router for a loaded configuration, with an in-memory cooldown registry
    pub fn from_config(config: &Config) -> crate::utils::error::Result<Self> {
        let registry = DeploymentRegistry::from_config(config);
        let classifier = config.classifier()?;
        let router_config = config.router_config();
        let cooldown = Arc::new(CooldownRegistry::new(&router_config));

        info!(
            deployments = registry.len(),
            models = registry.list_models().len(),
            rules = classifier.rules().len(),
            "router initialized"
        );
        Ok(Self::new(registry, cooldown, classifier, router_config))
    }

    pub fn registry(&self) -> &DeploymentRegistry {
        &self.registry
    }

    pub fn cooldown(&self) -> &Arc<dyn CooldownSink> {
        &self.cooldown
    }

    pub fn classifier(&self) -> &FailureClassifier {
        &self.classifier
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    // ========== Selection ==========

    /// Pick a deployment for `model_name` from the current healthy snapshot
    pub fn route(&self, model_name: &str) -> Result<Deployment, RouterError> {
        self.route_with_tier(model_name)
            .map(|(deployment, _)| deployment)
    }

    /// Like [`Router::route`], also reporting the deciding tier
    pub fn route_with_tier(
        &self,
        model_name: &str,
    ) -> Result<(Deployment, SelectionTier), RouterError> {
        let healthy = self.registry.healthy_set(model_name, self.cooldown.as_ref())?;
        let resolved = self.registry.resolve_model_name(model_name);

        let Selection {
            deployment, tier, ..
        } = select_with_tier(&healthy, &resolved)?;
        Ok((deployment.clone(), tier))
    }

    // ========== Outcome Reporting ==========

    /// Classify a completed request and forward the result to the cooldown sink
    ///
    /// A forced cooldown is handed to the sink exactly once; the returned
    /// signal describes what was forwarded.
    pub fn report(&self, outcome: RequestOutcome) -> FailureSignal {
        let outcome = match outcome {
            RequestOutcome::Success { deployment_id } => {
                self.cooldown.record_success(&deployment_id);
                return FailureSignal::None;
            }
            RequestOutcome::Failure(mut failure) => {
                if failure.provider.is_none() {
                    failure.provider = self
                        .registry
                        .get_deployment(&failure.deployment_id)
                        .map(|d| d.provider.clone());
                }
                RequestOutcome::Failure(failure)
            }
        };

        let signal = self.classifier.classify(&outcome);
        match &signal {
            FailureSignal::ForcedCooldown(forced) => self.cooldown.accept(forced.clone()),
            FailureSignal::None => self.cooldown.record_failure(outcome.deployment_id()),
        }
        signal
    }
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("registry", &self.registry)
            .field("classifier", &self.classifier)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
