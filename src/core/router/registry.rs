//! Deployment registry
//!
//! Owns the configured deployments per model group and produces the healthy
//! snapshots handed to the selection strategy.

use super::cooldown::CooldownSink;
use super::deployment::{Deployment, DeploymentId, HealthySet};
use super::error::RouterError;
use crate::config::Config;
use dashmap::DashMap;
use dashmap::mapref::one::Ref;
use tracing::debug;

/// Registry of deployments
///
/// Model groups keep their deployments in insertion order, which is the
/// tie-break order used by selection.
#[derive(Debug, Default)]
pub struct DeploymentRegistry {
    /// All deployments (DashMap for lock-free concurrent access)
    deployments: DashMap<DeploymentId, Deployment>,

    /// Model name to deployment IDs index, in insertion order
    model_index: DashMap<String, Vec<DeploymentId>>,

    /// Model name aliases: "claude" -> "claude-sonnet"
    model_aliases: DashMap<String, String>,
}

impl DeploymentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from an ordered list of deployments
    pub fn with_deployments(deployments: impl IntoIterator<Item = Deployment>) -> Self {
        let registry = Self::new();
        for deployment in deployments {
            registry.add_deployment(deployment);
        }
        registry
    }

    /// Build a registry from the configured model list and aliases
    pub fn from_config(config: &Config) -> Self {
        let registry = Self::with_deployments(config.deployments());
        for (alias, model_name) in &config.router_settings.model_group_alias {
            registry.add_model_alias(alias, model_name);
        }
        registry
    }

    // ========== Deployment Management ==========

    /// Add a deployment, replacing any deployment with the same ID
    pub fn add_deployment(&self, deployment: Deployment) {
        let deployment_id = deployment.id.clone();
        let model_name = deployment.model_name.clone();

        if let Some(previous) = self.deployments.insert(deployment_id.clone(), deployment) {
            if let Some(mut ids) = self.model_index.get_mut(&previous.model_name) {
                ids.retain(|id| id != &deployment_id);
            }
        }

        self.model_index
            .entry(model_name)
            .or_default()
            .push(deployment_id);
    }

    /// Remove a deployment from the registry
    pub fn remove_deployment(&self, id: &str) -> Option<Deployment> {
        let removed = self.deployments.remove(id).map(|(_, v)| v);

        if let Some(ref deployment) = removed {
            if let Some(mut entry) = self.model_index.get_mut(&deployment.model_name) {
                entry.retain(|did| did != id);
            }
        }

        removed
    }

    /// Get a deployment by ID
    pub fn get_deployment(&self, id: &str) -> Option<Ref<'_, DeploymentId, Deployment>> {
        self.deployments.get(id)
    }

    /// Replace the complete list of deployments
    pub fn set_model_list(&self, deployments: Vec<Deployment>) {
        self.deployments.clear();
        self.model_index.clear();

        for deployment in deployments {
            self.add_deployment(deployment);
        }
    }

    // ========== Model Aliases ==========

    pub fn add_model_alias(&self, alias: &str, model_name: &str) {
        self.model_aliases
            .insert(alias.to_string(), model_name.to_string());
    }

    /// Resolve a model name (handles aliases)
    pub fn resolve_model_name(&self, name: &str) -> String {
        self.model_aliases
            .get(name)
            .map(|v| v.clone())
            .unwrap_or_else(|| name.to_string())
    }

    // ========== Query Methods ==========

    /// All deployments for a model group, in insertion order
    pub fn deployments_for_model(&self, model_name: &str) -> Result<Vec<Deployment>, RouterError> {
        let resolved = self.resolve_model_name(model_name);
        let ids = self
            .model_index
            .get(&resolved)
            .map(|ids| ids.clone())
            .ok_or_else(|| RouterError::ModelNotFound(model_name.to_string()))?;

        Ok(ids
            .iter()
            .filter_map(|id| self.deployments.get(id).map(|d| d.clone()))
            .collect())
    }

    /// Snapshot of the deployments of a model group that are not cooling down
    pub fn healthy_set(
        &self,
        model_name: &str,
        cooldown: &dyn CooldownSink,
    ) -> Result<HealthySet, RouterError> {
        let all = self.deployments_for_model(model_name)?;
        let total = all.len();

        let healthy: HealthySet = all
            .into_iter()
            .filter(|d| !cooldown.is_in_cooldown(&d.id))
            .collect();

        debug!(
            model = model_name,
            healthy = healthy.len(),
            total,
            "built healthy snapshot"
        );
        Ok(healthy)
    }

    /// List all model names
    pub fn list_models(&self) -> Vec<String> {
        let mut models: Vec<String> = self
            .model_index
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        models.sort();
        models
    }

    /// List all deployment IDs
    pub fn list_deployments(&self) -> Vec<DeploymentId> {
        self.deployments
            .iter()
            .map(|entry| entry.key().clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.deployments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deployments.is_empty()
    }
}
