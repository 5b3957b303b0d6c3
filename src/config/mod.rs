//! Configuration management for the router
//!
//! This module handles loading and validation of the litellm-style YAML
//! configuration (`model_list`, `router_settings`, `failure_classifier`).

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::core::router::{Deployment, FailureClassifier, RouterConfig};
use crate::utils::error::{GatewayError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Environment variable naming the configuration file
pub const CONFIG_ENV_VAR: &str = "LITELLM_ROUTER_CONFIG";

/// Main configuration struct for the router
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Deployments, in configuration order
    #[serde(default)]
    pub model_list: Vec<ModelEntry>,
    #[serde(default)]
    pub router_settings: RouterSettings,
    #[serde(default)]
    pub failure_classifier: ClassifierSettings,
    /// Proxy-level settings, accepted and ignored
    #[serde(default, skip_serializing_if = "serde_yaml::Mapping::is_empty")]
    pub general_settings: serde_yaml::Mapping,
}

impl Config {
    /// Load configuration from file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| GatewayError::Config(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_yaml_str(&content)?;

        debug!(
            deployments = config.model_list.len(),
            "Configuration loaded successfully"
        );
        Ok(config)
    }

    /// Parse and validate configuration from a YAML string
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)
            .map_err(|e| GatewayError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        validation::validate_model_list(&self.model_list)
            .map_err(|e| GatewayError::Validation(format!("Model list error: {}", e)))?;

        self.router_settings
            .validate()
            .map_err(|e| GatewayError::Validation(format!("Router settings error: {}", e)))?;

        validation::validate_aliases(&self.router_settings.model_group_alias, &self.model_list)
            .map_err(|e| GatewayError::Validation(format!("Router settings error: {}", e)))?;

        self.failure_classifier
            .validate()
            .map_err(|e| GatewayError::Validation(format!("Failure classifier error: {}", e)))?;

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Runtime deployments, in configuration order
    pub fn deployments(&self) -> Vec<Deployment> {
        self.model_list
            .iter()
            .enumerate()
            .map(|(index, entry)| entry.to_deployment(index))
            .collect()
    }

    /// Runtime router settings
    pub fn router_config(&self) -> RouterConfig {
        self.router_settings.to_router_config()
    }

    /// Failure classifier built from the configured rules
    pub fn classifier(&self) -> Result<FailureClassifier> {
        self.failure_classifier
            .to_classifier()
            .map_err(GatewayError::Validation)
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| GatewayError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}
