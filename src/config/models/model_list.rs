//! Model list entries

use crate::core::router::{Deployment, DeploymentId, DeploymentParams, ProviderFamily};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// One `model_list` entry, i.e. one deployment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelEntry {
    /// Model group the deployment serves
    pub model_name: String,
    pub litellm_params: LitellmParams,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_info: Option<ModelInfo>,
}

/// Upstream parameters of a deployment
///
/// Credentials and other transport settings are accepted and ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LitellmParams {
    /// Upstream model string, `provider/model`
    pub model: String,
    #[serde(default, skip_serializing_if = "MetricValue::is_unset")]
    pub weight: MetricValue,
    #[serde(default, skip_serializing_if = "MetricValue::is_unset")]
    pub rpm: MetricValue,
    #[serde(default, skip_serializing_if = "MetricValue::is_unset")]
    pub tpm: MetricValue,
}

/// Optional deployment metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Explicit provider family, overriding the `model` prefix
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<ProviderFamily>,
}

/// Raw tiering metric as written in the YAML file
///
/// Ints, floats and numeric strings are accepted. Anything negative, NaN or
/// non-numeric counts as unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricValue(serde_yaml::Value);

impl MetricValue {
    pub fn new(value: impl Into<serde_yaml::Value>) -> Self {
        Self(value.into())
    }

    pub fn is_unset(&self) -> bool {
        self.0.is_null()
    }

    /// Parsed value, 0 when absent or invalid
    pub fn parse(&self, field: &str, deployment_id: &str) -> f64 {
        if self.is_unset() {
            return 0.0;
        }

        let parsed = match &self.0 {
            serde_yaml::Value::Number(n) => n.as_f64(),
            serde_yaml::Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };

        match parsed {
            Some(value) if value.is_finite() && value >= 0.0 => value,
            _ => {
                warn!(
                    deployment_id,
                    field,
                    value = ?self.0,
                    "invalid metric value, treating as unset"
                );
                0.0
            }
        }
    }
}

impl ModelEntry {
    pub fn new(model_name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
            litellm_params: LitellmParams {
                model: model.into(),
                weight: MetricValue::default(),
                rpm: MetricValue::default(),
                tpm: MetricValue::default(),
            },
            model_info: None,
        }
    }

    /// Deployment ID: `model_info.id`, else `{model_name}-{index}`
    pub fn deployment_id(&self, index: usize) -> DeploymentId {
        self.model_info
            .as_ref()
            .and_then(|info| info.id.clone())
            .unwrap_or_else(|| format!("{}-{}", self.model_name, index))
    }

    /// Build the runtime deployment for the entry at `index` in `model_list`
    pub fn to_deployment(&self, index: usize) -> Deployment {
        let id = self.deployment_id(index);
        let params = &self.litellm_params;
        let params = DeploymentParams::new(
            params.weight.parse("weight", &id),
            params.rpm.parse("rpm", &id),
            params.tpm.parse("tpm", &id),
        );

        let deployment = Deployment::new(id, &self.model_name, &self.litellm_params.model)
            .with_params(params);

        match self.model_info.as_ref().and_then(|info| info.provider.clone()) {
            Some(provider) => deployment.with_provider(provider),
            None => deployment,
        }
    }
}
