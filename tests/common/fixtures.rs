//! Test fixtures and data factories
//!
//! Provides factory methods for creating deployments and configuration files
//! with sensible defaults.

use litellm_router::core::router::{Deployment, DeploymentParams};
use std::io::Write;
use tempfile::NamedTempFile;

/// Factory for creating test deployments
pub struct DeploymentFactory;

impl DeploymentFactory {
    /// Deployment of `claude-sonnet` on the Anthropic API with the given weight
    pub fn anthropic(id: &str, weight: f64) -> Deployment {
        Deployment::new(id, "claude-sonnet", "anthropic/claude-sonnet-4-20250514")
            .with_params(DeploymentParams::default().with_weight(weight))
    }

    /// Deployment of `claude-sonnet` on Vertex AI with the given weight
    pub fn vertex(id: &str, weight: f64) -> Deployment {
        Deployment::new(id, "claude-sonnet", "vertex_ai/claude-sonnet-4@20250514")
            .with_params(DeploymentParams::default().with_weight(weight))
    }

    /// Deployment with rpm and tpm only
    pub fn with_limits(id: &str, rpm: f64, tpm: f64) -> Deployment {
        Deployment::new(id, "claude-sonnet", "anthropic/claude-sonnet-4-20250514")
            .with_params(DeploymentParams::default().with_rpm(rpm).with_tpm(tpm))
    }
}

/// YAML configurations used across the integration tests
pub struct ConfigFixture;

impl ConfigFixture {
    /// Two Anthropic accounts and one Vertex AI fallback for `claude-sonnet`
    pub const CLAUDE_POOL: &'static str = r#"
model_list:
  - model_name: claude-sonnet
    litellm_params:
      model: anthropic/claude-sonnet-4-20250514
      api_key: os.environ/ANTHROPIC_API_KEY_PRIMARY
      weight: 5
    model_info:
      id: anthropic-primary
  - model_name: claude-sonnet
    litellm_params:
      model: anthropic/claude-sonnet-4-20250514
      api_key: os.environ/ANTHROPIC_API_KEY_BACKUP
      weight: 2
    model_info:
      id: anthropic-backup
  - model_name: claude-sonnet
    litellm_params:
      model: vertex_ai/claude-sonnet-4@20250514
      weight: 1
    model_info:
      id: vertex-claude
  - model_name: gpt-4o
    litellm_params:
      model: openai/gpt-4o
      rpm: "600"
      tpm: 90000
router_settings:
  allowed_fails: 3
  cooldown_time: 5
  num_retries: 2
  forced_cooldown_time: 120
  model_group_alias:
    claude: claude-sonnet
general_settings:
  master_key: sk-1234
"#;

    /// Write `content` to a temporary file
    pub fn write(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("create temp config");
        file.write_all(content.as_bytes()).expect("write temp config");
        file
    }
}
