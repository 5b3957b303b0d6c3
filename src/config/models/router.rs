//! Router settings

use super::*;
use crate::core::router::RouterConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `router_settings` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterSettings {
    /// Ordinary failures per minute before a deployment cools down
    #[serde(default = "default_allowed_fails")]
    pub allowed_fails: u32,
    /// Cooldown in seconds after `allowed_fails` is reached
    #[serde(default = "default_cooldown_time")]
    pub cooldown_time: u64,
    /// Retry attempts after the first one
    #[serde(default = "default_num_retries")]
    pub num_retries: u32,
    /// Seconds to wait between retries
    #[serde(default)]
    pub retry_after: u64,
    /// Forced cooldown in seconds when the upstream gives no `Retry-After`
    #[serde(default = "default_forced_cooldown_time")]
    pub forced_cooldown_time: u64,
    /// Alias to model group: `claude -> claude-sonnet`
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub model_group_alias: BTreeMap<String, String>,
}

impl Default for RouterSettings {
    fn default() -> Self {
        Self {
            allowed_fails: default_allowed_fails(),
            cooldown_time: default_cooldown_time(),
            num_retries: default_num_retries(),
            retry_after: 0,
            forced_cooldown_time: default_forced_cooldown_time(),
            model_group_alias: BTreeMap::new(),
        }
    }
}

impl RouterSettings {
    /// Runtime router configuration
    pub fn to_router_config(&self) -> RouterConfig {
        RouterConfig {
            num_retries: self.num_retries,
            retry_after_secs: self.retry_after,
            allowed_fails: self.allowed_fails,
            cooldown_time_secs: self.cooldown_time,
            forced_cooldown_secs: self.forced_cooldown_time,
        }
    }
}
