//! Router configuration types
//!
//! Runtime settings for cooldown bookkeeping and retry behaviour. The YAML
//! form lives in [`crate::config::RouterSettings`].

use std::time::Duration;

/// Router configuration
///
/// ## Defaults
///
/// - `num_retries`: 2
/// - `retry_after_secs`: 0 (no delay between retries)
/// - `allowed_fails`: 3 (failures per minute before cooldown)
/// - `cooldown_time_secs`: 5
/// - `forced_cooldown_secs`: 60
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterConfig {
    /// Number of retry attempts on failure
    pub num_retries: u32,

    /// Seconds to wait between retries
    pub retry_after_secs: u64,

    /// Number of ordinary failures allowed per minute before entering cooldown
    pub allowed_fails: u32,

    /// Cooldown duration after `allowed_fails` is reached
    pub cooldown_time_secs: u64,

    /// Cooldown duration for a forced cooldown without an upstream hint
    pub forced_cooldown_secs: u64,
}

impl RouterConfig {
    pub fn cooldown_time(&self) -> Duration {
        Duration::from_secs(self.cooldown_time_secs)
    }

    pub fn forced_cooldown_time(&self) -> Duration {
        Duration::from_secs(self.forced_cooldown_secs)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_after_secs)
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            num_retries: 2,
            retry_after_secs: 0,
            allowed_fails: 3,
            cooldown_time_secs: 5,
            forced_cooldown_secs: 60,
        }
    }
}
