//! Cooldown bookkeeping
//!
//! [`CooldownSink`] is the only contract between the router and whatever
//! decides that a deployment must sit out for a while. [`CooldownRegistry`]
//! is the default in-memory implementation.
//!
//! ## Design Philosophy
//!
//! Per-deployment state uses atomics with `Relaxed` ordering, so counters are
//! eventually consistent. No lock is held across a selection.

use super::classifier::ForcedCooldown;
use super::config::RouterConfig;
use super::deployment::DeploymentId;
use super::error::CooldownReason;
use dashmap::DashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering::Relaxed};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::info;

/// Receiver of failure information for cooldown decisions
///
/// Implementations own and serialize their own state transitions; callers
/// never lock anything around these calls.
#[cfg_attr(test, mockall::automock)]
pub trait CooldownSink: Send + Sync {
    /// Consume a forced cooldown signal
    fn accept(&self, signal: ForcedCooldown);

    /// Record an ordinary, non-escalated failure
    fn record_failure(&self, deployment_id: &str);

    /// Record a successful request
    fn record_success(&self, deployment_id: &str);

    /// Whether the deployment must be left out of healthy snapshots
    fn is_in_cooldown(&self, deployment_id: &str) -> bool;
}

/// Per-deployment counters
#[derive(Debug, Default)]
pub struct CooldownState {
    /// Failures this minute (for cooldown detection)
    pub fails_this_minute: AtomicU32,

    /// Failed requests (lifetime)
    pub fail_requests: AtomicU64,

    /// Successful requests (lifetime)
    pub success_requests: AtomicU64,

    /// Forced cooldowns accepted (lifetime)
    pub forced_cooldowns: AtomicU64,

    /// Cooldown end timestamp (unix millis)
    pub cooldown_until: AtomicU64,
}

/// In-memory cooldown registry
#[derive(Debug)]
pub struct CooldownRegistry {
    states: DashMap<DeploymentId, CooldownState>,
    allowed_fails: u32,
    cooldown_time: Duration,
    forced_cooldown_time: Duration,
}

impl CooldownRegistry {
    pub fn new(config: &RouterConfig) -> Self {
        Self {
            states: DashMap::new(),
            allowed_fails: config.allowed_fails,
            cooldown_time: config.cooldown_time(),
            forced_cooldown_time: config.forced_cooldown_time(),
        }
    }

    /// Put a deployment into cooldown for `duration`
    pub fn enter_cooldown(&self, deployment_id: &str, duration: Duration, reason: CooldownReason) {
        let until = current_millis().saturating_add(saturating_millis(duration));
        let state = self.states.entry(deployment_id.to_string()).or_default();
        state.cooldown_until.fetch_max(until, Relaxed);

        info!(
            deployment_id,
            reason = %reason,
            cooldown_secs = duration.as_secs(),
            "deployment entered cooldown"
        );
    }

    /// Remaining cooldown time, if the deployment is cooling down
    pub fn cooldown_remaining(&self, deployment_id: &str) -> Option<Duration> {
        let until = self
            .states
            .get(deployment_id)?
            .cooldown_until
            .load(Relaxed);
        let now = current_millis();
        (until > now).then(|| Duration::from_millis(until - now))
    }

    /// Lift any cooldown on the deployment
    pub fn clear(&self, deployment_id: &str) {
        if let Some(state) = self.states.get(deployment_id) {
            state.cooldown_until.store(0, Relaxed);
            state.fails_this_minute.store(0, Relaxed);
        }
    }

    /// Failures recorded for the deployment in the current minute
    pub fn fails_this_minute(&self, deployment_id: &str) -> u32 {
        self.states
            .get(deployment_id)
            .map(|s| s.fails_this_minute.load(Relaxed))
            .unwrap_or(0)
    }

    /// Forced cooldowns accepted for the deployment
    pub fn forced_cooldowns(&self, deployment_id: &str) -> u64 {
        self.states
            .get(deployment_id)
            .map(|s| s.forced_cooldowns.load(Relaxed))
            .unwrap_or(0)
    }

    /// Lifetime (success, failure) counts for the deployment
    pub fn request_counts(&self, deployment_id: &str) -> (u64, u64) {
        self.states
            .get(deployment_id)
            .map(|s| {
                (
                    s.success_requests.load(Relaxed),
                    s.fail_requests.load(Relaxed),
                )
            })
            .unwrap_or((0, 0))
    }

    /// Reset per-minute counters for all deployments
    pub fn reset_minute_counters(&self) {
        for entry in self.states.iter() {
            entry.value().fails_this_minute.store(0, Relaxed);
        }
    }

    /// Start background task to reset minute counters
    pub fn start_minute_reset_task(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(60));
            loop {
                interval.tick().await;
                self.reset_minute_counters();
            }
        })
    }
}

impl Default for CooldownRegistry {
    fn default() -> Self {
        Self::new(&RouterConfig::default())
    }
}

impl CooldownSink for CooldownRegistry {
    fn accept(&self, signal: ForcedCooldown) {
        let duration = signal
            .suggested_retry_after
            .unwrap_or(self.forced_cooldown_time);

        self.states
            .entry(signal.deployment_id.clone())
            .or_default()
            .forced_cooldowns
            .fetch_add(1, Relaxed);

        self.enter_cooldown(&signal.deployment_id, duration, signal.reason);
    }

    fn record_failure(&self, deployment_id: &str) {
        let fails = {
            let state = self.states.entry(deployment_id.to_string()).or_default();
            state.fail_requests.fetch_add(1, Relaxed);
            state.fails_this_minute.fetch_add(1, Relaxed) + 1
        };

        if fails >= self.allowed_fails {
            self.enter_cooldown(
                deployment_id,
                self.cooldown_time,
                CooldownReason::ConsecutiveFailures,
            );
        }
    }

    fn record_success(&self, deployment_id: &str) {
        self.states
            .entry(deployment_id.to_string())
            .or_default()
            .success_requests
            .fetch_add(1, Relaxed);
    }

    fn is_in_cooldown(&self, deployment_id: &str) -> bool {
        self.cooldown_remaining(deployment_id).is_some()
    }
}

/// Get current Unix timestamp in milliseconds
fn current_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(saturating_millis)
        .unwrap_or(0)
}

/// Duration in milliseconds, clamped to `u64::MAX`
fn saturating_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
