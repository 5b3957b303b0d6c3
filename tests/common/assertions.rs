//! Custom test assertions
//!
//! Provides domain-specific assertions for router outcomes.

use litellm_router::core::router::{CooldownReason, FailureSignal};

/// Assertions for FailureSignal
pub trait FailureSignalAssertions {
    /// Assert the signal is a forced cooldown for `deployment_id`
    fn assert_forced_cooldown_for(&self, deployment_id: &str);

    /// Assert the signal does not escalate
    fn assert_no_escalation(&self);
}

impl FailureSignalAssertions for FailureSignal {
    fn assert_forced_cooldown_for(&self, deployment_id: &str) {
        match self {
            FailureSignal::ForcedCooldown(forced) => {
                assert_eq!(forced.deployment_id, deployment_id);
                assert_eq!(forced.reason, CooldownReason::BalanceExhausted);
            }
            FailureSignal::None => {
                panic!("Expected forced cooldown for {}, got none", deployment_id)
            }
        }
    }

    fn assert_no_escalation(&self) {
        assert_eq!(self, &FailureSignal::None, "Expected no escalation");
    }
}
