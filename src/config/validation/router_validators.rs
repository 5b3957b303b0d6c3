//! Router configuration validators
//!
//! This module provides validation implementations for `router_settings` and
//! the failure classifier rules.

use super::trait_def::Validate;
use crate::config::models::*;
use tracing::debug;

impl Validate for RouterSettings {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating router settings");

        if self.allowed_fails == 0 {
            return Err("allowed_fails must be greater than 0".to_string());
        }

        Ok(())
    }
}

impl Validate for RuleConfig {
    fn validate(&self) -> Result<(), String> {
        if let Some(message) = &self.message_contains {
            if message.trim().is_empty() {
                return Err(format!(
                    "message_contains cannot be empty for provider {}",
                    self.provider
                ));
            }
        }

        if let Some(pattern) = &self.pattern {
            if pattern.trim().is_empty() {
                return Err(format!(
                    "pattern cannot be empty for provider {}",
                    self.provider
                ));
            }
        }

        // Also rejects a missing matcher and invalid regular expressions
        self.to_rule().map(|_| ())
    }
}

impl Validate for ClassifierSettings {
    fn validate(&self) -> Result<(), String> {
        for rule in &self.balance_exhaustion_rules {
            rule.validate()?;
        }
        Ok(())
    }
}
