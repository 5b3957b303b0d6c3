//! Failure classifier settings

use crate::core::router::classifier::{DEFAULT_BALANCE_MESSAGE, DEFAULT_BALANCE_PROVIDER};
use crate::core::router::{BalanceExhaustionRule, FailureClassifier, ProviderFamily};
use serde::{Deserialize, Serialize};

/// `failure_classifier` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierSettings {
    #[serde(default = "default_balance_rules")]
    pub balance_exhaustion_rules: Vec<RuleConfig>,
}

/// One balance exhaustion rule
///
/// Exactly one of `message_contains` and `pattern` must be set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    pub provider: ProviderFamily,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_contains: Option<String>,
    /// Case-insensitive regular expression
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

fn default_balance_rules() -> Vec<RuleConfig> {
    vec![RuleConfig::contains(
        DEFAULT_BALANCE_PROVIDER,
        DEFAULT_BALANCE_MESSAGE,
    )]
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            balance_exhaustion_rules: default_balance_rules(),
        }
    }
}

impl RuleConfig {
    pub fn contains(provider: ProviderFamily, message: impl Into<String>) -> Self {
        Self {
            provider,
            message_contains: Some(message.into()),
            pattern: None,
        }
    }

    pub fn to_rule(&self) -> Result<BalanceExhaustionRule, String> {
        match (&self.message_contains, &self.pattern) {
            (Some(message), None) => Ok(BalanceExhaustionRule::new(self.provider.clone(), message)),
            (None, Some(pattern)) => {
                BalanceExhaustionRule::with_pattern(self.provider.clone(), pattern)
                    .map_err(|e| format!("Invalid pattern for {}: {}", self.provider, e))
            }
            _ => Err(format!(
                "Rule for {} needs exactly one of message_contains or pattern",
                self.provider
            )),
        }
    }
}

impl ClassifierSettings {
    pub fn to_classifier(&self) -> Result<FailureClassifier, String> {
        let rules = self
            .balance_exhaustion_rules
            .iter()
            .map(RuleConfig::to_rule)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(FailureClassifier::new(rules))
    }
}
