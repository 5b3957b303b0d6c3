//! Failure classification
//!
//! Decides whether a completed request must escalate into a forced cooldown.
//! Most `400 Bad Request` responses are caused by the client and must not
//! penalize the deployment. Some providers overload the same status to report
//! an exhausted prepaid balance, which is really a capacity failure; those
//! narrowly matched failures are upgraded to [`FailureSignal::ForcedCooldown`].
//!
//! Classification is a pure function of the [`RequestOutcome`]. The caller is
//! responsible for forwarding the resulting signal to the cooldown registry.

use super::deployment::{Deployment, DeploymentId};
use super::error::CooldownReason;
use super::provider::ProviderFamily;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Default provider family for balance exhaustion detection
pub const DEFAULT_BALANCE_PROVIDER: ProviderFamily = ProviderFamily::Anthropic;

/// Default message marker for balance exhaustion detection
pub const DEFAULT_BALANCE_MESSAGE: &str = "balance is too low";

/// Kind of upstream error, as reported by the transport layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpstreamErrorKind {
    /// Upstream explicitly rejected the request (400)
    BadRequest,
    /// 401 / 403
    Authentication,
    /// 404
    NotFound,
    /// 408 or a client-side timeout
    Timeout,
    /// 429
    RateLimit,
    /// 5xx
    ServerError,
    /// Connection level failure, no response received
    Network,
    Other,
}

impl UpstreamErrorKind {
    /// Map an HTTP status code to an error kind
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => Self::BadRequest,
            401 | 403 => Self::Authentication,
            404 => Self::NotFound,
            408 => Self::Timeout,
            429 => Self::RateLimit,
            500..=599 => Self::ServerError,
            _ => Self::Other,
        }
    }

    /// Whether another attempt may succeed without changing the request
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimit | Self::Timeout | Self::ServerError | Self::Network
        )
    }
}

/// Error returned by an upstream call, before it is attributed to a deployment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamError {
    pub kind: UpstreamErrorKind,
    pub status_code: Option<u16>,
    pub message: Option<String>,
    /// `Retry-After` hint from the upstream, if any
    pub retry_after: Option<Duration>,
}

impl UpstreamError {
    pub fn new(kind: UpstreamErrorKind) -> Self {
        Self {
            kind,
            status_code: None,
            message: None,
            retry_after: None,
        }
    }

    /// Build an error from an HTTP status and response message
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        Self {
            kind: UpstreamErrorKind::from_status(status),
            status_code: Some(status),
            message: Some(message.into()),
            retry_after: None,
        }
    }

    pub fn with_retry_after(mut self, retry_after: Duration) -> Self {
        self.retry_after = Some(retry_after);
        self
    }
}

/// Failure descriptor for one completed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureDescriptor {
    pub deployment_id: DeploymentId,
    pub status_code: Option<u16>,
    pub provider_error_message: Option<String>,
    pub native_error: UpstreamErrorKind,
    /// Provider family of the failing deployment, when known
    pub provider: Option<ProviderFamily>,
    pub retry_after: Option<Duration>,
}

impl FailureDescriptor {
    pub fn new(deployment_id: impl Into<DeploymentId>, native_error: UpstreamErrorKind) -> Self {
        Self {
            deployment_id: deployment_id.into(),
            status_code: None,
            provider_error_message: None,
            native_error,
            provider: None,
            retry_after: None,
        }
    }

    /// Attribute an upstream error to the deployment that produced it
    pub fn from_upstream(deployment: &Deployment, error: UpstreamError) -> Self {
        Self {
            deployment_id: deployment.id.clone(),
            status_code: error.status_code,
            provider_error_message: error.message,
            native_error: error.kind,
            provider: Some(deployment.provider.clone()),
            retry_after: error.retry_after,
        }
    }

    pub fn with_status(mut self, status_code: u16) -> Self {
        self.status_code = Some(status_code);
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.provider_error_message = Some(message.into());
        self
    }

    pub fn with_provider(mut self, provider: ProviderFamily) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn with_retry_after(mut self, retry_after: Duration) -> Self {
        self.retry_after = Some(retry_after);
        self
    }

    /// Provider family of the failing deployment
    ///
    /// Uses the explicit provider when present, otherwise the deployment
    /// identifier itself (`anthropic/...`, `claude-...`).
    pub fn provider_family(&self) -> Option<ProviderFamily> {
        match &self.provider {
            Some(provider) => Some(provider.clone()),
            None => Some(ProviderFamily::from_model(&self.deployment_id)).filter(|p| p.is_known()),
        }
    }
}

/// Result of one completed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome {
    /// The response payload stays with the caller
    Success { deployment_id: DeploymentId },
    Failure(FailureDescriptor),
}

impl RequestOutcome {
    pub fn success(deployment_id: impl Into<DeploymentId>) -> Self {
        Self::Success {
            deployment_id: deployment_id.into(),
        }
    }

    pub fn failure(descriptor: FailureDescriptor) -> Self {
        Self::Failure(descriptor)
    }

    pub fn deployment_id(&self) -> &str {
        match self {
            Self::Success { deployment_id } => deployment_id,
            Self::Failure(descriptor) => &descriptor.deployment_id,
        }
    }
}

/// Escalation raised by the classifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForcedCooldown {
    pub deployment_id: DeploymentId,
    pub reason: CooldownReason,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_retry_after: Option<Duration>,
}

/// Output of the classifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "signal", rename_all = "snake_case")]
pub enum FailureSignal {
    /// No escalation; ordinary failure counting applies
    None,
    ForcedCooldown(ForcedCooldown),
}

impl FailureSignal {
    pub fn is_forced_cooldown(&self) -> bool {
        matches!(self, Self::ForcedCooldown(_))
    }
}

/// How a rule matches the provider error message
#[derive(Debug, Clone)]
enum MessageMatcher {
    /// Lowercased needle, matched case-insensitively
    Contains(String),
    Pattern(Regex),
}

impl MessageMatcher {
    fn is_match(&self, message: &str) -> bool {
        match self {
            Self::Contains(needle) => message.to_lowercase().contains(needle.as_str()),
            Self::Pattern(regex) => regex.is_match(message),
        }
    }
}

/// Provider-specific balance exhaustion signature
#[derive(Debug, Clone)]
pub struct BalanceExhaustionRule {
    provider: ProviderFamily,
    message: MessageMatcher,
}

impl BalanceExhaustionRule {
    /// Match `message_contains` as a case-insensitive substring
    pub fn new(provider: ProviderFamily, message_contains: &str) -> Self {
        Self {
            provider,
            message: MessageMatcher::Contains(message_contains.to_lowercase()),
        }
    }

    /// Match the provider error message against a case-insensitive regular expression
    pub fn with_pattern(provider: ProviderFamily, pattern: &str) -> Result<Self, regex::Error> {
        let regex = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Ok(Self {
            provider,
            message: MessageMatcher::Pattern(regex),
        })
    }

    pub fn provider(&self) -> &ProviderFamily {
        &self.provider
    }

    /// Substring or pattern this rule looks for
    pub fn pattern(&self) -> &str {
        match &self.message {
            MessageMatcher::Contains(needle) => needle,
            MessageMatcher::Pattern(regex) => regex.as_str(),
        }
    }

    fn matches(&self, provider: &ProviderFamily, message: &str) -> bool {
        &self.provider == provider && self.message.is_match(message)
    }
}

/// Configurable failure classifier
///
/// Holds an ordered list of balance exhaustion rules. The default classifier
/// escalates Anthropic bad requests whose message contains
/// "balance is too low".
#[derive(Debug, Clone)]
pub struct FailureClassifier {
    rules: Vec<BalanceExhaustionRule>,
}

impl FailureClassifier {
    pub fn new(rules: Vec<BalanceExhaustionRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[BalanceExhaustionRule] {
        &self.rules
    }

    /// Classify a completed request
    ///
    /// Total: unknown or malformed failures yield [`FailureSignal::None`].
    pub fn classify(&self, outcome: &RequestOutcome) -> FailureSignal {
        let RequestOutcome::Failure(failure) = outcome else {
            return FailureSignal::None;
        };

        if failure.native_error != UpstreamErrorKind::BadRequest {
            debug!(
                deployment_id = %failure.deployment_id,
                kind = ?failure.native_error,
                "ordinary upstream failure"
            );
            return FailureSignal::None;
        }

        let (Some(provider), Some(message)) = (
            failure.provider_family(),
            failure.provider_error_message.as_deref(),
        ) else {
            debug!(deployment_id = %failure.deployment_id, "bad request without provider or message");
            return FailureSignal::None;
        };

        if !self.rules.iter().any(|rule| rule.matches(&provider, message)) {
            debug!(
                deployment_id = %failure.deployment_id,
                provider = %provider,
                "bad request treated as client error"
            );
            return FailureSignal::None;
        }

        let reason = CooldownReason::BalanceExhausted;
        warn!(
            deployment_id = %failure.deployment_id,
            provider = %provider,
            status = ?failure.status_code,
            reason = %reason,
            "escalating bad request to forced cooldown"
        );

        FailureSignal::ForcedCooldown(ForcedCooldown {
            deployment_id: failure.deployment_id.clone(),
            reason,
            suggested_retry_after: failure.retry_after,
        })
    }
}

impl Default for FailureClassifier {
    fn default() -> Self {
        Self::new(vec![BalanceExhaustionRule::new(
            DEFAULT_BALANCE_PROVIDER,
            DEFAULT_BALANCE_MESSAGE,
        )])
    }
}

/// Classify with the default rules
pub fn classify(outcome: &RequestOutcome) -> FailureSignal {
    FailureClassifier::default().classify(outcome)
}
