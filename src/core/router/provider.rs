//! Provider family detection
//!
//! Deployments are grouped into provider families so that failure rules can
//! target one upstream vendor (e.g. only Anthropic overloads `400` to report an
//! exhausted prepaid balance).

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// `provider/model` prefix used by litellm-style model strings
static PROVIDER_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<provider>[A-Za-z0-9_\-]+)/.+$").expect("provider prefix pattern is valid")
});

/// Upstream provider family
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProviderFamily {
    Anthropic,
    OpenAI,
    Azure,
    VertexAI,
    Bedrock,
    Gemini,
    DeepSeek,
    /// Any provider without dedicated handling, stored lowercase
    Other(String),
}

impl ProviderFamily {
    /// Infer the provider family from an upstream model string
    ///
    /// An explicit `provider/` prefix always wins. Bare model names fall back
    /// to well-known name prefixes.
    pub fn from_model(model: &str) -> Self {
        if let Some(captures) = PROVIDER_PREFIX.captures(model) {
            return Self::from(&captures["provider"]);
        }

        let lower = model.to_ascii_lowercase();
        if lower.starts_with("claude") {
            Self::Anthropic
        } else if lower.starts_with("gpt-") || lower.starts_with("o1") || lower.starts_with("o3") {
            Self::OpenAI
        } else if lower.starts_with("gemini") {
            Self::Gemini
        } else if lower.starts_with("deepseek") {
            Self::DeepSeek
        } else {
            Self::Other(lower)
        }
    }

    /// Canonical lowercase name
    pub fn as_str(&self) -> &str {
        match self {
            Self::Anthropic => "anthropic",
            Self::OpenAI => "openai",
            Self::Azure => "azure",
            Self::VertexAI => "vertex_ai",
            Self::Bedrock => "bedrock",
            Self::Gemini => "gemini",
            Self::DeepSeek => "deepseek",
            Self::Other(name) => name,
        }
    }

    /// Whether this is a family with dedicated handling
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<&str> for ProviderFamily {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "anthropic" => Self::Anthropic,
            "openai" => Self::OpenAI,
            "azure" => Self::Azure,
            "vertex_ai" | "vertex" | "vertexai" => Self::VertexAI,
            "bedrock" => Self::Bedrock,
            "gemini" => Self::Gemini,
            "deepseek" => Self::DeepSeek,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for ProviderFamily {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<ProviderFamily> for String {
    fn from(value: ProviderFamily) -> Self {
        value.as_str().to_string()
    }
}

impl FromStr for ProviderFamily {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for ProviderFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
