use serde::{Deserialize, Serialize};

/// Which arm of the provider selection a request resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProviderKind {
    /// Caller-supplied OpenAI-compatible endpoint, authenticated with the
    /// caller's API key.
    Custom,
    /// Default managed gateway; no caller credential required.
    Gateway,
}

/// Per-request provider selection input. Reconstructed from caller input on
/// every request and never mutated by the core.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model_id: String,
}

/// Fully resolved call target produced by the provider resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    pub kind: ProviderKind,
    /// Normalized base URL without a trailing slash.
    pub base_url: String,
    /// Bearer credential to attach, when one applies to this arm.
    pub bearer: Option<String>,
    /// Model reference as the endpoint expects it. On the gateway arm this
    /// carries the `openai/` namespace prefix.
    pub model_ref: String,
}

impl ResolvedTarget {
    pub fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    pub fn models_url(&self) -> String {
        format!("{}/models", self.base_url)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextTranslationRequest {
    pub text: String,
    pub source_lang: String,
    pub target_lang: String,
    pub provider: ProviderConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTranslationRequest {
    pub bytes: Vec<u8>,
    pub media_type: String,
    pub file_name: String,
    pub source_lang: String,
    pub target_lang: String,
    pub provider: ProviderConfig,
}

/// Connectivity report for a configured endpoint/model pair.
///
/// `model_exists` is informational only: a reachable endpoint reports
/// `available: true` whether or not the model appeared in its listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityReport {
    pub available: bool,
    #[serde(rename = "modelExists", skip_serializing_if = "Option::is_none")]
    pub model_exists: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
