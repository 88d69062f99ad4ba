use crate::catalog;
use crate::core::types::{ProviderConfig, ProviderKind, ResolvedTarget};

pub const OPENAI_DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const GATEWAY_DEFAULT_BASE_URL: &str = "https://ai-gateway.vercel.sh/v1";
pub const GATEWAY_API_KEY_ENV: &str = "AI_GATEWAY_API_KEY";
pub const GATEWAY_BASE_URL_ENV: &str = "GATEWAY_BASE_URL";

/// Namespace prefix the gateway expects in front of model ids.
const GATEWAY_MODEL_NAMESPACE: &str = "openai";

/// Server-side gateway settings. The api key is never caller-supplied; the
/// gateway enforces its own credentials at translation time when absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub base_url: String,
    pub api_key: Option<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: GATEWAY_DEFAULT_BASE_URL.to_string(),
            api_key: None,
        }
    }
}

impl GatewayConfig {
    pub fn from_env() -> Self {
        let base_url = std::env::var(GATEWAY_BASE_URL_ENV)
            .ok()
            .map(|value| normalize_base_url(Some(&value), GATEWAY_DEFAULT_BASE_URL))
            .unwrap_or_else(|| GATEWAY_DEFAULT_BASE_URL.to_string());

        Self {
            base_url,
            api_key: sanitize_api_key(std::env::var(GATEWAY_API_KEY_ENV).ok()),
        }
    }
}

/// Two-armed provider selection: a caller api key routes to the caller's
/// OpenAI-compatible endpoint; its absence routes to the managed gateway with
/// the model id namespaced as `openai/{model}`.
pub fn resolve_target(config: &ProviderConfig, gateway: &GatewayConfig) -> ResolvedTarget {
    match sanitize_api_key(config.api_key.clone()) {
        Some(api_key) => ResolvedTarget {
            kind: ProviderKind::Custom,
            base_url: normalize_base_url(config.base_url.as_deref(), OPENAI_DEFAULT_BASE_URL),
            bearer: Some(api_key),
            model_ref: config.model_id.clone(),
        },
        None => gateway_target(gateway, &config.model_id),
    }
}

/// Resolver variant for image translation. The custom arm honors the
/// requested model; the gateway arm pins the default vision model because the
/// gateway routes vision traffic differently from text.
pub fn resolve_vision_target(config: &ProviderConfig, gateway: &GatewayConfig) -> ResolvedTarget {
    match sanitize_api_key(config.api_key.clone()) {
        Some(api_key) => ResolvedTarget {
            kind: ProviderKind::Custom,
            base_url: normalize_base_url(config.base_url.as_deref(), OPENAI_DEFAULT_BASE_URL),
            bearer: Some(api_key),
            model_ref: config.model_id.clone(),
        },
        None => gateway_target(gateway, catalog::DEFAULT_VISION_MODEL),
    }
}

fn gateway_target(gateway: &GatewayConfig, model_id: &str) -> ResolvedTarget {
    ResolvedTarget {
        kind: ProviderKind::Gateway,
        base_url: normalize_base_url(Some(&gateway.base_url), GATEWAY_DEFAULT_BASE_URL),
        bearer: gateway.api_key.clone(),
        model_ref: format!("{GATEWAY_MODEL_NAMESPACE}/{model_id}"),
    }
}

fn normalize_base_url(base_url: Option<&str>, default: &str) -> String {
    let trimmed = base_url.unwrap_or_default().trim();
    if trimmed.is_empty() {
        return default.to_string();
    }

    trimmed.trim_end_matches('/').to_string()
}

fn sanitize_api_key(api_key: Option<String>) -> Option<String> {
    api_key.and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
