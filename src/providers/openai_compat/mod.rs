use async_trait::async_trait;
use serde_json::Value;

use crate::core::error::{ConfigError, ProviderError};
use crate::core::traits::ProviderChannel;
use crate::core::types::ResolvedTarget;
use crate::transport::http::HttpTransport;

/// Wall-clock budget for translation calls.
pub const CHAT_TIMEOUT_MS: u64 = 30_000;

/// Wall-clock budget for the availability probe.
pub const PROBE_TIMEOUT_MS: u64 = 10_000;

/// HTTP adapter speaking the OpenAI-compatible wire protocol. Both resolver
/// arms use it; the target decides the base URL and bearer credential.
pub struct OpenAiCompatAdapter {
    chat_transport: HttpTransport,
    probe_transport: HttpTransport,
}

impl OpenAiCompatAdapter {
    pub fn new() -> Result<Self, ConfigError> {
        Self::with_timeouts(CHAT_TIMEOUT_MS, PROBE_TIMEOUT_MS)
    }

    pub fn with_timeouts(chat_timeout_ms: u64, probe_timeout_ms: u64) -> Result<Self, ConfigError> {
        let client = reqwest::Client::new();
        Ok(Self {
            chat_transport: HttpTransport::with_client(client.clone(), chat_timeout_ms)?,
            probe_transport: HttpTransport::with_client(client, probe_timeout_ms)?,
        })
    }
}

#[async_trait]
impl ProviderChannel for OpenAiCompatAdapter {
    async fn chat_completion(
        &self,
        target: &ResolvedTarget,
        body: &Value,
    ) -> Result<Value, ProviderError> {
        self.chat_transport
            .post_json(
                target.kind.clone(),
                Some(target.model_ref.as_str()),
                &target.chat_completions_url(),
                target.bearer.as_deref(),
                body,
            )
            .await
    }

    async fn list_models(&self, target: &ResolvedTarget) -> Result<Value, ProviderError> {
        self.probe_transport
            .get_json(
                target.kind.clone(),
                Some(target.model_ref.as_str()),
                &target.models_url(),
                target.bearer.as_deref(),
            )
            .await
    }
}
