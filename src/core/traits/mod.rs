use async_trait::async_trait;
use serde_json::Value;

use crate::core::error::ProviderError;
use crate::core::types::ResolvedTarget;

/// Channel contract between the orchestrating runtime and a concrete
/// provider transport.
///
/// The runtime resolves a target per request and hands the encoded payload to
/// the channel; the channel owns authentication headers, timeouts, and raw
/// payload exchange. Keeping this seam async-trait shaped lets tests swap in
/// an in-memory channel without touching the network.
#[async_trait]
pub trait ProviderChannel: Send + Sync {
    /// Executes a single non-streaming chat completion against the target.
    async fn chat_completion(
        &self,
        target: &ResolvedTarget,
        body: &Value,
    ) -> Result<Value, ProviderError>;

    /// Fetches the endpoint's model listing. Connectivity probe only; must
    /// not consume tokens.
    async fn list_models(&self, target: &ResolvedTarget) -> Result<Value, ProviderError>;
}
