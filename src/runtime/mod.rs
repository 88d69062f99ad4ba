use std::sync::Arc;

use tracing::debug;

use crate::catalog;
use crate::classify::{self, FileKind};
use crate::core::error::{ConfigError, TranslateError};
use crate::core::traits::ProviderChannel;
use crate::core::types::{
    FileTranslationRequest, ProviderConfig, ProviderKind, TextTranslationRequest,
};
use crate::probe::{self, ProbeOutcome};
use crate::prompt;
use crate::providers::openai_compat::OpenAiCompatAdapter;
use crate::providers::openai_wire;
use crate::providers::resolver::{self, GatewayConfig};

/// Output token ceiling for plain text translation.
const TEXT_MAX_OUTPUT_TOKENS: u32 = 2_000;

/// Sampling temperature for text translation; low to keep output literal.
const TEXT_TEMPERATURE: f64 = 0.3;

const MISSING_FIELDS_ERROR: &str = "Missing required fields";
const MISSING_LANGUAGES_ERROR: &str = "Source and target languages are required";

/// Stateless request orchestrator: resolves a provider target per request,
/// assembles the prompt, and normalizes the response. Holds no per-request
/// state; one instance serves the whole process.
pub struct TranslatorRuntime {
    channel: Arc<dyn ProviderChannel>,
    gateway: GatewayConfig,
}

pub struct TranslatorRuntimeBuilder {
    channel: Option<Arc<dyn ProviderChannel>>,
    gateway: GatewayConfig,
}

impl TranslatorRuntime {
    pub fn builder() -> TranslatorRuntimeBuilder {
        TranslatorRuntimeBuilder {
            channel: None,
            gateway: GatewayConfig::default(),
        }
    }

    /// Translates free text between two catalog languages. Returns the model
    /// output verbatim; trimming is the caller's concern.
    pub async fn translate_text(
        &self,
        request: &TextTranslationRequest,
    ) -> Result<String, TranslateError> {
        if request.text.trim().is_empty()
            || request.source_lang.trim().is_empty()
            || request.target_lang.trim().is_empty()
        {
            return Err(TranslateError::validation(MISSING_FIELDS_ERROR));
        }

        let provider = with_default_model(&request.provider);
        let target = resolver::resolve_target(&provider, &self.gateway);
        debug!(kind = ?target.kind, model = %target.model_ref, "translating text");

        let instruction = prompt::text_translation(
            catalog::language_name(&request.source_lang),
            catalog::language_name(&request.target_lang),
            &request.text,
        );
        let body = openai_wire::encode_chat_request(
            &target,
            &instruction,
            Some(TEXT_TEMPERATURE),
            Some(TEXT_MAX_OUTPUT_TOKENS),
        );

        let payload = self.channel.chat_completion(&target, &body).await?;
        let translated =
            openai_wire::decode_chat_response(&payload, target.kind.clone(), &target.model_ref)?;
        Ok(translated)
    }

    /// Translates an uploaded file. Image-like uploads go through vision
    /// extraction; text-like uploads through a structure-preserving prompt;
    /// everything else is rejected.
    pub async fn translate_file(
        &self,
        request: &FileTranslationRequest,
    ) -> Result<String, TranslateError> {
        if request.source_lang.trim().is_empty() || request.target_lang.trim().is_empty() {
            return Err(TranslateError::validation(MISSING_LANGUAGES_ERROR));
        }

        let kind = classify::classify(&request.media_type, &request.file_name)
            .ok_or(TranslateError::UnsupportedFile)?;

        let provider = with_default_model(&request.provider);
        let source_name = catalog::language_name(&request.source_lang);
        let target_name = catalog::language_name(&request.target_lang);

        let (target, body) = match kind {
            FileKind::Image => {
                let target = resolver::resolve_vision_target(&provider, &self.gateway);
                let data_url = classify::image_data_url(&request.media_type, &request.bytes);
                let instruction = prompt::image_extraction(source_name, target_name);
                let body = openai_wire::encode_vision_request(&target, &instruction, &data_url);
                (target, body)
            }
            FileKind::Text => {
                let target = resolver::resolve_target(&provider, &self.gateway);
                let content = String::from_utf8_lossy(&request.bytes);
                let instruction = prompt::document_translation(source_name, target_name, &content);
                let body = openai_wire::encode_chat_request(&target, &instruction, None, None);
                (target, body)
            }
        };

        debug!(
            kind = ?target.kind,
            model = %target.model_ref,
            file = %request.file_name,
            "translating file"
        );

        let payload = self.channel.chat_completion(&target, &body).await?;
        let translated =
            openai_wire::decode_chat_response(&payload, target.kind.clone(), &target.model_ref)?;
        Ok(translated)
    }

    /// Non-token-consuming connectivity check. Never fails: every error is
    /// folded into the returned report.
    pub async fn check_availability(&self, provider: &ProviderConfig) -> ProbeOutcome {
        if provider.model_id.trim().is_empty() {
            return probe::missing_model();
        }

        let target = resolver::resolve_target(provider, &self.gateway);
        if target.kind == ProviderKind::Gateway {
            return probe::gateway_available();
        }

        match self.channel.list_models(&target).await {
            Ok(payload) => probe::from_models_payload(&payload, &provider.model_id),
            Err(error) => probe::from_provider_error(&error),
        }
    }
}

impl TranslatorRuntimeBuilder {
    pub fn with_channel(mut self, channel: Arc<dyn ProviderChannel>) -> Self {
        self.channel = Some(channel);
        self
    }

    pub fn with_gateway(mut self, gateway: GatewayConfig) -> Self {
        self.gateway = gateway;
        self
    }

    pub fn build(self) -> Result<TranslatorRuntime, ConfigError> {
        let channel = match self.channel {
            Some(channel) => channel,
            None => Arc::new(OpenAiCompatAdapter::new()?),
        };

        Ok(TranslatorRuntime {
            channel,
            gateway: self.gateway,
        })
    }
}

fn with_default_model(provider: &ProviderConfig) -> ProviderConfig {
    ProviderConfig {
        api_key: provider.api_key.clone(),
        base_url: provider.base_url.clone(),
        model_id: catalog::model_or_default(&provider.model_id),
    }
}
