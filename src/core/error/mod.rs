use crate::core::types::ProviderKind;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid timeout: {timeout_ms} ms")]
    InvalidTimeout { timeout_ms: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error(
        "provider transport error{context}: {message}",
        context = format_context(Some(.provider), None, .request_id.as_deref(), None)
    )]
    Transport {
        provider: ProviderKind,
        request_id: Option<String>,
        message: String,
    },
    #[error(
        "provider status error{context}: {message}",
        context = format_context(
            Some(.provider),
            .model.as_deref(),
            .request_id.as_deref(),
            Some(*.status_code)
        )
    )]
    Status {
        provider: ProviderKind,
        model: Option<String>,
        status_code: u16,
        request_id: Option<String>,
        message: String,
    },
    #[error(
        "provider protocol error{context}: {message}",
        context = format_context(
            Some(.provider),
            .model.as_deref(),
            .request_id.as_deref(),
            None
        )
    )]
    Protocol {
        provider: ProviderKind,
        model: Option<String>,
        request_id: Option<String>,
        message: String,
    },
    #[error(
        "provider serialization error{context}: {message}",
        context = format_context(
            Some(.provider),
            .model.as_deref(),
            .request_id.as_deref(),
            None
        )
    )]
    Serialization {
        provider: ProviderKind,
        model: Option<String>,
        request_id: Option<String>,
        message: String,
    },
}

/// Service-level failure taxonomy: validation problems are the caller's and
/// map to HTTP 400; everything else surfaces as an upstream failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslateError {
    #[error("{message}")]
    Validation { message: String },
    #[error("Unsupported file type. Please upload .md, .mdx, .txt, or image files.")]
    UnsupportedFile,
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl TranslateError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. } | Self::UnsupportedFile)
    }
}

fn format_context(
    provider: Option<&ProviderKind>,
    model: Option<&str>,
    request_id: Option<&str>,
    status_code: Option<u16>,
) -> String {
    let mut context = Vec::new();

    if let Some(provider) = provider {
        context.push(format!("provider={provider:?}"));
    }
    if let Some(model) = model {
        context.push(format!("model={model}"));
    }
    if let Some(request_id) = request_id {
        context.push(format!("request_id={request_id}"));
    }
    if let Some(status_code) = status_code {
        context.push(format!("status_code={status_code}"));
    }

    if context.is_empty() {
        String::new()
    } else {
        format!(" [{}]", context.join(", "))
    }
}
