//! Availability probing. Every outcome is a well-formed report paired with
//! the HTTP status the transport layer should surface; nothing in this module
//! fails outward.

use serde_json::Value;

use crate::core::error::ProviderError;
use crate::core::types::AvailabilityReport;
use crate::providers::openai_wire;

pub const GATEWAY_MESSAGE: &str = "Using Vercel AI Gateway";
pub const MISSING_MODEL_ERROR: &str = "Model is required";

const MODEL_LISTED_MESSAGE: &str = "API is available and model is accessible";
const MODEL_UNLISTED_MESSAGE: &str = "API is available, but model may not be in the list";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub report: AvailabilityReport,
    pub http_status: u16,
}

/// Blank model id; a caller mistake, reported without any network traffic.
pub fn missing_model() -> ProbeOutcome {
    ProbeOutcome {
        report: AvailabilityReport {
            available: false,
            model_exists: None,
            message: None,
            error: Some(MISSING_MODEL_ERROR.to_string()),
        },
        http_status: 400,
    }
}

/// Gateway arm: assumed reachable without probing; the gateway's own routing
/// reports problems at translation time.
pub fn gateway_available() -> ProbeOutcome {
    ProbeOutcome {
        report: AvailabilityReport {
            available: true,
            model_exists: None,
            message: Some(GATEWAY_MESSAGE.to_string()),
            error: None,
        },
        http_status: 200,
    }
}

/// A 2xx model listing always means available; whether the model id appears
/// is informational only.
pub fn from_models_payload(payload: &Value, model_id: &str) -> ProbeOutcome {
    let model_ids = match openai_wire::decode_models_list(payload) {
        Ok(model_ids) => model_ids,
        Err(error) => return from_provider_error(&error),
    };

    let model_exists = model_ids.iter().any(|candidate| candidate == model_id);
    let message = if model_exists {
        MODEL_LISTED_MESSAGE
    } else {
        MODEL_UNLISTED_MESSAGE
    };

    ProbeOutcome {
        report: AvailabilityReport {
            available: true,
            model_exists: Some(model_exists),
            message: Some(message.to_string()),
            error: None,
        },
        http_status: 200,
    }
}

/// Folds a transport-layer failure into an unavailable report. Upstream
/// status codes pass through; everything else is an internal 500.
pub fn from_provider_error(error: &ProviderError) -> ProbeOutcome {
    let (http_status, message) = match error {
        ProviderError::Status {
            status_code,
            message,
            ..
        } => (*status_code, upstream_error_text(*status_code, message)),
        ProviderError::Transport { message, .. } => (500, message.clone()),
        ProviderError::Protocol { message, .. } | ProviderError::Serialization { message, .. } => {
            (500, message.clone())
        }
    };

    ProbeOutcome {
        report: AvailabilityReport {
            available: false,
            model_exists: None,
            message: None,
            error: Some(message),
        },
        http_status,
    }
}

fn upstream_error_text(status_code: u16, body: &str) -> String {
    match openai_wire::parse_error_envelope(body) {
        Some(envelope) => envelope.message,
        None => format!("API returned status {status_code}"),
    }
}
