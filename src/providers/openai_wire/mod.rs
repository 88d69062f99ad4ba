use serde_json::{Map, Value, json};

use crate::core::error::ProviderError;
use crate::core::types::{ProviderKind, ResolvedTarget};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ErrorEnvelope {
    pub message: String,
    pub code: Option<String>,
    pub error_type: Option<String>,
}

/// Encodes a plain prompt as a single-turn chat completion body.
pub(crate) fn encode_chat_request(
    target: &ResolvedTarget,
    prompt: &str,
    temperature: Option<f64>,
    max_tokens: Option<u32>,
) -> Value {
    let mut body = Map::new();
    body.insert("model".to_string(), Value::String(target.model_ref.clone()));
    body.insert(
        "messages".to_string(),
        json!([{ "role": "user", "content": prompt }]),
    );

    if let Some(temperature) = temperature {
        body.insert("temperature".to_string(), json!(temperature));
    }
    if let Some(max_tokens) = max_tokens {
        body.insert("max_tokens".to_string(), json!(max_tokens));
    }

    Value::Object(body)
}

/// Encodes a vision request: one user message carrying the instruction text
/// and the inline image as a data URL.
pub(crate) fn encode_vision_request(
    target: &ResolvedTarget,
    prompt: &str,
    data_url: &str,
) -> Value {
    json!({
        "model": target.model_ref,
        "messages": [{
            "role": "user",
            "content": [
                { "type": "text", "text": prompt },
                { "type": "image_url", "image_url": { "url": data_url } },
            ],
        }],
    })
}

/// Decodes a chat completion payload down to the assistant text.
pub(crate) fn decode_chat_response(
    payload: &Value,
    provider: ProviderKind,
    model: &str,
) -> Result<String, ProviderError> {
    let root = payload.as_object().ok_or_else(|| {
        protocol_error(provider.clone(), model, "response payload must be a JSON object")
    })?;

    if let Some(envelope) = parse_error_value(root) {
        return Err(protocol_error(
            provider,
            model,
            format_error_message(&envelope),
        ));
    }

    let content = root
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|choices| choices.first())
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(Value::as_str)
        .ok_or_else(|| {
            protocol_error(provider, model, "response missing choices[0].message.content")
        })?;

    Ok(content.to_string())
}

/// Decodes a `/models` listing into its model identifiers, preserving order
/// and dropping duplicates.
pub(crate) fn decode_models_list(payload: &Value) -> Result<Vec<String>, ProviderError> {
    let root = payload.as_object().ok_or_else(|| {
        listing_error("models payload must be a JSON object")
    })?;
    let entries = root
        .get("data")
        .and_then(Value::as_array)
        .ok_or_else(|| listing_error("models payload missing data array"))?;

    let mut model_ids = Vec::new();
    for (index, entry) in entries.iter().enumerate() {
        let model_id = entry
            .as_object()
            .and_then(|model| model.get("id"))
            .and_then(Value::as_str)
            .ok_or_else(|| {
                listing_error(format!("models payload entry missing id at index {index}"))
            })?;

        let model_id = model_id.trim();
        if model_id.is_empty() {
            return Err(listing_error(format!(
                "models payload entry has empty id at index {index}"
            )));
        }

        if !model_ids.iter().any(|candidate| candidate == model_id) {
            model_ids.push(model_id.to_string());
        }
    }

    Ok(model_ids)
}

/// Best-effort parse of a provider error body. Accepts both the structured
/// `{"error": {"message": ...}}` envelope and the bare `{"error": "..."}`
/// form some compatible endpoints return.
pub(crate) fn parse_error_envelope(body: &str) -> Option<ErrorEnvelope> {
    let payload = serde_json::from_str::<Value>(body).ok()?;
    let root = payload.as_object()?;
    parse_error_value(root)
}

pub(crate) fn format_error_message(envelope: &ErrorEnvelope) -> String {
    let mut context = Vec::new();

    if let Some(code) = &envelope.code {
        context.push(format!("code={code}"));
    }
    if let Some(error_type) = &envelope.error_type {
        context.push(format!("type={error_type}"));
    }

    if context.is_empty() {
        envelope.message.clone()
    } else {
        format!("{} [{}]", envelope.message, context.join(", "))
    }
}

fn parse_error_value(root: &Map<String, Value>) -> Option<ErrorEnvelope> {
    match root.get("error")? {
        Value::String(message) => Some(ErrorEnvelope {
            message: message.clone(),
            code: None,
            error_type: None,
        }),
        Value::Object(error) => {
            let message = value_to_string(error.get("message"))
                .unwrap_or_else(|| "provider response reported an error".to_string());

            Some(ErrorEnvelope {
                message,
                code: value_to_string(error.get("code")),
                error_type: value_to_string(error.get("type")),
            })
        }
        _ => None,
    }
}

fn value_to_string(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Some(Value::Number(number)) => Some(number.to_string()),
        Some(Value::Bool(flag)) => Some(flag.to_string()),
        _ => None,
    }
}

fn protocol_error(
    provider: ProviderKind,
    model: &str,
    message: impl Into<String>,
) -> ProviderError {
    ProviderError::Protocol {
        provider,
        model: Some(model.to_string()),
        request_id: None,
        message: message.into(),
    }
}

fn listing_error(message: impl Into<String>) -> ProviderError {
    ProviderError::Protocol {
        provider: ProviderKind::Custom,
        model: None,
        request_id: None,
        message: message.into(),
    }
}
