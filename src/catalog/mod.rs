use std::sync::OnceLock;

use indexmap::IndexMap;
use serde::Serialize;

/// Model submitted when the caller does not pick one.
pub const DEFAULT_TEXT_MODEL: &str = "gpt-4o-mini";

/// Model pinned on the gateway arm for image translation; the gateway's
/// vision routing differs from its text routing.
pub const DEFAULT_VISION_MODEL: &str = "gpt-4o";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
    pub flag: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelChoice {
    pub id: &'static str,
    pub label: &'static str,
    pub provider: &'static str,
}

const LANGUAGES: &[Language] = &[
    Language { code: "en", name: "English", flag: "\u{1F1FA}\u{1F1F8}" },
    Language { code: "es", name: "Spanish", flag: "\u{1F1EA}\u{1F1F8}" },
    Language { code: "fr", name: "French", flag: "\u{1F1EB}\u{1F1F7}" },
    Language { code: "de", name: "German", flag: "\u{1F1E9}\u{1F1EA}" },
    Language { code: "it", name: "Italian", flag: "\u{1F1EE}\u{1F1F9}" },
    Language { code: "pt", name: "Portuguese", flag: "\u{1F1F5}\u{1F1F9}" },
    Language { code: "ru", name: "Russian", flag: "\u{1F1F7}\u{1F1FA}" },
    Language { code: "ja", name: "Japanese", flag: "\u{1F1EF}\u{1F1F5}" },
    Language { code: "ko", name: "Korean", flag: "\u{1F1F0}\u{1F1F7}" },
    Language { code: "zh", name: "Chinese", flag: "\u{1F1E8}\u{1F1F3}" },
    Language { code: "ar", name: "Arabic", flag: "\u{1F1F8}\u{1F1E6}" },
    Language { code: "hi", name: "Hindi", flag: "\u{1F1EE}\u{1F1F3}" },
];

const MODELS: &[ModelChoice] = &[
    ModelChoice { id: "gpt-4o", label: "GPT-4o", provider: "OpenAI" },
    ModelChoice { id: "gpt-4o-mini", label: "GPT-4o Mini", provider: "OpenAI" },
    ModelChoice { id: "gpt-4-turbo", label: "GPT-4 Turbo", provider: "OpenAI" },
    ModelChoice { id: "gpt-4", label: "GPT-4", provider: "OpenAI" },
    ModelChoice { id: "gpt-3.5-turbo", label: "GPT-3.5 Turbo", provider: "OpenAI" },
    ModelChoice {
        id: "claude-3-5-sonnet-20241022",
        label: "Claude 3.5 Sonnet",
        provider: "Anthropic",
    },
    ModelChoice {
        id: "claude-3-5-haiku-20241022",
        label: "Claude 3.5 Haiku",
        provider: "Anthropic",
    },
    ModelChoice {
        id: "claude-3-opus-20240229",
        label: "Claude 3 Opus",
        provider: "Anthropic",
    },
    ModelChoice { id: "gemini-2.0-flash-exp", label: "Gemini 2.0 Flash", provider: "Google" },
    ModelChoice { id: "gemini-1.5-pro-latest", label: "Gemini 1.5 Pro", provider: "Google" },
    ModelChoice { id: "gemini-1.5-flash-latest", label: "Gemini 1.5 Flash", provider: "Google" },
    ModelChoice { id: "llama-3.3-70b-versatile", label: "Llama 3.3 70B", provider: "Meta" },
    ModelChoice { id: "llama-3.1-70b-versatile", label: "Llama 3.1 70B", provider: "Meta" },
];

fn language_index() -> &'static IndexMap<&'static str, &'static Language> {
    static INDEX: OnceLock<IndexMap<&'static str, &'static Language>> = OnceLock::new();
    INDEX.get_or_init(|| {
        LANGUAGES
            .iter()
            .map(|language| (language.code, language))
            .collect()
    })
}

/// All selectable languages, in presentation order.
pub fn languages() -> &'static [Language] {
    LANGUAGES
}

/// All selectable models, grouped by provider label in presentation order.
pub fn models() -> &'static [ModelChoice] {
    MODELS
}

/// Display name for a language code; unknown codes pass through unchanged.
pub fn language_name(code: &str) -> &str {
    match language_index().get(code) {
        Some(language) => language.name,
        None => code,
    }
}

/// Display label for a model id; unknown ids pass through unchanged.
pub fn model_label(model_id: &str) -> &str {
    MODELS
        .iter()
        .find(|choice| choice.id == model_id)
        .map(|choice| choice.label)
        .unwrap_or(model_id)
}

/// Applies the default text model when the caller left the choice blank.
pub fn model_or_default(model_id: &str) -> String {
    let trimmed = model_id.trim();
    if trimmed.is_empty() {
        DEFAULT_TEXT_MODEL.to_string()
    } else {
        trimmed.to_string()
    }
}
