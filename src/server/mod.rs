use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::catalog;
use crate::core::error::TranslateError;
use crate::core::types::{
    AvailabilityReport, FileTranslationRequest, ProviderConfig, TextTranslationRequest,
};
use crate::runtime::TranslatorRuntime;

const TRANSLATION_FAILED_ERROR: &str =
    "Translation failed. Please check your API settings and try again.";
const MISSING_FILE_ERROR: &str = "No file provided";
const INVALID_MULTIPART_ERROR: &str = "Invalid multipart form data";

#[derive(Clone)]
pub struct AppState {
    pub runtime: Arc<TranslatorRuntime>,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/catalog", get(get_catalog))
        .route("/api/translate", post(translate))
        .route("/api/translate-file", post(translate_file))
        .route("/api/models", post(check_models))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslateBody {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    source_lang: Option<String>,
    #[serde(default)]
    target_lang: Option<String>,
    #[serde(default)]
    api_key: Option<String>,
    #[serde(default)]
    base_url: Option<String>,
    #[serde(default)]
    model: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelsBody {
    #[serde(default)]
    api_key: Option<String>,
    #[serde(default)]
    base_url: Option<String>,
    #[serde(default)]
    model: Option<String>,
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn get_catalog() -> Json<Value> {
    Json(json!({
        "languages": catalog::languages(),
        "models": catalog::models(),
    }))
}

async fn translate(
    State(state): State<AppState>,
    Json(body): Json<TranslateBody>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let request = TextTranslationRequest {
        text: body.text.unwrap_or_default(),
        source_lang: body.source_lang.unwrap_or_default(),
        target_lang: body.target_lang.unwrap_or_default(),
        provider: ProviderConfig {
            api_key: body.api_key,
            base_url: body.base_url,
            model_id: body.model.unwrap_or_default(),
        },
    };

    match state.runtime.translate_text(&request).await {
        Ok(translated) => Ok(Json(json!({ "translatedText": translated }))),
        Err(error) => Err(translate_error_response(error)),
    }
}

async fn translate_file(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let form = read_translate_file_form(multipart).await?;

    let Some((bytes, media_type, file_name)) = form.file else {
        return Err(bad_request(MISSING_FILE_ERROR));
    };

    let request = FileTranslationRequest {
        bytes,
        media_type,
        file_name,
        source_lang: form.source_lang.unwrap_or_default(),
        target_lang: form.target_lang.unwrap_or_default(),
        provider: ProviderConfig {
            api_key: form.api_key,
            base_url: form.base_url,
            model_id: form.model.unwrap_or_default(),
        },
    };

    match state.runtime.translate_file(&request).await {
        Ok(translated) => Ok(Json(json!({ "translatedContent": translated }))),
        Err(error) => Err(file_error_response(error)),
    }
}

async fn check_models(
    State(state): State<AppState>,
    Json(body): Json<ModelsBody>,
) -> (StatusCode, Json<AvailabilityReport>) {
    let provider = ProviderConfig {
        api_key: body.api_key,
        base_url: body.base_url,
        model_id: body.model.unwrap_or_default(),
    };

    let outcome = state.runtime.check_availability(&provider).await;
    let status =
        StatusCode::from_u16(outcome.http_status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(outcome.report))
}

#[derive(Debug, Default)]
struct TranslateFileForm {
    file: Option<(Vec<u8>, String, String)>,
    source_lang: Option<String>,
    target_lang: Option<String>,
    api_key: Option<String>,
    base_url: Option<String>,
    model: Option<String>,
}

async fn read_translate_file_form(
    mut multipart: Multipart,
) -> Result<TranslateFileForm, (StatusCode, Json<Value>)> {
    let mut form = TranslateFileForm::default();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(_) => return Err(bad_request(INVALID_MULTIPART_ERROR)),
        };

        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let media_type = field.content_type().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|_| bad_request(INVALID_MULTIPART_ERROR))?;
                form.file = Some((bytes.to_vec(), media_type, file_name));
            }
            "sourceLang" => form.source_lang = read_text_field(field).await?,
            "targetLang" => form.target_lang = read_text_field(field).await?,
            "apiKey" => form.api_key = read_text_field(field).await?,
            "baseUrl" => form.base_url = read_text_field(field).await?,
            "model" => form.model = read_text_field(field).await?,
            _ => {}
        }
    }

    Ok(form)
}

async fn read_text_field(
    field: axum::extract::multipart::Field<'_>,
) -> Result<Option<String>, (StatusCode, Json<Value>)> {
    field
        .text()
        .await
        .map(Some)
        .map_err(|_| bad_request(INVALID_MULTIPART_ERROR))
}

fn translate_error_response(error: TranslateError) -> (StatusCode, Json<Value>) {
    if error.is_validation() {
        return bad_request(&error.to_string());
    }

    error!(%error, "translation failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": TRANSLATION_FAILED_ERROR })),
    )
}

fn file_error_response(error: TranslateError) -> (StatusCode, Json<Value>) {
    if error.is_validation() {
        return bad_request(&error.to_string());
    }

    error!(%error, "file translation failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": error.to_string() })),
    )
}

fn bad_request(message: &str) -> (StatusCode, Json<Value>) {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message })))
}
