use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::core::error::{ConfigError, ProviderError};
use crate::core::types::ProviderKind;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Timeout-bounded JSON transport. One attempt per request: failures are
/// surfaced to the caller, never retried.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    timeout_ms: u64,
}

impl HttpTransport {
    pub fn new(timeout_ms: u64) -> Result<Self, ConfigError> {
        Self::with_client(reqwest::Client::new(), timeout_ms)
    }

    pub fn with_client(client: reqwest::Client, timeout_ms: u64) -> Result<Self, ConfigError> {
        if timeout_ms == 0 {
            return Err(ConfigError::InvalidTimeout { timeout_ms });
        }

        Ok(Self { client, timeout_ms })
    }

    pub async fn get_json<TResp>(
        &self,
        provider: ProviderKind,
        model: Option<&str>,
        url: &str,
        bearer: Option<&str>,
    ) -> Result<TResp, ProviderError>
    where
        TResp: DeserializeOwned,
    {
        self.execute_json_request(provider, model, Method::GET, url, bearer, None)
            .await
    }

    pub async fn post_json<TReq, TResp>(
        &self,
        provider: ProviderKind,
        model: Option<&str>,
        url: &str,
        bearer: Option<&str>,
        body: &TReq,
    ) -> Result<TResp, ProviderError>
    where
        TReq: Serialize + ?Sized,
        TResp: DeserializeOwned,
    {
        let payload = serde_json::to_vec(body).map_err(|error| ProviderError::Serialization {
            provider: provider.clone(),
            model: model.map(str::to_string),
            request_id: None,
            message: error.to_string(),
        })?;

        self.execute_json_request(provider, model, Method::POST, url, bearer, Some(payload))
            .await
    }

    async fn execute_json_request<TResp>(
        &self,
        provider: ProviderKind,
        model: Option<&str>,
        method: Method,
        url: &str,
        bearer: Option<&str>,
        body: Option<Vec<u8>>,
    ) -> Result<TResp, ProviderError>
    where
        TResp: DeserializeOwned,
    {
        let headers = build_headers(&provider, model, bearer)?;
        let model_owned = model.map(str::to_string);

        let mut request_builder = self
            .client
            .request(method, url)
            .timeout(Duration::from_millis(self.timeout_ms))
            .headers(headers);

        if let Some(payload) = body {
            request_builder = request_builder
                .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                .body(payload);
        }

        let response = match request_builder.send().await {
            Ok(response) => response,
            Err(error) => {
                return Err(ProviderError::Transport {
                    provider,
                    request_id: None,
                    message: error.to_string(),
                });
            }
        };

        let status_code = response.status().as_u16();
        let request_id = extract_request_id(response.headers());

        if !response.status().is_success() {
            return Err(self
                .build_status_error(&provider, model_owned.as_deref(), status_code, request_id, response)
                .await);
        }

        response
            .json::<TResp>()
            .await
            .map_err(|error| ProviderError::Serialization {
                provider,
                model: model_owned,
                request_id,
                message: error.to_string(),
            })
    }

    async fn build_status_error(
        &self,
        provider: &ProviderKind,
        model: Option<&str>,
        status_code: u16,
        request_id: Option<String>,
        response: Response,
    ) -> ProviderError {
        let message = match response.text().await {
            Ok(body) if !body.trim().is_empty() => body,
            Ok(_) => format!("http status {status_code}"),
            Err(error) => {
                format!("http status {status_code}; failed to read response body: {error}")
            }
        };

        ProviderError::Status {
            provider: provider.clone(),
            model: model.map(str::to_string),
            status_code,
            request_id,
            message,
        }
    }
}

fn build_headers(
    provider: &ProviderKind,
    model: Option<&str>,
    bearer: Option<&str>,
) -> Result<HeaderMap, ProviderError> {
    let mut headers = HeaderMap::new();

    if let Some(token) = bearer {
        let auth_value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|error| {
            ProviderError::Protocol {
                provider: provider.clone(),
                model: model.map(str::to_string),
                request_id: None,
                message: format!("invalid bearer token header value: {error}"),
            }
        })?;
        headers.insert(AUTHORIZATION, auth_value);
    }

    Ok(headers)
}

fn extract_request_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get(HeaderName::from_static(REQUEST_ID_HEADER))
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}
