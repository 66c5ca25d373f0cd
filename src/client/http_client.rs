use std::time::Duration;

use log::debug;
use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use super::error::ApiError;
use super::query_string::QueryString;

/// One fixed connect/read budget applied to every call. No per-call
/// override and no retries.
const TIMEOUT: Duration = Duration::from_secs(100);

const DEFAULT_POST_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// HTTP client for one blockchain.info API host.
///
/// Wraps a [`reqwest::Client`] with the request/response pipeline shared by
/// every explorer: an optional `api_code` is appended to each call, bodies
/// are inspected for service-reported error envelopes, and successful
/// bodies are decoded either generically or through a caller-supplied
/// normalizer.
///
/// The client is safe to share across tasks; explorers hold it behind an
/// `Arc` and issue exactly one request per operation.
#[derive(Debug)]
pub struct BlockchainHttpClient {
    base_url: Url,
    client: reqwest::Client,
    api_code: Option<String>,
}

impl BlockchainHttpClient {
    /// Creates a client for `base_url` with no API code.
    pub fn new(base_url: Url) -> Result<Self, ApiError> {
        Self::with_api_code(base_url, None)
    }

    /// Creates a client that appends `api_code` to every request.
    pub fn with_api_code(mut base_url: Url, api_code: Option<String>) -> Result<Self, ApiError> {
        // Routes are joined relative to the base, so its path must end with
        // a slash or the last segment would be replaced.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let client = reqwest::Client::builder().timeout(TIMEOUT).build()?;
        Ok(Self {
            base_url,
            client,
            api_code,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn api_code(&self) -> Option<&str> {
        self.api_code.as_deref()
    }

    /// Performs a GET and decodes the body via the target type's `Deserialize`.
    pub async fn get<T: DeserializeOwned>(
        &self,
        route: &str,
        query: Option<QueryString>,
    ) -> Result<T, ApiError> {
        let body = self.get_text(route, query).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Performs a GET and hands the raw body text to `normalize`.
    ///
    /// Used by endpoints whose JSON shapes are irregular and need patching
    /// before generic decoding.
    pub async fn get_with<T, F>(
        &self,
        route: &str,
        query: Option<QueryString>,
        normalize: F,
    ) -> Result<T, ApiError>
    where
        F: FnOnce(&str) -> Result<T, ApiError>,
    {
        let body = self.get_text(route, query).await?;
        normalize(&body)
    }

    /// Performs a POST with a JSON-serialized body and generic decoding.
    ///
    /// When `multipart` is set the JSON text is sent as the single part of
    /// a multipart form instead of the request body.
    pub async fn post<B, T>(
        &self,
        route: &str,
        body: &B,
        multipart: bool,
        content_type: Option<&str>,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let text = self.post_text(route, body, multipart, content_type).await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Performs a POST and hands the raw body text to `normalize`.
    pub async fn post_with<B, T, F>(
        &self,
        route: &str,
        body: &B,
        multipart: bool,
        content_type: Option<&str>,
        normalize: F,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        F: FnOnce(&str) -> Result<T, ApiError>,
    {
        let text = self.post_text(route, body, multipart, content_type).await?;
        normalize(&text)
    }

    async fn get_text(&self, route: &str, query: Option<QueryString>) -> Result<String, ApiError> {
        let mut query = query.unwrap_or_default();
        if let Some(code) = &self.api_code {
            // Internal append; must never trip the duplicate-key check.
            query.upsert("api_code", code);
        }
        let mut route = route.to_string();
        if !query.is_empty() {
            route.push_str(&query.to_string());
        }
        let url = self.base_url.join(&route)?;
        debug!(url = url.as_str(); "GET");

        let response = self.client.get(url).send().await?;
        validate_response(response).await
    }

    async fn post_text<B>(
        &self,
        route: &str,
        body: &B,
        multipart: bool,
        content_type: Option<&str>,
    ) -> Result<String, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let mut route = route.to_string();
        if let Some(code) = &self.api_code {
            route.push_str(&format!("?api_code={code}"));
        }
        let url = self.base_url.join(&route)?;
        debug!(url = url.as_str(); "POST");

        let json = serde_json::to_string(body)?;
        let content_type = content_type.unwrap_or(DEFAULT_POST_CONTENT_TYPE);
        let request = self.client.post(url);
        let request = if multipart {
            let part = reqwest::multipart::Part::text(json).mime_str(content_type)?;
            request.multipart(reqwest::multipart::Form::new().part("data", part))
        } else {
            request.header(CONTENT_TYPE, content_type).body(json)
        };

        let response = request.send().await?;
        validate_response(response).await
    }
}

/// Translates the HTTP response into either its body text or [`ApiError::Server`].
///
/// Three cases:
/// - success status whose body starts with the `{"error":` envelope is a
///   logical failure reported as status 400
/// - a body of exactly `Block Not Found` (any case) is normalized to a 404
///   regardless of the status code the server actually used
/// - any other non-success status carries the status reason and raw body
async fn validate_response(response: reqwest::Response) -> Result<String, ApiError> {
    let status = response.status();
    let body = response.text().await?;

    if status.is_success() {
        if body.starts_with("{\"error\":") {
            let envelope: serde_json::Value = serde_json::from_str(&body)?;
            let message = envelope
                .get("error")
                .and_then(serde_json::Value::as_str)
                .unwrap_or_default()
                .to_string();
            return Err(ApiError::Server {
                status: StatusCode::BAD_REQUEST,
                message,
            });
        }
        return Ok(body);
    }

    if body.eq_ignore_ascii_case("Block Not Found") {
        return Err(ApiError::Server {
            status: StatusCode::NOT_FOUND,
            message: "Block Not Found".to_string(),
        });
    }

    let reason = status.canonical_reason().unwrap_or("Unknown");
    Err(ApiError::Server {
        status,
        message: format!("{reason}: {body}"),
    })
}
