use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::ProviderError;
use crate::providers::{first_successful_endpoint, join_segments, split_batch, with_timeout, Provider};

/// LibreTranslate client for interacting with a LibreTranslate-compatible API
#[derive(Debug)]
pub struct LibreTranslate {
    /// HTTP client for API requests
    client: Client,
    /// Endpoint URLs (the full `/translate` path), tried in order
    endpoints: Vec<String>,
    /// Optional API key for instances that require one
    api_key: String,
    /// Bound on a single call
    timeout: Duration,
}

/// LibreTranslate translate request
#[derive(Debug, Serialize)]
pub struct LibreTranslateRequest<'a> {
    /// Text to translate
    pub q: &'a str,
    /// Source language code
    pub source: &'a str,
    /// Target language code
    pub target: &'a str,
    /// Input format, always plain text here
    pub format: &'a str,
    /// API key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<&'a str>,
}

/// LibreTranslate response
#[derive(Debug, Deserialize)]
pub struct LibreTranslateResponse {
    /// Translated text
    #[serde(rename = "translatedText")]
    pub translated_text: String,
}

impl LibreTranslate {
    /// Create a new LibreTranslate client
    pub fn new(endpoints: Vec<String>, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            endpoints,
            api_key: String::new(),
            timeout,
        }
    }

    /// Set the API key sent with every request
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    /// Extract the translated text from a response body
    pub fn parse_response(body: &str) -> Result<String, ProviderError> {
        serde_json::from_str::<LibreTranslateResponse>(body)
            .map(|response| response.translated_text)
            .map_err(|e| ProviderError::ParseError(format!("Unexpected LibreTranslate response: {}", e)))
    }

    async fn call_endpoint(
        &self,
        endpoint: &str,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, ProviderError> {
        let request = LibreTranslateRequest {
            q: text,
            source: source_language,
            target: target_language,
            format: "text",
            api_key: (!self.api_key.is_empty()).then_some(self.api_key.as_str()),
        };

        let response = self.client.post(endpoint)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("LibreTranslate error ({}): {}", status, error_text);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        let body = response.text().await?;
        Self::parse_response(&body)
    }
}

#[async_trait]
impl Provider for LibreTranslate {
    fn name(&self) -> &str {
        "libretranslate"
    }

    async fn translate(
        &self,
        texts: &[String],
        source_language: &str,
        target_language: &str,
    ) -> Result<Vec<String>, ProviderError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let joined = join_segments(texts);
        debug!("LibreTranslate: translating {} texts ({} chars)", texts.len(), joined.chars().count());

        let translated = first_successful_endpoint(self.name(), &self.endpoints, |endpoint| {
            with_timeout(
                self.timeout,
                self.call_endpoint(endpoint, &joined, source_language, target_language),
            )
        })
        .await?;

        Ok(split_batch(&translated, texts.len()))
    }
}
