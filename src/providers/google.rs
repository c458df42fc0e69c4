use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use url::Url;

use crate::errors::ProviderError;
use crate::providers::{first_successful_endpoint, join_segments, split_batch, with_timeout, Provider};

/// Google Translate client for the public `translate_a/single` endpoint
#[derive(Debug)]
pub struct GoogleTranslate {
    /// HTTP client for API requests
    client: Client,
    /// Endpoint URLs, tried in order
    endpoints: Vec<String>,
    /// Bound on a single call
    timeout: Duration,
}

impl GoogleTranslate {
    /// Create a new Google Translate client
    pub fn new(endpoints: Vec<String>, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            endpoints,
            timeout,
        }
    }

    /// Build the request URL carrying the text and language pair
    pub fn request_url(endpoint: &str, text: &str, source_language: &str, target_language: &str) -> Result<Url, ProviderError> {
        Url::parse_with_params(
            endpoint,
            &[
                ("client", "gtx"),
                ("sl", source_language),
                ("tl", target_language),
                ("dt", "t"),
                ("q", text),
            ],
        )
        .map_err(|e| ProviderError::RequestFailed(format!("Invalid Google endpoint '{}': {}", endpoint, e)))
    }

    /// Extract the translated text from the nested-array response.
    ///
    /// The first element of the response is a list of segments, each one an
    /// array whose first element is the translated piece.
    pub fn parse_response(body: &str) -> Result<String, ProviderError> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| ProviderError::ParseError(format!("Google response is not JSON: {}", e)))?;

        let segments = value
            .get(0)
            .and_then(Value::as_array)
            .ok_or_else(|| ProviderError::ParseError("Google response has no segment list".to_string()))?;

        Ok(segments
            .iter()
            .filter_map(|segment| segment.get(0).and_then(Value::as_str))
            .collect())
    }

    async fn call_endpoint(
        &self,
        endpoint: &str,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, ProviderError> {
        let url = Self::request_url(endpoint, text, source_language, target_language)?;

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Google Translate error ({}): {}", status, error_text);
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
impl Provider for GoogleTranslate {
    fn name(&self) -> &str {
        "google"
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
        debug!("Google: translating {} texts ({} chars)", texts.len(), joined.chars().count());

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
