/*!
 * Provider implementations for different translation services.
 *
 * This module contains client implementations for the supported services:
 * - Google: public Google Translate web endpoint (query string request)
 * - LibreTranslate: LibreTranslate-compatible instances (JSON body request)
 * - Mock: scripted provider used by tests
 *
 * Every provider translates a whole batch in one call: the texts are joined
 * with a private separator token, sent as one string, and the translated
 * response is split on the same token.
 */

use async_trait::async_trait;
use log::warn;
use std::fmt::Debug;
use std::future::Future;
use std::time::Duration;

use crate::app_config::{TranslationConfig, TranslationProvider};
use crate::errors::ProviderError;

/// Token placed between texts of one batch. Providers keep it untouched.
pub const SEGMENT_TOKEN: &str = "|||";

/// Separator used when joining a batch; the newlines keep sentences apart
pub const SEGMENT_SEPARATOR: &str = "\n|||\n";

/// Common trait for all translation providers
///
/// This trait defines the interface that all provider implementations must follow,
/// allowing them to be used interchangeably in the fallback chain.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Translate a batch of texts
    ///
    /// # Arguments
    /// * `texts` - Texts to translate, in order
    /// * `source_language` - Wire code of the source language
    /// * `target_language` - Wire code of the target language
    ///
    /// # Returns
    /// * `Result<Vec<String>, ProviderError>` - One translation per input text, or an error
    async fn translate(
        &self,
        texts: &[String],
        source_language: &str,
        target_language: &str,
    ) -> Result<Vec<String>, ProviderError>;
}

/// Join batch texts into the single string sent to a provider
pub fn join_segments(texts: &[String]) -> String {
    texts.join(SEGMENT_SEPARATOR)
}

/// Split a provider response back into per-text pieces
pub fn split_segments(text: &str) -> Vec<String> {
    text.split(SEGMENT_TOKEN)
        .map(|piece| piece.trim().to_string())
        .collect()
}

/// Split the response to a batch of `expected` texts.
///
/// A single-text batch is never split, so a text that itself contains
/// [`SEGMENT_TOKEN`] comes back whole.
pub fn split_batch(text: &str, expected: usize) -> Vec<String> {
    if expected <= 1 {
        return vec![text.trim().to_string()];
    }
    split_segments(text)
}

/// Whether a text would be cut apart by the batch separator
pub fn contains_segment_token(text: &str) -> bool {
    text.contains(SEGMENT_TOKEN)
}

/// Race a provider call against a timer
pub async fn with_timeout<T, F>(timeout: Duration, call: F) -> Result<T, ProviderError>
where
    F: Future<Output = Result<T, ProviderError>>,
{
    match tokio::time::timeout(timeout, call).await {
        Ok(result) => result,
        Err(_) => Err(ProviderError::Timeout { timeout }),
    }
}

/// Try the endpoints of one logical provider in order; return the first success
/// or the last failure.
pub(crate) async fn first_successful_endpoint<'a, F, Fut>(
    provider: &str,
    endpoints: &'a [String],
    mut call: F,
) -> Result<String, ProviderError>
where
    F: FnMut(&'a str) -> Fut,
    Fut: Future<Output = Result<String, ProviderError>>,
{
    let mut last_error = None;

    for endpoint in endpoints {
        match call(endpoint.as_str()).await {
            Ok(text) => return Ok(text),
            Err(e) => {
                warn!("{} endpoint {} failed: {}", provider, endpoint, e);
                last_error = Some(e);
            }
        }
    }

    Err(last_error.unwrap_or_else(|| {
        ProviderError::RequestFailed(format!("No endpoints configured for {}", provider))
    }))
}

/// Build the configured providers in fallback order
pub fn build_providers(config: &TranslationConfig) -> Vec<Box<dyn Provider>> {
    let timeout = Duration::from_secs(config.timeout_secs);

    config
        .providers
        .iter()
        .map(|provider_config| -> Box<dyn Provider> {
            let endpoints = provider_config.effective_endpoints();
            match provider_config.provider_type {
                TranslationProvider::Google => Box::new(google::GoogleTranslate::new(endpoints, timeout)),
                TranslationProvider::LibreTranslate => Box::new(
                    libretranslate::LibreTranslate::new(endpoints, timeout)
                        .with_api_key(provider_config.api_key.clone()),
                ),
            }
        })
        .collect()
}

pub mod google;
pub mod libretranslate;
pub mod mock;
