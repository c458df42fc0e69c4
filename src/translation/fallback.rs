/*!
 * Ordered provider fallback.
 *
 * Providers are tried one after another; the first success is returned
 * as-is. There is no racing and no merging of results.
 */

use log::{debug, warn};

use crate::errors::{ProviderError, TranslationError};
use crate::providers::Provider;

/// Providers in priority order
#[derive(Debug)]
pub struct ProviderChain {
    providers: Vec<Box<dyn Provider>>,
    strict_alignment: bool,
}

impl ProviderChain {
    /// Create a chain from providers in priority order
    pub fn new(providers: Vec<Box<dyn Provider>>) -> Self {
        Self {
            providers,
            strict_alignment: false,
        }
    }

    /// Reject results whose length differs from the input, moving on to the
    /// next provider instead
    pub fn with_strict_alignment(mut self, strict_alignment: bool) -> Self {
        self.strict_alignment = strict_alignment;
        self
    }

    /// Number of providers in the chain
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether the chain has no providers
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Names of the providers, in order
    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|provider| provider.name()).collect()
    }

    /// Translate a batch with the first provider that succeeds
    pub async fn translate(
        &self,
        texts: &[String],
        source_language: &str,
        target_language: &str,
    ) -> Result<Vec<String>, TranslationError> {
        if self.providers.is_empty() {
            return Err(TranslationError::NoProviders);
        }
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let mut last_error = None;

        for provider in &self.providers {
            let result = provider
                .translate(texts, source_language, target_language)
                .await
                .and_then(|translated| self.check_alignment(texts.len(), translated));

            match result {
                Ok(translated) => {
                    debug!("{} translated {} texts", provider.name(), texts.len());
                    return Ok(translated);
                }
                Err(e) => {
                    warn!("Provider {} failed, trying next: {}", provider.name(), e);
                    last_error = Some(e);
                }
            }
        }

        Err(match last_error {
            Some(e) => TranslationError::AllProvidersFailed(e),
            None => TranslationError::NoProviders,
        })
    }

    fn check_alignment(&self, expected: usize, translated: Vec<String>) -> Result<Vec<String>, ProviderError> {
        if translated.len() == expected {
            return Ok(translated);
        }

        if self.strict_alignment {
            return Err(ProviderError::ParseError(format!(
                "Expected {} translations, got {}",
                expected,
                translated.len()
            )));
        }

        warn!("Expected {} translations, got {}", expected, translated.len());
        Ok(translated)
    }
}
