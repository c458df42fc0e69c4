/*!
 * Core translation service implementation.
 *
 * This module contains the main TranslationService struct, which runs one
 * markup document through location, batching, provider fallback and
 * rewriting.
 */

use futures::stream::{self, StreamExt, TryStreamExt};
use log::{debug, warn};

use crate::app_config::TranslationConfig;
use crate::errors::TranslationError;
use crate::providers::{build_providers, Provider, SEGMENT_SEPARATOR};
use super::batch::BatchChunker;
use super::fallback::ProviderChain;
use super::locator::{locate_text_spans, TextSpan};
use super::rewriter::rewrite_document;

/// Translation options for customizing the translation process
#[derive(Debug, Clone)]
pub struct TranslationOptions {
    /// Maximum accounted characters per provider request
    pub max_chars_per_request: usize,

    /// Per-item allowance used when budgeting a batch
    pub item_overhead: usize,

    /// Maximum number of batches in flight for one document
    pub concurrent_requests: usize,

    /// Treat provider results of the wrong length as failures
    pub strict_alignment: bool,
}

impl Default for TranslationOptions {
    fn default() -> Self {
        Self {
            max_chars_per_request: 1800,
            item_overhead: SEGMENT_SEPARATOR.chars().count(),
            concurrent_requests: 1,
            strict_alignment: false,
        }
    }
}

impl From<&TranslationConfig> for TranslationOptions {
    fn from(config: &TranslationConfig) -> Self {
        Self {
            max_chars_per_request: config.max_chars_per_request,
            item_overhead: config.item_overhead,
            concurrent_requests: config.concurrent_requests,
            strict_alignment: config.strict_alignment,
        }
    }
}

/// Counters for one translated document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocumentStats {
    /// Text runs found in the markup
    pub spans_located: usize,
    /// Runs sent for translation (blank runs are skipped)
    pub spans_translated: usize,
    /// Provider batches issued
    pub batches: usize,
    /// Runs left empty because a provider returned too few results
    pub spans_missing: usize,
}

/// Translates the text runs of markup documents
#[derive(Debug)]
pub struct TranslationService {
    chain: ProviderChain,
    chunker: BatchChunker,
    concurrent_requests: usize,
}

impl TranslationService {
    /// Create a service from providers in fallback order
    pub fn new(providers: Vec<Box<dyn Provider>>, options: TranslationOptions) -> Self {
        let chain = ProviderChain::new(providers).with_strict_alignment(options.strict_alignment);
        debug!("Provider chain: {}", chain.provider_names().join(" -> "));

        Self {
            chain,
            chunker: BatchChunker::new(options.max_chars_per_request, options.item_overhead),
            concurrent_requests: options.concurrent_requests.max(1),
        }
    }

    /// Create a service with the providers named in the configuration
    pub fn from_config(config: &TranslationConfig) -> Self {
        Self::new(build_providers(config), TranslationOptions::from(config))
    }

    /// Translate texts, batch by batch.
    ///
    /// The result has one entry per input text, in input order. An entry is
    /// `None` when the provider answered a batch with too few translations.
    pub async fn translate_texts(
        &self,
        texts: &[String],
        source_language: &str,
        target_language: &str,
    ) -> Result<(Vec<Option<String>>, usize), TranslationError> {
        let batches = self.chunker.chunk(texts);
        let batch_count = batches.len();

        let calls: Vec<_> = batches
            .iter()
            .map(|batch| self.chain.translate(batch, source_language, target_language))
            .collect();

        // buffered keeps batch order regardless of completion order
        let results: Vec<Vec<String>> = stream::iter(calls)
            .buffered(self.concurrent_requests)
            .try_collect()
            .await?;

        let mut translations = Vec::with_capacity(texts.len());
        for (batch, translated) in batches.iter().zip(results) {
            let mut translated = translated.into_iter();
            translations.extend(batch.iter().map(|_| translated.next()));
        }

        Ok((translations, batch_count))
    }

    /// Translate every text run of one markup document
    pub async fn translate_document(
        &self,
        document: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<(String, DocumentStats), TranslationError> {
        let spans: Vec<TextSpan> = locate_text_spans(document).collect();
        let mut stats = DocumentStats {
            spans_located: spans.len(),
            ..DocumentStats::default()
        };

        // blank runs keep their original bytes
        let translatable: Vec<(TextSpan, String)> = spans
            .into_iter()
            .map(|span| {
                let text = span.text().into_owned();
                (span, text)
            })
            .filter(|(_, text)| !text.trim().is_empty())
            .collect();

        if translatable.is_empty() {
            return Ok((document.to_string(), stats));
        }

        let texts: Vec<String> = translatable.iter().map(|(_, text)| text.trim().to_string()).collect();
        let (translations, batches) = self.translate_texts(&texts, source_language, target_language).await?;
        stats.spans_translated = texts.len();
        stats.batches = batches;

        let replacements: Vec<(TextSpan, Option<String>)> = translatable
            .into_iter()
            .zip(translations)
            .map(|((span, source), translated)| {
                let translated = translated.map(|text| restore_padding(&source, &text));
                (span, translated)
            })
            .collect();

        stats.spans_missing = replacements.iter().filter(|(_, t)| t.is_none()).count();
        if stats.spans_missing > 0 {
            warn!("{} text runs received no translation and were left empty", stats.spans_missing);
        }

        debug!(
            "Translated {} of {} text runs in {} batches",
            stats.spans_translated, stats.spans_located, stats.batches
        );

        Ok((rewrite_document(document, &replacements), stats))
    }
}

/// Put the source's leading and trailing whitespace around a translation
pub fn restore_padding(source: &str, translated: &str) -> String {
    let leading = &source[..source.len() - source.trim_start().len()];
    let trailing = &source[source.trim_end().len()..];
    format!("{}{}{}", leading, translated.trim(), trailing)
}
