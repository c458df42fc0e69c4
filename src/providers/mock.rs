/*!
 * Mock provider implementations for testing.
 *
 * This module provides mock providers that simulate different behaviors:
 * - `MockProvider::working()` - Always succeeds with translated text
 * - `MockProvider::intermittent(n)` - Fails every n-th request
 * - `MockProvider::failing()` - Always fails with an error
 * - `MockProvider::short()` - Drops the last text of every batch
 *
 * Requests travel through the same join/split path the real providers use,
 * so a batch reaches the mock as one separator-joined string.
 */

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::errors::ProviderError;
use crate::providers::{join_segments, split_batch, Provider, SEGMENT_SEPARATOR, SEGMENT_TOKEN};

/// Behavior mode for the mock provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with a proper translation
    Working,
    /// Fails intermittently (every Nth request)
    Intermittent { fail_every: usize },
    /// Always fails with an error
    Failing,
    /// Succeeds but loses the last text of the batch
    Short,
    /// Simulates slow response (for timeout testing)
    Slow { delay_ms: u64 },
}

/// Mock provider for testing translation behavior
#[derive(Debug)]
pub struct MockProvider {
    /// Name reported in logs
    name: String,
    /// Behavior mode
    behavior: MockBehavior,
    /// Request counter for intermittent failures
    request_count: Arc<AtomicUsize>,
    /// Batches received, in call order
    received: Arc<Mutex<Vec<Vec<String>>>>,
    /// Custom per-text translation (optional)
    custom_response: Option<fn(&str) -> String>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            name: "mock".to_string(),
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            received: Arc::new(Mutex::new(Vec::new())),
            custom_response: None,
        }
    }

    /// Create a working mock provider that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create an intermittently failing mock provider
    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent { fail_every })
    }

    /// Create a failing mock provider that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that drops the last translation of each batch
    pub fn short() -> Self {
        Self::new(MockBehavior::Short)
    }

    /// Create a mock that answers after a delay
    pub fn slow(delay_ms: u64) -> Self {
        Self::new(MockBehavior::Slow { delay_ms })
    }

    /// Set the name reported in logs
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set a custom per-text translation
    pub fn with_custom_response(mut self, generator: fn(&str) -> String) -> Self {
        self.custom_response = Some(generator);
        self
    }

    /// Number of calls made so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Batches received so far
    pub fn received_batches(&self) -> Vec<Vec<String>> {
        self.received.lock().map(|batches| batches.clone()).unwrap_or_default()
    }

    fn translate_piece(&self, piece: &str, target_language: &str) -> String {
        match self.custom_response {
            Some(generator) => generator(piece),
            None => format!("[{}] {}", target_language, piece),
        }
    }

    /// Translate the joined wire text the way a remote service would:
    /// every piece between separator tokens is translated on its own, and
    /// a lone text is translated whole.
    fn translate_wire_text(&self, joined: &str, count: usize, target_language: &str) -> Vec<String> {
        let translated = if count <= 1 {
            self.translate_piece(joined.trim(), target_language)
        } else {
            joined
                .split(SEGMENT_TOKEN)
                .map(|piece| self.translate_piece(piece.trim(), target_language))
                .collect::<Vec<_>>()
                .join(SEGMENT_SEPARATOR)
        };
        split_batch(&translated, count)
    }
}

impl Clone for MockProvider {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            behavior: self.behavior,
            request_count: Arc::clone(&self.request_count),
            received: Arc::clone(&self.received),
            custom_response: self.custom_response,
        }
    }
}

#[async_trait]
impl Provider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn translate(
        &self,
        texts: &[String],
        _source_language: &str,
        target_language: &str,
    ) -> Result<Vec<String>, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut received) = self.received.lock() {
            received.push(texts.to_vec());
        }

        let joined = join_segments(texts);

        match self.behavior {
            MockBehavior::Working => Ok(self.translate_wire_text(&joined, texts.len(), target_language)),

            MockBehavior::Intermittent { fail_every } => {
                if fail_every > 0 && count % fail_every == fail_every - 1 {
                    Err(ProviderError::ApiError {
                        message: format!("Simulated intermittent failure (request #{})", count + 1),
                        status_code: 503,
                    })
                } else {
                    Ok(self.translate_wire_text(&joined, texts.len(), target_language))
                }
            }

            MockBehavior::Failing => Err(ProviderError::ApiError {
                message: format!("Simulated {} failure", self.name),
                status_code: 500,
            }),

            MockBehavior::Short => {
                let mut pieces = self.translate_wire_text(&joined, texts.len(), target_language);
                pieces.pop();
                Ok(pieces)
            }

            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(tokio::time::Duration::from_millis(delay_ms)).await;
                Ok(self.translate_wire_text(&joined, texts.len(), target_language))
            }
        }
    }
}
