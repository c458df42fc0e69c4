/*!
 * Batch building for provider requests.
 *
 * Texts are grouped into batches whose accounted size stays within a
 * character budget, so the joined request fits the provider's limits.
 */

use crate::providers::contains_segment_token;

/// Budget settings for splitting texts into provider batches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchChunker {
    /// Maximum accounted characters per batch
    max_chars: usize,
    /// Allowance added to every item for the separator between texts
    item_overhead: usize,
}

impl BatchChunker {
    /// Create a chunker with a character budget and a per-item allowance
    pub fn new(max_chars: usize, item_overhead: usize) -> Self {
        Self { max_chars, item_overhead }
    }

    /// Accounted size of one item
    pub fn item_cost(&self, text: &str) -> usize {
        text.chars().count() + self.item_overhead
    }

    /// Accounted size of a whole batch
    pub fn batch_cost<S: AsRef<str>>(&self, batch: &[S]) -> usize {
        batch.iter().map(|text| self.item_cost(text.as_ref())).sum()
    }

    /// Split texts into ordered batches.
    ///
    /// A new batch starts when the next item would push the current one past
    /// the budget. An item larger than the whole budget still gets a batch of
    /// its own, and so does an item containing the segment separator token,
    /// since splitting the joined response would cut it apart. Empty input
    /// gives no batches.
    pub fn chunk<S: AsRef<str>>(&self, texts: &[S]) -> Vec<Vec<String>> {
        let mut batches = Vec::new();
        let mut current: Vec<String> = Vec::new();
        let mut current_cost = 0;

        for text in texts {
            let text = text.as_ref();
            let cost = self.item_cost(text);

            if contains_segment_token(text) {
                if !current.is_empty() {
                    batches.push(std::mem::take(&mut current));
                    current_cost = 0;
                }
                batches.push(vec![text.to_string()]);
                continue;
            }

            if !current.is_empty() && current_cost + cost > self.max_chars {
                batches.push(std::mem::take(&mut current));
                current_cost = 0;
            }

            current.push(text.to_string());
            current_cost += cost;
        }

        if !current.is_empty() {
            batches.push(current);
        }

        batches
    }
}
