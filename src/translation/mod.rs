/*!
 * Translation of slide markup.
 *
 * This module contains the text pass over presentation markup. It is split
 * into several submodules:
 *
 * - `locator`: Finding `<a:t>` text runs and their offsets
 * - `batch`: Grouping texts into size-bounded provider batches
 * - `fallback`: Ordered provider fallback chain
 * - `rewriter`: Reinserting escaped translations into the markup
 * - `core`: Service tying the passes together for one document
 */

// Re-export main types for easier usage
pub use self::batch::BatchChunker;
pub use self::core::{DocumentStats, TranslationOptions, TranslationService};
pub use self::fallback::ProviderChain;
pub use self::locator::{locate_text_spans, TextSpan};
pub use self::rewriter::{escape_text, rewrite_document};

// Submodules
pub mod batch;
pub mod core;
pub mod fallback;
pub mod locator;
pub mod rewriter;
