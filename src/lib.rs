/*!
 * # deckglot - presentation translator
 *
 * A Rust library for translating the text of PowerPoint presentations
 * through public machine translation services.
 *
 * ## Features
 *
 * - Locate `<a:t>` text runs in slide and notes markup
 * - Translate them in size-bounded batches using:
 *   - Google Translate web endpoints
 *   - LibreTranslate instances
 * - Fall back from one provider to the next on any failure
 * - Rewrite the markup in place, leaving every other byte untouched
 * - Serve the whole pipeline as a single HTTP-style request handler
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `translation`: The text pass over markup:
 *   - `translation::locator`: Text run location
 *   - `translation::batch`: Batch building
 *   - `translation::fallback`: Provider fallback chain
 *   - `translation::rewriter`: Markup rewriting
 *   - `translation::core`: Per-document translation service
 * - `archive`: Reading and repackaging presentation archives
 * - `handler`: Request/response boundary
 * - `server`: Local HTTP server around the handler
 * - `providers`: Clients for translation services
 * - `app_controller`: Main application controller
 * - `file_utils`: File system operations
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod archive;
pub mod errors;
pub mod file_utils;
pub mod handler;
pub mod language_utils;
pub mod providers;
pub mod server;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use archive::{DeckTranslator, PipelineReport};
pub use handler::{HttpRequest, HttpResponse, RequestHandler};
pub use translation::TranslationService;
pub use errors::{AppError, ContainerError, ProviderError, TranslationError};
