use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::Path;
use url::Url;

use crate::providers::SEGMENT_SEPARATOR;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Default source language code, used when a request does not name one
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Default target language code, used when a request does not name one
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Translation config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Which archive entries carry translatable text
    #[serde(default)]
    pub archive: ArchiveConfig,

    /// Local HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation provider type
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProvider {
    // @provider: Google Translate web endpoint
    #[default]
    Google,
    // @provider: LibreTranslate instance
    LibreTranslate,
}

impl TranslationProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Google => "Google",
            Self::LibreTranslate => "LibreTranslate",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Google => "google".to_string(),
            Self::LibreTranslate => "libretranslate".to_string(),
        }
    }
}

// Implement Display trait for TranslationProvider
impl std::fmt::Display for TranslationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

// Implement FromStr trait for TranslationProvider
impl std::str::FromStr for TranslationProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "google" => Ok(Self::Google),
            "libretranslate" | "libre" => Ok(Self::LibreTranslate),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Provider configuration entry; the order of entries is the fallback order
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    // @field: Provider type identifier
    #[serde(rename = "type")]
    pub provider_type: TranslationProvider,

    // @field: Backing endpoints, tried in order
    #[serde(default)]
    pub endpoints: Vec<String>,

    // @field: API key (LibreTranslate instances may require one)
    #[serde(default = "String::new")]
    pub api_key: String,
}

impl ProviderConfig {
    // @param provider_type: Provider enum
    // @returns: Provider config with defaults
    pub fn new(provider_type: TranslationProvider) -> Self {
        match provider_type {
            TranslationProvider::Google => Self {
                provider_type,
                endpoints: default_google_endpoints(),
                api_key: String::new(),
            },
            TranslationProvider::LibreTranslate => Self {
                provider_type,
                endpoints: default_libretranslate_endpoints(),
                api_key: String::new(),
            },
        }
    }

    /// Endpoints to use, falling back to the provider defaults when none are set
    pub fn effective_endpoints(&self) -> Vec<String> {
        if !self.endpoints.is_empty() {
            return self.endpoints.clone();
        }

        match self.provider_type {
            TranslationProvider::Google => default_google_endpoints(),
            TranslationProvider::LibreTranslate => default_libretranslate_endpoints(),
        }
    }
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Providers in fallback priority order
    #[serde(default = "default_providers")]
    pub providers: Vec<ProviderConfig>,

    /// Maximum accounted characters per provider request
    #[serde(default = "default_max_chars_per_request")]
    pub max_chars_per_request: usize,

    /// Per-item allowance added to each text when budgeting a batch
    #[serde(default = "default_item_overhead")]
    pub item_overhead: usize,

    /// Bound on a single provider call, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Batches of one document translated at the same time
    #[serde(default = "default_concurrent_requests")]
    pub concurrent_requests: usize,

    /// Treat a provider result of the wrong length as a provider failure
    #[serde(default)]
    pub strict_alignment: bool,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            providers: default_providers(),
            max_chars_per_request: default_max_chars_per_request(),
            item_overhead: default_item_overhead(),
            timeout_secs: default_timeout_secs(),
            concurrent_requests: default_concurrent_requests(),
            strict_alignment: false,
        }
    }
}

/// Archive entries that carry translatable text
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ArchiveConfig {
    /// Entry path prefixes of slide and notes bodies
    #[serde(default = "default_content_prefixes")]
    pub content_prefixes: Vec<String>,

    /// Entry path suffix of markup files
    #[serde(default = "default_content_suffix")]
    pub content_suffix: String,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            content_prefixes: default_content_prefixes(),
            content_suffix: default_content_suffix(),
        }
    }
}

impl ArchiveConfig {
    /// Whether an archive entry should be run through the translator
    pub fn is_content_entry(&self, path: &str) -> bool {
        path.ends_with(&self.content_suffix)
            && self.content_prefixes.iter().any(|prefix| path.starts_with(prefix.as_str()))
    }
}

/// Local HTTP server configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    /// Interface to bind
    #[serde(default = "default_server_host")]
    pub host: String,

    /// Port to bind
    #[serde(default = "default_server_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_source_language() -> String {
    "EN".to_string()
}

fn default_target_language() -> String {
    "RU".to_string()
}

fn default_providers() -> Vec<ProviderConfig> {
    vec![
        ProviderConfig::new(TranslationProvider::Google),
        ProviderConfig::new(TranslationProvider::LibreTranslate),
    ]
}

fn default_google_endpoints() -> Vec<String> {
    vec![
        "https://translate.googleapis.com/translate_a/single".to_string(),
        "https://clients5.google.com/translate_a/single".to_string(),
    ]
}

fn default_libretranslate_endpoints() -> Vec<String> {
    vec![
        "https://libretranslate.com/translate".to_string(),
        "https://translate.argosopentech.com/translate".to_string(),
    ]
}

fn default_max_chars_per_request() -> usize {
    1800 // keeps GET query strings well under common URL limits
}

fn default_item_overhead() -> usize {
    SEGMENT_SEPARATOR.chars().count()
}

fn default_timeout_secs() -> u64 {
    8
}

fn default_concurrent_requests() -> usize {
    1
}

fn default_content_prefixes() -> Vec<String> {
    vec![
        "ppt/slides/slide".to_string(),
        "ppt/notesSlides/notesSlide".to_string(),
    ]
}

fn default_content_suffix() -> String {
    ".xml".to_string()
}

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    8080
}

impl Config {
    /// Load a configuration file, or write the defaults to it when it does not exist
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to open config file: {}", path.display()))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            return Ok(config);
        }

        log::warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write default config to file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        crate::language_utils::validate_request_language(&self.source_language, true)
            .context("Invalid source language")?;
        crate::language_utils::validate_request_language(&self.target_language, false)
            .context("Invalid target language")?;

        let translation = &self.translation;
        if translation.providers.is_empty() {
            return Err(anyhow!("At least one translation provider must be configured"));
        }

        for provider in &translation.providers {
            for endpoint in provider.effective_endpoints() {
                Url::parse(&endpoint).with_context(|| {
                    format!("Invalid endpoint for {} provider: {}", provider.provider_type.display_name(), endpoint)
                })?;
            }
        }

        if translation.max_chars_per_request == 0 {
            return Err(anyhow!("max_chars_per_request must be greater than zero"));
        }
        if translation.timeout_secs == 0 {
            return Err(anyhow!("timeout_secs must be greater than zero"));
        }
        if translation.concurrent_requests == 0 {
            return Err(anyhow!("concurrent_requests must be greater than zero"));
        }
        if self.archive.content_prefixes.is_empty() {
            return Err(anyhow!("At least one archive content prefix must be configured"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: default_source_language(),
            target_language: default_target_language(),
            translation: TranslationConfig::default(),
            archive: ArchiveConfig::default(),
            server: ServerConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
