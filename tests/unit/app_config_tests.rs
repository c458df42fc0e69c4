/*!
 * Tests for application configuration
 */

use anyhow::Result;
use deckglot::app_config::{Config, LogLevel, ProviderConfig, TranslationProvider};
use crate::common;

#[test]
fn test_default_config_shouldBeValid() {
    let config = Config::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.translation.max_chars_per_request, 1800);
    assert_eq!(config.translation.concurrent_requests, 1);
    assert!(!config.translation.strict_alignment);
    assert_eq!(config.log_level, LogLevel::Info);
}

#[test]
fn test_default_providers_shouldTryGoogleThenLibreTranslate() {
    let config = Config::default();
    let order: Vec<TranslationProvider> = config
        .translation
        .providers
        .iter()
        .map(|provider| provider.provider_type)
        .collect();
    assert_eq!(order, vec![TranslationProvider::Google, TranslationProvider::LibreTranslate]);
}

#[test]
fn test_provider_fromStr_shouldAcceptKnownNames() {
    assert_eq!("google".parse::<TranslationProvider>().unwrap(), TranslationProvider::Google);
    assert_eq!("LibreTranslate".parse::<TranslationProvider>().unwrap(), TranslationProvider::LibreTranslate);
    assert!("deepl".parse::<TranslationProvider>().is_err());
}

#[test]
fn test_providerConfig_effectiveEndpoints_withoutEndpoints_shouldUseDefaults() {
    let mut provider = ProviderConfig::new(TranslationProvider::LibreTranslate);
    provider.endpoints.clear();
    assert!(!provider.effective_endpoints().is_empty());

    provider.endpoints = vec!["http://localhost:5000/translate".to_string()];
    assert_eq!(provider.effective_endpoints(), vec!["http://localhost:5000/translate"]);
}

#[test]
fn test_config_fromJson_shouldReadProviderList() -> Result<()> {
    let json = r#"{
        "source_language": "de",
        "target_language": "fr",
        "log_level": "debug",
        "translation": {
            "providers": [
                { "type": "libretranslate", "endpoints": ["http://localhost:5000/translate"], "api_key": "k" }
            ],
            "max_chars_per_request": 500,
            "strict_alignment": true
        }
    }"#;

    let config: Config = serde_json::from_str(json)?;
    assert_eq!(config.source_language, "de");
    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.translation.providers.len(), 1);
    assert_eq!(config.translation.providers[0].api_key, "k");
    assert_eq!(config.translation.max_chars_per_request, 500);
    assert_eq!(config.translation.timeout_secs, 8);
    assert!(config.translation.strict_alignment);
    assert_eq!(config.server.port, 8080);
    config.validate()?;
    Ok(())
}

#[test]
fn test_validate_withInvalidValues_shouldFail() {
    let mut config = Config::default();
    config.target_language = "auto".to_string();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.source_language = "not-a-language".to_string();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.translation.providers.clear();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.translation.max_chars_per_request = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.translation.providers[0].endpoints = vec!["not a url".to_string()];
    assert!(config.validate().is_err());
}

#[test]
fn test_load_or_create_withMissingFile_shouldWriteDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let created = Config::load_or_create(&path)?;
    assert!(path.exists());

    let loaded = Config::load_or_create(&path)?;
    assert_eq!(loaded.target_language, created.target_language);
    assert_eq!(loaded.translation.providers.len(), created.translation.providers.len());
    Ok(())
}

#[test]
fn test_load_or_create_withBrokenFile_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "conf.json", b"{ not json")?;
    assert!(Config::load_or_create(&path).is_err());
    Ok(())
}
