/*!
 * Tests for error types and conversions
 */

use deckglot::errors::{AppError, ContainerError, ProviderError, TranslationError};
use std::time::Duration;

#[test]
fn test_providerError_requestFailed_shouldDisplayCorrectly() {
    let error = ProviderError::RequestFailed("Connection reset".to_string());
    let display = format!("{}", error);
    assert!(display.contains("API request failed"));
    assert!(display.contains("Connection reset"));
}

#[test]
fn test_providerError_apiError_shouldDisplayStatusAndMessage() {
    let error = ProviderError::ApiError {
        status_code: 429,
        message: "Too many requests".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("429"));
    assert!(display.contains("Too many requests"));
}

#[test]
fn test_providerError_timeout_shouldMentionBound() {
    let error = ProviderError::Timeout { timeout: Duration::from_secs(8) };
    assert_eq!(error.to_string(), "Request timed out after 8s");
}

#[test]
fn test_providerError_timeout_withSubSecondBound_shouldKeepMilliseconds() {
    let error = ProviderError::Timeout { timeout: Duration::from_millis(250) };
    assert_eq!(error.to_string(), "Request timed out after 250ms");
}

#[test]
fn test_containerError_encoding_shouldNameEntry() {
    let error = ContainerError::Encoding { path: "ppt/slides/slide3.xml".to_string() };
    assert!(error.to_string().contains("ppt/slides/slide3.xml"));
}

#[test]
fn test_translationError_allProvidersFailed_shouldCarryLastFailure() {
    let error = TranslationError::AllProvidersFailed(ProviderError::ConnectionError("dns".to_string()));
    let display = error.to_string();
    assert!(display.contains("All translation providers failed"));
    assert!(display.contains("dns"));
}

#[test]
fn test_appError_fromTranslationError_shouldKeepMessageChain() {
    let translation_error = TranslationError::AllProvidersFailed(ProviderError::ApiError {
        status_code: 500,
        message: "Simulated libre failure".to_string(),
    });
    let app_error: AppError = translation_error.into();
    let display = app_error.to_string();
    assert!(display.starts_with("Translation error"));
    assert!(display.contains("Simulated libre failure"));
    assert!(!app_error.is_client_error());
}

#[test]
fn test_appError_badRequest_shouldBeClientError() {
    assert!(AppError::BadRequest("empty body".to_string()).is_client_error());
    assert!(!AppError::Unknown("boom".to_string()).is_client_error());
}

#[test]
fn test_appError_fromIoError_shouldWrapAsFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
    let app_error: AppError = io_error.into();
    let display = format!("{}", app_error);
    assert!(display.contains("File error"));
    assert!(display.contains("File not found"));
}

#[test]
fn test_appError_fromContainerError_shouldWrap() {
    let app_error: AppError = ContainerError::Open("invalid Zip archive".to_string()).into();
    assert!(matches!(app_error, AppError::Container(ContainerError::Open(_))));
}
