/*!
 * HTTP-style request handling.
 *
 * The handler speaks the event shape of function-as-a-service runtimes:
 * a method, query parameters and a possibly base64-encoded body come in,
 * a status code, headers and a possibly base64-encoded body go out. It is
 * the single place where failures become status codes.
 */

use base64::{engine::general_purpose::STANDARD, Engine as _};
use log::{debug, error};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::app_config::Config;
use crate::archive::DeckTranslator;
use crate::errors::AppError;
use crate::language_utils::validate_request_language;

/// MIME type of a PowerPoint Open XML presentation
pub const PPTX_CONTENT_TYPE: &str = "application/vnd.openxmlformats-officedocument.presentationml.presentation";

/// Inbound request event
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpRequest {
    /// HTTP method, e.g. `POST`
    pub http_method: String,
    /// Query string parameters
    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,
    /// Request body
    #[serde(default)]
    pub body: Option<String>,
    /// Whether `body` holds base64 of binary content
    #[serde(default)]
    pub is_base64_encoded: bool,
}

impl HttpRequest {
    /// Create a request without parameters or body
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            http_method: method.into(),
            ..Self::default()
        }
    }

    /// Add a query parameter
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_string_parameters
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Attach a binary body, base64-encoded
    pub fn with_binary_body(mut self, bytes: &[u8]) -> Self {
        self.body = Some(STANDARD.encode(bytes));
        self.is_base64_encoded = true;
        self
    }

    /// Non-empty query parameter value
    pub fn query(&self, name: &str) -> Option<&str> {
        self.query_string_parameters
            .as_ref()
            .and_then(|params| params.get(name))
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }

    /// Decoded body bytes; empty when there is no body
    pub fn body_bytes(&self) -> Result<Vec<u8>, AppError> {
        let Some(body) = &self.body else {
            return Ok(Vec::new());
        };

        if !self.is_base64_encoded {
            return Ok(body.as_bytes().to_vec());
        }

        let compact: String = body.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        STANDARD
            .decode(compact)
            .map_err(|e| AppError::BadRequest(format!("Body is not valid base64: {}", e)))
    }
}

/// Outbound response event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpResponse {
    /// HTTP status code
    pub status_code: u16,
    /// Response headers
    pub headers: BTreeMap<String, String>,
    /// Response body
    pub body: String,
    /// Whether `body` holds base64 of binary content
    pub is_base64_encoded: bool,
}

impl HttpResponse {
    /// Plain-text response
    pub fn text(status_code: u16, body: impl Into<String>) -> Self {
        Self {
            status_code,
            headers: BTreeMap::new(),
            body: body.into(),
            is_base64_encoded: false,
        }
        .with_header("Content-Type", "text/plain; charset=utf-8")
        .with_header("Access-Control-Allow-Origin", "*")
    }

    /// Binary response, base64-encoded
    pub fn binary(bytes: &[u8], content_type: &str) -> Self {
        Self {
            status_code: 200,
            headers: BTreeMap::new(),
            body: STANDARD.encode(bytes),
            is_base64_encoded: true,
        }
        .with_header("Content-Type", content_type)
        .with_header("Access-Control-Allow-Origin", "*")
    }

    /// Answer to a CORS pre-flight request
    pub fn preflight() -> Self {
        Self {
            status_code: 204,
            headers: BTreeMap::new(),
            body: String::new(),
            is_base64_encoded: false,
        }
        .with_header("Access-Control-Allow-Origin", "*")
        .with_header("Access-Control-Allow-Methods", "POST, OPTIONS")
        .with_header("Access-Control-Allow-Headers", "Content-Type")
    }

    /// Set a header
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Header value, looked up case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Decoded body bytes
    pub fn body_bytes(&self) -> Result<Vec<u8>, AppError> {
        if self.is_base64_encoded {
            STANDARD
                .decode(&self.body)
                .map_err(|e| AppError::Unknown(format!("Response body is not valid base64: {}", e)))
        } else {
            Ok(self.body.as_bytes().to_vec())
        }
    }
}

/// Turns request events into translated presentations
#[derive(Debug, Clone)]
pub struct RequestHandler {
    translator: Arc<DeckTranslator>,
    default_source: String,
    default_target: String,
}

impl RequestHandler {
    /// Create a handler with the `EN` -> `RU` default language pair
    pub fn new(translator: Arc<DeckTranslator>) -> Self {
        Self {
            translator,
            default_source: "EN".to_string(),
            default_target: "RU".to_string(),
        }
    }

    /// Create a handler from a configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(Arc::new(DeckTranslator::from_config(config)))
            .with_default_languages(config.source_language.clone(), config.target_language.clone())
    }

    /// Languages used when a request does not name them
    pub fn with_default_languages(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.default_source = source.into();
        self.default_target = target.into();
        self
    }

    /// Handle one request event
    pub async fn handle(&self, request: HttpRequest) -> HttpResponse {
        match request.http_method.to_ascii_uppercase().as_str() {
            "OPTIONS" => HttpResponse::preflight(),
            "POST" => match self.translate(&request).await {
                Ok(response) => response,
                Err(e) => Self::error_response(e),
            },
            other => {
                debug!("Rejected {} request", other);
                HttpResponse::text(405, "Method Not Allowed. Send the presentation with POST.")
                    .with_header("Allow", "POST, OPTIONS")
            }
        }
    }

    async fn translate(&self, request: &HttpRequest) -> Result<HttpResponse, AppError> {
        let bytes = request.body_bytes()?;
        if bytes.is_empty() {
            return Err(AppError::BadRequest("Request body is empty; send a .pptx file".to_string()));
        }

        let source = request.query("source").unwrap_or(self.default_source.as_str());
        let target = request.query("target").unwrap_or(self.default_target.as_str());
        let source = validate_request_language(source, true)
            .map_err(|e| AppError::BadRequest(format!("source: {}", e)))?;
        let target = validate_request_language(target, false)
            .map_err(|e| AppError::BadRequest(format!("target: {}", e)))?;

        let (output, _report) = self.translator.translate(&bytes, &source, &target).await?;

        Ok(HttpResponse::binary(&output, PPTX_CONTENT_TYPE).with_header(
            "Content-Disposition",
            format!("attachment; filename=\"translated_{}.pptx\"", target),
        ))
    }

    fn error_response(error: AppError) -> HttpResponse {
        if error.is_client_error() {
            debug!("{}", error);
            return HttpResponse::text(400, error.to_string());
        }

        error!("Translation request failed: {}", error);
        HttpResponse::text(500, error.to_string())
    }
}
