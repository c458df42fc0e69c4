/*!
 * Local HTTP server around the request handler.
 *
 * Every method on `/` and `/translate` is turned into a request event,
 * handled, and the response event is written back with its body decoded.
 */

use anyhow::{Context, Result};
use axum::{
    extract::{DefaultBodyLimit, Query, State},
    http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use bytes::Bytes;
use log::{error, info, warn};
use std::collections::HashMap;

use crate::handler::{HttpRequest, HttpResponse, RequestHandler};

/// Largest accepted upload
const MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;

/// Build the router serving the request handler
pub fn router(handler: RequestHandler) -> Router {
    Router::new()
        .route("/", any(handle_request))
        .route("/translate", any(handle_request))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(handler)
}

/// Bind `address` and serve until the process is stopped
pub async fn serve(handler: RequestHandler, address: &str) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(handler))
        .await
        .context("HTTP server stopped unexpectedly")?;

    Ok(())
}

async fn handle_request(
    State(handler): State<RequestHandler>,
    method: Method,
    Query(query): Query<HashMap<String, String>>,
    body: Bytes,
) -> Response {
    let mut request = HttpRequest::new(method.as_str());
    request.query_string_parameters = Some(query);
    if !body.is_empty() {
        request = request.with_binary_body(&body);
    }

    into_axum_response(handler.handle(request).await)
}

/// Convert a response event into an axum response
pub fn into_axum_response(response: HttpResponse) -> Response {
    let status = StatusCode::from_u16(response.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let body = match response.body_bytes() {
        Ok(body) => body,
        Err(e) => {
            error!("Failed to decode response body: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response();
        }
    };

    let mut headers = HeaderMap::new();
    for (name, value) in &response.headers {
        match (HeaderName::from_bytes(name.as_bytes()), HeaderValue::from_str(value)) {
            (Ok(name), Ok(value)) => {
                headers.insert(name, value);
            }
            _ => warn!("Dropping invalid response header {}", name),
        }
    }

    (status, headers, body).into_response()
}
