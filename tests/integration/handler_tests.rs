/*!
 * Request handler tests: status codes, headers and bodies
 */

use std::sync::Arc;

use deckglot::handler::{HttpRequest, HttpResponse, RequestHandler, PPTX_CONTENT_TYPE};
use deckglot::providers::mock::MockProvider;
use deckglot::providers::Provider;

use crate::common;

fn handler_with(providers: Vec<Box<dyn Provider>>) -> RequestHandler {
    RequestHandler::new(Arc::new(common::translator_with(providers)))
}

fn assert_cors(response: &HttpResponse) {
    assert_eq!(response.header("access-control-allow-origin"), Some("*"));
}

#[tokio::test]
async fn test_handle_withOptions_shouldAnswerPreflight() {
    let handler = handler_with(vec![Box::new(MockProvider::working())]);

    let response = handler.handle(HttpRequest::new("OPTIONS")).await;

    assert_eq!(response.status_code, 204);
    assert_cors(&response);
    assert_eq!(response.header("Access-Control-Allow-Methods"), Some("POST, OPTIONS"));
    assert!(response.body.is_empty());
}

#[tokio::test]
async fn test_handle_withGet_shouldRejectMethod() {
    let handler = handler_with(vec![Box::new(MockProvider::working())]);

    let response = handler.handle(HttpRequest::new("GET")).await;

    assert_eq!(response.status_code, 405);
    assert_cors(&response);
    assert_eq!(response.header("Allow"), Some("POST, OPTIONS"));
}

#[tokio::test]
async fn test_handle_withEmptyBody_shouldBeBadRequest() {
    let provider = MockProvider::working();
    let handler = handler_with(vec![Box::new(provider.clone())]);

    let response = handler.handle(HttpRequest::new("POST")).await;

    assert_eq!(response.status_code, 400);
    assert!(response.body.starts_with("Bad request: Request body is empty"));
    assert_cors(&response);
    assert_eq!(provider.request_count(), 0);
}

#[tokio::test]
async fn test_handle_withUnknownTargetLanguage_shouldBeBadRequest() {
    let handler = handler_with(vec![Box::new(MockProvider::working())]);
    let request = HttpRequest::new("POST")
        .with_query("target", "zz-top")
        .with_binary_body(&common::sample_presentation(&["Hello"], &[]));

    let response = handler.handle(request).await;

    assert_eq!(response.status_code, 400);
    assert!(response.body.contains("target"));
}

#[tokio::test]
async fn test_handle_withGreetingDeck_shouldReturnTranslatedAttachment() {
    common::init_logger();
    let handler = handler_with(vec![Box::new(common::greeting_provider())]);
    let input = common::sample_presentation(&["Hello", "World"], &[]);
    let request = HttpRequest::new("post")
        .with_query("source", "EN")
        .with_query("target", "FR")
        .with_binary_body(&input);

    let response = handler.handle(request).await;

    assert_eq!(response.status_code, 200);
    assert!(response.is_base64_encoded);
    assert_cors(&response);
    assert_eq!(response.header("content-type"), Some(PPTX_CONTENT_TYPE));
    assert_eq!(
        response.header("content-disposition"),
        Some("attachment; filename=\"translated_fr.pptx\"")
    );

    let output = response.body_bytes().unwrap();
    assert_eq!(common::read_entry(&output, "ppt/slides/slide1.xml"), common::slide_xml(&["Bonjour", "Monde"]));
    assert_eq!(common::entry_names(&output), common::entry_names(&input));
}

#[tokio::test]
async fn test_handle_withoutLanguages_shouldUseDefaults() {
    let provider = MockProvider::working();
    let handler = handler_with(vec![Box::new(provider.clone())]);
    let request = HttpRequest::new("POST").with_binary_body(&common::sample_presentation(&["Hello"], &[]));

    let response = handler.handle(request).await;

    assert_eq!(response.status_code, 200);
    assert_eq!(
        response.header("content-disposition"),
        Some("attachment; filename=\"translated_ru.pptx\"")
    );
    let output = response.body_bytes().unwrap();
    assert!(common::read_entry(&output, "ppt/slides/slide1.xml").contains("<a:t>[ru] Hello</a:t>"));
}

#[tokio::test]
async fn test_handle_withAllProvidersFailing_shouldReturnServerErrorWithCause() {
    let handler = handler_with(vec![
        Box::new(MockProvider::failing().named("google")),
        Box::new(MockProvider::failing().named("libretranslate")),
    ]);
    let request = HttpRequest::new("POST").with_binary_body(&common::sample_presentation(&["Hello"], &[]));

    let response = handler.handle(request).await;

    assert_eq!(response.status_code, 500);
    assert_cors(&response);
    assert!(response.body.contains("Simulated libretranslate failure"));
}

#[tokio::test]
async fn test_handle_withCorruptArchive_shouldReturnServerError() {
    let handler = handler_with(vec![Box::new(MockProvider::working())]);
    let request = HttpRequest::new("POST").with_binary_body(b"PK but not really");

    let response = handler.handle(request).await;

    assert_eq!(response.status_code, 500);
    assert!(response.body.contains("presentation archive"));
}

#[tokio::test]
async fn test_router_shouldServeHandlerOverHttp() {
    let handler = handler_with(vec![Box::new(common::greeting_provider())]);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, deckglot::server::router(handler)).await.unwrap();
    });

    let client = reqwest::Client::new();
    let input = common::sample_presentation(&["Hello", "World"], &[]);
    let response = client
        .post(format!("http://{}/translate?source=en&target=fr", address))
        .body(input)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        response.headers().get("content-type").unwrap().to_str().unwrap(),
        PPTX_CONTENT_TYPE
    );
    let output = response.bytes().await.unwrap();
    assert_eq!(common::read_entry(&output, "ppt/slides/slide1.xml"), common::slide_xml(&["Bonjour", "Monde"]));

    let preflight = client
        .request(reqwest::Method::OPTIONS, format!("http://{}/", address))
        .send()
        .await
        .unwrap();
    assert_eq!(preflight.status().as_u16(), 204);
}
