use deferred_fetch::{
    ErrorKind, FetchConfig, LogLine, PrimerError, RecordingSink, RelatedArticles,
    RelatedArticlesClient,
};
use httpmock::prelude::*;
use std::sync::Arc;

fn client_with(config: FetchConfig, sink: &RecordingSink) -> RelatedArticlesClient {
    RelatedArticlesClient::new(config, Arc::new(sink.clone())).unwrap()
}

fn client_for(endpoint: String, sink: &RecordingSink) -> RelatedArticlesClient {
    client_with(
        FetchConfig {
            endpoint,
            ..FetchConfig::default()
        },
        sink,
    )
}

/// Nothing listens on port 1, so every request fails at connect time.
fn unreachable_endpoint() -> String {
    "http://127.0.0.1:1/api/rest_v1/page/related".to_string()
}

#[tokio::test]
async fn test_fetch_related_articles_returns_exact_body() {
    let server = MockServer::start();
    let body = serde_json::json!({
        "pages": [
            {"title": "TypeScript", "pageid": 8157205},
            {"title": "ECMAScript", "pageid": 9845}
        ]
    });

    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/api/rest_v1/page/related/JavaScript");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(body.clone());
    });

    let sink = RecordingSink::new();
    let client = client_for(server.url("/api/rest_v1/page/related"), &sink);

    let result = client.fetch_related_articles("JavaScript").await;

    api_mock.assert();
    assert_eq!(result, Some(RelatedArticles(body)));
    assert!(sink.lines().is_empty());
}

#[tokio::test]
async fn test_fetch_related_articles_connection_failure_logs_once() {
    let sink = RecordingSink::new();
    let client = client_for(unreachable_endpoint(), &sink);

    let result = client.fetch_related_articles("Test").await;

    assert!(result.is_none());
    assert_eq!(sink.lines().len(), 1);
    assert_eq!(sink.errors().len(), 1);
    assert!(sink.errors()[0].starts_with("Network request failed"));
}

#[tokio::test]
async fn test_chaining_connection_failure_logs_once() {
    let sink = RecordingSink::new();
    let client = client_for(unreachable_endpoint(), &sink);

    let result = client.fetch_related_articles_chaining("Test").await;

    assert!(result.is_none());
    assert_eq!(sink.errors().len(), 1);
    assert_eq!(sink.lines().len(), 1);
}

#[tokio::test]
async fn test_exception_path_logs_marker_then_error() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/api/rest_v1/page/related/JavaScript");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"pages": []}));
    });

    let sink = RecordingSink::new();
    let client = client_for(server.url("/api/rest_v1/page/related"), &sink);

    let result = client.fetch_related_articles_exception("JavaScript").await;

    api_mock.assert();
    assert!(result.is_none());
    assert_eq!(
        sink.lines(),
        vec![
            LogLine::info("Error caught!"),
            LogLine::error("Response has no accessor named `noMethodLikeThis`"),
        ]
    );
}

#[tokio::test]
async fn test_try_fetch_distinguishes_failure_kinds() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/rest_v1/page/related/Broken");
        then.status(200).body("definitely not json");
    });

    let sink = RecordingSink::new();
    let client = client_for(server.url("/api/rest_v1/page/related"), &sink);

    let decode = client.try_fetch_related_articles("Broken").await.unwrap_err();
    assert_eq!(decode.kind(), ErrorKind::Decode);
    assert!(matches!(decode, PrimerError::DecodeError(_)));

    let offline = client_for(unreachable_endpoint(), &sink);
    let network = offline.try_fetch_related_articles("Test").await.unwrap_err();
    assert_eq!(network.kind(), ErrorKind::Network);

    // 傳遞錯誤的版本不寫 sink
    assert!(sink.lines().is_empty());
}

#[tokio::test]
async fn test_non_success_status_is_not_checked_by_default() {
    let server = MockServer::start();
    let body = serde_json::json!({"type": "not_found", "title": "Not found."});
    server.mock(|when, then| {
        when.method(GET).path("/api/rest_v1/page/related/Missing");
        then.status(404)
            .header("Content-Type", "application/json")
            .json_body(body.clone());
    });

    let sink = RecordingSink::new();
    let lenient = client_for(server.url("/api/rest_v1/page/related"), &sink);
    assert_eq!(
        lenient.fetch_related_articles("Missing").await,
        Some(RelatedArticles(body))
    );

    let strict = client_with(
        FetchConfig {
            endpoint: server.url("/api/rest_v1/page/related"),
            require_success_status: true,
            ..FetchConfig::default()
        },
        &sink,
    );
    let err = strict
        .try_fetch_related_articles("Missing")
        .await
        .unwrap_err();
    assert!(matches!(err, PrimerError::HttpStatusError { status: 404 }));
    assert_eq!(err.kind(), ErrorKind::Network);
}

#[tokio::test]
async fn test_configured_user_agent_is_sent() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/rest_v1/page/related/Rust")
            .header("user-agent", "deferred-fetch-tests/1.0");
        then.status(200).json_body(serde_json::json!({"pages": []}));
    });

    let sink = RecordingSink::new();
    let client = client_with(
        FetchConfig {
            endpoint: server.url("/api/rest_v1/page/related"),
            user_agent: Some("deferred-fetch-tests/1.0".to_string()),
            timeout_seconds: Some(5),
            ..FetchConfig::default()
        },
        &sink,
    );

    assert!(client.fetch_related_articles("Rust").await.is_some());
    api_mock.assert();
}

#[test]
fn test_invalid_config_is_rejected() {
    let sink = RecordingSink::new();
    let result = RelatedArticlesClient::new(
        FetchConfig {
            endpoint: "ftp://en.wikipedia.org/page/related".to_string(),
            ..FetchConfig::default()
        },
        Arc::new(sink),
    );

    match result {
        Err(e) => assert_eq!(e.kind(), ErrorKind::Configuration),
        Ok(_) => panic!("ftp endpoint should be rejected"),
    }
}
