//! HTTP client tests against a local mock of the analysis service.

use std::net::TcpListener;
use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{body_string_contains, header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pluto::client::{AnalysisClient, AnalysisError, ClientConfig, HttpAnalysisClient};
use pluto::models::{mock_result, AnalysisRequest, DocumentBlob, KeyTerm};
use pluto::services::{LifecycleState, ResultLifecycleController};

const ANALYZE: &str = "/api/v1/ml/analyze";

fn client_for(base_url: &str, dev: bool) -> HttpAnalysisClient {
    let config = ClientConfig::default()
        .with_base_url(base_url)
        .with_development(dev);
    HttpAnalysisClient::new(config).unwrap()
}

/// A base URL nothing is listening on.
fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_success_parses_result() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ANALYZE))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "terms": [{"term": "lda", "score": 0.9}, "corpus"],
            "clusters": [{"label": "Topics", "keywords": ["lda"]}],
            "summary": ["One sentence."],
            "meta": {"doc_count": 2, "elapsed_s": 0.5}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server.uri(), false);
    let result = client.analyze(&AnalysisRequest::default()).await.unwrap();

    assert_eq!(
        result.terms,
        vec![KeyTerm::new("lda", 0.9), KeyTerm::unscored("corpus")]
    );
    assert_eq!(result.clusters[0].label.as_deref(), Some("Topics"));
    assert_eq!(result.clusters[0].doc_count, None);
    assert_eq!(result.summary, vec!["One sentence."]);
    assert_eq!(result.meta.doc_count, Some(2));
    assert_eq!(result.meta.word_count, None);
}

#[tokio::test]
async fn test_multipart_body_carries_every_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ANALYZE))
        .and(header_regex("content-type", "^multipart/form-data"))
        .and(body_string_contains("name=\"keywords\""))
        .and(body_string_contains("topic models"))
        .and(body_string_contains("name=\"use_bow\""))
        .and(body_string_contains("filename=\"notes.txt\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let request = AnalysisRequest {
        use_bow: true,
        ..AnalysisRequest::default()
    }
    .with_keywords(["nlp", "topic models"])
    .with_document(DocumentBlob::new(
        "notes.txt",
        "text/plain",
        b"some notes".to_vec(),
    ));

    let client = client_for(&server.uri(), false);
    let result = client.analyze(&request).await.unwrap();
    assert!(result.terms.is_empty());

    let received = server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&received[0].body);
    let keyword_parts = body.matches("name=\"keywords\"").count();
    assert_eq!(keyword_parts, 2);
    assert!(body.contains("true"));
    assert!(body.contains("some notes"));
}

#[tokio::test]
async fn test_error_body_becomes_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ANALYZE))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;

    let err = client_for(&server.uri(), false)
        .analyze(&AnalysisRequest::default())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        AnalysisError::Service {
            status: 500,
            message: "internal error".to_string()
        }
    );
}

#[tokio::test]
async fn test_empty_error_body_uses_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ANALYZE))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client_for(&server.uri(), false)
        .analyze(&AnalysisRequest::default())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "HTTP 500");
}

#[tokio::test]
async fn test_unreadable_error_body_uses_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ANALYZE))
        .respond_with(
            ResponseTemplate::new(500)
                .insert_header("content-encoding", "gzip")
                .set_body_bytes(b"definitely not gzip".to_vec()),
        )
        .mount(&server)
        .await;

    let config = ClientConfig::default()
        .with_base_url(&server.uri())
        .with_development(true);
    let controller = ResultLifecycleController::from_config(config).unwrap();
    controller.analyze(AnalysisRequest::default()).await;
    assert_eq!(controller.state(), LifecycleState::Error("HTTP 500".into()));
}

#[tokio::test]
async fn test_invalid_json_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ANALYZE))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server.uri(), true)
        .analyze(&AnalysisRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AnalysisError::MalformedResponse(_)));
    assert!(!err.is_transport());
}

#[tokio::test]
async fn test_connection_refused_is_transport() {
    let err = client_for(&closed_port_url(), false)
        .analyze(&AnalysisRequest::default())
        .await
        .unwrap_err();
    assert!(err.is_transport(), "unexpected error: {:?}", err);
    // The root cause follows reqwest's own summary
    let message = err.to_string();
    assert!(message.matches(": ").count() >= 2, "no cause in {:?}", message);
}

#[tokio::test]
async fn test_bad_base_url_is_invalid_request() {
    let err = client_for("not a url", true)
        .analyze(&AnalysisRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AnalysisError::InvalidRequest(_)));
}

#[tokio::test]
async fn test_controller_against_service() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ANALYZE))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let config = ClientConfig::default()
        .with_base_url(&server.uri())
        .with_development(true);
    let controller = ResultLifecycleController::from_config(config).unwrap();
    controller.analyze(AnalysisRequest::default()).await;

    // A service error is never replaced by demo data
    assert_eq!(controller.state(), LifecycleState::Error("bad gateway".into()));
}

#[tokio::test]
async fn test_controller_unreachable_in_development_shows_mock() {
    let config = ClientConfig::default()
        .with_base_url(&closed_port_url())
        .with_development(true);
    let controller = ResultLifecycleController::new(
        Arc::new(HttpAnalysisClient::new(config.clone()).unwrap()),
        config,
    );
    controller.analyze(AnalysisRequest::default()).await;

    match controller.state() {
        LifecycleState::Success(done) => {
            assert!(done.fallback);
            assert_eq!(*done.result, mock_result());
        }
        other => panic!("unexpected state: {:?}", other),
    }
}
