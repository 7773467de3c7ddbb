//! Dispatcher behavior against a mock server: authentication headers, status handling, decoding
//! and transport failures.

use std::time::Duration;

use oaikit::{models::Model, Client, HttpMethod, OaikitError, OutboundRequest};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client_for(server: &MockServer) -> Client {
    Client::builder("test-api-key")
        .base_url(format!("{}/v1", server.uri()))
        .build()
        .unwrap()
}

#[tokio::test]
async fn decodes_ok_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/models/davinci"))
        .and(header("Authorization", "Bearer test-api-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "davinci",
            "object": "model",
            "created": 1649359874,
            "owned_by": "openai"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let model = client_for(&server).await.model("davinci").await.unwrap();

    assert_eq!(model.id, "davinci");
    assert_eq!(model.owned_by, "openai");
}

#[tokio::test]
async fn error_envelope_becomes_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/models/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {
                "message": "not found",
                "type": "invalid_request_error",
                "param": null,
                "code": null
            }
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).await.model("missing").await.unwrap_err();
    let api = err.api_error().expect("api error");

    assert_eq!(api.status_code, 404);
    assert_eq!(api.message, "not found");
    assert_eq!(api.error_type, "invalid_request_error");
}

#[tokio::test]
async fn plain_text_failure_is_unknown_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/models"))
        .respond_with(ResponseTemplate::new(500).set_body_string("plain text failure"))
        .mount(&server)
        .await;

    let err = client_for(&server).await.models().await.unwrap_err();

    match err {
        OaikitError::Api(api) => {
            assert_eq!(api.status_code, 500);
            assert_eq!(api.message, "plain text failure");
            assert_eq!(api.error_type, "unknown");
        }
        other => panic!("expected api error, got {other:?}"),
    }
}

#[tokio::test]
async fn mismatched_ok_body_is_decoding_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/models/davinci"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 42 })))
        .mount(&server)
        .await;

    let err = client_for(&server).await.model("davinci").await.unwrap_err();

    assert!(matches!(err, OaikitError::Decoding(_)), "{err:?}");
}

#[tokio::test]
async fn organization_header_only_when_configured() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/models"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "object": "list", "data": [] })),
        )
        .mount(&server)
        .await;

    let without = client_for(&server).await;
    let with = Client::builder("test-api-key")
        .base_url(format!("{}/v1", server.uri()))
        .organization("org-123")
        .build()
        .unwrap();
    let empty = Client::builder("test-api-key")
        .base_url(format!("{}/v1", server.uri()))
        .organization("")
        .build()
        .unwrap();

    without.models().await.unwrap();
    with.models().await.unwrap();
    empty.models().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 3);
    assert!(requests[0].headers.get("OpenAI-Organization").is_none());
    assert_eq!(
        requests[1].headers.get("OpenAI-Organization").unwrap().to_str().unwrap(),
        "org-123"
    );
    assert!(requests[2].headers.get("OpenAI-Organization").is_none());
    for request in &requests {
        assert_eq!(
            request.headers.get("Authorization").unwrap().to_str().unwrap(),
            "Bearer test-api-key"
        );
    }
}

#[tokio::test]
async fn timeout_is_a_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/models"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "object": "list", "data": [] }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let client = Client::builder("test-api-key")
        .base_url(format!("{}/v1", server.uri()))
        .timeout(Duration::from_millis(100))
        .build()
        .unwrap();

    let err = client.models().await.unwrap_err();

    assert!(matches!(err, OaikitError::Transport(_)));
    assert!(err.is_timeout());
}

#[tokio::test]
async fn connection_refused_is_a_transport_error() {
    // Nothing listens on the discard port.
    let client = Client::builder("test-api-key")
        .base_url("http://127.0.0.1:9/v1")
        .build()
        .unwrap();

    let err = client.models().await.unwrap_err();

    assert!(matches!(err, OaikitError::Transport(_)), "{err:?}");
    assert!(!err.is_timeout());
}

#[tokio::test]
async fn execute_accepts_hand_built_requests() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/models/davinci"))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "davinci",
            "object": "model",
            "created": 1,
            "owned_by": "openai"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let request = OutboundRequest::new(HttpMethod::Post, client.url("/models/davinci"))
        .json(&json!({ "probe": true }))
        .unwrap();

    let model: Model = client.execute(request).await.unwrap();
    assert_eq!(model.id, "davinci");

    let received = &server.received_requests().await.unwrap()[0];
    let body: serde_json::Value = serde_json::from_slice(&received.body).unwrap();
    assert_eq!(body, json!({ "probe": true }));
}

#[tokio::test]
async fn bodiless_requests_send_no_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v1/models/curie:ft-acme-2021-03-03"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "curie:ft-acme-2021-03-03",
            "object": "model",
            "deleted": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let deleted = client_for(&server)
        .await
        .delete_model("curie:ft-acme-2021-03-03")
        .await
        .unwrap();
    assert!(deleted.deleted);

    let received = &server.received_requests().await.unwrap()[0];
    assert!(received.headers.get("Content-Type").is_none());
    assert!(received.body.is_empty());
}

#[tokio::test]
async fn both_constructors_send_the_crate_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/models"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "object": "list", "data": [] })),
        )
        .expect(2)
        .mount(&server)
        .await;

    let url = format!("{}/v1/models", server.uri());
    let plain = Client::new("test-api-key").unwrap();
    let built = Client::builder("test-api-key").build().unwrap();

    let _: serde_json::Value = plain
        .execute(OutboundRequest::new(HttpMethod::Get, url.as_str()))
        .await
        .unwrap();
    let _: serde_json::Value = built
        .execute(OutboundRequest::new(HttpMethod::Get, url.as_str()))
        .await
        .unwrap();

    let expected = concat!("oaikit/", env!("CARGO_PKG_VERSION"));
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    for request in &requests {
        assert_eq!(
            request.headers.get("User-Agent").unwrap().to_str().unwrap(),
            expected
        );
    }
}

#[tokio::test]
async fn supplied_transport_is_used_as_is() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/models"))
        .and(header("X-Trace-Tag", "from-transport"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "object": "list", "data": [] }))
                .set_delay(Duration::from_millis(300)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut headers = reqwest::header::HeaderMap::new();
    headers.insert(
        "X-Trace-Tag",
        reqwest::header::HeaderValue::from_static("from-transport"),
    );
    let http = reqwest::Client::builder()
        .default_headers(headers)
        .build()
        .unwrap();

    // The builder's timeout is shorter than the response delay but does not apply.
    let client = Client::builder("test-api-key")
        .base_url(format!("{}/v1", server.uri()))
        .timeout(Duration::from_millis(20))
        .http_client(http)
        .build()
        .unwrap();

    let models = client.models().await.unwrap();
    assert!(models.data.is_empty());

    let received = &server.received_requests().await.unwrap()[0];
    assert_eq!(
        received.headers.get("Authorization").unwrap().to_str().unwrap(),
        "Bearer test-api-key"
    );
}
