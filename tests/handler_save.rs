mod common;

use alias_shortener::config::BasicCredentials;
use alias_shortener::domain::repositories::AliasRepository;
use axum::http::{HeaderName, HeaderValue, StatusCode, header};
use serde_json::json;

#[tokio::test]
async fn test_save_with_alias() {
    let (state, repo) = common::create_test_state();
    let server = common::create_test_server(state);

    let response = server
        .post("/url")
        .json(&json!({ "url": "https://example.com", "alias": "ex" }))
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({ "status": "OK", "alias": "ex" }));

    assert_eq!(repo.resolve("ex").await.unwrap(), "https://example.com");
}

#[tokio::test]
async fn test_save_generates_alias() {
    let (state, repo) = common::create_test_state();
    let server = common::create_test_server(state);

    let response = server
        .post("/url")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "OK");
    let alias = json["alias"].as_str().unwrap();
    assert_eq!(alias.len(), 6);
    assert!(alias.chars().all(|c| c.is_ascii_alphanumeric()));

    assert_eq!(repo.resolve(alias).await.unwrap(), "https://example.com");
}

#[tokio::test]
async fn test_save_empty_alias_generates_alias() {
    let (state, _repo) = common::create_test_state();
    let server = common::create_test_server(state);

    let response = server
        .post("/url")
        .json(&json!({ "url": "https://example.com", "alias": "" }))
        .await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["alias"].as_str().unwrap().len(), 6);
}

#[tokio::test]
async fn test_save_duplicate_alias() {
    let (state, repo) = common::create_test_state();
    common::create_test_alias(&repo, "dup", "https://a.com").await;
    let server = common::create_test_server(state);

    let response = server
        .post("/url")
        .json(&json!({ "url": "https://b.com", "alias": "dup" }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    response.assert_json(&json!({ "status": "Error", "error": "url already exists" }));

    // Existing binding is unchanged
    assert_eq!(repo.resolve("dup").await.unwrap(), "https://a.com");
}

#[tokio::test]
async fn test_save_empty_request() {
    let (state, _repo) = common::create_test_state();
    let server = common::create_test_server(state);

    let response = server.post("/url").await;

    response.assert_status_bad_request();
    response.assert_json(&json!({ "status": "Error", "error": "empty request" }));
}

#[tokio::test]
async fn test_save_malformed_json() {
    let (state, _repo) = common::create_test_state();
    let server = common::create_test_server(state);

    let response = server
        .post("/url")
        .text("{\"url\": ")
        .content_type("application/json")
        .await;

    response.assert_status_bad_request();
    response.assert_json(&json!({ "status": "Error", "error": "empty request" }));
}

#[tokio::test]
async fn test_save_missing_url() {
    let (state, _repo) = common::create_test_state();
    let server = common::create_test_server(state);

    let response = server.post("/url").json(&json!({ "alias": "x1" })).await;

    response.assert_status_bad_request();
    response.assert_json(&json!({
        "status": "Error",
        "error": "field url is a required field"
    }));
}

#[tokio::test]
async fn test_save_invalid_url() {
    let (state, repo) = common::create_test_state();
    let server = common::create_test_server(state);

    let response = server
        .post("/url")
        .json(&json!({ "url": "not-a-valid-url", "alias": "bad" }))
        .await;

    response.assert_status_bad_request();
    response.assert_json(&json!({
        "status": "Error",
        "error": "field url is not a valid URL"
    }));

    assert!(repo.is_empty().await);
}

#[tokio::test]
async fn test_save_rejects_non_http_scheme() {
    let (state, _repo) = common::create_test_state();
    let server = common::create_test_server(state);

    let response = server
        .post("/url")
        .json(&json!({ "url": "ftp://example.com/file", "alias": "ftp" }))
        .await;

    response.assert_status_bad_request();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "Error");
}

#[tokio::test]
async fn test_save_invalid_alias_characters() {
    let (state, _repo) = common::create_test_state();
    let server = common::create_test_server(state);

    let response = server
        .post("/url")
        .json(&json!({ "url": "https://example.com", "alias": "has space" }))
        .await;

    response.assert_status_bad_request();
    response.assert_json(&json!({
        "status": "Error",
        "error": "field alias contains invalid characters"
    }));
}

#[tokio::test]
async fn test_save_reserved_alias() {
    let (state, _repo) = common::create_test_state();
    let server = common::create_test_server(state);

    let response = server
        .post("/url")
        .json(&json!({ "url": "https://example.com", "alias": "url" }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_save_with_invalid_token_is_not_rejected() {
    let (state, _repo) = common::create_test_state();
    let server = common::create_test_server(state);

    let response = server
        .post("/url")
        .add_header(header::AUTHORIZATION, HeaderValue::from_static("Bearer garbage"))
        .json(&json!({ "url": "https://example.com", "alias": "anon" }))
        .await;

    response.assert_status_ok();
}

#[tokio::test]
async fn test_save_requires_configured_basic_credentials() {
    let (state, _repo) = common::create_test_state();
    let state = state.with_basic_credentials(Some(BasicCredentials {
        user: "admin".to_string(),
        password: "secret".to_string(),
    }));
    let server = common::create_test_server(state);

    // admin:secret
    let response = server
        .post("/url")
        .add_header(
            header::AUTHORIZATION,
            HeaderValue::from_static("Basic YWRtaW46c2VjcmV0"),
        )
        .json(&json!({ "url": "https://example.com", "alias": "ok" }))
        .await;
    response.assert_status_ok();

    // admin:wrong
    let response = server
        .post("/url")
        .add_header(
            header::AUTHORIZATION,
            HeaderValue::from_static("Basic YWRtaW46d3Jvbmc="),
        )
        .json(&json!({ "url": "https://example.com", "alias": "nope" }))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    response.assert_json(&json!({ "status": "Error", "error": "unauthorized" }));
    assert!(response.headers().contains_key(header::WWW_AUTHENTICATE));

    let response = server
        .post("/url")
        .json(&json!({ "url": "https://example.com", "alias": "nope" }))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_basic_credentials_do_not_guard_redirect() {
    let (state, repo) = common::create_test_state();
    common::create_test_alias(&repo, "open", "https://example.com").await;
    let state = state.with_basic_credentials(Some(BasicCredentials {
        user: "admin".to_string(),
        password: "secret".to_string(),
    }));
    let server = common::create_test_server(state);

    let response = server.get("/open").await;

    response.assert_status(StatusCode::FOUND);
}

#[tokio::test]
async fn test_response_carries_request_id() {
    let (state, _repo) = common::create_test_state();
    let server = common::create_test_server(state);

    let response = server.post("/url").await;
    assert!(response.headers().contains_key("x-request-id"));

    let response = server
        .post("/url")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static("req-123"),
        )
        .await;
    assert_eq!(response.headers()["x-request-id"], "req-123");
}

#[tokio::test]
async fn test_save_rejects_control_characters_in_url() {
    let (state, repo) = common::create_test_state();
    let server = common::create_test_server(state);

    let response = server
        .post("/url")
        .json(&json!({ "url": "https://example.com/a\nb", "alias": "nl" }))
        .await;

    response.assert_status_bad_request();
    response.assert_json(&json!({ "status": "Error", "error": "field url is not a valid URL" }));

    assert!(repo.resolve("nl").await.is_err());
}

#[tokio::test]
async fn test_save_storage_failure() {
    let state = common::create_state_with_store(std::sync::Arc::new(
        common::FailingAliasRepository::unavailable(),
    ));
    let server = common::create_test_server(state);

    let response = server
        .post("/url")
        .json(&json!({ "url": "https://example.com", "alias": "ex" }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    response.assert_json(&json!({ "status": "Error", "error": "failed to add url" }));
}

#[tokio::test]
async fn test_save_generated_alias_exhaustion() {
    let state = common::create_state_with_store(std::sync::Arc::new(
        common::FailingAliasRepository::colliding(),
    ));
    let server = common::create_test_server(state);

    let response = server
        .post("/url")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    response.assert_json(&json!({ "status": "Error", "error": "failed to add url" }));
}
