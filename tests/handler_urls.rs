mod common;

use axum::http::StatusCode;
use serde_json::json;

const ORIGINAL: &str = "https://example.com/very/long/path";

#[tokio::test]
async fn test_shorten_creates_short_link() {
    let server = common::create_test_server(common::create_memory_state());

    let response = server
        .post("/api/urls")
        .json(&json!({ "original": ORIGINAL }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let json = response.json::<serde_json::Value>();
    let url = json["url"].as_str().unwrap();
    let slug = common::slug_of(url);
    assert_eq!(slug.len(), 12);
    assert!(
        slug.chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
    );
}

#[tokio::test]
async fn test_shorten_is_idempotent() {
    let server = common::create_test_server(common::create_memory_state());

    let first = server
        .post("/api/urls")
        .json(&json!({ "original": ORIGINAL }))
        .await;
    first.assert_status(StatusCode::CREATED);

    let second = server
        .post("/api/urls")
        .json(&json!({ "original": ORIGINAL }))
        .await;
    second.assert_status_ok();

    assert_eq!(
        first.json::<serde_json::Value>()["url"],
        second.json::<serde_json::Value>()["url"]
    );
}

#[tokio::test]
async fn test_shorten_distinct_urls_get_distinct_links() {
    let server = common::create_test_server(common::create_memory_state());

    let a = server
        .post("/api/urls")
        .json(&json!({ "original": "https://a.example.com" }))
        .await
        .json::<serde_json::Value>();
    let b = server
        .post("/api/urls")
        .json(&json!({ "original": "https://b.example.com" }))
        .await
        .json::<serde_json::Value>();

    assert_ne!(a["url"], b["url"]);
}

#[tokio::test]
async fn test_shorten_own_short_link_returns_it() {
    let server = common::create_test_server(common::create_memory_state());

    let created = server
        .post("/api/urls")
        .json(&json!({ "original": ORIGINAL }))
        .await
        .json::<serde_json::Value>();
    let url = created["url"].as_str().unwrap();

    let response = server
        .post("/api/urls")
        .json(&json!({ "original": url }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<serde_json::Value>()["url"], url);
}

#[tokio::test]
async fn test_shorten_unknown_short_link_is_rejected() {
    let server = common::create_test_server(common::create_memory_state());

    let response = server
        .post("/api/urls")
        .json(&json!({ "original": "https://sho.rt/?u=0a1b2c3d4e5f" }))
        .await;

    response.assert_status_bad_request();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "validation_error");
}

#[tokio::test]
async fn test_shorten_missing_original() {
    let server = common::create_test_server(common::create_memory_state());

    let response = server.post("/api/urls").json(&json!({})).await;

    response.assert_status_bad_request();
    let json = response.json::<serde_json::Value>();
    assert!(json["message"].is_string());
    assert_eq!(json["error"]["code"], "validation_error");
}

#[tokio::test]
async fn test_shorten_invalid_url() {
    let server = common::create_test_server(common::create_memory_state());

    let response = server
        .post("/api/urls")
        .json(&json!({ "original": "not a url" }))
        .await;

    response.assert_status_bad_request();
    assert!(response.json::<serde_json::Value>()["message"].is_string());
}

#[tokio::test]
async fn test_shorten_malformed_json() {
    let server = common::create_test_server(common::create_memory_state());

    let response = server
        .post("/api/urls")
        .content_type("application/json")
        .text("{ not json")
        .await;

    response.assert_status_bad_request();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["message"], "Invalid JSON body");
}

#[tokio::test]
async fn test_resolve_round_trip() {
    let server = common::create_test_server(common::create_memory_state());

    let created = server
        .post("/api/urls")
        .json(&json!({ "original": ORIGINAL }))
        .await
        .json::<serde_json::Value>();
    let url = created["url"].as_str().unwrap();

    let response = server
        .get("/api/urls")
        .add_query_param("original", url)
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<serde_json::Value>(),
        json!({ "original": ORIGINAL })
    );
}

#[tokio::test]
async fn test_resolve_by_original_is_self_resolving() {
    let server = common::create_test_server(common::create_memory_state());

    server
        .post("/api/urls")
        .json(&json!({ "original": ORIGINAL }))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server
        .get("/api/urls")
        .add_query_param("original", ORIGINAL)
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<serde_json::Value>()["original"], ORIGINAL);
}

#[tokio::test]
async fn test_resolve_not_found() {
    let server = common::create_test_server(common::create_memory_state());

    let response = server
        .get("/api/urls")
        .add_query_param("original", "https://never-submitted.example.com")
        .await;

    response.assert_status_not_found();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["message"], "That link is not valid :(");
    assert_eq!(json["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_resolve_missing_param() {
    let server = common::create_test_server(common::create_memory_state());

    let response = server.get("/api/urls").await;

    response.assert_status_bad_request();
    assert!(response.json::<serde_json::Value>()["message"].is_string());
}
