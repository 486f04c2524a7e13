mod common;

use reqwest::StatusCode;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common::spawn_portal;

#[tokio::test]
async fn test_landing_page_renders_greeting() {
    let portal = spawn_portal().await;

    Mock::given(method("GET"))
        .and(path("/hi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Hello from the API",
            "description": "Served by the backend"
        })))
        .expect(1)
        .mount(&portal.api)
        .await;

    let response = portal.client.get(portal.url("/")).send().await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.unwrap();
    assert!(body.contains("Retrieving from the Server"));
    assert!(body.contains("Hello from the API"));
    assert!(body.contains("Served by the backend"));
}

#[tokio::test]
async fn test_landing_page_upstream_failure() {
    let portal = spawn_portal().await;

    Mock::given(method("GET"))
        .and(path("/hi"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&portal.api)
        .await;

    let response = portal.client.get(portal.url("/")).send().await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}
