use std::sync::Arc;

use axum::http::StatusCode;
use coachbook_core::models::contact::ContactResponse;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::test_utils::{RecordingRelay, TestContext};

#[tokio::test]
async fn test_contact_message_is_relayed() {
    let relay = Arc::new(RecordingRelay::default());
    let (server, _) = TestContext::new().with_relay(relay.clone()).server();

    let response = server
        .post("/api/contact")
        .json(&json!({
            "name": " Jane ",
            "email": "Jane@Example.com",
            "phone": "",
            "message": "Do you offer evening sessions?"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.json::<ContactResponse>().success);

    let delivered = relay.delivered.lock().unwrap();
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].name, "Jane");
    assert_eq!(delivered[0].email, "jane@example.com");
    assert_eq!(delivered[0].phone, None);
}

#[tokio::test]
async fn test_contact_message_requires_text() {
    let relay = Arc::new(RecordingRelay::default());
    let (server, _) = TestContext::new().with_relay(relay.clone()).server();

    let response = server
        .post("/api/contact")
        .json(&json!({ "name": "Jane", "email": "jane@example.com", "message": "   " }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert!(relay.delivered.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_relay_failure_is_internal_error() {
    let relay = Arc::new(RecordingRelay {
        fail: true,
        ..Default::default()
    });
    let (server, _) = TestContext::new().with_relay(relay).server();

    let response = server
        .post("/api/contact")
        .json(&json!({ "name": "Jane", "email": "jane@example.com", "message": "Hello" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json::<serde_json::Value>()["error"], "Internal server error");
}
