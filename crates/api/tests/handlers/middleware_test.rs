use axum::http::StatusCode;
use coachbook_api::middleware::{auth, error_handling::map_error};
use coachbook_core::errors::CoachError;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::Value;

use crate::test_utils::TestContext;

#[rstest]
#[case(CoachError::NotFound("Booking".into()), StatusCode::NOT_FOUND)]
#[case(CoachError::Validation("Invalid input".into()), StatusCode::BAD_REQUEST)]
#[case(CoachError::Conflict("Slot taken".into()), StatusCode::CONFLICT)]
#[case(CoachError::Authentication("Invalid password".into()), StatusCode::UNAUTHORIZED)]
#[case(CoachError::Authorization("Not authorized".into()), StatusCode::FORBIDDEN)]
#[case(CoachError::Database(eyre::eyre!("Database error")), StatusCode::INTERNAL_SERVER_ERROR)]
fn test_error_status_mapping(#[case] error: CoachError, #[case] expected: StatusCode) {
    let response = map_error(error);
    assert_eq!(response.status(), expected);
}

#[tokio::test]
async fn test_error_handling_internal() {
    let error = CoachError::Internal(Box::new(std::io::Error::new(
        std::io::ErrorKind::Other,
        "Internal error",
    )));

    let response = map_error(error);

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_hash_password() {
    let password = "test_password";
    let hashed = auth::hash_password(password).unwrap();

    assert_ne!(hashed, password);
    assert!(hashed.starts_with("$argon2"));
    assert!(auth::verify_password(password, &hashed).unwrap());
    assert!(!auth::verify_password("wrong_password", &hashed).unwrap());
}

#[tokio::test]
async fn test_health_and_version() {
    let (server, _) = TestContext::new().server();

    let response = server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["status"], "ok");

    let response = server.get("/version").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["name"], "coachbook-api");
}
