use axum::http::StatusCode;
use coachbook_core::{
    errors::CoachError,
    models::booking::{BookedTimesResponse, Booking, BookingStatus},
};
use mockall::predicate;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::test_utils::{admin_auth, booking, time, TestContext};

#[tokio::test]
async fn test_create_booking_returns_created() {
    let mut ctx = TestContext::new();
    let stored = booking("2099-03-02", "10:20", BookingStatus::Pending);
    let returned = stored.clone();
    ctx.store
        .expect_create_booking()
        .withf(|b| b.email == "client@example.com" && b.time == time("10:20"))
        .times(1)
        .returning(move |_| Ok(returned.clone()));
    let (server, notifier) = ctx.server();

    let response = server
        .post("/api/bookings")
        .json(&json!({
            "name": " Jane Client ",
            "email": "Client@Example.com",
            "phone": "+31 6 1234 5678",
            "date": "2099-03-02",
            "time": "10:20",
            "notes": "First session",
            "package": "pack3"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body = response.json::<Booking>();
    assert_eq!(body.id, stored.id);
    assert_eq!(body.status, BookingStatus::Pending);
    assert_eq!(*notifier.received.lock().unwrap(), vec![stored.id]);
}

#[tokio::test]
async fn test_create_booking_rejects_past_date() {
    // No store expectation: the request must be refused before storage
    let (server, notifier) = TestContext::new().server();

    let response = server
        .post("/api/bookings")
        .json(&json!({
            "name": "Jane",
            "email": "client@example.com",
            "date": "2001-01-01",
            "time": "10:20"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert!(notifier.received.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_booking_rejects_malformed_fields() {
    let (server, _) = TestContext::new().server();

    for payload in [
        json!({ "name": "Jane", "email": "not-an-email", "date": "2099-03-02", "time": "10:20" }),
        json!({ "name": "", "email": "client@example.com", "date": "2099-03-02", "time": "10:20" }),
        json!({ "name": "Jane", "email": "client@example.com", "date": "02-03-2099", "time": "10:20" }),
        json!({ "name": "Jane", "email": "client@example.com", "date": "2099-03-02", "time": "10.20" }),
    ] {
        let response = server.post("/api/bookings").json(&payload).await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST, "{payload}");
    }
}

#[tokio::test]
async fn test_create_booking_conflict_is_reported() {
    let mut ctx = TestContext::new();
    ctx.store
        .expect_create_booking()
        .times(1)
        .returning(|_| Err(CoachError::Conflict("This time slot is already booked".into())));
    let (server, notifier) = ctx.server();

    let response = server
        .post("/api/bookings")
        .json(&json!({
            "name": "Jane",
            "email": "client@example.com",
            "date": "2099-03-02",
            "time": "10:20"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    let body = response.json::<Value>();
    assert_eq!(body["error"], "Conflict: This time slot is already booked");
    assert!(notifier.received.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_list_bookings_by_email() {
    let mut ctx = TestContext::new();
    let first = booking("2099-03-02", "09:00", BookingStatus::Confirmed);
    let second = booking("2099-03-09", "09:00", BookingStatus::Pending);
    let bookings = vec![first.clone(), second.clone()];
    ctx.store
        .expect_list_active_bookings_by_email()
        .times(1)
        .returning(move |_| Ok(bookings.clone()));
    let (server, _) = ctx.server();

    let response = server
        .get("/api/bookings")
        .add_query_param("email", "Client@Example.com")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Vec<Booking>>();
    assert_eq!(body.iter().map(|b| b.id).collect::<Vec<_>>(), vec![first.id, second.id]);
}

#[tokio::test]
async fn test_booked_times_are_sorted() {
    let mut ctx = TestContext::new();
    let bookings = vec![
        booking("2099-03-02", "14:00", BookingStatus::Pending),
        booking("2099-03-02", "09:00", BookingStatus::Confirmed),
        booking("2099-03-02", "09:00", BookingStatus::Pending),
    ];
    ctx.store
        .expect_list_active_bookings_between()
        .with(
            predicate::eq(crate::test_utils::date("2099-03-02")),
            predicate::eq(crate::test_utils::date("2099-03-02")),
        )
        .times(1)
        .returning(move |_, _| Ok(bookings.clone()));
    let (server, _) = ctx.server();

    let response = server
        .get("/api/bookings/booked-times")
        .add_query_param("date", "2099-03-02")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<BookedTimesResponse>();
    assert_eq!(body.times, vec!["09:00".to_string(), "14:00".to_string()]);
}

#[tokio::test]
async fn test_client_cancels_own_booking() {
    let mut ctx = TestContext::new();
    let existing = booking("2099-03-02", "10:20", BookingStatus::Confirmed);
    let id = existing.id;
    let mut cancelled = existing.clone();
    cancelled.status = BookingStatus::Cancelled;

    ctx.store
        .expect_get_booking()
        .with(predicate::eq(id))
        .returning(move |_| Ok(Some(existing.clone())));
    ctx.store
        .expect_update_booking_status()
        .with(
            predicate::eq(id),
            predicate::eq(BookingStatus::Confirmed),
            predicate::eq(BookingStatus::Cancelled),
        )
        .times(1)
        .returning(move |_, _, _| Ok(Some(cancelled.clone())));
    let (server, notifier) = ctx.server();

    let response = server
        .post(&format!("/api/bookings/{id}/cancel"))
        .json(&json!({ "email": "CLIENT@example.com" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Booking>().status, BookingStatus::Cancelled);

    let changes = notifier.status_changes.lock().unwrap();
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].0, id);
    assert_eq!(changes[0].1, BookingStatus::Cancelled);
}

#[tokio::test]
async fn test_cancel_with_other_email_is_not_found() {
    let mut ctx = TestContext::new();
    let existing = booking("2099-03-02", "10:20", BookingStatus::Pending);
    let id = existing.id;
    ctx.store
        .expect_get_booking()
        .returning(move |_| Ok(Some(existing.clone())));
    let (server, _) = ctx.server();

    let response = server
        .post(&format!("/api/bookings/{id}/cancel"))
        .json(&json!({ "email": "someone.else@example.com" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cancelling_twice_changes_nothing() {
    let mut ctx = TestContext::new();
    let existing = booking("2099-03-02", "10:20", BookingStatus::Cancelled);
    let id = existing.id;
    let updated_at = existing.updated_at;
    ctx.store
        .expect_get_booking()
        .returning(move |_| Ok(Some(existing.clone())));
    ctx.store.expect_update_booking_status().never();
    let (server, notifier) = ctx.server();

    let response = server
        .post(&format!("/api/bookings/{id}/cancel"))
        .json(&json!({ "email": "client@example.com" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Booking>();
    assert_eq!(body.status, BookingStatus::Cancelled);
    assert_eq!(body.updated_at, updated_at);
    assert!(notifier.status_changes.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_cancel_completed_booking_conflicts() {
    let mut ctx = TestContext::new();
    let existing = booking("2099-03-02", "10:20", BookingStatus::Completed);
    let id = existing.id;
    ctx.store
        .expect_get_booking()
        .returning(move |_| Ok(Some(existing.clone())));
    let (server, notifier) = ctx.server();

    let response = server
        .post(&format!("/api/bookings/{id}/cancel"))
        .json(&json!({ "email": "client@example.com" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    assert!(notifier.status_changes.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_admin_bookings_require_session() {
    let (server, _) = TestContext::new().server();

    let response = server.get("/api/admin/bookings").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let response = server
        .get("/api/admin/bookings")
        .add_header(
            axum::http::header::AUTHORIZATION,
            axum::http::HeaderValue::from_static("Bearer not-a-token"),
        )
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_lists_bookings_by_status() {
    let mut ctx = TestContext::new();
    let pending = vec![booking("2099-03-02", "10:20", BookingStatus::Pending)];
    ctx.store
        .expect_list_bookings()
        .with(predicate::eq(Some(BookingStatus::Pending)))
        .times(1)
        .returning(move |_| Ok(pending.clone()));
    let (server, _) = ctx.server();
    let (name, value) = admin_auth(uuid::Uuid::new_v4());

    let response = server
        .get("/api/admin/bookings")
        .add_query_param("status", "PENDING")
        .add_header(name, value)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Vec<Booking>>().len(), 1);
}

#[tokio::test]
async fn test_admin_confirms_booking_and_client_is_notified() {
    let mut ctx = TestContext::new();
    let existing = booking("2099-03-02", "10:20", BookingStatus::Pending);
    let id = existing.id;
    let mut confirmed = existing.clone();
    confirmed.status = BookingStatus::Confirmed;

    ctx.store
        .expect_get_booking()
        .returning(move |_| Ok(Some(existing.clone())));
    ctx.store
        .expect_update_booking_status()
        .with(
            predicate::eq(id),
            predicate::eq(BookingStatus::Pending),
            predicate::eq(BookingStatus::Confirmed),
        )
        .times(1)
        .returning(move |_, _, _| Ok(Some(confirmed.clone())));
    let (server, notifier) = ctx.server();
    let (name, value) = admin_auth(uuid::Uuid::new_v4());

    let response = server
        .put(&format!("/api/admin/bookings/{id}/status"))
        .add_header(name, value)
        .json(&json!({ "status": "CONFIRMED" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Booking>().status, BookingStatus::Confirmed);
    let changes = notifier.status_changes.lock().unwrap();
    assert_eq!(changes.len(), 1);
    assert!(changes[0].2.starts_with("Booking update: "));
}

#[tokio::test]
async fn test_admin_status_change_loses_to_concurrent_change() {
    let mut ctx = TestContext::new();
    let existing = booking("2099-03-02", "10:20", BookingStatus::Confirmed);
    let id = existing.id;
    ctx.store
        .expect_get_booking()
        .returning(move |_| Ok(Some(existing.clone())));
    ctx.store
        .expect_update_booking_status()
        .with(
            predicate::eq(id),
            predicate::eq(BookingStatus::Confirmed),
            predicate::eq(BookingStatus::NoShow),
        )
        .times(1)
        .returning(|_, _, _| {
            Err(CoachError::Conflict(
                "Booking status changed to COMPLETED in the meantime".into(),
            ))
        });
    let (server, notifier) = ctx.server();
    let (name, value) = admin_auth(uuid::Uuid::new_v4());

    let response = server
        .put(&format!("/api/admin/bookings/{id}/status"))
        .add_header(name, value)
        .json(&json!({ "status": "NO_SHOW" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    assert!(notifier.status_changes.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_admin_cannot_reopen_cancelled_booking() {
    let mut ctx = TestContext::new();
    let existing = booking("2099-03-02", "10:20", BookingStatus::Cancelled);
    let id = existing.id;
    ctx.store
        .expect_get_booking()
        .returning(move |_| Ok(Some(existing.clone())));
    let (server, notifier) = ctx.server();
    let (name, value) = admin_auth(uuid::Uuid::new_v4());

    let response = server
        .put(&format!("/api/admin/bookings/{id}/status"))
        .add_header(name, value)
        .json(&json!({ "status": "CONFIRMED" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    assert!(notifier.status_changes.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_admin_status_update_unknown_booking() {
    let mut ctx = TestContext::new();
    ctx.store.expect_get_booking().returning(|_| Ok(None));
    let (server, _) = ctx.server();
    let (name, value) = admin_auth(uuid::Uuid::new_v4());

    let response = server
        .put(&format!("/api/admin/bookings/{}/status", uuid::Uuid::new_v4()))
        .add_header(name, value)
        .json(&json!({ "status": "CONFIRMED" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}
