use axum::http::StatusCode;
use coachbook_core::{
    availability::DayAvailability,
    models::{booking::BookingStatus, time_slot::TimeSlot},
};
use mockall::predicate;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::test_utils::{admin_auth, booking, date, slot, time, TestContext};

#[tokio::test]
async fn test_day_availability_counts_active_bookings() {
    let mut ctx = TestContext::new();
    let slots = vec![
        slot("2099-03-02", "10:20", "11:00", 2),
        slot("2099-03-02", "09:00", "09:40", 1),
    ];
    let bookings = vec![
        booking("2099-03-02", "09:00", BookingStatus::Confirmed),
        booking("2099-03-02", "10:20", BookingStatus::Pending),
    ];
    ctx.store
        .expect_list_time_slots_between()
        .with(predicate::eq(date("2099-03-02")), predicate::eq(date("2099-03-02")))
        .returning(move |_, _| Ok(slots.clone()));
    ctx.store
        .expect_list_active_bookings_between()
        .returning(move |_, _| Ok(bookings.clone()));
    let (server, _) = ctx.server();

    let response = server
        .get("/api/time-slots")
        .add_query_param("date", "2099-03-02")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let day = response.json::<DayAvailability>();
    assert_eq!(day.slots.len(), 2);
    assert_eq!(day.slots[0].start_time, time("09:00"));
    assert!(!day.slots[0].is_open);
    assert_eq!(day.slots[1].remaining, 1);
    assert!(day.slots[1].is_open);
}

#[tokio::test]
async fn test_day_availability_rejects_bad_date() {
    let (server, _) = TestContext::new().server();

    let response = server
        .get("/api/time-slots")
        .add_query_param("date", "2099-02-30")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_calendar_month() {
    let mut ctx = TestContext::new();
    let slots = vec![slot("2099-03-02", "09:00", "09:40", 1)];
    let bookings = vec![booking("2099-03-02", "09:00", BookingStatus::Pending)];
    ctx.store
        .expect_list_time_slots_between()
        .with(predicate::eq(date("2099-03-01")), predicate::eq(date("2099-03-31")))
        .returning(move |_, _| Ok(slots.clone()));
    ctx.store
        .expect_list_active_bookings_between()
        .with(predicate::eq(date("2099-03-01")), predicate::eq(date("2099-03-31")))
        .returning(move |_, _| Ok(bookings.clone()));
    let (server, _) = ctx.server();

    let response = server.get("/api/calendar/2099/3").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["year"], 2099);
    assert_eq!(body["month"], 3);
    assert_eq!(body["days_in_month"], 31);
    assert_eq!(body["days"].as_array().map(Vec::len), Some(31));
    assert_eq!(body["days"][1]["date"], "2099-03-02");
    assert_eq!(body["days"][1]["fully_booked"], true);
    assert_eq!(body["days"][2]["total_slots"], 0);
}

#[tokio::test]
async fn test_calendar_rejects_invalid_month() {
    let (server, _) = TestContext::new().server();

    let response = server.get("/api/calendar/2099/13").await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_admin_creates_time_slot() {
    let mut ctx = TestContext::new();
    let created = slot("2099-03-02", "09:00", "09:40", 1);
    let returned = created.clone();
    ctx.store
        .expect_create_time_slot()
        .withf(|s| s.date == date("2099-03-02") && s.is_available && s.max_bookings == 1)
        .times(1)
        .returning(move |_| Ok(returned.clone()));
    let (server, _) = ctx.server();
    let (name, value) = admin_auth(Uuid::new_v4());

    let response = server
        .post("/api/admin/time-slots")
        .add_header(name, value)
        .json(&json!({ "date": "2099-03-02", "start_time": "09:00", "end_time": "09:40" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    assert_eq!(response.json::<TimeSlot>().id, created.id);
}

#[tokio::test]
async fn test_admin_time_slot_window_is_checked() {
    let (server, _) = TestContext::new().server();
    let (name, value) = admin_auth(Uuid::new_v4());

    let response = server
        .post("/api/admin/time-slots")
        .add_header(name, value)
        .json(&json!({ "date": "2099-03-02", "start_time": "10:00", "end_time": "09:40" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_admin_lists_all_time_slots() {
    let mut ctx = TestContext::new();
    let slots = vec![slot("2099-03-02", "09:00", "09:40", 1)];
    ctx.store
        .expect_list_all_time_slots()
        .times(1)
        .returning(move || Ok(slots.clone()));
    let (server, _) = ctx.server();
    let (name, value) = admin_auth(Uuid::new_v4());

    let response = server.get("/api/admin/time-slots").add_header(name, value).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Vec<TimeSlot>>().len(), 1);
}

#[tokio::test]
async fn test_admin_closes_time_slot() {
    let mut ctx = TestContext::new();
    let current = slot("2099-03-02", "09:00", "09:40", 1);
    let id = current.id;
    let mut closed = current.clone();
    closed.is_available = false;

    ctx.store
        .expect_get_time_slot()
        .with(predicate::eq(id))
        .returning(move |_| Ok(Some(current.clone())));
    ctx.store
        .expect_update_time_slot()
        .withf(move |sid, changes| *sid == id && !changes.is_available && changes.start_time == time("09:00"))
        .times(1)
        .returning(move |_, _| Ok(Some(closed.clone())));
    let (server, _) = ctx.server();
    let (name, value) = admin_auth(Uuid::new_v4());

    let response = server
        .put(&format!("/api/admin/time-slots/{id}"))
        .add_header(name, value)
        .json(&json!({ "is_available": false }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(!response.json::<TimeSlot>().is_available);
}

#[tokio::test]
async fn test_admin_deletes_missing_time_slot() {
    let mut ctx = TestContext::new();
    ctx.store.expect_delete_time_slot().returning(|_| Ok(false));
    let (server, _) = ctx.server();
    let (name, value) = admin_auth(Uuid::new_v4());

    let response = server
        .delete(&format!("/api/admin/time-slots/{}", Uuid::new_v4()))
        .add_header(name, value)
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}
