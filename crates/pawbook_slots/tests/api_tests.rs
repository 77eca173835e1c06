//! Router-level tests for the slot booking feature.
//!
//! Each test drives the real router over a throwaway SQLite database, with
//! the static token table standing in for the external auth collaborator.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use pawbook_config::{AppConfig, SlotsConfig};
use pawbook_db::{DbClient, Dog, DogRepository, SqlBookingRepository, SqlDogRepository,
    SqlUserRepository, BookingRepository, UserRepository};
use pawbook_slots::auth::StaticSessionProvider;
use pawbook_slots::{routes, SlotsState};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

async fn test_app(name: &str) -> (Router, DbClient) {
    let path = std::env::temp_dir().join(format!(
        "pawbook_api_test_{}_{}.db",
        name,
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);
    let client = DbClient::from_url(&format!("sqlite:{}", path.display()))
        .await
        .expect("failed to create test database");

    let bookings = SqlBookingRepository::new(client.clone());
    let dogs = SqlDogRepository::new(client.clone());
    let users = SqlUserRepository::new(client.clone());
    bookings.init_schema().await.unwrap();
    dogs.init_schema().await.unwrap();
    users.init_schema().await.unwrap();

    let mut config = AppConfig::default();
    config.slots = Some(SlotsConfig {
        day_start_hour: 9,
        day_end_hour: 17,
    });

    let state = SlotsState {
        config: Arc::new(config),
        bookings,
        dogs,
        users,
        sessions: Arc::new(StaticSessionProvider::with_tokens([
            ("alice-token".to_string(), 1),
            ("bob-token".to_string(), 2),
        ])),
    };

    (routes(state), client)
}

async fn seed_dog(client: &DbClient, user_id: i64, name: &str) -> Dog {
    SqlDogRepository::new(client.clone())
        .create(Dog::new(user_id, name.to_string(), None, None))
        .await
        .unwrap()
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

fn post_json(uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn day_view_lists_open_slots_for_anonymous_viewers() {
    let (app, _client) = test_app("day_view_open").await;

    let response = app.oneshot(get("/slots?date=2024-01-01", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["date"], "2024-01-01");
    let slots = body["slots"].as_array().unwrap();
    assert_eq!(slots.len(), 8);
    assert!(slots
        .iter()
        .all(|slot| slot["state"] == "open" && slot["can_book"] == false));
    assert_eq!(slots[0]["time"], "09:00");
}

#[tokio::test]
async fn day_view_rejects_malformed_dates() {
    let (app, _client) = test_app("day_view_bad_date").await;

    let response = app
        .oneshot(get("/slots?date=01-01-2024", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn booked_slot_renders_per_viewer() {
    let (app, client) = test_app("booked_slot_views").await;
    seed_dog(&client, 1, "Rex").await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/slots/book",
            Some("alice-token"),
            json!({"date": "2024-01-01", "time": "09:00"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["success"], true);

    // The booker sees their own booking with the dog's name.
    let mine = app
        .clone()
        .oneshot(get(
            "/slots/slot?date=2024-01-01&time=09:00",
            Some("alice-token"),
        ))
        .await
        .unwrap();
    let mine = body_json(mine).await;
    assert_eq!(mine["state"], "booked_by_me");
    assert_eq!(mine["dog_name"], "Rex");
    assert_eq!(mine["can_book"], false);

    // Everyone else sees a display-only booked slot.
    for token in [Some("bob-token"), None] {
        let other = app
            .clone()
            .oneshot(get("/slots/slot?date=2024-01-01&time=09:00", token))
            .await
            .unwrap();
        let other = body_json(other).await;
        assert_eq!(other["state"], "booked_by_other");
        assert_eq!(other["can_book"], false);
    }
}

#[tokio::test]
async fn booking_off_the_hourly_grid_is_rejected() {
    let (app, client) = test_app("booking_off_grid").await;
    seed_dog(&client, 1, "Rex").await;

    // Half-hour offsets and hours outside the configured window never
    // appear in the day view, so they are not bookable.
    for time in ["09:30", "08:00", "17:00"] {
        let response = app
            .clone()
            .oneshot(post_json(
                "/slots/book",
                Some("alice-token"),
                json!({"date": "2024-01-01", "time": time}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "time {}", time);
        assert_eq!(
            body_json(response).await["message"],
            "There was an issue booking this time. Please try again."
        );
    }
}

#[tokio::test]
async fn booking_requires_a_session() {
    let (app, _client) = test_app("booking_needs_session").await;

    let response = app
        .oneshot(post_json(
            "/slots/book",
            None,
            json!({"date": "2024-01-01", "time": "09:00"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(
        body["message"],
        "There was an issue booking this time. Please try again."
    );
}

#[tokio::test]
async fn losing_the_booking_race_returns_the_fixed_message() {
    let (app, client) = test_app("booking_race").await;
    seed_dog(&client, 1, "Rex").await;
    seed_dog(&client, 2, "Bruno").await;

    let won = app
        .clone()
        .oneshot(post_json(
            "/slots/book",
            Some("alice-token"),
            json!({"date": "2024-01-01", "time": "09:00"}),
        ))
        .await
        .unwrap();
    assert_eq!(won.status(), StatusCode::OK);

    let lost = app
        .clone()
        .oneshot(post_json(
            "/slots/book",
            Some("bob-token"),
            json!({"date": "2024-01-01", "time": "09:00"}),
        ))
        .await
        .unwrap();
    assert_eq!(lost.status(), StatusCode::CONFLICT);
    let body = body_json(lost).await;
    assert_eq!(body["success"], false);
    assert_eq!(
        body["message"],
        "There was an issue booking this time. Please try again."
    );

    // The original booking is unchanged.
    let slot = app
        .oneshot(get(
            "/slots/slot?date=2024-01-01&time=09:00",
            Some("alice-token"),
        ))
        .await
        .unwrap();
    assert_eq!(body_json(slot).await["state"], "booked_by_me");
}

#[tokio::test]
async fn cancel_reopens_the_slot_for_its_owner_only() {
    let (app, client) = test_app("cancel_flow").await;
    seed_dog(&client, 1, "Rex").await;

    app.clone()
        .oneshot(post_json(
            "/slots/book",
            Some("alice-token"),
            json!({"date": "2024-01-01", "time": "10:00"}),
        ))
        .await
        .unwrap();

    // Another user cannot cancel the booking.
    let denied = app
        .clone()
        .oneshot(post_json(
            "/slots/cancel",
            Some("bob-token"),
            json!({"date": "2024-01-01", "time": "10:00"}),
        ))
        .await
        .unwrap();
    assert_eq!(denied.status(), StatusCode::CONFLICT);
    assert_eq!(
        body_json(denied).await["message"],
        "There was an issue canceling this time. Please try again."
    );

    // The owner can.
    let canceled = app
        .clone()
        .oneshot(post_json(
            "/slots/cancel",
            Some("alice-token"),
            json!({"date": "2024-01-01", "time": "10:00"}),
        ))
        .await
        .unwrap();
    assert_eq!(canceled.status(), StatusCode::OK);
    assert_eq!(body_json(canceled).await["success"], true);

    let slot = app
        .oneshot(get("/slots/slot?date=2024-01-01&time=10:00", None))
        .await
        .unwrap();
    assert_eq!(body_json(slot).await["state"], "open");
}

#[tokio::test]
async fn canceling_a_never_booked_slot_is_a_noop() {
    let (app, _client) = test_app("cancel_noop").await;

    let response = app
        .oneshot(post_json(
            "/slots/cancel",
            Some("alice-token"),
            json!({"date": "2024-01-01", "time": "11:00"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "No booking to cancel.");
}

#[tokio::test]
async fn dogs_endpoints_are_scoped_to_the_session_user() {
    let (app, client) = test_app("dogs_scope").await;
    let bruno = seed_dog(&client, 2, "Bruno").await;

    // Anonymous callers are rejected.
    let denied = app.clone().oneshot(get("/dogs", None)).await.unwrap();
    assert_eq!(denied.status(), StatusCode::UNAUTHORIZED);

    // Adding a dog stores it on the session user's file.
    let added = app
        .clone()
        .oneshot(post_json(
            "/dogs",
            Some("alice-token"),
            json!({"name": "Rex", "breed": "Beagle"}),
        ))
        .await
        .unwrap();
    assert_eq!(added.status(), StatusCode::OK);
    let added = body_json(added).await;
    assert_eq!(added["user_id"], 1);
    assert_eq!(added["breed"], "Beagle");

    let listed = app
        .clone()
        .oneshot(get("/dogs", Some("alice-token")))
        .await
        .unwrap();
    let listed = body_json(listed).await;
    let names: Vec<_> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Rex"]);

    // Another user's dog cannot be deleted and is reported as missing.
    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/dogs/{}", bruno.id.unwrap()))
        .header(header::AUTHORIZATION, "Bearer alice-token")
        .body(Body::empty())
        .unwrap();
    let denied = app.oneshot(request).await.unwrap();
    assert_eq!(denied.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn profile_round_trip_updates_both_fields() {
    let (app, client) = test_app("profile_round_trip").await;
    client
        .execute("INSERT INTO users (id, full_name, address) VALUES (1, 'Alice Walker', '1 Park Lane')")
        .await
        .unwrap();

    let fetched = app
        .clone()
        .oneshot(get("/profile", Some("alice-token")))
        .await
        .unwrap();
    assert_eq!(fetched.status(), StatusCode::OK);
    assert_eq!(body_json(fetched).await["full_name"], "Alice Walker");

    let request = Request::builder()
        .method("PUT")
        .uri("/profile")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, "Bearer alice-token")
        .body(Body::from(
            serde_json::to_vec(&json!({
                "full_name": "Alice W.",
                "address": "2 Hyde Park"
            }))
            .unwrap(),
        ))
        .unwrap();
    let updated = app.clone().oneshot(request).await.unwrap();
    assert_eq!(updated.status(), StatusCode::OK);

    let body = body_json(updated).await;
    assert_eq!(body["full_name"], "Alice W.");
    assert_eq!(body["address"], "2 Hyde Park");

    // A user the auth collaborator knows but the store doesn't is a 404.
    let missing = app.oneshot(get("/profile", Some("bob-token"))).await.unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn profile_update_rejects_blank_fields() {
    let (app, client) = test_app("profile_blank_fields").await;
    client
        .execute("INSERT INTO users (id, full_name, address) VALUES (1, 'Alice Walker', '1 Park Lane')")
        .await
        .unwrap();

    for body in [
        json!({"full_name": "", "address": "2 Hyde Park"}),
        json!({"full_name": "Alice W.", "address": "  "}),
    ] {
        let request = Request::builder()
            .method("PUT")
            .uri("/profile")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, "Bearer alice-token")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    // The stored profile is untouched.
    let fetched = app
        .oneshot(get("/profile", Some("alice-token")))
        .await
        .unwrap();
    assert_eq!(body_json(fetched).await["full_name"], "Alice Walker");
}
