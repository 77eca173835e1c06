//! Integration tests for the booking, dog, and user repositories.
//!
//! Each test runs against its own throwaway SQLite database file so tests
//! can run in parallel without sharing state.

use chrono::{NaiveDate, NaiveDateTime};
use pawbook_db::{
    BookingRepository, DbClient, Dog, DogRepository, SqlBookingRepository, SqlDogRepository,
    SqlUserRepository, UserRepository,
};
use pawbook_common::models::Booking;

async fn test_client(name: &str) -> DbClient {
    let path = std::env::temp_dir().join(format!(
        "pawbook_repo_test_{}_{}.db",
        name,
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);
    DbClient::from_url(&format!("sqlite:{}", path.display()))
        .await
        .expect("failed to create test database")
}

fn slot(date: (i32, u32, u32), hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(date.0, date.1, date.2)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

#[tokio::test]
async fn booking_create_then_find_returns_inserted_record() {
    let client = test_client("booking_create_then_find").await;
    let repo = SqlBookingRepository::new(client);
    repo.init_schema().await.unwrap();

    let start = slot((2024, 1, 1), 9);
    let created = repo.create(Booking::new(start, 1, 5)).await.unwrap();
    assert!(created.id.is_some());

    let found = repo
        .find_by_start_time(start)
        .await
        .unwrap()
        .expect("booking should exist after create");
    assert_eq!(found.start_time, start);
    assert_eq!(found.user_id, 1);
    assert_eq!(found.dog_id, 5);
}

#[tokio::test]
async fn booking_same_start_time_conflicts_and_original_is_unchanged() {
    let client = test_client("booking_conflict").await;
    let repo = SqlBookingRepository::new(client);
    repo.init_schema().await.unwrap();

    let start = slot((2024, 1, 1), 9);
    repo.create(Booking::new(start, 1, 5)).await.unwrap();

    // Second booking for the same slot by a different user loses the race
    // against the unique constraint.
    let second = repo.create(Booking::new(start, 2, 9)).await;
    assert!(second.is_err());

    let found = repo.find_by_start_time(start).await.unwrap().unwrap();
    assert_eq!(found.user_id, 1);
    assert_eq!(found.dog_id, 5);
}

#[tokio::test]
async fn booking_delete_then_find_returns_none() {
    let client = test_client("booking_delete").await;
    let repo = SqlBookingRepository::new(client);
    repo.init_schema().await.unwrap();

    let start = slot((2024, 1, 2), 10);
    repo.create(Booking::new(start, 1, 5)).await.unwrap();

    let deleted = repo.delete_by_start_time(start).await.unwrap();
    assert!(deleted);
    assert!(repo.find_by_start_time(start).await.unwrap().is_none());
}

#[tokio::test]
async fn booking_delete_on_never_booked_timestamp_is_a_noop() {
    let client = test_client("booking_delete_noop").await;
    let repo = SqlBookingRepository::new(client);
    repo.init_schema().await.unwrap();

    let deleted = repo
        .delete_by_start_time(slot((2024, 1, 3), 11))
        .await
        .unwrap();
    assert!(!deleted);
}

#[tokio::test]
async fn booking_find_by_date_ignores_time_of_day() {
    let client = test_client("booking_find_by_date").await;
    let repo = SqlBookingRepository::new(client);
    repo.init_schema().await.unwrap();

    repo.create(Booking::new(slot((2024, 1, 1), 9), 1, 5))
        .await
        .unwrap();
    repo.create(Booking::new(slot((2024, 1, 1), 14), 2, 6))
        .await
        .unwrap();
    repo.create(Booking::new(slot((2024, 1, 2), 9), 1, 5))
        .await
        .unwrap();

    let day = repo
        .find_by_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
        .await
        .unwrap();
    assert_eq!(day.len(), 2);
    assert!(day
        .iter()
        .all(|b| b.start_time.date() == NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()));
}

#[tokio::test]
async fn dogs_are_scoped_to_their_owner() {
    let client = test_client("dogs_owner_scope").await;
    let repo = SqlDogRepository::new(client);
    repo.init_schema().await.unwrap();

    repo.create(Dog::new(1, "Rex".to_string(), Some("Beagle".to_string()), None))
        .await
        .unwrap();
    repo.create(Dog::new(1, "Luna".to_string(), None, None))
        .await
        .unwrap();
    repo.create(Dog::new(2, "Bruno".to_string(), None, None))
        .await
        .unwrap();

    let owned = repo.find_by_owner(1).await.unwrap();
    assert_eq!(owned.len(), 2);
    assert!(owned.iter().all(|d| d.user_id == 1));

    let other = repo.find_by_owner(3).await.unwrap();
    assert!(other.is_empty());
}

#[tokio::test]
async fn dog_optional_fields_survive_a_round_trip() {
    let client = test_client("dog_optional_fields").await;
    let repo = SqlDogRepository::new(client);
    repo.init_schema().await.unwrap();

    let created = repo
        .create(Dog::new(
            4,
            "Maple".to_string(),
            Some("Collie".to_string()),
            Some("https://cdn.example/maple.png".to_string()),
        ))
        .await
        .unwrap();

    let found = repo
        .find_by_id(created.id.unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.breed.as_deref(), Some("Collie"));
    assert_eq!(
        found.avatar_uri.as_deref(),
        Some("https://cdn.example/maple.png")
    );

    let bare = repo
        .create(Dog::new(4, "Ziggy".to_string(), None, None))
        .await
        .unwrap();
    let bare_found = repo.find_by_id(bare.id.unwrap()).await.unwrap().unwrap();
    assert!(bare_found.breed.is_none());
    assert!(bare_found.avatar_uri.is_none());
}

#[tokio::test]
async fn dog_delete_removes_only_the_target() {
    let client = test_client("dog_delete").await;
    let repo = SqlDogRepository::new(client);
    repo.init_schema().await.unwrap();

    let rex = repo
        .create(Dog::new(1, "Rex".to_string(), None, None))
        .await
        .unwrap();
    let luna = repo
        .create(Dog::new(1, "Luna".to_string(), None, None))
        .await
        .unwrap();

    assert!(repo.delete(rex.id.unwrap()).await.unwrap());
    assert!(repo.find_by_id(rex.id.unwrap()).await.unwrap().is_none());
    assert!(repo.find_by_id(luna.id.unwrap()).await.unwrap().is_some());

    // Deleting again is a no-op
    assert!(!repo.delete(rex.id.unwrap()).await.unwrap());
}

#[tokio::test]
async fn booking_create_is_immediately_visible_across_pool_connections() {
    let client = test_client("booking_create_visibility").await;
    let repo = SqlBookingRepository::new(client);
    repo.init_schema().await.unwrap();

    // Repeated write-then-read; each read may land on a different pool
    // connection than the write it follows.
    for i in 0..100u32 {
        let start = slot((2024, 1, 1 + i / 24), i % 24);
        let created = repo.create(Booking::new(start, 1, 5)).await.unwrap();
        let found = repo
            .find_by_start_time(start)
            .await
            .unwrap()
            .unwrap_or_else(|| panic!("booking at {} not visible on iteration {}", start, i));
        assert_eq!(found.id, created.id);
    }
}

#[tokio::test]
async fn dog_create_is_immediately_visible_across_pool_connections() {
    let client = test_client("dog_create_visibility").await;
    let repo = SqlDogRepository::new(client);
    repo.init_schema().await.unwrap();

    for i in 0..200 {
        let created = repo
            .create(Dog::new(1, format!("Dog {}", i), None, None))
            .await
            .unwrap();
        let owned = repo.find_by_owner(1).await.unwrap();
        assert!(
            owned.iter().any(|d| d.id == created.id),
            "created dog {:?} not visible on iteration {}",
            created.id,
            i
        );
    }
}

#[tokio::test]
async fn user_profile_update_returns_the_new_record() {
    let client = test_client("user_update").await;
    let repo = SqlUserRepository::new(client.clone());
    repo.init_schema().await.unwrap();

    // Identities are issued externally; seed the row directly.
    client
        .execute("INSERT INTO users (id, full_name, address) VALUES (7, 'Ada Lovelace', '1 Analytical Way')")
        .await
        .unwrap();

    let updated = repo
        .update_profile(7, "Ada King", "12 Byron Street")
        .await
        .unwrap()
        .expect("user 7 should exist");
    assert_eq!(updated.full_name, "Ada King");
    assert_eq!(updated.address, "12 Byron Street");

    let found = repo.find_by_id(7).await.unwrap().unwrap();
    assert_eq!(found, updated);
}

#[tokio::test]
async fn user_profile_update_for_unknown_user_returns_none() {
    let client = test_client("user_update_missing").await;
    let repo = SqlUserRepository::new(client);
    repo.init_schema().await.unwrap();

    let updated = repo.update_profile(99, "Nobody", "Nowhere").await.unwrap();
    assert!(updated.is_none());
    assert!(repo.find_by_id(99).await.unwrap().is_none());
}
