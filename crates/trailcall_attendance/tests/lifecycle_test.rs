//! Hike status and RSVP flag transitions.

mod test_utils;

use test_utils::{Club, date};
use trailcall_core::{HikeId, HikeStatus, HikeUpdate, NewHike};

#[tokio::test]
async fn test_new_hikes_are_open_for_both() {
    let club = Club::new();
    let hike = club.hike("Ridge Trail").await;

    assert_eq!(hike.status, HikeStatus::Open);
    assert!(hike.rsvp_open);
    assert!(club.lifecycle.is_rsvp_open(hike.id).await.unwrap());
}

#[tokio::test]
async fn test_close_is_idempotent_and_leaves_rsvps_alone() {
    let club = Club::new();
    let hike = club.hike("Ridge Trail").await;

    let closed = club.lifecycle.close(hike.id).await.unwrap();
    let closed_again = club.lifecycle.close(hike.id).await.unwrap();

    assert_eq!(closed.status, HikeStatus::Closed);
    assert_eq!(closed_again.status, HikeStatus::Closed);
    assert!(closed_again.rsvp_open);
}

#[tokio::test]
async fn test_rsvp_flag_toggles_both_ways() {
    let club = Club::new();
    let hike = club.hike("Ridge Trail").await;

    club.lifecycle.close_rsvps(hike.id).await.unwrap();
    assert!(!club.lifecycle.is_rsvp_open(hike.id).await.unwrap());
    let page = club.lifecycle.rsvp_page(hike.id).await.unwrap();
    assert!(!page.rsvp_open);
    assert_eq!(page.hike.status, HikeStatus::Open);

    club.lifecycle.open_rsvps(hike.id).await.unwrap();
    assert!(club.lifecycle.is_rsvp_open(hike.id).await.unwrap());
}

#[tokio::test]
async fn test_unknown_hike_is_not_found() {
    let club = Club::new();

    assert!(club.lifecycle.close(HikeId(42)).await.unwrap_err().is_not_found());
    assert!(club.lifecycle.rsvp_page(HikeId(42)).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_current_open_hike_is_latest_created_open_one() {
    let club = Club::new();
    assert!(club.lifecycle.current_open_hike().await.unwrap().is_none());

    let first = club.hike_on("First", date(2026, 7, 1)).await;
    let second = club.hike_on("Second", date(2026, 1, 1)).await;
    assert_eq!(
        club.lifecycle.current_open_hike().await.unwrap().map(|h| h.id),
        Some(second.id)
    );

    club.lifecycle.close(second.id).await.unwrap();
    assert_eq!(
        club.lifecycle.current_open_hike().await.unwrap().map(|h| h.id),
        Some(first.id)
    );
}

#[tokio::test]
async fn test_update_applies_only_given_fields() {
    let club = Club::new();
    let hike = club.hike("Ridge Trail").await;

    let updated = club
        .lifecycle
        .update_hike(
            hike.id,
            &HikeUpdate::default()
                .with_location("Pantoll")
                .with_date(date(2026, 5, 9)),
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Ridge Trail");
    assert_eq!(updated.location.as_deref(), Some("Pantoll"));
    assert_eq!(updated.date, date(2026, 5, 9));
}

#[tokio::test]
async fn test_blank_hike_name_is_rejected() {
    let club = Club::new();
    let new_hike = NewHike::builder()
        .name(" ")
        .date(date(2026, 5, 2))
        .build()
        .unwrap();

    assert!(club.lifecycle.create_hike(&new_hike).await.is_err());
    assert!(club.lifecycle.list_hikes().await.unwrap().is_empty());
}
