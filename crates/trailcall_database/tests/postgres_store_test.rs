//! Integration tests for the PostgreSQL store.
//!
//! These need a live database: set `DATABASE_URL` (a `.env` file works) and
//! run with `--ignored`. Every test creates its own hike and members, so the
//! tests do not interfere with each other or with existing rows.

use chrono::{NaiveDate, Utc};
use trailcall_core::{
    AttendanceRef, CheckinRole, HikeStatus, MemberUpdate, NewHike, NewMember, RsvpTarget,
};
use trailcall_database::{PostgresAttendanceStore, establish_pool, run_migrations};
use trailcall_interface::AttendanceStore;

fn store() -> PostgresAttendanceStore {
    dotenvy::dotenv().ok();
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = establish_pool(&database_url, 4).expect("Failed to create pool");
    let mut conn = pool.get().expect("Failed to get connection");
    run_migrations(&mut conn).expect("Failed to run migrations");
    PostgresAttendanceStore::new(pool)
}

fn unique(prefix: &str) -> String {
    let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default();
    format!("{prefix}-{nanos}")
}

fn new_hike(name: &str) -> NewHike {
    NewHike {
        name: unique(name),
        date: NaiveDate::from_ymd_opt(2026, 6, 13).unwrap(),
        location: Some("Ridge trailhead".to_string()),
        notes: None,
    }
}

fn new_member(first: &str, last: &str) -> NewMember {
    NewMember {
        membership_number: unique("TC"),
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: None,
        phone: None,
    }
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_member_numbers_are_unique() {
    let store = store();
    let member = store.create_member(&new_member("Jane", "Smith")).await.unwrap();

    let mut duplicate = new_member("Other", "Person");
    duplicate.membership_number = member.membership_number.clone();
    let err = store.create_member(&duplicate).await.unwrap_err();
    assert!(err.is_conflict());

    let found = store
        .find_member_by_number(&member.membership_number)
        .await
        .unwrap();
    assert_eq!(found.map(|m| m.id), Some(member.id));
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_member_numbers_are_stored_trimmed() {
    let store = store();
    let mut padded = new_member("Jane", "Smith");
    let number = padded.membership_number.clone();
    padded.membership_number = format!("  {number} ");
    let member = store.create_member(&padded).await.unwrap();
    assert_eq!(member.membership_number, number);

    let mut duplicate = new_member("John", "Doe");
    duplicate.membership_number = number.clone();
    let err = store.create_member(&duplicate).await.unwrap_err();
    assert!(err.is_conflict());

    let found = store.find_member_by_number(&format!("{number}\t")).await.unwrap();
    assert_eq!(found.map(|m| m.id), Some(member.id));
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_member_update_and_deactivate() {
    let store = store();
    let member = store.create_member(&new_member("Jane", "Smith")).await.unwrap();

    let updated = store
        .update_member(member.id, &MemberUpdate::default().with_phone("555-0100"))
        .await
        .unwrap();
    assert_eq!(updated.phone.as_deref(), Some("555-0100"));
    assert_eq!(updated.first_name, "Jane");

    let inactive = store.deactivate_member(member.id).await.unwrap();
    assert!(!inactive.active);
    let active = store.list_members(true).await.unwrap();
    assert!(active.iter().all(|m| m.id != member.id));
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_checkin_is_idempotent_and_counted() {
    let store = store();
    let hike = store.create_hike(&new_hike("Checkins")).await.unwrap();
    let member = store.create_member(&new_member("Jane", "Smith")).await.unwrap();

    let first = store.insert_checkin_if_absent(hike.id, member.id).await.unwrap();
    let second = store.insert_checkin_if_absent(hike.id, member.id).await.unwrap();
    assert_eq!(first.id, second.id);
    assert_eq!(first.member_name, "Jane Smith");

    let hike = store.get_hike(hike.id).await.unwrap();
    assert_eq!(hike.attendee_count, 1);

    let leader = store
        .set_checkin_role(first.id, CheckinRole::Leader, true)
        .await
        .unwrap();
    assert!(leader.is_leader);
    assert!(!leader.is_sweeper);

    assert!(store.delete_checkin(hike.id, member.id).await.unwrap());
    assert!(!store.delete_checkin(hike.id, member.id).await.unwrap());
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_rsvp_uniqueness_per_target() {
    let store = store();
    let hike = store.create_hike(&new_hike("Rsvps")).await.unwrap();
    let member = store.create_member(&new_member("Jane", "Smith")).await.unwrap();

    let target = RsvpTarget::Member(member.id);
    store.insert_rsvp(hike.id, &target).await.unwrap();
    assert!(store.insert_rsvp(hike.id, &target).await.unwrap_err().is_conflict());

    let guest = RsvpTarget::Guest("Pat Lee".to_string());
    let guest_rsvp = store.insert_rsvp(hike.id, &guest).await.unwrap();
    assert!(store.insert_rsvp(hike.id, &guest).await.unwrap_err().is_conflict());

    let lowercase = RsvpTarget::Guest("pat lee".to_string());
    store.insert_rsvp(hike.id, &lowercase).await.unwrap();

    let checked = store
        .set_rsvp_checked_in_at(guest_rsvp.id, Some(Utc::now()))
        .await
        .unwrap();
    assert!(checked.checked_in_at.is_some());

    let entries = store.list_rsvps(hike.id).await.unwrap();
    assert_eq!(entries.len(), 3);
    let pat = entries.iter().find(|e| e.display_name == "Pat Lee").unwrap();
    assert!(pat.checked_in);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_participants_cascade_with_checkin() {
    let store = store();
    let hike = store.create_hike(&new_hike("Activities")).await.unwrap();
    let member = store.create_member(&new_member("Jane", "Smith")).await.unwrap();
    let checkin = store.insert_checkin_if_absent(hike.id, member.id).await.unwrap();
    let activity = store.create_activity(hike.id, "Summit").await.unwrap();

    let attendance = AttendanceRef::Checkin(checkin.id);
    let first = store.add_participant(activity.id, attendance).await.unwrap();
    let again = store.add_participant(activity.id, attendance).await.unwrap();
    assert_eq!(first.id, again.id);
    assert_eq!(first.name, "Jane Smith");

    assert_eq!(
        store.activities_for(attendance).await.unwrap(),
        vec!["Summit".to_string()]
    );
    assert_eq!(store.get_activity(activity.id).await.unwrap().participant_count, 1);

    store.delete_checkin(hike.id, member.id).await.unwrap();
    assert!(store.list_participants(activity.id).await.unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_closed_hike_leaves_open_list() {
    let store = store();
    let hike = store.create_hike(&new_hike("Lifecycle")).await.unwrap();
    assert_eq!(hike.status, HikeStatus::Open);

    let closed = store.set_hike_status(hike.id, HikeStatus::Closed).await.unwrap();
    assert_eq!(closed.status, HikeStatus::Closed);

    let current = store.current_open_hike().await.unwrap();
    assert!(current.map(|h| h.id != hike.id).unwrap_or(true));
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_year_rollup_includes_checkins() {
    let store = store();
    let hike = store.create_hike(&new_hike("Rollup")).await.unwrap();
    let member = store.create_member(&new_member("Jane", "Smith")).await.unwrap();
    let checkin = store.insert_checkin_if_absent(hike.id, member.id).await.unwrap();

    let records = store.attendance_for_year(2026).await.unwrap();
    let record = records.iter().find(|r| r.checkin_id == checkin.id).unwrap();
    assert_eq!(record.hike_name, hike.name);
    assert_eq!(record.membership_number, member.membership_number);

    let history = store.member_history(member.id).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].id, hike.id);
}
