//! End-to-end tests of the wired services over the in-memory store.

use chrono::NaiveDate;
use trailcall::{
    AttendanceRef, MatchPolicy, NewHike, NewMember, RsvpCheckin, RsvpOutcome, Trailcall,
};

async fn club() -> Trailcall {
    let app = Trailcall::in_memory(MatchPolicy::default());
    for (number, first, last) in [
        ("TC-001", "Jane", "Smith"),
        ("TC-002", "John", "Doe"),
    ] {
        app.roster()
            .create(&NewMember {
                membership_number: number.to_string(),
                first_name: first.to_string(),
                last_name: last.to_string(),
                email: None,
                phone: None,
            })
            .await
            .unwrap();
    }
    app
}

fn ridge_loop() -> NewHike {
    NewHike {
        name: "Ridge Loop".to_string(),
        date: NaiveDate::from_ymd_opt(2026, 6, 13).unwrap(),
        location: None,
        notes: None,
    }
}

#[tokio::test]
async fn test_rsvp_then_checkin_counts_once() {
    let app = club().await;
    let hike = app.lifecycle().create_hike(&ridge_loop()).await.unwrap();

    let outcome = app
        .reconciler()
        .submit_rsvp(hike.id, "Jane", "Smyth")
        .await
        .unwrap();
    let RsvpOutcome::Confirmed {
        rsvp_id, is_guest, ..
    } = outcome
    else {
        panic!("expected a confirmed RSVP, got {outcome:?}");
    };
    assert!(!is_guest);

    let record = app.reconciler().check_in_rsvp(rsvp_id).await.unwrap();
    assert!(matches!(record, RsvpCheckin::Member(_)));
    app.reconciler()
        .record_checkin(hike.id, "TC-001")
        .await
        .unwrap();

    let sheet = app.reports().hike_attendance(hike.id).await.unwrap();
    assert_eq!(sheet.len(), 1);
    assert_eq!(sheet[0].name, "Jane Smith");
}

#[tokio::test]
async fn test_guest_attendance_and_activities() {
    let app = club().await;
    let hike = app.lifecycle().create_hike(&ridge_loop()).await.unwrap();

    let outcome = app
        .reconciler()
        .submit_rsvp(hike.id, "Pat", "Lee")
        .await
        .unwrap();
    let RsvpOutcome::Confirmed {
        rsvp_id, is_guest, ..
    } = outcome
    else {
        panic!("expected a confirmed RSVP, got {outcome:?}");
    };
    assert!(is_guest);

    app.reconciler().check_in_rsvp(rsvp_id).await.unwrap();
    let activity = app
        .reconciler()
        .create_activity(hike.id, "Summit")
        .await
        .unwrap();
    app.reconciler()
        .add_participant(activity.id, AttendanceRef::Rsvp(rsvp_id))
        .await
        .unwrap();

    let sheet = app.reports().hike_attendance(hike.id).await.unwrap();
    assert_eq!(sheet.len(), 1);
    assert!(sheet[0].is_guest());
    assert_eq!(sheet[0].activities, vec!["Summit".to_string()]);
}

#[tokio::test]
async fn test_policy_threshold_reaches_reconciler() {
    let app = Trailcall::in_memory(MatchPolicy::new(95));
    assert_eq!(*app.reconciler().policy().member_threshold(), 95);
}
