//! Attendance history, sheets and the year roll-up.

mod test_utils;

use test_utils::{Club, date};
use trailcall_attendance::RsvpCheckin;
use trailcall_core::{AttendanceRef, AttendeeSource, RsvpOutcome};

#[tokio::test]
async fn test_member_history_lists_attended_hikes_newest_first() {
    let club = Club::new();
    let jane = club.member("TC-001", "Jane", "Smith").await;
    let spring = club.hike_on("Spring", date(2026, 3, 14)).await;
    let summer = club.hike_on("Summer", date(2026, 7, 4)).await;
    club.hike_on("Skipped", date(2026, 5, 1)).await;

    club.reconciler.record_checkin(spring.id, "TC-001").await.unwrap();
    club.reconciler.record_checkin(summer.id, "TC-001").await.unwrap();

    let history = club.reports.member_history(jane.id).await.unwrap();
    assert_eq!(history.total(), 2);
    assert_eq!(history.hikes[0].id, summer.id);
    assert_eq!(history.hikes[1].id, spring.id);
}

#[tokio::test]
async fn test_hike_detail_lists_checked_in_members() {
    let club = Club::new();
    club.member("TC-001", "Jane", "Smith").await;
    club.member("TC-002", "Omar", "Haddad").await;
    let hike = club.hike("Ridge Trail").await;
    club.reconciler.record_checkin(hike.id, "TC-002").await.unwrap();

    let detail = club.reports.hike_detail(hike.id).await.unwrap();
    assert_eq!(detail.hike.attendee_count, 1);
    assert_eq!(detail.attendees.len(), 1);
    assert_eq!(detail.attendees[0].membership_number, "TC-002");
}

#[tokio::test]
async fn test_attendance_sheet_unions_members_and_checked_in_guests() {
    let club = Club::new();
    club.member("TC-001", "Jane", "Smith").await;
    let hike = club.hike("Ridge Trail").await;
    let summit = club.reconciler.create_activity(hike.id, "Summit").await.unwrap();

    let checkin = club.reconciler.record_checkin(hike.id, "TC-001").await.unwrap();
    club.reconciler
        .set_checkin_role(checkin.id, trailcall_core::CheckinRole::Leader, true)
        .await
        .unwrap();
    club.reconciler
        .add_participant(summit.id, AttendanceRef::Checkin(checkin.id))
        .await
        .unwrap();

    let RsvpOutcome::Confirmed { rsvp_id: pat, .. } =
        club.reconciler.submit_rsvp(hike.id, "Pat", "Lee").await.unwrap()
    else {
        panic!("expected confirmation");
    };
    club.reconciler.submit_rsvp(hike.id, "Sam", "Ng").await.unwrap();
    assert!(matches!(
        club.reconciler.check_in_rsvp(pat).await.unwrap(),
        RsvpCheckin::Guest(_)
    ));
    club.reconciler
        .add_participant(summit.id, AttendanceRef::Rsvp(pat))
        .await
        .unwrap();

    let sheet = club.reports.hike_attendance(hike.id).await.unwrap();
    assert_eq!(sheet.len(), 2);

    assert_eq!(sheet[0].source, AttendeeSource::Member(checkin.id));
    assert_eq!(sheet[0].name, "Jane Smith");
    assert!(sheet[0].is_leader);
    assert_eq!(sheet[0].activities, vec!["Summit"]);

    assert!(sheet[1].is_guest());
    assert_eq!(sheet[1].name, "Pat Lee");
    assert_eq!(sheet[1].activities, vec!["Summit"]);
}

#[tokio::test]
async fn test_year_rollup_filters_and_orders() {
    let club = Club::new();
    club.member("TC-001", "Jane", "Smith").await;
    club.member("TC-002", "Omar", "Haddad").await;
    let april = club.hike_on("Bluffs", date(2026, 4, 1)).await;
    let march = club.hike_on("Canyon", date(2026, 3, 1)).await;
    let last_year = club.hike_on("Old", date(2025, 12, 31)).await;

    for hike in [&april, &march, &last_year] {
        club.reconciler.record_checkin(hike.id, "TC-001").await.unwrap();
        club.reconciler.record_checkin(hike.id, "TC-002").await.unwrap();
    }
    let lake = club.reconciler.create_activity(april.id, "Lake").await.unwrap();
    let jane_april = club.reconciler.record_checkin(april.id, "TC-001").await.unwrap();
    club.reconciler
        .add_participant(lake.id, AttendanceRef::Checkin(jane_april.id))
        .await
        .unwrap();

    let records = club.reports.attendance_for_year(2026).await.unwrap();
    let rows: Vec<(&str, &str)> = records
        .iter()
        .map(|r| (r.hike_name.as_str(), r.last_name.as_str()))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("Canyon", "Haddad"),
            ("Canyon", "Smith"),
            ("Bluffs", "Haddad"),
            ("Bluffs", "Smith"),
        ]
    );
    assert_eq!(records[3].activities, vec!["Lake"]);
    assert!(records[0].activities.is_empty());
}
