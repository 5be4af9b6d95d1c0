//! Tests for check-ins, RSVP classification and RSVP conversion.

mod test_utils;

use futures::future::join_all;
use test_utils::Club;
use trailcall_attendance::{MatchPolicy, RsvpCheckin};
use trailcall_core::{HikeId, RsvpOutcome, RsvpTarget};
use trailcall_interface::AttendanceStore;

#[tokio::test]
async fn test_record_checkin_is_idempotent() {
    let club = Club::new();
    club.member("TC-001", "Jane", "Smith").await;
    let hike = club.hike("Ridge Trail").await;

    let first = club.reconciler.record_checkin(hike.id, "TC-001").await.unwrap();
    let second = club.reconciler.record_checkin(hike.id, "TC-001").await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(first.member_name, "Jane Smith");
    assert_eq!(first.membership_number, "TC-001");
    assert_eq!(club.store.checkin_count().await, 1);
}

#[tokio::test]
async fn test_record_checkin_trims_membership_number() {
    let club = Club::new();
    club.member("TC-001", "Jane", "Smith").await;
    let hike = club.hike("Ridge Trail").await;

    let checkin = club.reconciler.record_checkin(hike.id, "  TC-001 ").await.unwrap();
    assert_eq!(checkin.membership_number, "TC-001");
}

#[tokio::test]
async fn test_padded_membership_number_is_stored_trimmed() {
    let club = Club::new();
    let jane = club.member("TC-001 ", "Jane", "Smith").await;
    let hike = club.hike("Ridge Trail").await;
    assert_eq!(jane.membership_number, "TC-001");

    let checkin = club
        .reconciler
        .record_checkin(hike.id, &jane.membership_number)
        .await
        .unwrap();
    assert_eq!(checkin.member_id, jane.id);

    let again = club.reconciler.record_checkin(hike.id, " TC-001 ").await.unwrap();
    assert_eq!(again.id, checkin.id);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_checkins_converge_on_one_row() {
    let club = Club::new();
    club.member("TC-001", "Jane", "Smith").await;
    let hike_id = club.hike("Ridge Trail").await.id;

    let stations = (0..8).map(|_| {
        let reconciler = club.reconciler.clone();
        tokio::spawn(async move { reconciler.record_checkin(hike_id, "TC-001").await })
    });
    let results = join_all(stations).await;

    let ids: Vec<_> = results
        .into_iter()
        .map(|joined| joined.unwrap().unwrap().id)
        .collect();
    assert!(ids.windows(2).all(|pair| pair[0] == pair[1]));
    assert_eq!(club.store.checkin_count().await, 1);
}

#[tokio::test]
async fn test_record_checkin_unknown_number_is_not_found() {
    let club = Club::new();
    let hike = club.hike("Ridge Trail").await;

    let err = club
        .reconciler
        .record_checkin(hike.id, "TC-404")
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_record_checkin_unknown_hike_is_not_found() {
    let club = Club::new();
    club.member("TC-001", "Jane", "Smith").await;

    let err = club
        .reconciler
        .record_checkin(HikeId(999), "TC-001")
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_record_checkin_blank_number_is_rejected() {
    let club = Club::new();
    let hike = club.hike("Ridge Trail").await;

    let err = club.reconciler.record_checkin(hike.id, "   ").await.unwrap_err();
    assert!(!err.is_not_found());
    assert!(err.as_attendance().is_some());
}

#[tokio::test]
async fn test_bulk_checkin_keeps_going_past_failures() {
    let club = Club::new();
    club.member("TC-001", "Jane", "Smith").await;
    club.member("TC-002", "Omar", "Haddad").await;
    let hike = club.hike("Ridge Trail").await;

    let numbers = vec![
        "TC-001".to_string(),
        "TC-404".to_string(),
        "TC-002".to_string(),
    ];
    let result = club.reconciler.record_checkins(hike.id, &numbers).await;

    assert_eq!(result.checkins.len(), 2);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].membership_number, "TC-404");
}

#[tokio::test]
async fn test_remove_checkin_is_idempotent() {
    let club = Club::new();
    let jane = club.member("TC-001", "Jane", "Smith").await;
    let hike = club.hike("Ridge Trail").await;
    club.reconciler.record_checkin(hike.id, "TC-001").await.unwrap();

    club.reconciler.remove_checkin(hike.id, jane.id).await.unwrap();
    club.reconciler.remove_checkin(hike.id, jane.id).await.unwrap();

    assert_eq!(club.store.checkin_count().await, 0);
}

#[tokio::test]
async fn test_exact_name_rsvp_links_member() {
    let club = Club::new();
    let jane = club.member("TC-001", "Jane", "Smith").await;
    let hike = club.hike("Ridge Trail").await;

    let outcome = club
        .reconciler
        .submit_rsvp(hike.id, "jane", "SMITH")
        .await
        .unwrap();

    let RsvpOutcome::Confirmed {
        rsvp_id,
        matched_name,
        member_number,
        is_guest,
    } = outcome
    else {
        panic!("expected confirmation, got {outcome:?}");
    };
    assert!(!is_guest);
    assert_eq!(matched_name, "Jane Smith");
    assert_eq!(member_number.as_deref(), Some("TC-001"));

    let rsvp = club.store.get_rsvp(rsvp_id).await.unwrap();
    assert_eq!(rsvp.target, RsvpTarget::Member(jane.id));
}

#[tokio::test]
async fn test_score_of_exactly_threshold_is_member() {
    let club = Club::new();
    let member = club.member("TC-010", "Alexandra", "Fitzgerald").await;
    let hike = club.hike("Ridge Trail").await;

    // "alexandra fitzge" vs "alexandra fitzgerald" scores 80
    let outcome = club
        .reconciler
        .submit_rsvp(hike.id, "Alexandra", "Fitzge")
        .await
        .unwrap();

    let RsvpOutcome::Confirmed { rsvp_id, is_guest, .. } = outcome else {
        panic!("expected confirmation, got {outcome:?}");
    };
    assert!(!is_guest);
    let rsvp = club.store.get_rsvp(rsvp_id).await.unwrap();
    assert_eq!(rsvp.target, RsvpTarget::Member(member.id));
}

#[tokio::test]
async fn test_score_one_below_threshold_is_guest() {
    let club = Club::new();
    club.member("TC-011", "Alexandra", "Fitzgerald-Lee").await;
    let hike = club.hike("Ridge Trail").await;

    // "alexandra fitzgeralxxxxx" vs "alexandra fitzgerald-lee" scores 79
    let outcome = club
        .reconciler
        .submit_rsvp(hike.id, "Alexandra", "Fitzgeralxxxxx")
        .await
        .unwrap();

    let RsvpOutcome::Confirmed {
        rsvp_id,
        matched_name,
        member_number,
        is_guest,
    } = outcome
    else {
        panic!("expected confirmation, got {outcome:?}");
    };
    assert!(is_guest);
    assert_eq!(matched_name, "Alexandra Fitzgeralxxxxx");
    assert!(member_number.is_none());

    let rsvp = club.store.get_rsvp(rsvp_id).await.unwrap();
    assert_eq!(
        rsvp.target,
        RsvpTarget::Guest("Alexandra Fitzgeralxxxxx".to_string())
    );
}

#[tokio::test]
async fn test_custom_policy_moves_the_threshold() {
    let club = Club::new();
    club.member("TC-010", "Alexandra", "Fitzgerald").await;
    let hike = club.hike("Ridge Trail").await;
    let strict = club.reconciler.clone().with_policy(MatchPolicy::new(81));

    let outcome = strict
        .submit_rsvp(hike.id, "Alexandra", "Fitzge")
        .await
        .unwrap();
    assert!(matches!(outcome, RsvpOutcome::Confirmed { is_guest: true, .. }));
}

#[tokio::test]
async fn test_deactivated_members_are_not_matched() {
    let club = Club::new();
    let jane = club.member("TC-001", "Jane", "Smith").await;
    club.roster.deactivate(jane.id).await.unwrap();
    let hike = club.hike("Ridge Trail").await;

    let outcome = club
        .reconciler
        .submit_rsvp(hike.id, "Jane", "Smith")
        .await
        .unwrap();
    assert!(matches!(outcome, RsvpOutcome::Confirmed { is_guest: true, .. }));
}

#[tokio::test]
async fn test_closed_rsvps_never_create_rows() {
    let club = Club::new();
    club.member("TC-001", "Jane", "Smith").await;
    let hike = club.hike("Ridge Trail").await;
    club.lifecycle.close_rsvps(hike.id).await.unwrap();

    let member = club.reconciler.submit_rsvp(hike.id, "Jane", "Smith").await.unwrap();
    let guest = club.reconciler.submit_rsvp(hike.id, "Pat", "Lee").await.unwrap();

    assert_eq!(member, RsvpOutcome::Closed);
    assert_eq!(guest, RsvpOutcome::Closed);
    assert!(!member.is_success());
    assert_eq!(club.store.rsvp_count().await, 0);
}

#[tokio::test]
async fn test_closed_hike_with_open_rsvps_still_accepts() {
    let club = Club::new();
    let hike = club.hike("Ridge Trail").await;
    club.lifecycle.close(hike.id).await.unwrap();

    let outcome = club.reconciler.submit_rsvp(hike.id, "Pat", "Lee").await.unwrap();
    assert!(outcome.is_success());
}

#[tokio::test]
async fn test_duplicate_guest_is_already_registered() {
    let club = Club::new();
    let hike = club.hike("Ridge Trail").await;

    let first = club.reconciler.submit_rsvp(hike.id, "Pat", "Lee").await.unwrap();
    let second = club
        .reconciler
        .submit_rsvp(hike.id, " Pat ", "Lee")
        .await
        .unwrap();

    assert!(first.is_success());
    assert_eq!(
        second,
        RsvpOutcome::AlreadyRegistered {
            matched_name: None,
            member_number: None,
            is_guest: true,
        }
    );
    assert_eq!(club.store.rsvp_count().await, 1);
}

#[tokio::test]
async fn test_duplicate_member_is_already_registered() {
    let club = Club::new();
    club.member("TC-001", "Jane", "Smith").await;
    let hike = club.hike("Ridge Trail").await;

    club.reconciler.submit_rsvp(hike.id, "Jane", "Smith").await.unwrap();
    let second = club.reconciler.submit_rsvp(hike.id, "JANE", "smith").await.unwrap();

    assert_eq!(
        second,
        RsvpOutcome::AlreadyRegistered {
            matched_name: Some("Jane Smith".to_string()),
            member_number: Some("TC-001".to_string()),
            is_guest: false,
        }
    );
    assert_eq!(second.message(), "You're already registered for this hike");
}

#[tokio::test]
async fn test_guest_names_are_case_sensitive_keys() {
    let club = Club::new();
    let hike = club.hike("Ridge Trail").await;

    club.reconciler.submit_rsvp(hike.id, "Pat", "Lee").await.unwrap();
    let other = club.reconciler.submit_rsvp(hike.id, "pat", "lee").await.unwrap();

    assert!(other.is_success());
    assert_eq!(club.store.rsvp_count().await, 2);
}

#[tokio::test]
async fn test_blank_rsvp_name_is_rejected() {
    let club = Club::new();
    let hike = club.hike("Ridge Trail").await;

    assert!(club.reconciler.submit_rsvp(hike.id, "", "Lee").await.is_err());
    assert!(club.reconciler.submit_rsvp(hike.id, "Pat", " ").await.is_err());
    assert_eq!(club.store.rsvp_count().await, 0);
}

#[tokio::test]
async fn test_closed_rsvps_answer_closed_before_name_checks() {
    let club = Club::new();
    let hike = club.hike("Ridge Trail").await;
    club.lifecycle.close_rsvps(hike.id).await.unwrap();

    let outcome = club.reconciler.submit_rsvp(hike.id, "", " ").await.unwrap();
    assert_eq!(outcome, RsvpOutcome::Closed);
    assert_eq!(club.store.rsvp_count().await, 0);
}

#[tokio::test]
async fn test_member_rsvp_checkin_round_trip() {
    let club = Club::new();
    let jane = club.member("TC-001", "Jane", "Smith").await;
    let hike = club.hike("Ridge Trail").await;
    let RsvpOutcome::Confirmed { rsvp_id, .. } =
        club.reconciler.submit_rsvp(hike.id, "Jane", "Smith").await.unwrap()
    else {
        panic!("expected confirmation");
    };

    let converted = club.reconciler.check_in_rsvp(rsvp_id).await.unwrap();
    let RsvpCheckin::Member(checkin) = converted else {
        panic!("member RSVP should produce a check-in");
    };
    assert_eq!(checkin.member_id, jane.id);
    assert!(club.store.get_rsvp(rsvp_id).await.unwrap().checked_in_at.is_none());

    let entries = club.reconciler.list_rsvps(hike.id).await.unwrap();
    assert!(entries[0].checked_in);

    club.reconciler.undo_rsvp_checkin(rsvp_id).await.unwrap();
    assert_eq!(club.store.checkin_count().await, 0);
    let entries = club.reconciler.list_rsvps(hike.id).await.unwrap();
    assert!(!entries[0].checked_in);
    assert_eq!(club.store.rsvp_count().await, 1);
}

#[tokio::test]
async fn test_member_rsvp_checkin_reuses_existing_checkin() {
    let club = Club::new();
    club.member("TC-001", "Jane", "Smith").await;
    let hike = club.hike("Ridge Trail").await;
    let direct = club.reconciler.record_checkin(hike.id, "TC-001").await.unwrap();
    let RsvpOutcome::Confirmed { rsvp_id, .. } =
        club.reconciler.submit_rsvp(hike.id, "Jane", "Smith").await.unwrap()
    else {
        panic!("expected confirmation");
    };

    let RsvpCheckin::Member(via_rsvp) = club.reconciler.check_in_rsvp(rsvp_id).await.unwrap()
    else {
        panic!("member RSVP should produce a check-in");
    };
    assert_eq!(via_rsvp.id, direct.id);
    assert_eq!(club.store.checkin_count().await, 1);
}

#[tokio::test]
async fn test_guest_rsvp_checkin_round_trip() {
    let club = Club::new();
    let hike = club.hike("Ridge Trail").await;
    let RsvpOutcome::Confirmed { rsvp_id, .. } =
        club.reconciler.submit_rsvp(hike.id, "Pat", "Lee").await.unwrap()
    else {
        panic!("expected confirmation");
    };

    let RsvpCheckin::Guest(rsvp) = club.reconciler.check_in_rsvp(rsvp_id).await.unwrap() else {
        panic!("guest RSVP should be stamped");
    };
    assert!(rsvp.checked_in_at.is_some());
    assert_eq!(club.store.checkin_count().await, 0);

    club.reconciler.undo_rsvp_checkin(rsvp_id).await.unwrap();
    let rsvp = club.store.get_rsvp(rsvp_id).await.unwrap();
    assert!(rsvp.checked_in_at.is_none());
}

#[tokio::test]
async fn test_rsvps_are_listed_by_surname_or_guest_name() {
    let club = Club::new();
    club.member("TC-001", "Jane", "Smith").await;
    club.member("TC-002", "Omar", "Haddad").await;
    let hike = club.hike("Ridge Trail").await;

    club.reconciler.submit_rsvp(hike.id, "Jane", "Smith").await.unwrap();
    club.reconciler.submit_rsvp(hike.id, "Omar", "Haddad").await.unwrap();
    club.reconciler.submit_rsvp(hike.id, "Pat", "Lee").await.unwrap();

    let names: Vec<String> = club
        .reconciler
        .list_rsvps(hike.id)
        .await
        .unwrap()
        .into_iter()
        .map(|entry| entry.display_name)
        .collect();
    // Haddad < Pat Lee < Smith
    assert_eq!(names, vec!["Omar Haddad", "Pat Lee", "Jane Smith"]);
}

#[tokio::test]
async fn test_delete_rsvp_reports_missing() {
    let club = Club::new();
    let hike = club.hike("Ridge Trail").await;
    let RsvpOutcome::Confirmed { rsvp_id, .. } =
        club.reconciler.submit_rsvp(hike.id, "Pat", "Lee").await.unwrap()
    else {
        panic!("expected confirmation");
    };

    club.reconciler.delete_rsvp(rsvp_id).await.unwrap();
    let err = club.reconciler.delete_rsvp(rsvp_id).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_jane_smith_scenario() {
    let club = Club::new();
    let jane = club.member("TC-001", "Jane", "Smith").await;
    let hike = club.hike("Ridge Trail").await;
    assert!(hike.is_open());
    assert!(hike.is_rsvp_open());

    let outcome = club
        .reconciler
        .submit_rsvp(hike.id, "Jane", "Smith")
        .await
        .unwrap();
    let RsvpOutcome::Confirmed {
        rsvp_id, is_guest, ..
    } = outcome
    else {
        panic!("expected confirmation, got {outcome:?}");
    };
    assert!(!is_guest);

    club.reconciler.check_in_rsvp(rsvp_id).await.unwrap();
    let attendees = club.store.attendees_for_hike(hike.id).await.unwrap();
    assert_eq!(attendees.len(), 1);
    assert_eq!(attendees[0].id, jane.id);

    club.reconciler.undo_rsvp_checkin(rsvp_id).await.unwrap();
    let attendees = club.store.attendees_for_hike(hike.id).await.unwrap();
    assert!(attendees.is_empty());
}
