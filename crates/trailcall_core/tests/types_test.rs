use chrono::{NaiveDate, Utc};
use trailcall_core::{
    AttendanceRef, CheckinId, HikeStatus, Member, MemberId, MemberUpdate, NewHike, NewMember,
    RsvpId, RsvpOutcome, RsvpTarget, membership_key,
};
use trailcall_error::AttendanceErrorKind;

#[test]
fn test_new_member_requires_names_and_number() {
    let blank = NewMember::builder()
        .membership_number("TC-001")
        .first_name("  ")
        .last_name("Smith")
        .build()
        .unwrap();

    let err = blank.validate().unwrap_err();
    assert!(matches!(
        err.kind,
        AttendanceErrorKind::Validation { ref field, .. } if field == "first_name"
    ));
}

#[test]
fn test_new_member_builder_requires_mandatory_fields() {
    assert!(NewMember::builder().first_name("Jane").build().is_err());
}

#[test]
fn test_new_hike_rejects_blank_name() {
    let hike = NewHike::builder()
        .name("")
        .date(NaiveDate::from_ymd_opt(2026, 6, 1).unwrap())
        .build()
        .unwrap();
    assert!(hike.validate().is_err());
}

#[test]
fn test_hike_status_defaults_to_open() {
    assert_eq!(HikeStatus::default(), HikeStatus::Open);
    assert_eq!(HikeStatus::Closed.to_string(), "closed");
}

#[test]
fn test_attendance_ref_requires_exactly_one_id() {
    assert_eq!(
        AttendanceRef::from_ids(None, Some(RsvpId(9))).unwrap(),
        AttendanceRef::Rsvp(RsvpId(9))
    );

    let both = AttendanceRef::from_ids(Some(CheckinId(1)), Some(RsvpId(2))).unwrap_err();
    assert!(matches!(both.kind, AttendanceErrorKind::Validation { .. }));
}

#[test]
fn test_rsvp_target_exposes_one_side() {
    let member = RsvpTarget::Member(MemberId(3));
    assert_eq!(member.member_id(), Some(MemberId(3)));
    assert!(member.guest_name().is_none());

    let guest = RsvpTarget::Guest("Pat Lee".to_string());
    assert!(guest.is_guest());
    assert_eq!(guest.guest_name(), Some("Pat Lee"));
}

#[test]
fn test_rsvp_outcome_serializes_with_tag() {
    let outcome = RsvpOutcome::Confirmed {
        rsvp_id: RsvpId(5),
        matched_name: "Pat Lee".to_string(),
        member_number: None,
        is_guest: true,
    };

    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["outcome"], "confirmed");
    assert_eq!(json["rsvp_id"], 5);
    assert!(json.get("member_number").is_none());
    assert_eq!(outcome.message(), "RSVP confirmed as guest");
}

#[test]
fn test_membership_numbers_are_trimmed_keys() {
    let new_member = NewMember::builder()
        .membership_number(" TC-001\t")
        .first_name("Jane")
        .last_name("Smith")
        .build()
        .unwrap();
    assert_eq!(new_member.membership_key(), "TC-001");
    assert_eq!(membership_key("TC-001  "), "TC-001");

    let blank = MemberUpdate::default().with_membership_number("   ");
    assert_eq!(blank.membership_key(), None);

    let mut member = Member {
        id: MemberId(1),
        membership_number: "TC-001".to_string(),
        first_name: "Jane".to_string(),
        last_name: "Smith".to_string(),
        email: None,
        phone: None,
        active: true,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };
    blank.apply_to(&mut member);
    assert_eq!(member.membership_number, "TC-001");

    MemberUpdate::default()
        .with_membership_number(" TC-009 ")
        .apply_to(&mut member);
    assert_eq!(member.membership_number, "TC-009");
}
