use chrono::Utc;
use trailcall_core::{Member, MemberId, NameMatch, NameMatcher};

fn member(id: i64, first: &str, last: &str) -> Member {
    Member {
        id: MemberId(id),
        membership_number: format!("TC-{id:03}"),
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: None,
        phone: None,
        active: true,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[test]
fn test_exact_match_ignores_case_and_whitespace() {
    let roster = vec![member(1, "John", "Doe"), member(2, "Jane", "Smith")];

    let found = NameMatcher::best_match(&roster, "  JANE", "smith  ");
    assert_eq!(found.score, 100);
    assert_eq!(found.member.map(|m| m.id), Some(MemberId(2)));
}

#[test]
fn test_misspelled_name_scores_positionally() {
    let roster = vec![member(1, "Jane", "Smith")];

    // "jan smyth" vs "jane smith": only j, a, n and the final h line up
    let found = NameMatcher::best_match(&roster, "Jan", "Smyth");
    assert_eq!(found.score, 30);
    assert_eq!(found.member.map(|m| m.id), Some(MemberId(1)));
    assert!(!found.is_confident(80));
}

#[test]
fn test_truncated_surname_sits_on_threshold() {
    let roster = vec![member(1, "Alexandra", "Fitzgerald")];

    let found = NameMatcher::best_match(&roster, "Alexandra", "Fitzge");
    assert_eq!(found.score, 80);
    assert!(found.is_confident(80));
}

#[test]
fn test_one_point_below_threshold_is_not_confident() {
    let roster = vec![member(1, "Alexandra", "Fitzgerald-Lee")];

    let found = NameMatcher::best_match(&roster, "Alexandra", "Fitzgeralxxxxx");
    assert_eq!(found.score, 79);
    assert!(found.member.is_some());
    assert!(!found.is_confident(80));
}

#[test]
fn test_empty_roster_has_no_candidate() {
    let found = NameMatcher::best_match(&[], "Jane", "Smith");
    assert_eq!(found, NameMatch::NONE);
    assert!(!found.is_confident(0));
}

#[test]
fn test_unrelated_name_scores_zero() {
    let roster = vec![member(1, "Jane", "Smith")];

    let found = NameMatcher::best_match(&roster, "Bob", "Jones");
    assert_eq!(found.score, 0);
    assert!(found.member.is_none());
}

#[test]
fn test_ties_keep_earliest_roster_member() {
    // "jane smyth" and "jane smath" both score 90 against "jane smith"
    let roster = vec![member(1, "Jane", "Smyth"), member(2, "Jane", "Smath")];

    let found = NameMatcher::best_match(&roster, "Jane", "Smith");
    assert_eq!(found.score, 90);
    assert_eq!(found.member.map(|m| m.id), Some(MemberId(1)));
}

#[test]
fn test_highest_score_wins_over_roster_order() {
    let roster = vec![
        member(1, "John", "Smith"),
        member(2, "Jane", "Smyth"),
        member(3, "Bob", "Jones"),
    ];

    let found = NameMatcher::best_match(&roster, "Jane", "Smith");
    assert_eq!(found.score, 90);
    assert_eq!(found.member.map(|m| m.id), Some(MemberId(2)));
}

#[test]
fn test_exact_match_short_circuits_later_members() {
    let roster = vec![member(1, "Jane", "Smith"), member(2, "Jane", "Smith")];

    let found = NameMatcher::best_match(&roster, "jane", "smith");
    assert_eq!(found.member.map(|m| m.id), Some(MemberId(1)));
}
