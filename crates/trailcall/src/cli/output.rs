//! Rendering command results.

use super::commands::OutputFormat;
use serde::Serialize;
use trailcall::{
    Activity, ActivityParticipant, AttendanceRecord, Attendee, Checkin, Hike, JsonError, Member,
    RsvpEntry, TrailcallResult,
};

/// Print `value` as pretty JSON, or hand it to `human`.
pub fn emit<T: Serialize + ?Sized>(
    format: OutputFormat,
    value: &T,
    human: impl FnOnce(&T),
) -> TrailcallResult<()> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(value)
                .map_err(|e| JsonError::new(e.to_string()))?;
            println!("{}", json);
        }
        OutputFormat::Human => human(value),
    }
    Ok(())
}

/// Print each row of a list followed by a count.
pub fn emit_list<T: Serialize>(
    format: OutputFormat,
    items: &[T],
    noun: &str,
    line: impl Fn(&T) -> String,
) -> TrailcallResult<()> {
    emit(format, items, |items| {
        for item in items {
            println!("{}", line(item));
        }
        println!("{:-<60}", "");
        println!("Total: {} {}", items.len(), noun);
    })
}

pub fn member_line(member: &Member) -> String {
    let status = if member.active { "" } else { " (inactive)" };
    format!(
        "[{}] {:<10} {}{}",
        member.id,
        member.membership_number,
        member.full_name(),
        status
    )
}

pub fn hike_line(hike: &Hike) -> String {
    let rsvp = if hike.rsvp_open { "rsvp open" } else { "rsvp closed" };
    format!(
        "[{}] {} {} ({}, {}) attendees: {} rsvps: {}",
        hike.id,
        hike.date,
        hike.name,
        hike.status,
        rsvp,
        hike.attendee_count,
        hike.rsvp_count
    )
}

pub fn print_hike(hike: &Hike) {
    println!("{}", hike_line(hike));
    if let Some(location) = &hike.location {
        println!("  Location: {}", location);
    }
    if let Some(notes) = &hike.notes {
        println!("  Notes: {}", notes);
    }
}

fn roles(is_leader: bool, is_sweeper: bool) -> &'static str {
    match (is_leader, is_sweeper) {
        (true, true) => " [leader, sweeper]",
        (true, false) => " [leader]",
        (false, true) => " [sweeper]",
        (false, false) => "",
    }
}

pub fn checkin_line(checkin: &Checkin) -> String {
    format!(
        "[{}] {} {:<10} {}{}",
        checkin.id,
        checkin.checked_in_at.format("%Y-%m-%d %H:%M"),
        checkin.membership_number,
        checkin.member_name,
        roles(checkin.is_leader, checkin.is_sweeper)
    )
}

pub fn rsvp_line(entry: &RsvpEntry) -> String {
    let kind = match &entry.membership_number {
        Some(number) => number.as_str(),
        None => "guest",
    };
    let checked_in = if entry.checked_in { " (checked in)" } else { "" };
    format!(
        "[{}] {:<10} {}{}",
        entry.rsvp.id, kind, entry.display_name, checked_in
    )
}

pub fn activity_line(activity: &Activity) -> String {
    format!(
        "[{}] {} ({} participants)",
        activity.id, activity.name, activity.participant_count
    )
}

pub fn participant_line(participant: &ActivityParticipant) -> String {
    let kind = match (&participant.membership_number, participant.is_guest) {
        (Some(number), _) => number.clone(),
        (None, true) => "guest".to_string(),
        (None, false) => String::new(),
    };
    format!("[{}] {:<10} {}", participant.id, kind, participant.name)
}

pub fn attendee_line(attendee: &Attendee) -> String {
    let kind = attendee
        .membership_number
        .clone()
        .unwrap_or_else(|| "guest".to_string());
    let activities = if attendee.activities.is_empty() {
        String::new()
    } else {
        format!(" - {}", attendee.activities.join(", "))
    };
    format!(
        "{:<10} {}{}{}",
        kind,
        attendee.name,
        roles(attendee.is_leader, attendee.is_sweeper),
        activities
    )
}

pub fn record_line(record: &AttendanceRecord) -> String {
    let activities = if record.activities.is_empty() {
        String::new()
    } else {
        format!(" - {}", record.activities.join(", "))
    };
    format!(
        "{} {:<24} {:<10} {} {}{}",
        record.hike_date,
        record.hike_name,
        record.membership_number,
        record.first_name,
        record.last_name,
        activities
    )
}
