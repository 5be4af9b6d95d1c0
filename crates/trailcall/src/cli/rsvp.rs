//! RSVP command handlers.

use super::commands::{OutputFormat, RsvpCommands};
use super::output::{checkin_line, emit, emit_list, hike_line, rsvp_line};
use trailcall::{HikeId, RsvpCheckin, RsvpId, RsvpOutcome, Trailcall, TrailcallResult};

/// Handle RSVP commands.
pub async fn handle_rsvp_command(
    app: &Trailcall,
    cmd: RsvpCommands,
    format: OutputFormat,
) -> TrailcallResult<()> {
    let reconciler = app.reconciler();
    match cmd {
        RsvpCommands::Submit { hike, first, last } => {
            let outcome = reconciler.submit_rsvp(HikeId(hike), &first, &last).await?;
            emit(format, &outcome, print_outcome)
        }
        RsvpCommands::Page { hike } => {
            let page = app.lifecycle().rsvp_page(HikeId(hike)).await?;
            emit(format, &page, |p| {
                println!("{}", hike_line(&p.hike));
                let state = if p.rsvp_open { "open" } else { "closed" };
                println!("RSVPs are {}", state);
            })
        }
        RsvpCommands::List { hike } => {
            let entries = reconciler.list_rsvps(HikeId(hike)).await?;
            emit_list(format, &entries, "RSVPs", rsvp_line)
        }
        RsvpCommands::Delete { id } => {
            reconciler.delete_rsvp(RsvpId(id)).await?;
            emit(format, &serde_json::json!({ "deleted": true }), |_| {
                println!("RSVP deleted")
            })
        }
        RsvpCommands::Checkin { id } => {
            let record = reconciler.check_in_rsvp(RsvpId(id)).await?;
            emit(format, &record, |r| match r {
                RsvpCheckin::Member(checkin) => println!("Checked in {}", checkin_line(checkin)),
                RsvpCheckin::Guest(rsvp) => println!("Checked in guest RSVP {}", rsvp.id),
            })
        }
        RsvpCommands::Undo { id } => {
            reconciler.undo_rsvp_checkin(RsvpId(id)).await?;
            emit(format, &serde_json::json!({ "undone": true }), |_| {
                println!("RSVP check-in undone")
            })
        }
    }
}

fn print_outcome(outcome: &RsvpOutcome) {
    println!("{}", outcome.message());
    match outcome {
        RsvpOutcome::Confirmed {
            matched_name,
            member_number,
            ..
        } => match member_number {
            Some(number) => println!("  {} ({})", matched_name, number),
            None => println!("  {}", matched_name),
        },
        RsvpOutcome::AlreadyRegistered {
            matched_name: Some(name),
            ..
        } => println!("  {}", name),
        _ => {}
    }
}
