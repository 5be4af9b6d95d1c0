//! Check-in command handlers.

use super::commands::{CheckinCommands, OutputFormat};
use super::output::{checkin_line, emit, emit_list};
use std::str::FromStr;
use trailcall::{
    AttendanceError, CheckinId, CheckinRole, HikeId, MemberId, Trailcall, TrailcallResult,
};

/// Handle check-in commands.
pub async fn handle_checkin_command(
    app: &Trailcall,
    cmd: CheckinCommands,
    format: OutputFormat,
) -> TrailcallResult<()> {
    let reconciler = app.reconciler();
    match cmd {
        CheckinCommands::Record { hike, numbers } => {
            let result = reconciler.record_checkins(HikeId(hike), &numbers).await;
            emit(format, &result, |r| {
                for checkin in &r.checkins {
                    println!("Checked in {}", checkin_line(checkin));
                }
                for failure in &r.errors {
                    println!("Failed {}: {}", failure.membership_number, failure.reason);
                }
            })
        }
        CheckinCommands::Remove { hike, member } => {
            reconciler.remove_checkin(HikeId(hike), MemberId(member)).await?;
            emit(format, &serde_json::json!({ "removed": true }), |_| {
                println!("Check-in removed")
            })
        }
        CheckinCommands::List { hike } => {
            let checkins = reconciler.list_checkins(HikeId(hike)).await?;
            emit_list(format, &checkins, "check-ins", checkin_line)
        }
        CheckinCommands::Role { id, role, value } => {
            let role = parse_role(&role)?;
            let checkin = reconciler
                .set_checkin_role(CheckinId(id), role, value)
                .await?;
            emit(format, &checkin, |c| println!("{}", checkin_line(c)))
        }
    }
}

fn parse_role(role: &str) -> Result<CheckinRole, AttendanceError> {
    CheckinRole::from_str(role.trim())
        .map_err(|_| AttendanceError::validation("role", format!("unknown role '{}'", role)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_role_accepts_known_roles() {
        assert_eq!(parse_role("leader").unwrap(), CheckinRole::Leader);
        assert_eq!(parse_role(" sweeper ").unwrap(), CheckinRole::Sweeper);
    }

    #[test]
    fn test_parse_role_rejects_unknown_roles() {
        assert!(parse_role("driver").is_err());
    }
}
