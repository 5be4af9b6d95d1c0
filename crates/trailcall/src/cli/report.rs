//! Report command handlers.

use super::commands::{OutputFormat, ReportCommands};
use super::output::{attendee_line, emit, emit_list, hike_line, member_line, record_line};
use trailcall::{HikeId, Trailcall, TrailcallResult};

/// Handle report commands.
pub async fn handle_report_command(
    app: &Trailcall,
    cmd: ReportCommands,
    format: OutputFormat,
) -> TrailcallResult<()> {
    let reports = app.reports();
    match cmd {
        ReportCommands::Member { number } => {
            let member = app.roster().get_by_number(&number).await?;
            let history = reports.member_history(member.id).await?;
            emit(format, &history, |h| {
                println!("{}", member_line(&h.member));
                for hike in &h.hikes {
                    println!("  {}", hike_line(hike));
                }
                println!("Total: {} hikes", h.total());
            })
        }
        ReportCommands::Hike { id } => {
            let detail = reports.hike_detail(HikeId(id)).await?;
            emit(format, &detail, |d| {
                println!("{}", hike_line(&d.hike));
                for member in &d.attendees {
                    println!("  {}", member_line(member));
                }
            })
        }
        ReportCommands::Attendance { id } => {
            let attendees = reports.hike_attendance(HikeId(id)).await?;
            emit_list(format, &attendees, "attendees", attendee_line)
        }
        ReportCommands::Year { year } => {
            let records = reports.attendance_for_year(year).await?;
            emit_list(format, &records, "check-ins", record_line)
        }
    }
}
