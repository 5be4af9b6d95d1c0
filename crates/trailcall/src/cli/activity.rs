//! Activity command handlers.

use super::commands::{ActivityCommands, AttendanceArgs, OutputFormat};
use super::output::{activity_line, emit, emit_list, participant_line};
use trailcall::{
    ActivityId, AttendanceError, AttendanceRef, CheckinId, HikeId, RsvpId, Trailcall,
    TrailcallResult,
};

/// Handle activity commands.
pub async fn handle_activity_command(
    app: &Trailcall,
    cmd: ActivityCommands,
    format: OutputFormat,
) -> TrailcallResult<()> {
    let reconciler = app.reconciler();
    match cmd {
        ActivityCommands::Create { hike, name } => {
            let activity = reconciler.create_activity(HikeId(hike), &name).await?;
            emit(format, &activity, |a| println!("Created {}", activity_line(a)))
        }
        ActivityCommands::List { hike } => {
            let activities = reconciler.list_activities(HikeId(hike)).await?;
            emit_list(format, &activities, "activities", activity_line)
        }
        ActivityCommands::Show { id } => {
            let activity = reconciler.get_activity(ActivityId(id)).await?;
            emit(format, &activity, |a| println!("{}", activity_line(a)))
        }
        ActivityCommands::Delete { id } => {
            reconciler.delete_activity(ActivityId(id)).await?;
            emit(format, &serde_json::json!({ "deleted": true }), |_| {
                println!("Activity deleted")
            })
        }
        ActivityCommands::Join { id, attendance } => {
            let attendance = attendance_ref(attendance)?;
            let participant = reconciler
                .add_participant(ActivityId(id), attendance)
                .await?;
            emit(format, &participant, |p| {
                println!("Joined {}", participant_line(p))
            })
        }
        ActivityCommands::Leave { id, attendance } => {
            let attendance = attendance_ref(attendance)?;
            reconciler
                .remove_participant(ActivityId(id), attendance)
                .await?;
            emit(format, &serde_json::json!({ "removed": true }), |_| {
                println!("Participant removed")
            })
        }
        ActivityCommands::Participants { id } => {
            let participants = reconciler.list_participants(ActivityId(id)).await?;
            emit_list(format, &participants, "participants", participant_line)
        }
        ActivityCommands::For { attendance } => {
            let attendance = attendance_ref(attendance)?;
            let names = app.store().activities_for(attendance).await?;
            emit_list(format, &names, "activities", String::clone)
        }
    }
}

fn attendance_ref(args: AttendanceArgs) -> Result<AttendanceRef, AttendanceError> {
    AttendanceRef::from_ids(args.checkin.map(CheckinId), args.rsvp.map(RsvpId))
}
