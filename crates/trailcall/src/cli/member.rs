//! Member roster command handlers.

use super::commands::{MemberCommands, MemberFields, OutputFormat};
use super::output::{emit, emit_list, member_line};
use trailcall::{MemberId, MemberUpdate, NewMember, Trailcall, TrailcallResult};

/// Handle member commands.
pub async fn handle_member_command(
    app: &Trailcall,
    cmd: MemberCommands,
    format: OutputFormat,
) -> TrailcallResult<()> {
    let roster = app.roster();
    match cmd {
        MemberCommands::List { all } => {
            let members = roster.list(!all).await?;
            emit_list(format, &members, "members", member_line)
        }
        MemberCommands::Add {
            number,
            first,
            last,
            email,
            phone,
        } => {
            let new_member = NewMember {
                membership_number: number,
                first_name: first,
                last_name: last,
                email,
                phone,
            };
            let member = roster.create(&new_member).await?;
            emit(format, &member, |m| println!("Added {}", member_line(m)))
        }
        MemberCommands::Show { number } => {
            let member = roster.get_by_number(&number).await?;
            emit(format, &member, |m| {
                println!("{}", member_line(m));
                if let Some(email) = &m.email {
                    println!("  Email: {}", email);
                }
                if let Some(phone) = &m.phone {
                    println!("  Phone: {}", phone);
                }
            })
        }
        MemberCommands::Update { id, fields, active } => {
            let update = member_update(fields, active);
            let member = roster.update(MemberId(id), &update).await?;
            emit(format, &member, |m| println!("Updated {}", member_line(m)))
        }
        MemberCommands::Deactivate { id } => {
            let member = roster.deactivate(MemberId(id)).await?;
            emit(format, &member, |m| println!("Deactivated {}", member_line(m)))
        }
    }
}

fn member_update(fields: MemberFields, active: Option<bool>) -> MemberUpdate {
    MemberUpdate {
        membership_number: fields.number,
        first_name: fields.first,
        last_name: fields.last,
        email: fields.email,
        phone: fields.phone,
        active,
    }
}
