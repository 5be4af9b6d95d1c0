//! Hike command handlers.

use super::commands::{HikeCommands, OutputFormat};
use super::output::{emit, emit_list, hike_line, print_hike};
use trailcall::{HikeId, HikeUpdate, NewHike, Trailcall, TrailcallResult};

/// Handle hike commands.
pub async fn handle_hike_command(
    app: &Trailcall,
    cmd: HikeCommands,
    format: OutputFormat,
) -> TrailcallResult<()> {
    let lifecycle = app.lifecycle();
    match cmd {
        HikeCommands::List => {
            let hikes = lifecycle.list_hikes().await?;
            emit_list(format, &hikes, "hikes", hike_line)
        }
        HikeCommands::Create {
            name,
            date,
            location,
            notes,
        } => {
            let new_hike = NewHike {
                name,
                date,
                location,
                notes,
            };
            let hike = lifecycle.create_hike(&new_hike).await?;
            emit(format, &hike, |h| println!("Created {}", hike_line(h)))
        }
        HikeCommands::Show { id } => {
            let hike = lifecycle.get_hike(HikeId(id)).await?;
            emit(format, &hike, print_hike)
        }
        HikeCommands::Current => {
            let hike = lifecycle.current_open_hike().await?;
            emit(format, &hike, |h| match h {
                Some(hike) => print_hike(hike),
                None => println!("No open hike"),
            })
        }
        HikeCommands::Update {
            id,
            name,
            date,
            location,
            notes,
        } => {
            let update = HikeUpdate {
                name,
                date,
                location,
                notes,
            };
            let hike = lifecycle.update_hike(HikeId(id), &update).await?;
            emit(format, &hike, |h| println!("Updated {}", hike_line(h)))
        }
        HikeCommands::Close { id } => {
            let hike = lifecycle.close(HikeId(id)).await?;
            emit(format, &hike, |h| println!("Closed {}", hike_line(h)))
        }
        HikeCommands::OpenRsvps { id } => {
            let hike = lifecycle.open_rsvps(HikeId(id)).await?;
            emit(format, &hike, |h| println!("{}", hike_line(h)))
        }
        HikeCommands::CloseRsvps { id } => {
            let hike = lifecycle.close_rsvps(HikeId(id)).await?;
            emit(format, &hike, |h| println!("{}", hike_line(h)))
        }
    }
}
