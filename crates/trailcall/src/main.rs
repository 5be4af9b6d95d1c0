//! TrailCall CLI binary.
//!
//! This binary provides command-line access to TrailCall's functionality:
//! - Maintain the member roster and hike schedule
//! - Record check-ins and RSVPs, and reconcile them into attendance
//! - Manage activity rosters and print attendance reports

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{
        Cli, Commands, handle_activity_command, handle_checkin_command, handle_db_command,
        handle_hike_command, handle_member_command, handle_report_command, handle_rsvp_command,
    };
    use trailcall::{Trailcall, TrailcallConfig, hash_pin, init_tracing};

    // Parse command-line arguments
    let cli = Cli::parse();
    let config = TrailcallConfig::load()?;

    // Initialize tracing
    let level = if cli.verbose {
        "debug"
    } else {
        config.logging().level().as_str()
    };
    init_tracing(level, *config.logging().json())?;

    let format = cli.format;
    if !matches!(cli.command, Commands::HashPin { .. }) {
        let gate = config.admin_gate();
        if let Some(session) = gate.unlock(cli.pin.as_deref()).await? {
            tracing::debug!(expires_at = %session.expires_at, "Admin session opened");
        }
    }

    let connect = || Trailcall::connect(&config);
    match cli.command {
        Commands::HashPin { pin } => println!("{}", hash_pin(&pin)),
        Commands::Db(cmd) => handle_db_command(cmd, &config).await?,
        Commands::Member(cmd) => handle_member_command(&connect()?, cmd, format).await?,
        Commands::Hike(cmd) => handle_hike_command(&connect()?, cmd, format).await?,
        Commands::Checkin(cmd) => handle_checkin_command(&connect()?, cmd, format).await?,
        Commands::Rsvp(cmd) => handle_rsvp_command(&connect()?, cmd, format).await?,
        Commands::Activity(cmd) => handle_activity_command(&connect()?, cmd, format).await?,
        Commands::Report(cmd) => handle_report_command(&connect()?, cmd, format).await?,
    }

    Ok(())
}
