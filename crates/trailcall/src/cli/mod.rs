//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the trailcall binary.

mod activity;
mod checkin;
mod commands;
mod db;
mod hike;
mod member;
mod output;
mod report;
mod rsvp;

pub use activity::handle_activity_command;
pub use checkin::handle_checkin_command;
pub use commands::{Cli, Commands};
pub use db::handle_db_command;
pub use hike::handle_hike_command;
pub use member::handle_member_command;
pub use report::handle_report_command;
pub use rsvp::handle_rsvp_command;
