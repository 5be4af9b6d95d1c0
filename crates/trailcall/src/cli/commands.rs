//! CLI command definitions.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

/// TrailCall - club hike attendance: roster, check-ins, RSVPs and activities
#[derive(Parser, Debug)]
#[command(name = "trailcall")]
#[command(about = "Club hike attendance: roster, check-ins, RSVPs and activities", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    /// Admin PIN, required when `session.pin_hash` is configured
    #[arg(long, global = true, env = "TRAILCALL_PIN", hide_env_values = true)]
    pub pin: Option<String>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Member roster
    #[command(subcommand)]
    Member(MemberCommands),

    /// Hike scheduling and status
    #[command(subcommand)]
    Hike(HikeCommands),

    /// Member check-ins
    #[command(subcommand)]
    Checkin(CheckinCommands),

    /// RSVPs
    #[command(subcommand)]
    Rsvp(RsvpCommands),

    /// Activities within a hike
    #[command(subcommand)]
    Activity(ActivityCommands),

    /// Attendance reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Database schema management
    #[command(subcommand)]
    Db(DbCommands),

    /// Print the SHA-256 digest of an admin PIN for `session.pin_hash`
    HashPin {
        /// The PIN to hash
        pin: String,
    },
}

/// Member subcommands
#[derive(Subcommand, Debug)]
pub enum MemberCommands {
    /// List members by surname
    List {
        /// Include deactivated members
        #[arg(long)]
        all: bool,
    },

    /// Add a member
    Add {
        /// Membership number (unique)
        #[arg(long)]
        number: String,
        /// Given name
        #[arg(long)]
        first: String,
        /// Surname
        #[arg(long)]
        last: String,
        /// Email address
        #[arg(long)]
        email: Option<String>,
        /// Phone number
        #[arg(long)]
        phone: Option<String>,
    },

    /// Show a member by membership number
    Show {
        /// Membership number
        number: String,
    },

    /// Change a member's details; omitted fields are kept
    Update {
        /// Member id
        id: i64,
        #[command(flatten)]
        fields: MemberFields,
        /// Reactivate (true) or deactivate (false)
        #[arg(long)]
        active: Option<bool>,
    },

    /// Deactivate a member
    Deactivate {
        /// Member id
        id: i64,
    },
}

/// Optional member fields for updates
#[derive(Args, Debug, Default)]
pub struct MemberFields {
    /// New membership number
    #[arg(long)]
    pub number: Option<String>,
    /// New given name
    #[arg(long)]
    pub first: Option<String>,
    /// New surname
    #[arg(long)]
    pub last: Option<String>,
    /// New email
    #[arg(long)]
    pub email: Option<String>,
    /// New phone
    #[arg(long)]
    pub phone: Option<String>,
}

/// Hike subcommands
#[derive(Subcommand, Debug)]
pub enum HikeCommands {
    /// List hikes, newest first
    List,

    /// Schedule a hike
    Create {
        /// Hike name
        #[arg(long)]
        name: String,
        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
        /// Meeting point
        #[arg(long)]
        location: Option<String>,
        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,
    },

    /// Show a hike
    Show {
        /// Hike id
        id: i64,
    },

    /// Show the most recently created open hike
    Current,

    /// Change a hike's details; omitted fields are kept
    Update {
        /// Hike id
        id: i64,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// New location
        #[arg(long)]
        location: Option<String>,
        /// New notes
        #[arg(long)]
        notes: Option<String>,
    },

    /// Close a hike
    Close {
        /// Hike id
        id: i64,
    },

    /// Start accepting RSVPs
    OpenRsvps {
        /// Hike id
        id: i64,
    },

    /// Stop accepting RSVPs
    CloseRsvps {
        /// Hike id
        id: i64,
    },
}

/// Check-in subcommands
#[derive(Subcommand, Debug)]
pub enum CheckinCommands {
    /// Check members in by membership number
    Record {
        /// Hike id
        hike: i64,
        /// One or more membership numbers
        #[arg(required = true)]
        numbers: Vec<String>,
    },

    /// Remove a member's check-in
    Remove {
        /// Hike id
        hike: i64,
        /// Member id
        member: i64,
    },

    /// List check-ins, newest first
    List {
        /// Hike id
        hike: i64,
    },

    /// Set or clear a role flag
    Role {
        /// Check-in id
        id: i64,
        /// leader or sweeper
        role: String,
        /// Flag value
        #[arg(action = clap::ArgAction::Set, default_value = "true")]
        value: bool,
    },
}

/// RSVP subcommands
#[derive(Subcommand, Debug)]
pub enum RsvpCommands {
    /// Submit an RSVP by name, as the public form does
    Submit {
        /// Hike id
        hike: i64,
        /// Given name
        first: String,
        /// Surname
        last: String,
    },

    /// Show whether a hike accepts RSVPs
    Page {
        /// Hike id
        hike: i64,
    },

    /// List RSVPs by surname
    List {
        /// Hike id
        hike: i64,
    },

    /// Delete an RSVP
    Delete {
        /// RSVP id
        id: i64,
    },

    /// Check an RSVP in
    Checkin {
        /// RSVP id
        id: i64,
    },

    /// Undo an RSVP check-in
    Undo {
        /// RSVP id
        id: i64,
    },
}

/// A check-in or RSVP, given as exactly one flag
#[derive(Args, Debug)]
pub struct AttendanceArgs {
    /// Check-in id
    #[arg(long)]
    pub checkin: Option<i64>,
    /// RSVP id
    #[arg(long)]
    pub rsvp: Option<i64>,
}

/// Activity subcommands
#[derive(Subcommand, Debug)]
pub enum ActivityCommands {
    /// Create an activity
    Create {
        /// Hike id
        hike: i64,
        /// Activity name
        name: String,
    },

    /// List a hike's activities by name
    List {
        /// Hike id
        hike: i64,
    },

    /// Show an activity
    Show {
        /// Activity id
        id: i64,
    },

    /// Delete an activity and its participant list
    Delete {
        /// Activity id
        id: i64,
    },

    /// Add a check-in or RSVP to an activity
    Join {
        /// Activity id
        id: i64,
        #[command(flatten)]
        attendance: AttendanceArgs,
    },

    /// Remove a check-in or RSVP from an activity
    Leave {
        /// Activity id
        id: i64,
        #[command(flatten)]
        attendance: AttendanceArgs,
    },

    /// List participants by name
    Participants {
        /// Activity id
        id: i64,
    },

    /// Activities a check-in or RSVP has joined
    For {
        #[command(flatten)]
        attendance: AttendanceArgs,
    },
}

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Hikes a member attended
    Member {
        /// Membership number
        number: String,
    },

    /// A hike with its checked-in members
    Hike {
        /// Hike id
        id: i64,
    },

    /// Full attendance sheet of a hike, guests included
    Attendance {
        /// Hike id
        id: i64,
    },

    /// Every check-in of a calendar year
    Year {
        /// Year, e.g. 2026
        year: i32,
    },
}

/// Database subcommands
#[derive(Subcommand, Debug)]
pub enum DbCommands {
    /// Apply pending migrations
    Migrate,

    /// Drop every table and recreate the schema
    Reset {
        /// Required; the reset deletes all data
        #[arg(long)]
        yes: bool,
    },
}

/// Output format options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable format
    Human,
    /// JSON format
    Json,
}
