//! Error types for the TrailCall attendance tracker.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! [`AttendanceError`] is the one callers branch on: `NotFound` and
//! `Conflict` are business outcomes, not faults.
//!
//! # Examples
//!
//! ```
//! use trailcall_error::{AttendanceError, Entity, TrailcallResult};
//!
//! fn lookup(number: &str) -> TrailcallResult<String> {
//!     Err(AttendanceError::not_found(Entity::Member, number))?
//! }
//!
//! match lookup("TC-999") {
//!     Ok(name) => println!("Found {}", name),
//!     Err(e) if e.is_not_found() => println!("No such member"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod attendance;
mod auth;
mod config;
mod database;
mod error;
mod json;

pub use attendance::{AttendanceError, AttendanceErrorKind, Entity};
pub use auth::{AuthError, AuthErrorKind};
pub use config::ConfigError;
pub use database::{DatabaseError, DatabaseErrorKind};
pub use error::{TrailcallError, TrailcallErrorKind, TrailcallResult};
pub use json::JsonError;
