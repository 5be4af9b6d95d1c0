//! Trait definitions for the TrailCall attendance tracker.
//!
//! [`AttendanceStore`] is the durable entity set the attendance core works
//! against; [`SessionStore`] is the admin session capability kept outside it.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod session;
mod store;

pub use session::{Session, SessionStore};
pub use store::AttendanceStore;
