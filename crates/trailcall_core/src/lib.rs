//! Core data types for the TrailCall attendance tracker.
//!
//! This crate holds the records every other crate passes around (members,
//! hikes, check-ins, RSVPs, activities and their report projections) together
//! with the roster [`NameMatcher`] used by public RSVP submission.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod activity;
mod checkin;
mod hike;
mod ids;
mod matching;
mod member;
mod report;
mod rsvp;
mod telemetry;

pub use activity::{Activity, ActivityParticipant, AttendanceRef};
pub use checkin::{Checkin, CheckinRole};
pub use hike::{Hike, HikeStatus, HikeUpdate, NewHike, NewHikeBuilder};
pub use ids::{ActivityId, CheckinId, HikeId, MemberId, ParticipantId, RsvpId};
pub use matching::{NameMatch, NameMatcher, similarity};
pub use member::{Member, MemberUpdate, NewMember, NewMemberBuilder, membership_key};
pub use report::{AttendanceRecord, Attendee, AttendeeSource, HikeDetail, MemberHistory};
pub use rsvp::{Rsvp, RsvpEntry, RsvpOutcome, RsvpTarget};
pub use telemetry::init_tracing;
