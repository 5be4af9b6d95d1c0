//! Typed row identifiers.
//!
//! Every entity is keyed by a database-assigned `i64`. Wrapping each in its own
//! newtype keeps a check-in id from being passed where an RSVP id is expected,
//! which matters most for the polymorphic participant links.

use serde::{Deserialize, Serialize};

macro_rules! row_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            Serialize,
            Deserialize,
            derive_more::Display,
            derive_more::From,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// The raw database key.
            pub fn get(self) -> i64 {
                self.0
            }
        }
    };
}

row_id!(
    /// Identifies a [`Member`](crate::Member).
    MemberId
);
row_id!(
    /// Identifies a [`Hike`](crate::Hike).
    HikeId
);
row_id!(
    /// Identifies a [`Checkin`](crate::Checkin).
    CheckinId
);
row_id!(
    /// Identifies an [`Rsvp`](crate::Rsvp).
    RsvpId
);
row_id!(
    /// Identifies an [`Activity`](crate::Activity).
    ActivityId
);
row_id!(
    /// Identifies an [`ActivityParticipant`](crate::ActivityParticipant) row.
    ParticipantId
);
