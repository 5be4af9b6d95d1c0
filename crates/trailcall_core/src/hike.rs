//! Outings and their lifecycle flags.

use crate::HikeId;
use crate::member::{require, set_if_present};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use trailcall_error::AttendanceError;

/// Check-in status of a hike.
///
/// A hike is created `Open` and can only move to `Closed`; there is no way
/// back. RSVP registration is tracked separately by [`Hike::rsvp_open`].
///
/// # Examples
///
/// ```
/// use trailcall_core::HikeStatus;
/// use std::str::FromStr;
///
/// assert_eq!(HikeStatus::from_str("closed").unwrap(), HikeStatus::Closed);
/// assert_eq!(HikeStatus::Open.as_ref(), "open");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum HikeStatus {
    /// Accepting check-ins
    #[default]
    Open,
    /// Finished
    Closed,
}

/// A scheduled outing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hike {
    /// Database key
    pub id: HikeId,
    /// Display name
    pub name: String,
    /// Day of the outing
    pub date: NaiveDate,
    /// Trailhead or meeting point
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Free-form notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Check-in status
    pub status: HikeStatus,
    /// Whether public RSVPs are accepted
    pub rsvp_open: bool,
    /// When the hike was created
    pub created_at: DateTime<Utc>,
    /// Number of check-in rows (computed)
    pub attendee_count: u32,
    /// Number of RSVP rows (computed)
    pub rsvp_count: u32,
}

impl Hike {
    /// True while check-ins are accepted.
    pub fn is_open(&self) -> bool {
        self.status == HikeStatus::Open
    }

    /// True while public RSVPs are accepted.
    pub fn is_rsvp_open(&self) -> bool {
        self.rsvp_open
    }
}

/// Request to schedule a hike.
///
/// # Examples
///
/// ```
/// use trailcall_core::NewHike;
/// use chrono::NaiveDate;
///
/// let hike = NewHike::builder()
///     .name("Mount Tam Loop")
///     .date(NaiveDate::from_ymd_opt(2026, 5, 2).unwrap())
///     .location("Pantoll")
///     .build()
///     .unwrap();
/// assert!(hike.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_builder::Builder)]
#[builder(setter(into))]
pub struct NewHike {
    /// Display name
    pub name: String,
    /// Day of the outing
    pub date: NaiveDate,
    /// Trailhead or meeting point
    #[builder(default, setter(into, strip_option))]
    #[serde(default)]
    pub location: Option<String>,
    /// Free-form notes
    #[builder(default, setter(into, strip_option))]
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewHike {
    /// Creates a new hike builder.
    pub fn builder() -> NewHikeBuilder {
        NewHikeBuilder::default()
    }

    /// Rejects a blank name.
    ///
    /// # Errors
    ///
    /// Returns a Validation error for a blank name.
    pub fn validate(&self) -> Result<(), AttendanceError> {
        require("name", &self.name)
    }
}

/// Partial update of a hike; `None` fields are left unchanged.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, derive_setters::Setters,
)]
#[setters(prefix = "with_", strip_option, into)]
pub struct HikeUpdate {
    /// New name
    #[serde(default)]
    pub name: Option<String>,
    /// New date
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// New location
    #[serde(default)]
    pub location: Option<String>,
    /// New notes
    #[serde(default)]
    pub notes: Option<String>,
}

impl HikeUpdate {
    /// Applies the provided fields to `hike`.
    pub fn apply_to(&self, hike: &mut Hike) {
        set_if_present(&mut hike.name, &self.name);
        if let Some(date) = self.date {
            hike.date = date;
        }
        if let Some(location) = self.location.as_ref().filter(|v| !v.trim().is_empty()) {
            hike.location = Some(location.clone());
        }
        if let Some(notes) = self.notes.as_ref().filter(|v| !v.trim().is_empty()) {
            hike.notes = Some(notes.clone());
        }
    }
}
