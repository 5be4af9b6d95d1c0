//! Club members.

use crate::MemberId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use trailcall_error::AttendanceError;

/// A registered club member.
///
/// Members are never hard-deleted; clearing `active` removes them from the
/// roster used for name matching while keeping their attendance history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Database key
    pub id: MemberId,
    /// Business key, unique across the club
    pub membership_number: String,
    /// Given name
    pub first_name: String,
    /// Surname
    pub last_name: String,
    /// Contact email
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Contact phone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// False once the member has been deactivated
    pub active: bool,
    /// When the member was created
    pub created_at: DateTime<Utc>,
    /// When the member was last changed
    pub updated_at: DateTime<Utc>,
}

impl Member {
    /// "First Last", the form used in every display field.
    ///
    /// # Examples
    ///
    /// ```
    /// # use trailcall_core::{Member, MemberId};
    /// # use chrono::Utc;
    /// let member = Member {
    ///     id: MemberId(1),
    ///     membership_number: "TC-001".to_string(),
    ///     first_name: "Jane".to_string(),
    ///     last_name: "Smith".to_string(),
    ///     email: None,
    ///     phone: None,
    ///     active: true,
    ///     created_at: Utc::now(),
    ///     updated_at: Utc::now(),
    /// };
    /// assert_eq!(member.full_name(), "Jane Smith");
    /// ```
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Request to register a new member.
///
/// # Examples
///
/// ```
/// use trailcall_core::NewMember;
///
/// let new_member = NewMember::builder()
///     .membership_number("TC-001")
///     .first_name("Jane")
///     .last_name("Smith")
///     .build()
///     .unwrap();
///
/// assert!(new_member.validate().is_ok());
/// assert!(new_member.email.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_builder::Builder)]
#[builder(setter(into))]
pub struct NewMember {
    /// Business key
    pub membership_number: String,
    /// Given name
    pub first_name: String,
    /// Surname
    pub last_name: String,
    /// Contact email
    #[builder(default, setter(into, strip_option))]
    #[serde(default)]
    pub email: Option<String>,
    /// Contact phone
    #[builder(default, setter(into, strip_option))]
    #[serde(default)]
    pub phone: Option<String>,
}

impl NewMember {
    /// Creates a new member builder.
    pub fn builder() -> NewMemberBuilder {
        NewMemberBuilder::default()
    }

    /// Rejects blank required fields.
    ///
    /// # Errors
    ///
    /// Returns a Validation error naming the first blank field.
    pub fn validate(&self) -> Result<(), AttendanceError> {
        require("membership_number", &self.membership_number)?;
        require("first_name", &self.first_name)?;
        require("last_name", &self.last_name)
    }

    /// Membership number as stored and compared.
    pub fn membership_key(&self) -> &str {
        membership_key(&self.membership_number)
    }
}

/// Partial update of a member; `None` fields are left unchanged.
///
/// # Examples
///
/// ```
/// use trailcall_core::MemberUpdate;
///
/// let update = MemberUpdate::default().with_phone("555-0100").with_active(true);
/// assert_eq!(update.phone.as_deref(), Some("555-0100"));
/// assert!(update.first_name.is_none());
/// ```
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, derive_setters::Setters,
)]
#[setters(prefix = "with_", strip_option, into)]
pub struct MemberUpdate {
    /// New business key
    #[serde(default)]
    pub membership_number: Option<String>,
    /// New given name
    #[serde(default)]
    pub first_name: Option<String>,
    /// New surname
    #[serde(default)]
    pub last_name: Option<String>,
    /// New email
    #[serde(default)]
    pub email: Option<String>,
    /// New phone
    #[serde(default)]
    pub phone: Option<String>,
    /// Reactivate or deactivate
    #[serde(default)]
    pub active: Option<bool>,
}

impl MemberUpdate {
    /// Applies the provided fields to `member`, leaving the rest untouched.
    ///
    /// Blank strings count as "not provided".
    pub fn apply_to(&self, member: &mut Member) {
        if let Some(number) = self.membership_key() {
            member.membership_number = number.to_string();
        }
        set_if_present(&mut member.first_name, &self.first_name);
        set_if_present(&mut member.last_name, &self.last_name);
        if let Some(email) = self.email.as_ref().filter(|v| !v.trim().is_empty()) {
            member.email = Some(email.clone());
        }
        if let Some(phone) = self.phone.as_ref().filter(|v| !v.trim().is_empty()) {
            member.phone = Some(phone.clone());
        }
        if let Some(active) = self.active {
            member.active = active;
        }
    }

    /// The new membership number, trimmed, when one was provided.
    pub fn membership_key(&self) -> Option<&str> {
        self.membership_number
            .as_deref()
            .map(membership_key)
            .filter(|n| !n.is_empty())
    }
}

/// Canonical form of a membership number: surrounding whitespace removed.
///
/// Every store persists and looks up numbers in this form, so `"TC-001 "`
/// and `"TC-001"` name the same member.
///
/// ```
/// assert_eq!(trailcall_core::membership_key("  TC-001\t"), "TC-001");
/// ```
pub fn membership_key(number: &str) -> &str {
    number.trim()
}

pub(crate) fn require(field: &str, value: &str) -> Result<(), AttendanceError> {
    if value.trim().is_empty() {
        return Err(AttendanceError::validation(field, "is required"));
    }
    Ok(())
}

pub(crate) fn set_if_present(target: &mut String, value: &Option<String>) {
    if let Some(v) = value.as_ref().filter(|v| !v.trim().is_empty()) {
        target.clone_from(v);
    }
}
