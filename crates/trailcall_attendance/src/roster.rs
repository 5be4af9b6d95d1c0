//! Member roster administration.

use std::sync::Arc;
use tracing::{info, instrument};
use trailcall_core::{Member, MemberId, MemberUpdate, NewMember};
use trailcall_error::{AttendanceError, Entity, TrailcallResult};
use trailcall_interface::AttendanceStore;

/// Registers, edits and deactivates members.
///
/// Members are never deleted; [`MemberRoster::deactivate`] hides them from
/// name matching while keeping their check-ins.
#[derive(Clone)]
pub struct MemberRoster {
    store: Arc<dyn AttendanceStore>,
}

impl MemberRoster {
    /// Create a roster over `store`.
    pub fn new(store: Arc<dyn AttendanceStore>) -> Self {
        Self { store }
    }

    /// Register a member.
    ///
    /// # Errors
    ///
    /// Validation for blank required fields, Conflict for a membership number
    /// already in use.
    #[instrument(skip(self, new_member), fields(number = %new_member.membership_number))]
    pub async fn create(&self, new_member: &NewMember) -> TrailcallResult<Member> {
        new_member.validate()?;
        let member = self.store.create_member(new_member).await?;
        info!(member_id = %member.id, "Member registered");
        Ok(member)
    }

    /// Members by surname then given name.
    pub async fn list(&self, active_only: bool) -> TrailcallResult<Vec<Member>> {
        self.store.list_members(active_only).await
    }

    /// Load a member by id.
    pub async fn get(&self, member_id: MemberId) -> TrailcallResult<Member> {
        self.store.get_member(member_id).await
    }

    /// Load a member by membership number.
    ///
    /// # Errors
    ///
    /// NotFound when no member holds `number`.
    pub async fn get_by_number(&self, number: &str) -> TrailcallResult<Member> {
        self.store
            .find_member_by_number(number)
            .await?
            .ok_or_else(|| AttendanceError::not_found(Entity::Member, number).into())
    }

    /// Apply the provided fields; blank strings leave a field unchanged.
    #[instrument(skip(self, update))]
    pub async fn update(&self, member_id: MemberId, update: &MemberUpdate) -> TrailcallResult<Member> {
        self.store.update_member(member_id, update).await
    }

    /// Soft-delete a member.
    #[instrument(skip(self))]
    pub async fn deactivate(&self, member_id: MemberId) -> TrailcallResult<Member> {
        let member = self.store.deactivate_member(member_id).await?;
        info!("Member deactivated");
        Ok(member)
    }
}
