//! Hike scheduling and the two lifecycle flags.
//!
//! A hike carries two independent switches: `status` (open → closed, one way
//! only) gates check-ins, and `rsvp_open` (toggled freely) gates public RSVP
//! submission. Neither transition looks at the other flag.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, instrument};
use trailcall_core::{Hike, HikeId, HikeStatus, HikeUpdate, NewHike};
use trailcall_error::TrailcallResult;
use trailcall_interface::AttendanceStore;

/// What the public RSVP page needs to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsvpPage {
    /// The hike being registered for
    pub hike: Hike,
    /// Whether the form accepts submissions
    pub rsvp_open: bool,
}

/// Creates hikes and drives their status and RSVP flags.
#[derive(Clone)]
pub struct HikeLifecycle {
    store: Arc<dyn AttendanceStore>,
}

impl HikeLifecycle {
    /// Create a lifecycle manager over `store`.
    pub fn new(store: Arc<dyn AttendanceStore>) -> Self {
        Self { store }
    }

    /// Schedule a hike. New hikes are open with RSVPs open.
    ///
    /// # Errors
    ///
    /// Returns a Validation error for a blank name.
    #[instrument(skip(self, new_hike), fields(name = %new_hike.name, date = %new_hike.date))]
    pub async fn create_hike(&self, new_hike: &NewHike) -> TrailcallResult<Hike> {
        new_hike.validate()?;
        let hike = self.store.create_hike(new_hike).await?;
        info!(hike_id = %hike.id, "Hike created");
        Ok(hike)
    }

    /// All hikes, newest first.
    pub async fn list_hikes(&self) -> TrailcallResult<Vec<Hike>> {
        self.store.list_hikes().await
    }

    /// Load one hike.
    pub async fn get_hike(&self, hike_id: HikeId) -> TrailcallResult<Hike> {
        self.store.get_hike(hike_id).await
    }

    /// The hike check-in stations should default to, if any is open.
    pub async fn current_open_hike(&self) -> TrailcallResult<Option<Hike>> {
        let hike = self.store.current_open_hike().await?;
        debug!(hike_id = ?hike.as_ref().map(|h| h.id), "Current open hike");
        Ok(hike)
    }

    /// Edit name, date, location or notes.
    #[instrument(skip(self, update))]
    pub async fn update_hike(&self, hike_id: HikeId, update: &HikeUpdate) -> TrailcallResult<Hike> {
        self.store.update_hike(hike_id, update).await
    }

    /// Close the hike for check-in. Closing a closed hike is a no-op.
    #[instrument(skip(self))]
    pub async fn close(&self, hike_id: HikeId) -> TrailcallResult<Hike> {
        let hike = self.store.set_hike_status(hike_id, HikeStatus::Closed).await?;
        info!("Hike closed");
        Ok(hike)
    }

    /// Start accepting public RSVPs.
    #[instrument(skip(self))]
    pub async fn open_rsvps(&self, hike_id: HikeId) -> TrailcallResult<Hike> {
        let hike = self.store.set_rsvp_open(hike_id, true).await?;
        info!("RSVPs opened");
        Ok(hike)
    }

    /// Stop accepting public RSVPs.
    #[instrument(skip(self))]
    pub async fn close_rsvps(&self, hike_id: HikeId) -> TrailcallResult<Hike> {
        let hike = self.store.set_rsvp_open(hike_id, false).await?;
        info!("RSVPs closed");
        Ok(hike)
    }

    /// Whether public RSVPs are accepted, regardless of check-in status.
    pub async fn is_rsvp_open(&self, hike_id: HikeId) -> TrailcallResult<bool> {
        Ok(self.store.get_hike(hike_id).await?.is_rsvp_open())
    }

    /// The hike and its RSVP flag, for the public registration page.
    pub async fn rsvp_page(&self, hike_id: HikeId) -> TrailcallResult<RsvpPage> {
        let hike = self.store.get_hike(hike_id).await?;
        Ok(RsvpPage {
            rsvp_open: hike.is_rsvp_open(),
            hike,
        })
    }
}
