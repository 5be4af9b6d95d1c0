//! Shared fixtures for attendance tests.

#![allow(dead_code)]

use chrono::NaiveDate;
use std::sync::Arc;
use trailcall_attendance::{
    AttendanceReports, HikeLifecycle, InMemoryAttendanceStore, MemberRoster,
    ParticipationReconciler,
};
use trailcall_core::{Hike, Member, NewHike, NewMember};

/// All services wired over one in-memory store.
pub struct Club {
    pub store: Arc<InMemoryAttendanceStore>,
    pub lifecycle: HikeLifecycle,
    pub roster: MemberRoster,
    pub reconciler: ParticipationReconciler,
    pub reports: AttendanceReports,
}

impl Club {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryAttendanceStore::new());
        Self {
            lifecycle: HikeLifecycle::new(store.clone()),
            roster: MemberRoster::new(store.clone()),
            reconciler: ParticipationReconciler::new(store.clone()),
            reports: AttendanceReports::new(store.clone()),
            store,
        }
    }

    pub async fn member(&self, number: &str, first: &str, last: &str) -> Member {
        let new_member = NewMember::builder()
            .membership_number(number)
            .first_name(first)
            .last_name(last)
            .build()
            .expect("valid member");
        self.roster.create(&new_member).await.expect("member created")
    }

    pub async fn hike_on(&self, name: &str, date: NaiveDate) -> Hike {
        let new_hike = NewHike::builder()
            .name(name)
            .date(date)
            .build()
            .expect("valid hike");
        self.lifecycle
            .create_hike(&new_hike)
            .await
            .expect("hike created")
    }

    pub async fn hike(&self, name: &str) -> Hike {
        self.hike_on(name, date(2026, 5, 2)).await
    }
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}
