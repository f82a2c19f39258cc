//! Jobs: employment records attached to citizens

use serde::{Deserialize, Serialize};

use crate::core::types::LandmarkId;

/// Kind of job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobKind {
    PoliceOfficer,
    Farmer,
    Merchant,
    Builder,
    Clerk,
}

impl JobKind {
    /// Salary in resource units per pay period (recorded, not yet paid out)
    pub fn salary(&self) -> u32 {
        match self {
            JobKind::PoliceOfficer => 12,
            JobKind::Farmer => 8,
            JobKind::Merchant => 10,
            JobKind::Builder => 9,
            JobKind::Clerk => 7,
        }
    }

    /// Work schedule as (start hour, end hour) on the 24-hour clock
    pub fn schedule(&self) -> (u8, u8) {
        match self {
            // Officers keep longer hours; patrols run outside the sweep too
            JobKind::PoliceOfficer => (8, 20),
            _ => (9, 17),
        }
    }
}

/// A citizen's employment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub kind: JobKind,
    pub salary: u32,
    pub start_hour: u8,
    pub end_hour: u8,
    pub workplace: LandmarkId,
    /// 0-100, nudged while actually working
    pub performance: f32,
}

impl Job {
    pub fn new(kind: JobKind, workplace: LandmarkId) -> Self {
        let (start_hour, end_hour) = kind.schedule();
        Self {
            kind,
            salary: kind.salary(),
            start_hour,
            end_hour,
            workplace,
            performance: 50.0,
        }
    }

    /// Whether the given hour falls inside the shift
    pub fn on_shift(&self, hour: u8) -> bool {
        hour >= self.start_hour && hour < self.end_hour
    }
}
