//! Points ledger.
//!
//! Completing a task earns points; reopening it takes them back. The
//! balance is an unsigned counter and saturates at zero.

use serde::{Deserialize, Serialize};

/// Points awarded per completed task unless configured otherwise.
pub const POINTS_PER_TASK: u32 = 10;

/// Change requested against the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "points", rename_all = "lowercase")]
pub enum PointsDelta {
    Earned(u32),
    Revoked(u32),
}

impl PointsDelta {
    /// Signed view of the requested change.
    pub fn signed(&self) -> i64 {
        match *self {
            PointsDelta::Earned(n) => n as i64,
            PointsDelta::Revoked(n) => -(n as i64),
        }
    }
}

/// Running points balance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsLedger {
    points: u32,
}

impl PointsLedger {
    pub fn new(points: u32) -> Self {
        Self { points }
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    /// Apply `delta` and return the new balance.
    pub fn apply(&mut self, delta: PointsDelta) -> u32 {
        self.points = match delta {
            PointsDelta::Earned(n) => self.points.saturating_add(n),
            PointsDelta::Revoked(n) => self.points.saturating_sub(n),
        };
        self.points
    }

    /// Delta for a completion flag moving to `completed`.
    pub fn delta_for(completed: bool, per_task: u32) -> PointsDelta {
        if completed {
            PointsDelta::Earned(per_task)
        } else {
            PointsDelta::Revoked(per_task)
        }
    }
}
