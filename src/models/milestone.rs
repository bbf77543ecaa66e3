//! Milestone progress wire model.
//!
//! The achievement catalog itself is fixed in code; see the milestones module.

use serde::{Deserialize, Serialize};

/// User-facing status of a milestone.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneStatus {
    Locked,
    Available,
    InProgress,
    Completed,
}

/// Progress against one achievement template.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneProgress {
    pub id: String,
    pub title: String,
    pub description: String,
    pub target_value: i64,
    pub xp_reward: i64,
    pub current_value: f64,
    pub completed: bool,
    pub progress_percentage: f64,
    pub status: MilestoneStatus,
}
