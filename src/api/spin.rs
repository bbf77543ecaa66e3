//! Spinning-wheel API endpoint.
//!
//! Uniform random pick among the six fixed adventure categories. The rotation
//! is in degrees; the wheel animation lands inside the chosen sector.

use axum::extract::State;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{success, ApiResult};
use crate::AppState;

/// The six wheel sectors, clockwise from the top.
pub const WHEEL_CATEGORIES: [&str; 6] = [
    "castle",
    "loch",
    "munro",
    "hidden-gem",
    "beach",
    "woodland",
];

const SECTOR_DEGREES: u32 = 360 / WHEEL_CATEGORIES.len() as u32;

/// Result of one wheel spin.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpinResult {
    pub category: String,
    pub sector_index: usize,
    /// Total degrees to animate: several full turns plus the sector offset.
    pub rotation: u32,
}

/// GET /api/spin - Spin the wheel.
pub async fn spin_wheel(State(state): State<AppState>) -> ApiResult<SpinResult> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    let (sector_index, rotation) = {
        let mut rng = rand::thread_rng();
        let idx = rng.gen_range(0..WHEEL_CATEGORIES.len());
        // Four full turns, then land somewhere comfortably inside the sector.
        let offset = rng.gen_range(5..SECTOR_DEGREES - 5);
        (idx, 4 * 360 + idx as u32 * SECTOR_DEGREES + offset)
    };

    success(
        SpinResult {
            category: WHEEL_CATEGORIES[sector_index].to_string(),
            sector_index,
            rotation,
        },
        revision_id,
    )
}
