//! Wishlist item model.

use serde::{Deserialize, Serialize};

/// Priority for a wishlist item.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WishPriority {
    Low,
    Medium,
    High,
}

impl WishPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            WishPriority::Low => "low",
            WishPriority::Medium => "medium",
            WishPriority::High => "high",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "low" => Some(WishPriority::Low),
            "medium" => Some(WishPriority::Medium),
            "high" => Some(WishPriority::High),
            _ => None,
        }
    }
}

/// Lifecycle status for a wishlist item.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WishStatus {
    Idea,
    Planned,
    Booked,
    Done,
}

impl WishStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WishStatus::Idea => "idea",
            WishStatus::Planned => "planned",
            WishStatus::Booked => "booked",
            WishStatus::Done => "done",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "idea" => Some(WishStatus::Idea),
            "planned" => Some(WishStatus::Planned),
            "booked" => Some(WishStatus::Booked),
            "done" => Some(WishStatus::Done),
            _ => None,
        }
    }
}

/// A place or activity the family wants to get to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItem {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub priority: WishPriority,
    pub status: WishStatus,
    pub votes: i64,
    pub created_at: String,
    pub updated_at: String,
    /// Internal version for optimistic concurrency control
    #[serde(default)]
    pub version: i64,
}

/// Request body for creating a wishlist item.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWishlistItemRequest {
    pub title: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default = "default_priority")]
    pub priority: WishPriority,
    #[serde(default = "default_status")]
    pub status: WishStatus,
}

fn default_priority() -> WishPriority {
    WishPriority::Medium
}

fn default_status() -> WishStatus {
    WishStatus::Idea
}

/// Request body for updating a wishlist item.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWishlistItemRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub priority: Option<WishPriority>,
    #[serde(default)]
    pub status: Option<WishStatus>,
    /// Expected version for optimistic concurrency control
    #[serde(default)]
    pub expected_version: Option<i64>,
}
