// SPDX-FileCopyrightText: 2026 CookUS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Badge gallery and displayed-title endpoints.

use cookus_client::ApiClient;
use cookus_core::{BadgeCategory, CookusError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct EarnedBadge {
    pub badge_id: i64,
    pub name: String,
    pub category: BadgeCategory,
    pub earned_at: String,
    pub is_active: bool,
    pub is_displayed: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BadgeProgress {
    pub current: i64,
    pub target: i64,
    pub remaining: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LockedBadge {
    pub badge_id: i64,
    pub name: String,
    pub category: BadgeCategory,
    #[serde(default)]
    pub progress: Option<BadgeProgress>,
}

/// Everything the badge gallery renders: earned and still-locked badges.
#[derive(Debug, Clone, Deserialize)]
pub struct BadgeOverview {
    pub earned: Vec<EarnedBadge>,
    pub locked: Vec<LockedBadge>,
}

#[derive(Debug, Serialize)]
struct SetDisplayRequest {
    badge_id: i64,
}

#[derive(Debug, Clone)]
pub struct BadgesApi {
    client: ApiClient,
}

impl BadgesApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn overview(&self) -> Result<BadgeOverview, CookusError> {
        self.client.get_json("/me/badges/overview").await
    }

    /// Sets (or with `None` clears) the badge shown next to the user's name.
    pub async fn set_display_badge(&self, badge_id: Option<i64>) -> Result<(), CookusError> {
        match badge_id {
            None => self.client.delete("/me/badges/title").await,
            Some(badge_id) => {
                self.client
                    .post_unit("/me/badges/title", &SetDisplayRequest { badge_id })
                    .await
            }
        }
    }
}
