// SPDX-FileCopyrightText: 2026 CookUS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Public user profile endpoints.

use cookus_client::ApiClient;
use cookus_core::CookusError;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct DisplayedBadge {
    pub badge_id: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct UsersApi {
    client: ApiClient,
}

impl UsersApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// The badge another user has chosen to display, if any.
    pub async fn displayed_badge(&self, user_id: &str) -> Result<DisplayedBadge, CookusError> {
        self.client
            .get_json(&format!("/users/{user_id}/displayed-badge"))
            .await
    }
}
