// SPDX-FileCopyrightText: 2026 CookUS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! REST + SSE implementation of [`NotificationTransport`].

use std::time::Duration;

use async_trait::async_trait;
use cookus_client::ApiClient;
use cookus_config::NotificationsConfig;
use cookus_core::{CookusError, Notification, NotificationStream, NotificationTransport};
use tracing::debug;

use crate::sse;

/// Talks to the CookUS notification endpoints.
///
/// REST calls go through the shared [`ApiClient`] and so get bearer
/// attachment and refresh-replay for free. The SSE subscription cannot: it
/// is long-lived and authenticates via an `access_token` query parameter,
/// so it uses a dedicated client with a connect timeout but no overall
/// request deadline.
pub struct HttpNotificationTransport {
    api: ApiClient,
    stream_http: reqwest::Client,
}

impl HttpNotificationTransport {
    pub fn new(api: ApiClient, config: &NotificationsConfig) -> Result<Self, CookusError> {
        let stream_http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.stream_connect_timeout_secs))
            .build()
            .map_err(|e| CookusError::Transport {
                message: format!("failed to build stream HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(Self { api, stream_http })
    }
}

#[async_trait]
impl NotificationTransport for HttpNotificationTransport {
    async fn fetch_all(&self) -> Result<Vec<Notification>, CookusError> {
        let value: serde_json::Value = self.api.get_json("/me/notifications").await?;
        // Some deployments answer an object on empty lists; treat anything
        // that is not an array as no notifications.
        if !value.is_array() {
            debug!("notification snapshot was not an array, treating as empty");
            return Ok(Vec::new());
        }
        serde_json::from_value(value).map_err(|e| CookusError::Decode {
            message: format!("failed to decode notification snapshot: {e}"),
            source: Some(Box::new(e)),
        })
    }

    async fn mark_read(&self, notification_id: i64) -> Result<(), CookusError> {
        self.api
            .post_empty(&format!("/me/notifications/{notification_id}/read"))
            .await
    }

    async fn subscribe(&self) -> Result<NotificationStream, CookusError> {
        let token = self
            .api
            .session()
            .token()
            .ok_or_else(|| CookusError::Stream {
                message: "cannot subscribe without an access token".to_string(),
                source: None,
            })?;

        let url = self.api.absolute_url("/me/notifications/stream");
        let response = self
            .stream_http
            .get(&url)
            .query(&[("access_token", token.as_str())])
            .send()
            .await
            .map_err(|e| CookusError::Stream {
                message: format!("failed to open notification stream: {e}"),
                source: Some(Box::new(e)),
            })?;

        if !response.status().is_success() {
            return Err(CookusError::Stream {
                message: format!(
                    "notification stream rejected with status {}",
                    response.status().as_u16()
                ),
                source: None,
            });
        }

        Ok(sse::notification_stream(response))
    }
}
