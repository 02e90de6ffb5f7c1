// SPDX-FileCopyrightText: 2026 CookUS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SSE parsing for the notification push stream.
//!
//! Converts a reqwest response byte stream into [`Notification`] values
//! using the `eventsource-stream` crate for SSE protocol compliance.

use cookus_core::{CookusError, Notification, NotificationStream};
use eventsource_stream::Eventsource;
use futures::StreamExt;
use tracing::debug;

/// Parses a streaming response into notifications.
///
/// Events whose payload does not decode as a notification are skipped with a
/// debug log rather than tearing down the stream; the backend interleaves
/// keep-alive comments and may ship event shapes this client predates.
/// Protocol-level errors terminate the stream with [`CookusError::Stream`].
pub(crate) fn notification_stream(response: reqwest::Response) -> NotificationStream {
    response
        .bytes_stream()
        .eventsource()
        .filter_map(|result| async move {
            match result {
                Ok(event) => {
                    if event.data.trim().is_empty() {
                        return None;
                    }
                    match serde_json::from_str::<Notification>(&event.data) {
                        Ok(notification) => Some(Ok(notification)),
                        Err(e) => {
                            debug!(error = %e, "skipping undecodable stream event");
                            None
                        }
                    }
                }
                Err(e) => Some(Err(CookusError::Stream {
                    message: format!("notification stream failed: {e}"),
                    source: Some(Box::new(e)),
                })),
            }
        })
        .boxed()
}
