// SPDX-FileCopyrightText: 2026 CookUS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Transport traits implemented by the HTTP layer and mocked in tests.

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::error::CookusError;
use crate::types::Notification;

/// A stream of pushed notifications, ending when the transport disconnects.
pub type NotificationStream = BoxStream<'static, Result<Notification, CookusError>>;

/// Backend access used by the notification center.
///
/// The real implementation talks REST + SSE; tests substitute a scripted
/// mock so the center's merge, badge-queue, and lifecycle behavior can be
/// exercised without a network transport.
#[async_trait]
pub trait NotificationTransport: Send + Sync {
    /// Fetches the full notification snapshot for the current user.
    async fn fetch_all(&self) -> Result<Vec<Notification>, CookusError>;

    /// Marks one notification as read on the server.
    async fn mark_read(&self, notification_id: i64) -> Result<(), CookusError>;

    /// Opens a server-push subscription delivering notifications as they occur.
    ///
    /// The returned stream ends (or yields an error) on disconnect; the
    /// caller decides whether to resubscribe.
    async fn subscribe(&self) -> Result<NotificationStream, CookusError>;
}
