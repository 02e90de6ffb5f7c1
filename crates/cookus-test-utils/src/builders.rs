// SPDX-FileCopyrightText: 2026 CookUS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Builders for test fixtures.

use chrono::{DateTime, Duration, Utc};
use cookus_core::Notification;

fn base_time() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2025-03-01T10:00:00Z")
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

/// An unread notification with a deterministic timestamp.
///
/// `offset_secs` shifts `created_at` forward from a fixed base so relative
/// ordering in tests is explicit.
pub fn notification(id: i64, kind: &str, offset_secs: i64) -> Notification {
    Notification {
        notification_id: id,
        user_id: "u-1".to_string(),
        kind: kind.to_string(),
        related_id: None,
        title: format!("notification {id}"),
        body: "test body".to_string(),
        link_url: None,
        created_at: base_time() + Duration::seconds(offset_secs),
        is_read: false,
    }
}
