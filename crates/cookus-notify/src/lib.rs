// SPDX-FileCopyrightText: 2026 CookUS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Notification subsystem for the CookUS client.
//!
//! [`NotificationCenter`] holds the merged notification list and the badge
//! popup queue; [`NotificationService`] feeds it from the backend over REST
//! polling plus an SSE push stream, via [`HttpNotificationTransport`].

pub mod center;
pub mod service;
pub mod transport;

mod optimistic;
mod sse;

pub use center::NotificationCenter;
pub use service::NotificationService;
pub use transport::HttpNotificationTransport;
