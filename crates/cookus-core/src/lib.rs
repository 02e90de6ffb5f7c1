// SPDX-FileCopyrightText: 2026 CookUS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the CookUS client SDK.
//!
//! Provides the shared error type, wire types, and the transport trait the
//! notification center is built against. Leaf crates (`cookus-client`,
//! `cookus-notify`, `cookus-api`) depend on this crate only.

pub mod error;
pub mod traits;
pub mod types;

pub use error::CookusError;
pub use traits::{NotificationStream, NotificationTransport};
pub use types::{BadgeCategory, Notification, newest_first};
