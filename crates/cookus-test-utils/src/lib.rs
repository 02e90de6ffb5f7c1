// SPDX-FileCopyrightText: 2026 CookUS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for CookUS client tests.
//!
//! Provides a mock notification transport and notification builders for
//! fast, deterministic tests without a backend.

pub mod builders;
pub mod mock_transport;

pub use builders::notification;
pub use mock_transport::MockNotificationTransport;
