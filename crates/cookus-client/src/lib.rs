// SPDX-FileCopyrightText: 2026 CookUS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Authenticated HTTP client for the CookUS backend.
//!
//! Every REST call in the SDK goes through [`ApiClient`]: it attaches the
//! session bearer token (except on the auth-free allow-list), detects 401
//! responses, performs a single-flight token refresh shared by all
//! concurrent callers, and transparently replays failed requests once a new
//! token is available. Refresh failure is terminal: the session token is
//! cleared and callers see the original 401.

pub mod auth;
pub mod client;
pub mod session;

mod paths;
mod refresh;

pub use auth::AuthApi;
pub use client::ApiClient;
pub use session::SessionStore;
