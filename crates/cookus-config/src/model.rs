// SPDX-FileCopyrightText: 2026 CookUS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the CookUS client SDK.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at load time.

use serde::{Deserialize, Serialize};

/// Top-level CookUS client configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CookusConfig {
    /// Backend endpoint settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Notification stream and poll settings.
    #[serde(default)]
    pub notifications: NotificationsConfig,
}

/// Backend endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    /// Origin of the CookUS backend (scheme + host + port).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path prefix every REST call is mounted under.
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            prefix: default_prefix(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_prefix() -> String {
    "/api".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

/// Notification subsystem configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct NotificationsConfig {
    /// Fallback snapshot poll cadence in seconds.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Connect timeout for the SSE subscription in seconds.
    #[serde(default = "default_stream_connect_timeout_secs")]
    pub stream_connect_timeout_secs: u64,

    /// Cap for the stream reconnect backoff in seconds.
    #[serde(default = "default_reconnect_max_backoff_secs")]
    pub reconnect_max_backoff_secs: u64,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
            stream_connect_timeout_secs: default_stream_connect_timeout_secs(),
            reconnect_max_backoff_secs: default_reconnect_max_backoff_secs(),
        }
    }
}

fn default_poll_interval_secs() -> u64 {
    30
}

fn default_stream_connect_timeout_secs() -> u64 {
    10
}

fn default_reconnect_max_backoff_secs() -> u64 {
    30
}
