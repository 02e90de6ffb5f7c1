// SPDX-FileCopyrightText: 2026 CookUS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the CookUS client SDK.

use thiserror::Error;

/// The primary error type used across the CookUS client crates.
#[derive(Debug, Error)]
pub enum CookusError {
    /// Configuration errors (invalid base URL, bad header values, missing fields).
    #[error("configuration error: {0}")]
    Config(String),

    /// The backend answered with a non-success HTTP status.
    ///
    /// `message` carries the (truncated) response body for diagnostics.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Transport-level failures (connection refused, TLS, timeouts).
    #[error("transport error: {message}")]
    Transport {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A response body could not be deserialized into the expected shape.
    #[error("decode error: {message}")]
    Decode {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Errors on the server-push notification stream.
    #[error("stream error: {message}")]
    Stream {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl CookusError {
    /// Returns the HTTP status code when this error carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            CookusError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for the `401 Unauthorized` case the caller must treat as logged out.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}
