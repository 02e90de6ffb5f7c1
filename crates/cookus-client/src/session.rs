// SPDX-FileCopyrightText: 2026 CookUS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory session token store.
//!
//! The access token is session-scoped state: a [`SessionStore`] is created
//! at login and dropped at logout, never held as a process-wide global, so
//! concurrent sessions (and tests) cannot leak tokens into each other.

use std::sync::{Arc, PoisonError, RwLock};

/// Holds the bearer token for one login session.
///
/// Cheap to clone; all clones share the same token cell. The token lives in
/// process memory only and is never persisted.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    token: Arc<RwLock<Option<String>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a new access token, replacing any previous one.
    pub fn set_token(&self, token: impl Into<String>) {
        let mut guard = self.token.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(token.into());
    }

    /// Clears the stored token (logout, or terminal refresh failure).
    pub fn clear_token(&self) {
        let mut guard = self.token.write().unwrap_or_else(PoisonError::into_inner);
        *guard = None;
    }

    /// Returns a copy of the current token, if any.
    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}
