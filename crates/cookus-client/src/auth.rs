// SPDX-FileCopyrightText: 2026 CookUS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Credential-based auth endpoints.
//!
//! All of these paths are on the auth-free allow-list: they authenticate via
//! credentials or the http-only cookie, never via a bearer header.

use cookus_core::CookusError;
use serde::Serialize;
use tracing::debug;

use crate::client::{ApiClient, TokenResponse};

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    user_id: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct SignupRequest<'a> {
    user_id: &'a str,
    user_name: &'a str,
    password: &'a str,
}

/// Login, signup, and logout operations feeding the session store.
#[derive(Debug, Clone)]
pub struct AuthApi {
    client: ApiClient,
}

impl AuthApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Logs in and stores the returned access token into the session.
    pub async fn login(&self, user_id: &str, password: &str) -> Result<(), CookusError> {
        let response: TokenResponse = self
            .client
            .post_json("/auth/login", &LoginRequest { user_id, password })
            .await?;
        let token = response.into_token().ok_or_else(|| CookusError::Decode {
            message: "login response carried no access token".to_string(),
            source: None,
        })?;
        self.client.session().set_token(token);
        Ok(())
    }

    pub async fn signup(
        &self,
        user_id: &str,
        user_name: &str,
        password: &str,
    ) -> Result<(), CookusError> {
        self.client
            .post_unit(
                "/auth/signup",
                &SignupRequest {
                    user_id,
                    user_name,
                    password,
                },
            )
            .await
    }

    /// Ends the session.
    ///
    /// The server call is best-effort; the local token is cleared no matter
    /// what the server answers.
    pub async fn logout(&self) {
        if let Err(err) = self.client.post_empty("/auth/logout").await {
            debug!(error = %err, "logout call failed, clearing session anyway");
        }
        self.client.session().clear_token();
    }
}
