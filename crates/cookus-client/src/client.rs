// SPDX-FileCopyrightText: 2026 CookUS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Authenticated HTTP client for the CookUS backend.
//!
//! Provides [`ApiClient`], which attaches the session bearer token to every
//! outbound request, recovers transparently from token expiry with a
//! single-flight refresh, and replays failed requests once a new token is
//! available.

use std::sync::Arc;
use std::time::Duration;

use cookus_config::CookusConfig;
use cookus_core::CookusError;
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::paths;
use crate::refresh::{RefreshGate, RefreshRole};
use crate::session::SessionStore;

/// Longest response-body excerpt carried inside an error.
const ERROR_BODY_LIMIT: usize = 300;

/// Cookie-authenticated refresh endpoint; also on the auth-free allow-list.
const REFRESH_PATH: &str = "/auth/refresh";

/// A replayable request descriptor.
///
/// Bodies are captured as JSON values rather than streams so the exact same
/// request can be resubmitted after a token refresh.
#[derive(Debug, Clone)]
struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Option<serde_json::Value>,
}

/// Token payload returned by the refresh and login endpoints.
///
/// The backend has shipped both spellings; accept either.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    #[serde(rename = "accessToken")]
    camel: Option<String>,
    #[serde(rename = "access_token")]
    snake: Option<String>,
}

impl TokenResponse {
    pub(crate) fn into_token(self) -> Option<String> {
        self.camel.or(self.snake).filter(|t| !t.trim().is_empty())
    }
}

/// HTTP client for all CookUS REST calls.
///
/// Cheap to clone; clones share the connection pool, cookie jar, session
/// store, and refresh gate.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    prefix: String,
    session: SessionStore,
    gate: Arc<RefreshGate>,
}

impl ApiClient {
    /// Builds a client from configuration.
    ///
    /// Cookies are enabled because the refresh endpoint authenticates via an
    /// http-only cookie.
    pub fn new(config: &CookusConfig, session: SessionStore) -> Result<Self, CookusError> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(config.api.request_timeout_secs))
            .build()
            .map_err(|e| CookusError::Transport {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            http,
            base_url: config.api.base_url.trim_end_matches('/').to_string(),
            prefix: config.api.prefix.clone(),
            session,
            gate: Arc::new(RefreshGate::new()),
        })
    }

    /// The session store this client attaches tokens from.
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Absolute URL for a path under the API prefix.
    ///
    /// Used by the SSE transport, which cannot go through the normal request
    /// pipeline.
    pub fn absolute_url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, self.prefix, path)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, CookusError> {
        self.get_json_with_query(path, &[]).await
    }

    pub async fn get_json_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, CookusError> {
        let request = ApiRequest {
            method: Method::GET,
            path: path.to_string(),
            query: query
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            body: None,
        };
        let response = self.execute(request).await?;
        Self::decode(path, response).await
    }

    pub async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, CookusError> {
        let response = self
            .execute(self.json_request(Method::POST, path, body)?)
            .await?;
        Self::decode(path, response).await
    }

    /// POST with a JSON body, ignoring the response body.
    pub async fn post_unit<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), CookusError> {
        self.execute(self.json_request(Method::POST, path, body)?)
            .await?;
        Ok(())
    }

    /// POST with no body, ignoring the response body.
    pub async fn post_empty(&self, path: &str) -> Result<(), CookusError> {
        let request = ApiRequest {
            method: Method::POST,
            path: path.to_string(),
            query: Vec::new(),
            body: None,
        };
        self.execute(request).await?;
        Ok(())
    }

    /// POST with no body, decoding a JSON response.
    pub async fn post_json_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, CookusError> {
        let request = ApiRequest {
            method: Method::POST,
            path: path.to_string(),
            query: Vec::new(),
            body: None,
        };
        let response = self.execute(request).await?;
        Self::decode(path, response).await
    }

    pub async fn put_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, CookusError> {
        let response = self
            .execute(self.json_request(Method::PUT, path, body)?)
            .await?;
        Self::decode(path, response).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), CookusError> {
        let request = ApiRequest {
            method: Method::DELETE,
            path: path.to_string(),
            query: Vec::new(),
            body: None,
        };
        self.execute(request).await?;
        Ok(())
    }

    pub async fn delete_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, CookusError> {
        let request = ApiRequest {
            method: Method::DELETE,
            path: path.to_string(),
            query: Vec::new(),
            body: None,
        };
        let response = self.execute(request).await?;
        Self::decode(path, response).await
    }

    fn json_request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<ApiRequest, CookusError> {
        let body = serde_json::to_value(body).map_err(|e| CookusError::Decode {
            message: format!("failed to serialize request body for {path}: {e}"),
            source: Some(Box::new(e)),
        })?;
        Ok(ApiRequest {
            method,
            path: path.to_string(),
            query: Vec::new(),
            body: Some(body),
        })
    }

    /// Sends a request through the interceptor pipeline.
    ///
    /// A 401 on a bearer-carrying path gets exactly one recovery attempt:
    /// the replayed dispatch below is final, so no request can ever trigger
    /// a second refresh, even if the replay comes back 401 again.
    async fn execute(&self, request: ApiRequest) -> Result<reqwest::Response, CookusError> {
        let response = self.dispatch(&request, self.session.token()).await?;
        if response.status() != StatusCode::UNAUTHORIZED
            || paths::is_auth_free(&request.path, &self.prefix)
        {
            return Self::into_success(response).await;
        }

        let original = Self::error_for_status(response).await;
        debug!(path = %request.path, "request rejected with 401, attempting refresh");

        match self.gate.begin() {
            RefreshRole::Leader => match self.refresh_access_token().await {
                Ok(token) => {
                    self.session.set_token(token.clone());
                    self.gate.finish(Some(token.clone()));
                    debug!(path = %request.path, "token refreshed, replaying request");
                    let replayed = self.dispatch(&request, Some(token)).await?;
                    Self::into_success(replayed).await
                }
                Err(err) => {
                    // Terminal for this session: clear the token and release
                    // every queued request with the original failure.
                    self.session.clear_token();
                    self.gate.finish(None);
                    warn!(error = %err, "token refresh failed, session cleared");
                    Err(original)
                }
            },
            RefreshRole::Follower(outcome) => match outcome.await {
                Ok(Some(token)) => {
                    let replayed = self.dispatch(&request, Some(token)).await?;
                    Self::into_success(replayed).await
                }
                // Refresh failed, or the leader was dropped mid-flight.
                _ => Err(original),
            },
        }
    }

    /// Performs one network dispatch, attaching the given bearer token
    /// unless the path is on the auth-free allow-list.
    async fn dispatch(
        &self,
        request: &ApiRequest,
        token: Option<String>,
    ) -> Result<reqwest::Response, CookusError> {
        let url = self.absolute_url(&request.path);
        let mut builder = self.http.request(request.method.clone(), &url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        if let Some(token) = token
            && !paths::is_auth_free(&request.path, &self.prefix)
        {
            builder = builder.bearer_auth(token);
        }
        builder.send().await.map_err(|e| CookusError::Transport {
            message: format!("request to {} failed: {e}", request.path),
            source: Some(Box::new(e)),
        })
    }

    /// Calls the refresh endpoint: cookie-authenticated, no body, no bearer.
    async fn refresh_access_token(&self) -> Result<String, CookusError> {
        let url = self.absolute_url(REFRESH_PATH);
        let response = self
            .http
            .post(&url)
            .send()
            .await
            .map_err(|e| CookusError::Transport {
                message: format!("refresh request failed: {e}"),
                source: Some(Box::new(e)),
            })?;
        let response = Self::into_success(response).await?;
        let parsed: TokenResponse = response.json().await.map_err(|e| CookusError::Decode {
            message: format!("failed to decode refresh response: {e}"),
            source: Some(Box::new(e)),
        })?;
        parsed.into_token().ok_or_else(|| CookusError::Decode {
            message: "refresh response carried no access token".to_string(),
            source: None,
        })
    }

    async fn into_success(response: reqwest::Response) -> Result<reqwest::Response, CookusError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(Self::error_for_status(response).await)
        }
    }

    async fn error_for_status(response: reqwest::Response) -> CookusError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        CookusError::Http {
            status,
            message: truncate_body(&body, ERROR_BODY_LIMIT),
        }
    }

    async fn decode<T: DeserializeOwned>(
        path: &str,
        response: reqwest::Response,
    ) -> Result<T, CookusError> {
        response.json().await.map_err(|e| CookusError::Decode {
            message: format!("failed to decode response from {path}: {e}"),
            source: Some(Box::new(e)),
        })
    }
}

fn truncate_body(body: &str, max: usize) -> String {
    if body.len() <= max {
        return body.to_string();
    }
    let mut end = max;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str, token: Option<&str>) -> ApiClient {
        let config = cookus_config::load_config_from_str(&format!(
            "[api]\nbase_url = \"{base_url}\"\n"
        ))
        .unwrap();
        let session = SessionStore::new();
        if let Some(token) = token {
            session.set_token(token);
        }
        ApiClient::new(&config, session).unwrap()
    }

    #[tokio::test]
    async fn attaches_bearer_to_regular_requests() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/me/ingredients"))
            .and(header("authorization", "Bearer tok-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri(), Some("tok-1"));
        let result: Vec<serde_json::Value> = client.get_json("/me/ingredients").await.unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn auth_free_paths_never_carry_a_bearer() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/auth/verify"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri(), Some("tok-1"));
        client.post_empty("/auth/verify").await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].headers.get("authorization").is_none());
    }

    #[tokio::test]
    async fn missing_token_sends_unauthenticated() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/events"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let client = test_client(&server.uri(), None);
        let _: Vec<serde_json::Value> = client.get_json("/events").await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert!(requests[0].headers.get("authorization").is_none());
    }

    #[tokio::test]
    async fn non_401_errors_pass_through_without_refresh() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/me/stats/progress"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/api/auth/refresh"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = test_client(&server.uri(), Some("tok-1"));
        let err = client
            .get_json::<serde_json::Value>("/me/stats/progress")
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(500));
    }

    #[tokio::test]
    async fn concurrent_401s_trigger_exactly_one_refresh() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/me/notifications"))
            .and(header("authorization", "Bearer stale"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        // Delay lets all three callers fail with the stale token before the
        // refresh resolves, so two of them genuinely queue as followers.
        Mock::given(method("POST"))
            .and(path("/api/auth/refresh"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"accessToken": "fresh"}))
                    .set_delay(Duration::from_millis(100)),
            )
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/me/notifications"))
            .and(header("authorization", "Bearer fresh"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(3)
            .mount(&server)
            .await;

        let client = test_client(&server.uri(), Some("stale"));
        let (a, b, c) = tokio::join!(
            client.get_json::<Vec<serde_json::Value>>("/me/notifications"),
            client.get_json::<Vec<serde_json::Value>>("/me/notifications"),
            client.get_json::<Vec<serde_json::Value>>("/me/notifications"),
        );

        assert!(a.is_ok() && b.is_ok() && c.is_ok());
        assert_eq!(client.session().token().as_deref(), Some("fresh"));
    }

    #[tokio::test]
    async fn replay_preserves_the_original_body() {
        let server = MockServer::start().await;
        let body = serde_json::json!({"name": "carrot"});

        Mock::given(method("POST"))
            .and(path("/api/ingredients"))
            .and(header("authorization", "Bearer stale"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/api/auth/refresh"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"access_token": "fresh"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/api/ingredients"))
            .and(header("authorization", "Bearer fresh"))
            .and(body_json(&body))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri(), Some("stale"));
        client.post_unit("/ingredients", &body).await.unwrap();
    }

    #[tokio::test]
    async fn second_401_after_replay_is_not_retried_again() {
        let server = MockServer::start().await;

        // The endpoint rejects every token; only one refresh may happen.
        Mock::given(method("GET"))
            .and(path("/api/me/badges/overview"))
            .respond_with(ResponseTemplate::new(401).set_body_string("expired"))
            .expect(2)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/api/auth/refresh"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"accessToken": "fresh"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri(), Some("stale"));
        let err = client
            .get_json::<serde_json::Value>("/me/badges/overview")
            .await
            .unwrap_err();
        assert!(err.is_unauthorized());
    }

    #[tokio::test]
    async fn refresh_failure_clears_session_and_rejects_all_callers() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/me/notifications"))
            .respond_with(ResponseTemplate::new(401).set_body_string("expired"))
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/api/auth/refresh"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_string("no cookie")
                    .set_delay(Duration::from_millis(100)),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri(), Some("stale"));
        let (a, b, c) = tokio::join!(
            client.get_json::<serde_json::Value>("/me/notifications"),
            client.get_json::<serde_json::Value>("/me/notifications"),
            client.get_json::<serde_json::Value>("/me/notifications"),
        );

        for result in [a, b, c] {
            assert!(result.unwrap_err().is_unauthorized());
        }
        assert_eq!(client.session().token(), None);
        assert!(!client.session().is_authenticated());
    }

    #[tokio::test]
    async fn refresh_accepts_snake_case_token_field() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/me/notifications"))
            .and(header("authorization", "Bearer stale"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/api/auth/refresh"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"access_token": "fresh-snake"})),
            )
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/me/notifications"))
            .and(header("authorization", "Bearer fresh-snake"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let client = test_client(&server.uri(), Some("stale"));
        let result: Vec<serde_json::Value> = client.get_json("/me/notifications").await.unwrap();
        assert!(result.is_empty());
        assert_eq!(client.session().token().as_deref(), Some("fresh-snake"));
    }

    #[tokio::test]
    async fn empty_refresh_token_is_a_failure() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/me/notifications"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/api/auth/refresh"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let client = test_client(&server.uri(), Some("stale"));
        let err = client
            .get_json::<serde_json::Value>("/me/notifications")
            .await
            .unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(client.session().token(), None);
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let body = "한글한글한글";
        let truncated = truncate_body(body, 4);
        assert!(truncated.ends_with("..."));
        assert!(truncated.len() <= 7);
        assert_eq!(truncate_body("short", 300), "short");
    }
}
