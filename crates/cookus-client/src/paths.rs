// SPDX-FileCopyrightText: 2026 CookUS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Auth-free path allow-list.
//!
//! These endpoints authenticate via the http-only refresh cookie and must
//! never receive a bearer header, even when a token is stored.

/// Endpoints that are called without a bearer token (cookie-based).
const AUTH_FREE_PREFIXES: [&str; 6] = [
    "/auth/refresh",
    "/auth/login",
    "/auth/signup",
    "/auth/find-id",
    "/auth/find-password",
    "/auth/verify",
];

/// Returns true when `path` must be sent unauthenticated.
///
/// Matching is case-insensitive and by prefix. Some routing proxies hand the
/// client paths that already carry the API prefix, so both `/auth/login` and
/// `<prefix>/auth/login` match.
pub(crate) fn is_auth_free(path: &str, api_prefix: &str) -> bool {
    let path = path.to_lowercase();
    let api_prefix = api_prefix.to_lowercase();
    AUTH_FREE_PREFIXES.iter().any(|p| {
        path.starts_with(p) || (!api_prefix.is_empty() && path.starts_with(&format!("{api_prefix}{p}")))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_bare_and_prefixed_paths() {
        assert!(is_auth_free("/auth/login", "/api"));
        assert!(is_auth_free("/api/auth/login", "/api"));
        assert!(is_auth_free("/auth/refresh", "/api"));
        assert!(is_auth_free("/api/auth/refresh", "/api"));
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert!(is_auth_free("/Auth/Login", "/api"));
        assert!(is_auth_free("/API/AUTH/VERIFY", "/api"));
    }

    #[test]
    fn matches_by_prefix() {
        assert!(is_auth_free("/auth/verify/email-code", "/api"));
        assert!(is_auth_free("/auth/find-password?step=2", "/api"));
    }

    #[test]
    fn regular_endpoints_are_not_auth_free() {
        assert!(!is_auth_free("/me/notifications", "/api"));
        assert!(!is_auth_free("/events/3/posts", "/api"));
        // Close but not on the list.
        assert!(!is_auth_free("/auth/profile", "/api"));
    }
}
