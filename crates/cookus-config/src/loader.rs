// SPDX-FileCopyrightText: 2026 CookUS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports the XDG hierarchy: `./cookus.toml` > `~/.config/cookus/cookus.toml`
//! > `/etc/cookus/cookus.toml`, with environment variable overrides via the
//! `COOKUS_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::CookusConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/cookus/cookus.toml` (system-wide)
/// 3. `~/.config/cookus/cookus.toml` (user XDG config)
/// 4. `./cookus.toml` (local directory)
/// 5. `COOKUS_*` environment variables
pub fn load_config() -> Result<CookusConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CookusConfig::default()))
        .merge(Toml::file("/etc/cookus/cookus.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("cookus/cookus.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("cookus.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from an inline TOML string only (no XDG lookup).
///
/// Useful for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<CookusConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CookusConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<CookusConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CookusConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider with explicit section mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` so underscore-containing
/// key names stay unambiguous: `COOKUS_API_BASE_URL` maps to `api.base_url`,
/// not `api.base.url`.
fn env_provider() -> Env {
    Env::prefixed("COOKUS_").map(|key| {
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("api_", "api.", 1)
            .replacen("notifications_", "notifications.", 1);
        mapped.into()
    })
}
