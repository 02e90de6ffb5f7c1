// SPDX-FileCopyrightText: 2026 CookUS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed wrappers for the CookUS domain REST endpoints.
//!
//! Thin data-fetch layers over [`cookus_client::ApiClient`]; every call
//! inherits bearer attachment and refresh-and-replay from the client. The
//! response shapes matter to UI callers, not to the auth core.

pub mod badges;
pub mod cooktest;
pub mod fridge;
pub mod nutrition;
pub mod shorts;
pub mod stats;
pub mod users;

use serde::de::DeserializeOwned;

use cookus_core::CookusError;

/// Accepts either a bare JSON array or a `{ "items": [...] }` envelope.
///
/// Several list endpoints have shipped both shapes; anything else is
/// treated as an empty list.
pub(crate) fn items_or_empty<T: DeserializeOwned>(
    value: serde_json::Value,
) -> Result<Vec<T>, CookusError> {
    let array = match value {
        serde_json::Value::Array(_) => value,
        serde_json::Value::Object(mut map) => match map.remove("items") {
            Some(items @ serde_json::Value::Array(_)) => items,
            _ => return Ok(Vec::new()),
        },
        _ => return Ok(Vec::new()),
    };
    serde_json::from_value(array).map_err(|e| CookusError::Decode {
        message: format!("failed to decode list payload: {e}"),
        source: Some(Box::new(e)),
    })
}
