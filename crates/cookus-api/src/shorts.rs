// SPDX-FileCopyrightText: 2026 CookUS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Recipe-shorts deep links.
//!
//! The shorts endpoint is opened out-of-band (new tab / external player),
//! so this module only builds URLs and performs no HTTP.

/// Builds the URL that opens the shorts player for a recipe title.
pub fn build_shorts_open_url(base_url: &str, title: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let mut query = String::new();
    for ch in title.chars() {
        match ch {
            'A'..='Z' | 'a'..='z' | '0'..='9' | '-' | '_' | '.' | '~' => query.push(ch),
            _ => {
                let mut buf = [0u8; 4];
                for byte in ch.encode_utf8(&mut buf).bytes() {
                    query.push_str(&format!("%{byte:02X}"));
                }
            }
        }
    }
    format!("{base}/shorts/open?title={query}")
}
