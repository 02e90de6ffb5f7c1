// SPDX-FileCopyrightText: 2026 CookUS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration error type.

use thiserror::Error;

/// An error produced while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Figment failed to merge or extract the configuration.
    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    /// A semantic constraint was violated after deserialization.
    #[error("invalid configuration: {message}")]
    Validation { message: String },
}

/// Render a list of config errors into one human-readable block.
pub fn render_errors(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(|e| format!("  - {e}"))
        .collect::<Vec<_>>()
        .join("\n")
}
