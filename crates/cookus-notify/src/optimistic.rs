// SPDX-FileCopyrightText: 2026 CookUS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Optimistic mutation helper.

use cookus_core::CookusError;

/// Applies a local mutation, then runs the confirming operation; when the
/// operation fails the inverse mutation undoes the local change and the
/// error is returned.
pub(crate) async fn confirm_or_revert<T, Fut>(
    apply: impl FnOnce(),
    revert: impl FnOnce(),
    confirm: Fut,
) -> Result<T, CookusError>
where
    Fut: Future<Output = Result<T, CookusError>>,
{
    apply();
    match confirm.await {
        Ok(value) => Ok(value),
        Err(err) => {
            revert();
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[tokio::test]
    async fn success_keeps_the_applied_state() {
        let flag = Cell::new(false);
        let result = confirm_or_revert(
            || flag.set(true),
            || flag.set(false),
            async { Ok::<_, CookusError>(()) },
        )
        .await;
        assert!(result.is_ok());
        assert!(flag.get());
    }

    #[tokio::test]
    async fn failure_reverts_and_surfaces_the_error() {
        let flag = Cell::new(false);
        let result: Result<(), _> = confirm_or_revert(
            || flag.set(true),
            || flag.set(false),
            async {
                Err(CookusError::Http {
                    status: 500,
                    message: "boom".to_string(),
                })
            },
        )
        .await;
        assert!(result.is_err());
        assert!(!flag.get());
    }
}
