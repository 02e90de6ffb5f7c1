// SPDX-FileCopyrightText: 2026 CookUS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Single-flight coordination for token refresh.
//!
//! At most one refresh call may be outstanding at any time. The first
//! request to hit a 401 becomes the leader and performs the refresh; every
//! request that fails while the refresh is in flight parks a oneshot waiter
//! and is released with the shared outcome when the leader finishes.

use std::sync::{Mutex, PoisonError};

use tokio::sync::oneshot;

/// `Some(token)` when the refresh produced a new access token, `None` when
/// it failed and the session was torn down.
pub(crate) type RefreshOutcome = Option<String>;

/// Role assigned to a 401-failed request entering the gate.
pub(crate) enum RefreshRole {
    /// Gate was idle; this request must perform the refresh and then call
    /// [`RefreshGate::finish`].
    Leader,
    /// A refresh is already in flight; await the receiver for its outcome.
    Follower(oneshot::Receiver<RefreshOutcome>),
}

#[derive(Debug, Default)]
pub(crate) struct RefreshGate {
    inner: Mutex<GateInner>,
}

#[derive(Debug, Default)]
struct GateInner {
    in_flight: bool,
    waiters: Vec<oneshot::Sender<RefreshOutcome>>,
}

impl RefreshGate {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Atomically claims the refresh or enqueues a waiter.
    ///
    /// The check-and-set happens entirely under the lock, which is never
    /// held across an await, so exactly one caller can observe the idle
    /// state no matter how requests interleave.
    pub(crate) fn begin(&self) -> RefreshRole {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        if inner.in_flight {
            let (tx, rx) = oneshot::channel();
            inner.waiters.push(tx);
            RefreshRole::Follower(rx)
        } else {
            inner.in_flight = true;
            RefreshRole::Leader
        }
    }

    /// Ends the in-flight refresh and releases every waiter with the shared
    /// outcome, in enqueue (FIFO) order.
    pub(crate) fn finish(&self, outcome: RefreshOutcome) {
        let waiters = {
            let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
            inner.in_flight = false;
            std::mem::take(&mut inner.waiters)
        };
        for waiter in waiters {
            // A dropped receiver means the caller gave up; nothing to do.
            let _ = waiter.send(outcome.clone());
        }
    }
}
