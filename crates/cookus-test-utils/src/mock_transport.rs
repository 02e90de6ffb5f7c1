// SPDX-FileCopyrightText: 2026 CookUS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock notification transport for deterministic testing.
//!
//! `MockNotificationTransport` implements `NotificationTransport` with a
//! scripted snapshot, an injectable push stream, and captured mark-read
//! calls for assertion in tests.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use cookus_core::{CookusError, Notification, NotificationStream, NotificationTransport};
use futures::StreamExt;
use tokio::sync::mpsc;

type PushItem = Result<Notification, CookusError>;

#[derive(Default)]
struct MockState {
    snapshot: Vec<Notification>,
    fail_fetch: bool,
    fail_mark_read: bool,
    fetch_count: usize,
    subscribe_count: usize,
    mark_read_calls: Vec<i64>,
    push_tx: Option<mpsc::UnboundedSender<PushItem>>,
}

/// A mock notification backend.
///
/// `fetch_all` returns whatever [`set_snapshot`](Self::set_snapshot) last
/// installed; [`push`](Self::push) delivers a notification through the most
/// recent subscription. Every call is counted so tests can assert on poll
/// and reconnect behavior.
#[derive(Default)]
pub struct MockNotificationTransport {
    state: Mutex<MockState>,
}

impl MockNotificationTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs the snapshot returned by every subsequent `fetch_all`.
    pub fn set_snapshot(&self, snapshot: Vec<Notification>) {
        self.lock().snapshot = snapshot;
    }

    /// Makes subsequent `fetch_all` calls fail.
    pub fn fail_fetch(&self, fail: bool) {
        self.lock().fail_fetch = fail;
    }

    /// Makes subsequent `mark_read` calls fail. Failed calls are still
    /// recorded.
    pub fn fail_mark_read(&self, fail: bool) {
        self.lock().fail_mark_read = fail;
    }

    /// Delivers a notification through the current subscription. Dropped if
    /// nothing is subscribed.
    pub fn push(&self, notification: Notification) {
        if let Some(tx) = &self.lock().push_tx {
            let _ = tx.send(Ok(notification));
        }
    }

    /// Delivers a stream error, which ends the current subscription.
    pub fn fail_stream(&self, message: &str) {
        if let Some(tx) = &self.lock().push_tx {
            let _ = tx.send(Err(CookusError::Stream {
                message: message.to_string(),
                source: None,
            }));
        }
    }

    /// Ends the current subscription cleanly.
    pub fn end_stream(&self) {
        self.lock().push_tx = None;
    }

    pub fn fetch_count(&self) -> usize {
        self.lock().fetch_count
    }

    pub fn subscribe_count(&self) -> usize {
        self.lock().subscribe_count
    }

    /// Ids passed to `mark_read`, in call order, including failed calls.
    pub fn mark_read_calls(&self) -> Vec<i64> {
        self.lock().mark_read_calls.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl NotificationTransport for MockNotificationTransport {
    async fn fetch_all(&self) -> Result<Vec<Notification>, CookusError> {
        let mut state = self.lock();
        state.fetch_count += 1;
        if state.fail_fetch {
            return Err(CookusError::Transport {
                message: "mock fetch failure".to_string(),
                source: None,
            });
        }
        Ok(state.snapshot.clone())
    }

    async fn mark_read(&self, notification_id: i64) -> Result<(), CookusError> {
        let mut state = self.lock();
        state.mark_read_calls.push(notification_id);
        if state.fail_mark_read {
            return Err(CookusError::Http {
                status: 500,
                message: "mock mark-read failure".to_string(),
            });
        }
        Ok(())
    }

    async fn subscribe(&self) -> Result<NotificationStream, CookusError> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut state = self.lock();
        state.subscribe_count += 1;
        state.push_tx = Some(tx);
        let stream = futures::stream::unfold(rx, |mut rx| async move {
            rx.recv().await.map(|item| (item, rx))
        });
        Ok(stream.boxed())
    }
}
