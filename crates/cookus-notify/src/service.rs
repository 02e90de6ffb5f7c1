// SPDX-FileCopyrightText: 2026 CookUS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Background notification service: fallback polling, push subscription
//! with reconnect backoff, and optimistic mark-read.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use cookus_core::{CookusError, NotificationTransport};
use futures::StreamExt;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::center::NotificationCenter;
use crate::optimistic;

const INITIAL_RECONNECT_BACKOFF: Duration = Duration::from_secs(1);

struct Running {
    cancel: CancellationToken,
    poll: JoinHandle<()>,
    stream: JoinHandle<()>,
}

/// Drives a [`NotificationCenter`] from a [`NotificationTransport`].
///
/// [`start`](Self::start) spawns two background tasks: a snapshot poller
/// (which also covers push gaps as a fallback) and a push subscription that
/// reconnects with doubling backoff. [`stop`](Self::stop) tears both down
/// and resets the center, as on logout.
pub struct NotificationService {
    center: Arc<NotificationCenter>,
    transport: Arc<dyn NotificationTransport>,
    poll_interval: Duration,
    max_backoff: Duration,
    running: Mutex<Option<Running>>,
}

impl NotificationService {
    pub fn new(
        transport: Arc<dyn NotificationTransport>,
        config: &cookus_config::NotificationsConfig,
    ) -> Self {
        Self {
            center: Arc::new(NotificationCenter::new()),
            transport,
            poll_interval: Duration::from_secs(config.poll_interval_secs),
            max_backoff: Duration::from_secs(config.reconnect_max_backoff_secs),
            running: Mutex::new(None),
        }
    }

    /// The center this service feeds. Shared with UI readers.
    pub fn center(&self) -> Arc<NotificationCenter> {
        Arc::clone(&self.center)
    }

    /// Starts the poll and stream tasks. A second call while already
    /// running is a no-op.
    pub fn start(&self) {
        let mut running = self.lock_running();
        if running.is_some() {
            return;
        }

        let cancel = CancellationToken::new();
        let poll = tokio::spawn(poll_loop(
            Arc::clone(&self.center),
            Arc::clone(&self.transport),
            self.poll_interval,
            cancel.clone(),
        ));
        let stream = tokio::spawn(stream_loop(
            Arc::clone(&self.center),
            Arc::clone(&self.transport),
            self.max_backoff,
            cancel.clone(),
        ));

        *running = Some(Running {
            cancel,
            poll,
            stream,
        });
    }

    /// Stops the background tasks and clears all notification state.
    pub async fn stop(&self) {
        let running = self.lock_running().take();
        if let Some(running) = running {
            running.cancel.cancel();
            let _ = running.poll.await;
            let _ = running.stream.await;
        }
        self.center.reset();
    }

    /// Marks a notification read, optimistically.
    ///
    /// The local flag flips before the server call; on failure it is
    /// reverted and the error returned. Already-read notifications are a
    /// no-op with no server call.
    pub async fn mark_read(&self, notification_id: i64) -> Result<(), CookusError> {
        if self.center.is_read(notification_id) == Some(true) {
            return Ok(());
        }
        optimistic::confirm_or_revert(
            || {
                self.center.set_read_flag(notification_id, true);
            },
            || {
                self.center.set_read_flag(notification_id, false);
            },
            self.transport.mark_read(notification_id),
        )
        .await
        .inspect_err(|err| warn!(notification_id, error = %err, "mark-read failed, reverting"))
    }

    fn lock_running(&self) -> std::sync::MutexGuard<'_, Option<Running>> {
        self.running.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Fetches a snapshot immediately, then on every interval tick.
async fn poll_loop(
    center: Arc<NotificationCenter>,
    transport: Arc<dyn NotificationTransport>,
    poll_interval: Duration,
    cancel: CancellationToken,
) {
    let mut ticker = tokio::time::interval(poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    loop {
        tokio::select! {
            _ = cancel.cancelled() => return,
            _ = ticker.tick() => {}
        }
        match transport.fetch_all().await {
            Ok(snapshot) => center.ingest_snapshot(snapshot),
            Err(err) => debug!(error = %err, "notification poll failed"),
        }
    }
}

/// Keeps a push subscription open, reconnecting with doubling backoff.
///
/// The backoff resets to one second once a subscription delivers anything,
/// so a flaky link does not get stuck at the cap.
async fn stream_loop(
    center: Arc<NotificationCenter>,
    transport: Arc<dyn NotificationTransport>,
    max_backoff: Duration,
    cancel: CancellationToken,
) {
    let mut backoff = INITIAL_RECONNECT_BACKOFF;
    loop {
        match transport.subscribe().await {
            Ok(mut stream) => loop {
                let next = tokio::select! {
                    _ = cancel.cancelled() => return,
                    next = stream.next() => next,
                };
                match next {
                    Some(Ok(notification)) => {
                        backoff = INITIAL_RECONNECT_BACKOFF;
                        center.ingest_pushed(notification);
                    }
                    Some(Err(err)) => {
                        debug!(error = %err, "notification stream errored");
                        break;
                    }
                    None => {
                        debug!("notification stream ended");
                        break;
                    }
                }
            },
            Err(err) => debug!(error = %err, "notification subscribe failed"),
        }

        tokio::select! {
            _ = cancel.cancelled() => return,
            _ = tokio::time::sleep(backoff) => {}
        }
        backoff = (backoff * 2).min(max_backoff);
    }
}
