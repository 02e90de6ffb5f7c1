// SPDX-FileCopyrightText: 2026 CookUS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory notification state: the merged list, the badge-seen set, and
//! the serialized badge popup queue.
//!
//! The center is a pure state machine; all I/O lives in
//! [`crate::service::NotificationService`].

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Mutex, PoisonError};

use cookus_core::{Notification, newest_first};

#[derive(Debug, Default)]
struct CenterState {
    list: Vec<Notification>,
    badge_seen: HashSet<i64>,
    badge_queue: VecDeque<Notification>,
    active_badge: Option<Notification>,
    initial_snapshot_done: bool,
}

/// Holds the user's notification list and badge popup queue.
///
/// Snapshots and pushed notifications are merged last-writer-wins by id and
/// kept sorted newest-first. Badge awards surface as popups at most once per
/// id, strictly one at a time.
#[derive(Debug, Default)]
pub struct NotificationCenter {
    state: Mutex<CenterState>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges a full snapshot into the list.
    ///
    /// The first snapshot after construction (or [`reset`](Self::reset))
    /// seeds the badge-seen set silently, so badges the user already earned
    /// before this session do not replay as popups. Every later snapshot
    /// queues a popup for each not-yet-seen badge.
    pub fn ingest_snapshot(&self, notifications: Vec<Notification>) {
        let mut state = self.lock();
        let initial = !state.initial_snapshot_done;
        state.initial_snapshot_done = true;

        state.list = merge(std::mem::take(&mut state.list), notifications);

        let candidates: Vec<Notification> = state
            .list
            .iter()
            .filter(|n| n.is_badge() && !state.badge_seen.contains(&n.notification_id))
            .cloned()
            .collect();
        for candidate in candidates {
            state.badge_seen.insert(candidate.notification_id);
            if !initial {
                state.badge_queue.push_back(candidate);
            }
        }
    }

    /// Merges a single pushed notification into the list.
    pub fn ingest_pushed(&self, notification: Notification) {
        let mut state = self.lock();
        if notification.is_badge() && state.badge_seen.insert(notification.notification_id) {
            state.badge_queue.push_back(notification.clone());
        }
        state.list = merge(std::mem::take(&mut state.list), vec![notification]);
    }

    /// The merged notification list, newest first.
    pub fn notifications(&self) -> Vec<Notification> {
        self.lock().list.clone()
    }

    pub fn unread_count(&self) -> usize {
        self.lock().list.iter().filter(|n| !n.is_read).count()
    }

    /// The badge popup currently on screen, promoting the queue head into
    /// the slot if it is empty.
    ///
    /// Only [`dismiss_badge`](Self::dismiss_badge) vacates the slot, so
    /// popups never overlap or skip ahead.
    pub fn active_badge(&self) -> Option<Notification> {
        let mut state = self.lock();
        if state.active_badge.is_none() {
            state.active_badge = state.badge_queue.pop_front();
        }
        state.active_badge.clone()
    }

    /// Dismisses the on-screen badge popup; the next queued popup becomes
    /// eligible for promotion.
    pub fn dismiss_badge(&self) {
        self.lock().active_badge = None;
    }

    /// Whether the notification with this id is currently marked read.
    pub fn is_read(&self, notification_id: i64) -> Option<bool> {
        self.lock()
            .list
            .iter()
            .find(|n| n.notification_id == notification_id)
            .map(|n| n.is_read)
    }

    /// Flips the local read flag. Returns false when the id is unknown.
    pub fn set_read_flag(&self, notification_id: i64, is_read: bool) -> bool {
        let mut state = self.lock();
        match state
            .list
            .iter_mut()
            .find(|n| n.notification_id == notification_id)
        {
            Some(n) => {
                n.is_read = is_read;
                true
            }
            None => false,
        }
    }

    /// Clears all state, including the badge-seen set and the
    /// initial-snapshot marker. Used on logout.
    pub fn reset(&self) {
        *self.lock() = CenterState::default();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CenterState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Last-writer-wins merge by notification id, sorted newest first.
fn merge(existing: Vec<Notification>, incoming: Vec<Notification>) -> Vec<Notification> {
    let mut by_id: HashMap<i64, Notification> = HashMap::with_capacity(existing.len());
    for n in existing.into_iter().chain(incoming) {
        by_id.insert(n.notification_id, n);
    }
    let mut merged: Vec<Notification> = by_id.into_values().collect();
    merged.sort_by(newest_first);
    merged
}
