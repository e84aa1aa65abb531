// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Snapshot stores.
//!
//! A store holds the records under one path and pushes the *entire* current
//! value to subscribers on every change. Consumers never patch state
//! incrementally; they rebuild from whichever snapshot arrived last.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::thread::JoinHandle;
use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::errors::StoreError;
use crate::models::NewTransaction;

/// Full value under a store path, in store iteration (ascending key) order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    entries: Vec<(String, Value)>,
}

impl Snapshot {
    pub fn new(entries: Vec<(String, Value)>) -> Self {
        Self { entries }
    }

    /// Build from a JSON value as a hosted store would deliver it.
    /// `null` means nothing is stored; anything that is not an object is treated the same.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self {
                entries: map.into_iter().collect(),
            }),
            _ => None,
        }
    }

    pub fn entries(&self) -> &[(String, Value)] {
        &self.entries
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub type SnapshotEvent = Result<Option<Snapshot>, StoreError>;

pub trait SnapshotStore {
    /// Path of the collection this store reads and writes.
    fn path(&self) -> &str;

    /// Open a subscription. The current value is delivered first, then one
    /// snapshot per change until the subscription is cancelled.
    fn subscribe(&self) -> Result<Subscription, StoreError>;

    /// Append a record under a freshly assigned key and return that key.
    fn create(&self, record: &NewTransaction) -> Result<String, StoreError>;

    fn delete_one(&self, key: &str) -> Result<(), StoreError>;

    fn delete_all(&self) -> Result<(), StoreError>;
}

/// Handle to a live stream of snapshots. Dropping it cancels the stream;
/// a background producer notices at its next tick.
#[derive(Debug)]
pub struct Subscription {
    events: Receiver<SnapshotEvent>,
    cancelled: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl Subscription {
    pub(crate) fn new(events: Receiver<SnapshotEvent>, cancelled: Arc<AtomicBool>) -> Self {
        Self {
            events,
            cancelled,
            worker: None,
        }
    }

    pub(crate) fn with_worker(mut self, worker: JoinHandle<()>) -> Self {
        self.worker = Some(worker);
        self
    }

    /// Block until the next snapshot. `None` once the producer has gone away.
    pub fn next_event(&self) -> Option<SnapshotEvent> {
        if self.is_cancelled() {
            return None;
        }
        self.events.recv().ok()
    }

    pub fn next_event_timeout(&self, timeout: Duration) -> Option<SnapshotEvent> {
        if self.is_cancelled() {
            return None;
        }
        match self.events.recv_timeout(timeout) {
            Ok(ev) => Some(ev),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    pub fn try_next(&self) -> Option<SnapshotEvent> {
        if self.is_cancelled() {
            return None;
        }
        self.events.try_recv().ok()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Cancel and wait for the producer thread, if any, to exit.
    pub fn close(mut self) {
        self.cancel();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                tracing::warn!("subscription worker panicked");
            }
        }
    }
}

impl Iterator for Subscription {
    type Item = SnapshotEvent;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_event()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

static PATH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+(/[A-Za-z0-9_-]+)*$").expect("static regex"));
static KEY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^.#$\[\]/]+$").expect("static regex"));

pub fn validate_path(path: &str) -> Result<(), StoreError> {
    if PATH_RE.is_match(path) {
        Ok(())
    } else {
        Err(StoreError::InvalidPath(path.to_string()))
    }
}

pub fn validate_key(key: &str) -> Result<(), StoreError> {
    if KEY_RE.is_match(key) {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}
