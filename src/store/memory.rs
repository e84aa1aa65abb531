// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use serde_json::Value;

use super::{Snapshot, SnapshotEvent, SnapshotStore, Subscription, validate_key, validate_path};
use crate::errors::StoreError;
use crate::models::NewTransaction;
use crate::utils::KeyGenerator;

#[derive(Debug, Default)]
struct Inner {
    records: BTreeMap<String, Value>,
    subscribers: Vec<(Sender<SnapshotEvent>, Arc<AtomicBool>)>,
    keys: KeyGenerator,
    offline: bool,
}

impl Inner {
    fn snapshot(&self) -> Option<Snapshot> {
        if self.records.is_empty() {
            return None;
        }
        Some(Snapshot::new(
            self.records
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        ))
    }

    fn broadcast(&mut self) {
        let snapshot = self.snapshot();
        self.subscribers.retain(|(tx, cancelled)| {
            !cancelled.load(Ordering::SeqCst) && tx.send(Ok(snapshot.clone())).is_ok()
        });
    }
}

/// In-process store. Clones share the same records, the way several clients
/// share one hosted database.
///
/// Subscriber channels are unbounded: a subscription that is never drained
/// holds one full snapshot per write. Fine for tests and short-lived
/// sessions, not for a long-running process with idle subscribers.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    path: String,
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    pub fn new(path: &str) -> Result<Self, StoreError> {
        validate_path(path)?;
        Ok(Self {
            path: path.to_string(),
            inner: Arc::new(Mutex::new(Inner::default())),
        })
    }

    /// While offline every write and delete fails; subscriptions stay open.
    pub fn set_offline(&self, offline: bool) {
        self.lock().offline = offline;
    }

    /// Put a raw payload under `key`, bypassing validation. Useful for seeding
    /// data written by other clients.
    pub fn insert_raw(&self, key: &str, payload: Value) -> Result<(), StoreError> {
        validate_key(key)?;
        let mut inner = self.lock();
        inner.records.insert(key.to_string(), payload);
        inner.broadcast();
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.lock().records.len()
    }

    /// Subscriptions that have not been cancelled or dropped.
    pub fn subscriber_count(&self) -> usize {
        self.lock()
            .subscribers
            .iter()
            .filter(|(_, cancelled)| !cancelled.load(Ordering::SeqCst))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().records.is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // a panic while holding the lock leaves the map intact
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SnapshotStore for MemoryStore {
    fn path(&self) -> &str {
        &self.path
    }

    fn subscribe(&self) -> Result<Subscription, StoreError> {
        let (tx, rx) = mpsc::channel();
        let cancelled = Arc::new(AtomicBool::new(false));
        let mut inner = self.lock();
        tx.send(Ok(inner.snapshot())).map_err(StoreError::read)?;
        inner.subscribers.push((tx, cancelled.clone()));
        Ok(Subscription::new(rx, cancelled))
    }

    fn create(&self, record: &NewTransaction) -> Result<String, StoreError> {
        let mut inner = self.lock();
        if inner.offline {
            return Err(StoreError::write("store is offline"));
        }
        let key = inner.keys.next_key(Utc::now());
        inner.records.insert(key.clone(), record.to_payload());
        inner.broadcast();
        Ok(key)
    }

    fn delete_one(&self, key: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        let mut inner = self.lock();
        if inner.offline {
            return Err(StoreError::delete(
                format!("{}/{}", self.path, key),
                "store is offline",
            ));
        }
        inner.records.remove(key);
        inner.broadcast();
        Ok(())
    }

    fn delete_all(&self) -> Result<(), StoreError> {
        let mut inner = self.lock();
        if inner.offline {
            return Err(StoreError::delete(self.path.clone(), "store is offline"));
        }
        inner.records.clear();
        inner.broadcast();
        Ok(())
    }
}
