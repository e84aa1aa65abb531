// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;
use std::time::Duration;

use chrono::Utc;
use rusqlite::{Connection, params};
use serde_json::Value;

use super::{Snapshot, SnapshotEvent, SnapshotStore, Subscription, validate_key, validate_path};
use crate::db;
use crate::errors::StoreError;
use crate::models::NewTransaction;
use crate::utils::KeyGenerator;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

static NEXT_INSTANCE: AtomicU32 = AtomicU32::new(0);

/// Store backed by a SQLite file. Any number of processes may open the same
/// file; each subscription notices commits made through other connections.
#[derive(Debug)]
pub struct SqliteStore {
    db_path: PathBuf,
    path: String,
    conn: Mutex<Connection>,
    keys: Mutex<KeyGenerator>,
    poll_interval: Duration,
}

impl SqliteStore {
    pub fn open(db_path: impl AsRef<Path>, path: &str) -> Result<Self, StoreError> {
        validate_path(path)?;
        let db_path = db_path.as_ref().to_path_buf();
        let conn = db::open_at(&db_path).map_err(StoreError::read)?;
        let instance = NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed) & 0xffff;
        let suffix = format!("{:08x}{:04x}", std::process::id(), instance);
        Ok(Self {
            db_path,
            path: path.to_string(),
            conn: Mutex::new(conn),
            keys: Mutex::new(KeyGenerator::with_suffix(suffix)),
            poll_interval: DEFAULT_POLL_INTERVAL,
        })
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SnapshotStore for SqliteStore {
    fn path(&self) -> &str {
        &self.path
    }

    fn subscribe(&self) -> Result<Subscription, StoreError> {
        let (tx, rx) = mpsc::channel();
        let cancelled = Arc::new(AtomicBool::new(false));
        let watcher = Watcher {
            db_path: self.db_path.clone(),
            path: self.path.clone(),
            interval: self.poll_interval,
            events: tx,
            cancelled: cancelled.clone(),
        };
        let worker = thread::Builder::new()
            .name(format!("moneyjar-watch-{}", self.path))
            .spawn(move || watcher.run())
            .map_err(StoreError::read)?;
        Ok(Subscription::new(rx, cancelled).with_worker(worker))
    }

    fn create(&self, record: &NewTransaction) -> Result<String, StoreError> {
        let key = self
            .keys
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .next_key(Utc::now());
        let payload = serde_json::to_string(&record.to_payload()).map_err(StoreError::write)?;
        self.conn()
            .execute(
                "INSERT INTO records(path, key, payload) VALUES (?1, ?2, ?3)",
                params![&self.path, &key, payload],
            )
            .map_err(StoreError::write)?;
        tracing::debug!(path = %self.path, %key, "record written");
        Ok(key)
    }

    fn delete_one(&self, key: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        self.conn()
            .execute(
                "DELETE FROM records WHERE path=?1 AND key=?2",
                params![&self.path, key],
            )
            .map_err(|err| StoreError::delete(format!("{}/{}", self.path, key), err))?;
        Ok(())
    }

    fn delete_all(&self) -> Result<(), StoreError> {
        let removed = self
            .conn()
            .execute("DELETE FROM records WHERE path=?1", params![&self.path])
            .map_err(|err| StoreError::delete(self.path.clone(), err))?;
        tracing::debug!(path = %self.path, removed, "path cleared");
        Ok(())
    }
}

struct Watcher {
    db_path: PathBuf,
    path: String,
    interval: Duration,
    events: Sender<SnapshotEvent>,
    cancelled: Arc<AtomicBool>,
}

impl Watcher {
    fn run(self) {
        let conn = match db::open_at(&self.db_path) {
            Ok(conn) => conn,
            Err(err) => {
                let _ = self.events.send(Err(StoreError::read(err)));
                return;
            }
        };

        let mut poll = Poll::default();
        while !self.cancelled.load(Ordering::SeqCst) {
            if let Some(event) = poll.step(&conn, &self.path) {
                if self.events.send(event).is_err() {
                    return;
                }
            }
            thread::sleep(self.interval);
        }
        tracing::debug!(path = %self.path, "subscription cancelled");
    }
}

/// Change detection for one watcher connection.
///
/// The version is only recorded after a successful read, so a failed read is
/// retried on the next tick even if nobody commits in between. Errors are
/// reported once per failing streak.
#[derive(Debug, Default)]
struct Poll {
    last_version: Option<i64>,
    failing: bool,
}

impl Poll {
    fn step(&mut self, conn: &Connection, path: &str) -> Option<SnapshotEvent> {
        let version = match data_version(conn) {
            Ok(v) => v,
            Err(err) => return self.fail(StoreError::read(err)),
        };
        if self.last_version == Some(version) {
            self.failing = false;
            return None;
        }
        match read_snapshot(conn, path) {
            Ok(snapshot) => {
                self.last_version = Some(version);
                self.failing = false;
                Some(Ok(snapshot))
            }
            Err(err) => self.fail(err),
        }
    }

    fn fail(&mut self, err: StoreError) -> Option<SnapshotEvent> {
        if self.failing {
            tracing::debug!("store still unreadable: {}", err);
            return None;
        }
        tracing::warn!("store read failed, retrying: {}", err);
        self.failing = true;
        Some(Err(err))
    }
}

fn data_version(conn: &Connection) -> rusqlite::Result<i64> {
    conn.query_row("PRAGMA data_version", [], |r| r.get(0))
}

fn read_snapshot(conn: &Connection, path: &str) -> SnapshotEvent {
    let mut stmt = conn
        .prepare_cached("SELECT key, payload FROM records WHERE path=?1 ORDER BY key")
        .map_err(StoreError::read)?;
    let rows = stmt
        .query_map(params![path], |r| {
            Ok((r.get::<_, String>(0)?, r.get::<_, String>(1)?))
        })
        .map_err(StoreError::read)?;

    let mut entries = Vec::new();
    for row in rows {
        let (key, raw) = row.map_err(StoreError::read)?;
        let payload = serde_json::from_str::<Value>(&raw).unwrap_or_else(|err| {
            tracing::warn!(%key, "stored payload is not valid JSON: {}", err);
            Value::Null
        });
        entries.push((key, payload));
    }
    if entries.is_empty() {
        Ok(None)
    } else {
        Ok(Some(Snapshot::new(entries)))
    }
}
