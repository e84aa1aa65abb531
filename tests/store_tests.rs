// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use moneyjar::categories::Category;
use moneyjar::errors::StoreError;
use moneyjar::models::{NewTransaction, TransactionType};
use moneyjar::store::{MemoryStore, Snapshot, SnapshotStore, SqliteStore};
use serde_json::json;
use tempfile::tempdir;

const WAIT: Duration = Duration::from_secs(5);

fn record(description: &str, amount: &str) -> NewTransaction {
    NewTransaction {
        id: format!("client-{}", description),
        description: description.to_string(),
        amount: amount.parse().unwrap(),
        category: Category::Food,
        kind: TransactionType::Expense,
        date: Utc.with_ymd_and_hms(2025, 4, 2, 9, 15, 0).unwrap(),
    }
}

fn expect_snapshot(event: Option<Result<Option<Snapshot>, StoreError>>) -> Option<Snapshot> {
    event.expect("no event").expect("store error")
}

#[test]
fn payload_matches_stored_shape() {
    let payload = record("Noodles", "60.00").to_payload();
    assert_eq!(
        payload,
        json!({
            "id": "client-Noodles",
            "description": "Noodles",
            "amount": "60.00",
            "category": "food",
            "type": "expense",
            "date": "2025-04-02T09:15:00.000Z"
        })
    );
}

#[test]
fn memory_subscription_gets_current_value_then_changes() {
    let store = MemoryStore::new("transactions").unwrap();
    let sub = store.subscribe().unwrap();
    assert_eq!(expect_snapshot(sub.try_next()), None);

    let k1 = store.create(&record("Noodles", "60")).unwrap();
    let k2 = store.create(&record("Bus", "15")).unwrap();
    assert!(k1 < k2, "keys must follow creation order");

    let first = expect_snapshot(sub.try_next()).unwrap();
    assert_eq!(first.len(), 1);
    let second = expect_snapshot(sub.try_next()).unwrap();
    assert_eq!(second.keys().collect::<Vec<_>>(), vec![k1.as_str(), k2.as_str()]);

    store.delete_one(&k1).unwrap();
    let third = expect_snapshot(sub.try_next()).unwrap();
    assert_eq!(third.keys().collect::<Vec<_>>(), vec![k2.as_str()]);

    store.delete_all().unwrap();
    assert_eq!(expect_snapshot(sub.try_next()), None);
    assert!(store.is_empty());
}

#[test]
fn memory_clones_share_records() {
    let store = MemoryStore::new("transactions").unwrap();
    let other_client = store.clone();
    let sub = store.subscribe().unwrap();
    let _ = sub.try_next();

    other_client.create(&record("Rice", "40")).unwrap();
    let snap = expect_snapshot(sub.try_next()).unwrap();
    assert_eq!(snap.len(), 1);
    assert_eq!(store.len(), 1);
}

#[test]
fn cancelled_subscription_stops_receiving() {
    let store = MemoryStore::new("transactions").unwrap();
    let sub = store.subscribe().unwrap();
    sub.cancel();
    assert!(sub.is_cancelled());
    store.create(&record("Tea", "25")).unwrap();
    assert!(sub.try_next().is_none());
}

#[test]
fn dropped_subscription_is_detached() {
    let store = MemoryStore::new("transactions").unwrap();
    let sub = store.subscribe().unwrap();
    let kept = store.subscribe().unwrap();
    assert_eq!(store.subscriber_count(), 2);

    drop(sub);
    assert_eq!(store.subscriber_count(), 1);
    store.create(&record("Tea", "25")).unwrap();
    assert_eq!(expect_snapshot(kept.try_next()), None);
    assert_eq!(expect_snapshot(kept.try_next()).unwrap().len(), 1);
}

#[test]
fn offline_memory_store_rejects_writes() {
    let store = MemoryStore::new("transactions").unwrap();
    store.set_offline(true);
    assert!(matches!(
        store.create(&record("Tea", "25")),
        Err(StoreError::Write(_))
    ));
    assert!(matches!(
        store.delete_all(),
        Err(StoreError::Delete { .. })
    ));
    store.set_offline(false);
    assert!(store.create(&record("Tea", "25")).is_ok());
}

#[test]
fn paths_and_keys_are_checked() {
    assert!(matches!(
        MemoryStore::new("bad.path"),
        Err(StoreError::InvalidPath(_))
    ));
    assert!(MemoryStore::new("users/alice/transactions").is_ok());

    let store = MemoryStore::new("transactions").unwrap();
    assert!(matches!(
        store.delete_one("a/b"),
        Err(StoreError::InvalidKey(_))
    ));
    assert!(matches!(store.delete_one(""), Err(StoreError::InvalidKey(_))));
    assert!(matches!(
        store.insert_raw("x[0]", json!({})),
        Err(StoreError::InvalidKey(_))
    ));
}

#[test]
fn sqlite_round_trip_through_subscription() {
    let dir = tempdir().unwrap();
    let db = dir.path().join("ledger.sqlite");
    let store = SqliteStore::open(&db, "transactions")
        .unwrap()
        .with_poll_interval(Duration::from_millis(20));

    let key = store.create(&record("Noodles", "60.00")).unwrap();

    let sub = store.subscribe().unwrap();
    let snap = expect_snapshot(sub.next_event_timeout(WAIT)).unwrap();
    assert_eq!(snap.keys().collect::<Vec<_>>(), vec![key.as_str()]);
    assert_eq!(snap.entries()[0].1["amount"], json!("60.00"));
}

#[test]
fn sqlite_subscription_sees_other_clients() {
    let dir = tempdir().unwrap();
    let db = dir.path().join("ledger.sqlite");
    let watcher = SqliteStore::open(&db, "transactions")
        .unwrap()
        .with_poll_interval(Duration::from_millis(20));
    let writer = SqliteStore::open(&db, "transactions").unwrap();

    let sub = watcher.subscribe().unwrap();
    assert_eq!(expect_snapshot(sub.next_event_timeout(WAIT)), None);

    let key = writer.create(&record("Bus", "15")).unwrap();
    let snap = expect_snapshot(sub.next_event_timeout(WAIT)).unwrap();
    assert_eq!(snap.keys().collect::<Vec<_>>(), vec![key.as_str()]);

    writer.delete_all().unwrap();
    assert_eq!(expect_snapshot(sub.next_event_timeout(WAIT)), None);
}

#[test]
fn sqlite_paths_are_isolated() {
    let dir = tempdir().unwrap();
    let db = dir.path().join("ledger.sqlite");
    let mine = SqliteStore::open(&db, "alice/transactions").unwrap();
    let theirs = SqliteStore::open(&db, "bob/transactions").unwrap();

    mine.create(&record("Rice", "40")).unwrap();
    theirs.create(&record("Tea", "25")).unwrap();
    theirs.delete_all().unwrap();

    let sub = mine.subscribe().unwrap();
    let snap = expect_snapshot(sub.next_event_timeout(WAIT)).unwrap();
    assert_eq!(snap.len(), 1);
}

#[test]
fn sqlite_subscription_iterates_until_closed() {
    let dir = tempdir().unwrap();
    let db = dir.path().join("ledger.sqlite");
    let watcher = SqliteStore::open(&db, "transactions")
        .unwrap()
        .with_poll_interval(Duration::from_millis(20));
    let writer = SqliteStore::open(&db, "transactions").unwrap();

    let mut sub = watcher.subscribe().unwrap();
    assert_eq!(expect_snapshot(sub.next_event_timeout(WAIT)), None);

    let writes = thread::spawn(move || {
        for description in ["Bus", "Rice"] {
            writer.create(&record(description, "15")).unwrap();
            thread::sleep(Duration::from_millis(200));
        }
    });
    let sizes: Vec<usize> = sub
        .by_ref()
        .take(2)
        .map(|event| event.unwrap().map_or(0, |s| s.len()))
        .collect();
    assert_eq!(sizes, vec![1, 2]);
    writes.join().unwrap();

    let (done_tx, done_rx) = mpsc::channel();
    thread::spawn(move || {
        sub.close();
        let _ = done_tx.send(());
    });
    assert!(
        done_rx.recv_timeout(WAIT).is_ok(),
        "watcher thread kept running after close"
    );
}

#[test]
fn sqlite_subscription_recovers_after_failed_read() {
    let dir = tempdir().unwrap();
    let db = dir.path().join("ledger.sqlite");
    let watcher = SqliteStore::open(&db, "transactions")
        .unwrap()
        .with_poll_interval(Duration::from_millis(20));
    let writer = SqliteStore::open(&db, "transactions").unwrap();

    let sub = watcher.subscribe().unwrap();
    assert_eq!(expect_snapshot(sub.next_event_timeout(WAIT)), None);

    let admin = rusqlite::Connection::open(&db).unwrap();
    admin.execute_batch("DROP TABLE records").unwrap();
    match sub.next_event_timeout(WAIT) {
        Some(Err(StoreError::Read(_))) => {}
        other => panic!("expected a read error, got {:?}", other),
    }

    moneyjar::db::init_schema(&admin).unwrap();
    let key = writer.create(&record("Noodles", "60")).unwrap();
    loop {
        match sub.next_event_timeout(WAIT) {
            Some(Ok(Some(snap))) => {
                assert_eq!(snap.keys().collect::<Vec<_>>(), vec![key.as_str()]);
                break;
            }
            Some(Ok(None)) => continue,
            other => panic!("subscription did not recover, got {:?}", other),
        }
    }
}
