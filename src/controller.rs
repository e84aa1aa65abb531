// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The one place that owns the current [`LedgerView`].
//!
//! User actions go through the controller, which validates input, calls the
//! store, and reports the outcome through a [`Notifier`]. The view itself is
//! only ever replaced by [`LedgerController::apply`] when a snapshot arrives,
//! so a failed write leaves the last good state on screen.

use chrono::{DateTime, Utc};

use crate::errors::{LedgerError, StoreError};
use crate::ledger::LedgerView;
use crate::models::{NewTransaction, TransactionForm, TransactionType};
use crate::notify::{self, Notification, NotificationLevel, Notifier};
use crate::store::{SnapshotEvent, SnapshotStore, Subscription};
use crate::utils::IdGenerator;

pub struct LedgerController<S, N> {
    store: S,
    notifier: N,
    view: LedgerView,
    current_type: TransactionType,
    ids: IdGenerator,
}

impl<S: SnapshotStore, N: Notifier> LedgerController<S, N> {
    pub fn new(store: S, notifier: N) -> Self {
        Self {
            store,
            notifier,
            view: LedgerView::default(),
            current_type: TransactionType::default(),
            ids: IdGenerator::default(),
        }
    }

    pub fn view(&self) -> &LedgerView {
        &self.view
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn current_type(&self) -> TransactionType {
        self.current_type
    }

    pub fn select_type(&mut self, kind: TransactionType) {
        self.current_type = kind;
    }

    /// Replace the view with a fresh snapshot, or report a read failure and keep the old one.
    pub fn apply(&mut self, event: SnapshotEvent) {
        match event {
            Ok(snapshot) => {
                self.view = LedgerView::from_snapshot(snapshot.as_ref());
                tracing::debug!(records = self.view.len(), "snapshot applied");
            }
            Err(err) => {
                tracing::error!("store read failed: {}", err);
                self.notify(NotificationLevel::Error, notify::MSG_LOAD_FAILED);
            }
        }
    }

    /// Load the current value once.
    pub fn refresh(&mut self) -> Result<(), StoreError> {
        let subscription = self.store.subscribe()?;
        let event = subscription.next_event().ok_or(StoreError::Closed)?;
        let failed = event.is_err();
        self.apply(event);
        if failed {
            return Err(StoreError::read("initial snapshot could not be loaded"));
        }
        Ok(())
    }

    /// Apply every snapshot already waiting on `subscription`. Returns how many were applied.
    pub fn pump(&mut self, subscription: &Subscription) -> usize {
        let mut applied = 0;
        while let Some(event) = subscription.try_next() {
            self.apply(event);
            applied += 1;
        }
        applied
    }

    pub fn submit(&mut self, form: &TransactionForm) -> Result<String, LedgerError> {
        self.submit_at(form, Utc::now())
    }

    /// Validate and store a new transaction of the currently selected type.
    /// Returns the key the store assigned.
    pub fn submit_at(
        &mut self,
        form: &TransactionForm,
        now: DateTime<Utc>,
    ) -> Result<String, LedgerError> {
        let valid = match form.validate(self.current_type) {
            Ok(v) => v,
            Err(err) => {
                tracing::warn!("rejected transaction input: {}", err);
                self.notify(NotificationLevel::Warning, notify::MSG_INCOMPLETE_FORM);
                return Err(err.into());
            }
        };

        let record = NewTransaction::new(valid, self.ids.next_id(now), now);
        match self.store.create(&record) {
            Ok(key) => {
                tracing::info!(%key, id = %record.id, kind = %record.kind, "transaction saved");
                self.notify(NotificationLevel::Success, notify::MSG_SAVED);
                self.current_type = TransactionType::Income;
                Ok(key)
            }
            Err(err) => {
                tracing::error!("error adding transaction: {}", err);
                self.notify(NotificationLevel::Error, notify::MSG_SAVE_FAILED);
                Err(err.into())
            }
        }
    }

    pub fn delete(&mut self, key: &str) -> Result<(), LedgerError> {
        match self.store.delete_one(key) {
            Ok(()) => {
                tracing::info!(%key, "transaction deleted");
                self.notify(NotificationLevel::Success, notify::MSG_DELETED);
                Ok(())
            }
            Err(err) => {
                tracing::error!("error deleting transaction: {}", err);
                self.notify(NotificationLevel::Error, notify::MSG_DELETE_FAILED);
                Err(err.into())
            }
        }
    }

    /// Remove every transaction under the store path once `confirm` agrees.
    ///
    /// Returns `Ok(false)` without asking when there is nothing to clear, and
    /// without touching the store when the confirmation is declined.
    pub fn clear_all(&mut self, confirm: impl FnOnce() -> bool) -> Result<bool, LedgerError> {
        if self.view.is_empty() {
            return Ok(false);
        }
        if !confirm() {
            return Ok(false);
        }
        match self.store.delete_all() {
            Ok(()) => {
                tracing::info!(path = self.store.path(), "all transactions cleared");
                self.notify(NotificationLevel::Success, notify::MSG_CLEARED);
                Ok(true)
            }
            Err(err) => {
                tracing::error!("error clearing transactions: {}", err);
                self.notify(NotificationLevel::Error, notify::MSG_DELETE_FAILED);
                Err(err.into())
            }
        }
    }

    fn notify(&mut self, level: NotificationLevel, message: &str) {
        self.notifier.notify(Notification::new(level, message));
    }
}
