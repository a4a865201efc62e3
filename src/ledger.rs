// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::models::{Kind, Transaction};
use crate::store::{KeyValueStore, TransactionStore};

/// Source of wall-clock readings, injectable for tests.
pub trait Clock {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> i64;
    fn today(&self) -> NaiveDate;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }

    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// The ordered list of transactions plus the store it is mirrored to.
///
/// Every mutation is persisted before it becomes visible; if the write fails
/// the in-memory list is put back the way it was.
pub struct Ledger<S> {
    records: Vec<Transaction>,
    store: TransactionStore<S>,
    clock: Box<dyn Clock>,
    last_id: i64,
}

impl<S: KeyValueStore> Ledger<S> {
    /// Loads the stored list, failing on a corrupt blob.
    pub fn open(store: TransactionStore<S>, clock: Box<dyn Clock>) -> Result<Self> {
        let records = store.load()?;
        Ok(Self::with_records(records, store, clock))
    }

    /// Loads the stored list; a corrupt blob is discarded and the ledger
    /// starts empty. Backend failures still propagate.
    pub fn open_or_empty(store: TransactionStore<S>, clock: Box<dyn Clock>) -> Result<Self> {
        let records = match store.load() {
            Ok(r) => r,
            Err(Error::CorruptState { key, source }) => {
                warn!(%key, error = %source, "discarding unreadable stored transactions");
                Vec::new()
            }
            Err(e) => return Err(e),
        };
        Ok(Self::with_records(records, store, clock))
    }

    fn with_records(
        records: Vec<Transaction>,
        store: TransactionStore<S>,
        clock: Box<dyn Clock>,
    ) -> Self {
        let last_id = records
            .iter()
            .filter_map(|t| t.id.parse::<i64>().ok())
            .max()
            .unwrap_or(0);
        Self {
            records,
            store,
            clock,
            last_id,
        }
    }

    // Clock readings can repeat or go backwards; ids must not.
    fn next_id(&mut self) -> String {
        let id = self.clock.now_millis().max(self.last_id.saturating_add(1));
        self.last_id = id;
        id.to_string()
    }

    pub fn add(
        &mut self,
        kind: Kind,
        amount: u64,
        note: &str,
        date: NaiveDate,
    ) -> Result<Transaction> {
        let tx = Transaction {
            id: self.next_id(),
            kind,
            amount,
            note: note.to_string(),
            date,
        };
        self.records.push(tx.clone());
        if let Err(e) = self.store.save(&self.records) {
            self.records.pop();
            return Err(e);
        }
        debug!(id = %tx.id, kind = %tx.kind, amount = tx.amount, "added transaction");
        Ok(tx)
    }

    /// Returns `false` without touching the store when `id` is unknown.
    pub fn remove(&mut self, id: &str) -> Result<bool> {
        let Some(pos) = self.records.iter().position(|t| t.id == id) else {
            debug!(%id, "remove: no such transaction");
            return Ok(false);
        };
        let removed = self.records.remove(pos);
        if let Err(e) = self.store.save(&self.records) {
            self.records.insert(pos, removed);
            return Err(e);
        }
        debug!(%id, "removed transaction");
        Ok(true)
    }

    /// Income minus expenses over the whole list. Summed in `i128`, which
    /// cannot overflow for any realistic number of `u64` amounts.
    pub fn balance(&self) -> i128 {
        self.records
            .iter()
            .map(|t| t.kind.signed(t.amount))
            .sum()
    }

    /// (income, expense) totals.
    pub fn totals(&self) -> (u128, u128) {
        self.records
            .iter()
            .fold((0u128, 0u128), |(inc, exp), t| match t.kind {
                Kind::Income => (inc + u128::from(t.amount), exp),
                Kind::Expense => (inc, exp + u128::from(t.amount)),
            })
    }

    pub fn get(&self, id: &str) -> Option<&Transaction> {
        self.records.iter().find(|t| t.id == id)
    }

    pub fn records(&self) -> &[Transaction] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn store(&self) -> &TransactionStore<S> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut TransactionStore<S> {
        &mut self.store
    }
}
