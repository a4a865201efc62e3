// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Persistence of the transaction list as a single serialized blob.
//!
//! The whole ledger lives under one key of a durable key-value store and is
//! rewritten in full on every save. There are no partial updates and no
//! migrations: a blob that does not parse is reported as
//! [`Error::CorruptState`] and the caller decides what to do with it.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::models::Transaction;

/// Key the transaction list is stored under.
pub const TRANSACTIONS_KEY: &str = "transaksi";

/// Minimal string-to-string store. Writes replace the whole value.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

/// In-process store, mostly for tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    writes: usize,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut s = Self::default();
        s.entries.insert(key.to_string(), value.to_string());
        s
    }

    /// Number of successful `set` calls so far.
    pub fn writes(&self) -> usize {
        self.writes
    }

    /// Make every subsequent `set` fail, to exercise rollback paths.
    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes {
            return Err(Error::Storage(rusqlite::Error::InvalidQuery));
        }
        self.entries.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}

/// Reads and writes the full transaction list through a [`KeyValueStore`].
#[derive(Debug)]
pub struct TransactionStore<S> {
    kv: S,
}

impl<S: KeyValueStore> TransactionStore<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    /// Absent key (or a stored JSON `null`) loads as an empty list.
    pub fn load(&self) -> Result<Vec<Transaction>> {
        let Some(blob) = self.kv.get(TRANSACTIONS_KEY)? else {
            debug!(key = TRANSACTIONS_KEY, "no stored transactions");
            return Ok(Vec::new());
        };
        let parsed: Option<Vec<Transaction>> =
            serde_json::from_str(&blob).map_err(|source| Error::CorruptState {
                key: TRANSACTIONS_KEY.to_string(),
                source,
            })?;
        let txs = parsed.unwrap_or_default();
        debug!(count = txs.len(), "loaded transactions");
        Ok(txs)
    }

    pub fn save(&mut self, txs: &[Transaction]) -> Result<()> {
        let blob = serde_json::to_string(txs)?;
        trace!(bytes = blob.len(), "writing transaction blob");
        self.kv.set(TRANSACTIONS_KEY, &blob)?;
        debug!(count = txs.len(), "saved transactions");
        Ok(())
    }

    pub fn kv(&self) -> &S {
        &self.kv
    }

    pub fn kv_mut(&mut self) -> &mut S {
        &mut self.kv
    }

    pub fn into_inner(self) -> S {
        self.kv
    }
}
