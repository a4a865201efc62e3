// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use saldo::db::SqliteStore;
use saldo::error::Error;
use saldo::models::{Kind, Transaction};
use saldo::store::{KeyValueStore, MemoryStore, TRANSACTIONS_KEY, TransactionStore};
use tempfile::tempdir;

fn sample() -> Vec<Transaction> {
    vec![
        Transaction {
            id: "1704067200000".into(),
            kind: Kind::Income,
            amount: 50000,
            note: "Salary".into(),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        },
        Transaction {
            id: "1704153600000".into(),
            kind: Kind::Expense,
            amount: 20000,
            note: "Groceries \"weekly\"".into(),
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
        },
    ]
}

#[test]
fn blob_layout_uses_stored_kind_names() {
    let mut s = TransactionStore::new(MemoryStore::new());
    s.save(&sample()[..1]).unwrap();
    assert_eq!(
        s.kv().raw(TRANSACTIONS_KEY).unwrap(),
        r#"[{"id":"1704067200000","kind":"pemasukan","amount":50000,"note":"Salary","date":"2024-01-01"}]"#
    );
}

#[test]
fn load_then_save_is_byte_identical() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("saldo.sqlite");

    let mut s = TransactionStore::new(SqliteStore::open(&path).unwrap());
    s.save(&sample()).unwrap();
    let first = s.kv().get(TRANSACTIONS_KEY).unwrap().unwrap();
    drop(s);

    let mut s = TransactionStore::new(SqliteStore::open(&path).unwrap());
    let loaded = s.load().unwrap();
    assert_eq!(loaded, sample());
    s.save(&loaded).unwrap();
    let second = s.kv().get(TRANSACTIONS_KEY).unwrap().unwrap();
    assert_eq!(first, second);
}

#[test]
fn absent_or_null_blob_is_empty() {
    let s = TransactionStore::new(MemoryStore::new());
    assert!(s.load().unwrap().is_empty());
    let s = TransactionStore::new(MemoryStore::with_entry(TRANSACTIONS_KEY, "null"));
    assert!(s.load().unwrap().is_empty());
}

#[test]
fn wrong_shape_is_corrupt_state() {
    for blob in [
        "{",
        r#"{"id":"1"}"#,
        r#"[{"id":"1","kind":"gift","amount":1,"note":"x","date":"2024-01-01"}]"#,
        r#"[{"id":"1","kind":"pengeluaran","amount":-5,"note":"x","date":"2024-01-01"}]"#,
    ] {
        let s = TransactionStore::new(MemoryStore::with_entry(TRANSACTIONS_KEY, blob));
        match s.load() {
            Err(Error::CorruptState { key, .. }) => assert_eq!(key, TRANSACTIONS_KEY),
            other => panic!("expected corrupt state for {blob}, got {other:?}"),
        }
    }
}

#[test]
fn reads_records_with_indonesian_field_names() {
    let blob = r#"[{"id":"1712000000000","jenis":"pengeluaran","jumlah":15000,"keterangan":"Kopi","tanggal":"2024-04-01"}]"#;
    let mut s = TransactionStore::new(MemoryStore::with_entry(TRANSACTIONS_KEY, blob));
    let txs = s.load().unwrap();
    assert_eq!(txs.len(), 1);
    assert_eq!(txs[0].kind, Kind::Expense);
    assert_eq!(txs[0].amount, 15000);
    assert_eq!(txs[0].note, "Kopi");

    s.save(&txs).unwrap();
    let raw = s.kv().raw(TRANSACTIONS_KEY).unwrap();
    assert!(raw.contains(r#""note":"Kopi""#));
    assert!(!raw.contains("keterangan"));
}

#[test]
fn sqlite_set_overwrites() {
    let mut kv = SqliteStore::open_in_memory().unwrap();
    assert_eq!(kv.get("k").unwrap(), None);
    kv.set("k", "one").unwrap();
    kv.set("k", "two").unwrap();
    assert_eq!(kv.get("k").unwrap().as_deref(), Some("two"));
    let n: i64 = kv
        .connection()
        .query_row("SELECT COUNT(*) FROM settings", [], |r| r.get(0))
        .unwrap();
    assert_eq!(n, 1);
}
