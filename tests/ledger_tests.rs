// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use saldo::error::Error;
use saldo::ledger::{Clock, Ledger};
use saldo::models::Kind;
use saldo::store::{MemoryStore, TRANSACTIONS_KEY, TransactionStore};

struct FixedClock(i64);

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.0
    }

    fn today(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }
}

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn empty_ledger() -> Ledger<MemoryStore> {
    Ledger::open(
        TransactionStore::new(MemoryStore::new()),
        Box::new(FixedClock(1_700_000_000_000)),
    )
    .unwrap()
}

#[test]
fn salary_minus_groceries() {
    let mut l = empty_ledger();
    l.add(Kind::Income, 50000, "Salary", d("2024-01-01")).unwrap();
    l.add(Kind::Expense, 20000, "Groceries", d("2024-01-02"))
        .unwrap();
    assert_eq!(l.balance(), 30000);
    assert_eq!(l.totals(), (50000, 20000));
    assert_eq!(l.len(), 2);
    assert_eq!(l.records()[0].note, "Salary");
    assert_eq!(l.records()[1].note, "Groceries");
}

#[test]
fn balance_ignores_insertion_order() {
    let entries = [
        (Kind::Expense, 7_500),
        (Kind::Income, 10_000),
        (Kind::Expense, 12_000),
        (Kind::Income, 1_250),
    ];
    let mut forward = empty_ledger();
    for (k, a) in entries {
        forward.add(k, a, "x", d("2024-02-01")).unwrap();
    }
    let mut backward = empty_ledger();
    for (k, a) in entries.iter().rev() {
        backward.add(*k, *a, "x", d("2024-02-01")).unwrap();
    }
    assert_eq!(forward.balance(), -8_250);
    assert_eq!(forward.balance(), backward.balance());
}

#[test]
fn largest_amounts_sum_exactly_in_any_order() {
    let max = i64::MAX as u64;
    let mut income_first = empty_ledger();
    for k in [Kind::Income, Kind::Income, Kind::Expense] {
        income_first.add(k, max, "big", d("2024-02-01")).unwrap();
    }
    let mut expense_first = empty_ledger();
    for k in [Kind::Expense, Kind::Income, Kind::Income] {
        expense_first.add(k, max, "big", d("2024-02-01")).unwrap();
    }
    assert_eq!(income_first.balance(), i128::from(i64::MAX));
    assert_eq!(income_first.balance(), expense_first.balance());
    assert_eq!(
        income_first.totals(),
        (2 * u128::from(max), u128::from(max))
    );
}

#[test]
fn loaded_amounts_beyond_i64_are_not_clamped() {
    let blob = |kinds: [&str; 3]| {
        let rows: Vec<String> = kinds
            .iter()
            .enumerate()
            .map(|(i, k)| {
                format!(
                    r#"{{"id":"{}","kind":"{}","amount":{},"note":"n","date":"2024-01-01"}}"#,
                    i + 1,
                    k,
                    u64::MAX
                )
            })
            .collect();
        format!("[{}]", rows.join(","))
    };
    let open = |kinds| {
        Ledger::open(
            TransactionStore::new(MemoryStore::with_entry(TRANSACTIONS_KEY, &blob(kinds))),
            Box::new(FixedClock(1_700_000_000_000)),
        )
        .unwrap()
    };
    let a = open(["pemasukan", "pemasukan", "pengeluaran"]);
    let b = open(["pengeluaran", "pemasukan", "pemasukan"]);
    assert_eq!(a.balance(), i128::from(u64::MAX));
    assert_eq!(a.balance(), b.balance());
}

#[test]
fn ids_stay_unique_when_clock_stalls() {
    let mut l = empty_ledger();
    let a = l.add(Kind::Income, 1, "a", d("2024-01-01")).unwrap();
    let b = l.add(Kind::Income, 2, "b", d("2024-01-01")).unwrap();
    let c = l.add(Kind::Income, 3, "c", d("2024-01-01")).unwrap();
    assert_eq!(a.id, "1700000000000");
    assert_eq!(b.id, "1700000000001");
    assert_eq!(c.id, "1700000000002");
}

#[test]
fn ids_continue_after_loaded_records() {
    let blob = r#"[{"id":"1800000000000","kind":"pemasukan","amount":5,"note":"old","date":"2024-01-01"}]"#;
    let mut l = Ledger::open(
        TransactionStore::new(MemoryStore::with_entry(TRANSACTIONS_KEY, blob)),
        Box::new(FixedClock(1_700_000_000_000)),
    )
    .unwrap();
    let t = l.add(Kind::Expense, 1, "new", d("2024-01-02")).unwrap();
    assert_eq!(t.id, "1800000000001");
}

#[test]
fn remove_keeps_other_records_in_order() {
    let mut l = empty_ledger();
    let a = l.add(Kind::Income, 100, "a", d("2024-01-01")).unwrap();
    let b = l.add(Kind::Expense, 40, "b", d("2024-01-02")).unwrap();
    let c = l.add(Kind::Income, 10, "c", d("2024-01-03")).unwrap();

    assert!(l.remove(&b.id).unwrap());
    assert_eq!(l.records(), &[a, c][..]);
    assert_eq!(l.balance(), 110);
    assert_eq!(l.store().kv().writes(), 4);
}

#[test]
fn removing_unknown_id_does_not_persist() {
    let mut l = empty_ledger();
    l.add(Kind::Income, 100, "a", d("2024-01-01")).unwrap();
    let writes = l.store().kv().writes();
    assert!(!l.remove("nope").unwrap());
    assert_eq!(l.len(), 1);
    assert_eq!(l.store().kv().writes(), writes);
}

#[test]
fn failed_write_rolls_back_add_and_remove() {
    let mut l = empty_ledger();
    let a = l.add(Kind::Income, 100, "a", d("2024-01-01")).unwrap();
    l.store_mut().kv_mut().fail_writes(true);

    assert!(l.add(Kind::Expense, 5, "b", d("2024-01-02")).is_err());
    assert_eq!(l.len(), 1);

    assert!(l.remove(&a.id).is_err());
    assert_eq!(l.records(), &[a][..]);
    assert_eq!(l.balance(), 100);
}

#[test]
fn corrupt_blob_fails_open_but_not_open_or_empty() {
    let kv = MemoryStore::with_entry(TRANSACTIONS_KEY, "{not json");
    let err = Ledger::open(TransactionStore::new(kv.clone()), Box::new(FixedClock(1)))
        .err()
        .unwrap();
    assert!(matches!(err, Error::CorruptState { .. }));

    let mut l = Ledger::open_or_empty(TransactionStore::new(kv), Box::new(FixedClock(1))).unwrap();
    assert!(l.is_empty());
    l.add(Kind::Income, 9, "fresh", d("2024-01-01")).unwrap();
    assert_eq!(l.balance(), 9);
}
