// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Direction of a transaction. Stored with the Indonesian names the data was
/// first written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    #[serde(rename = "pemasukan")]
    Income,
    #[serde(rename = "pengeluaran")]
    Expense,
}

impl Kind {
    pub fn label(self) -> &'static str {
        match self {
            Kind::Income => "Income",
            Kind::Expense => "Expense",
        }
    }

    pub fn sign(self) -> char {
        match self {
            Kind::Income => '+',
            Kind::Expense => '-',
        }
    }

    /// Contribution of `amount` to the balance.
    pub fn signed(self, amount: u64) -> i128 {
        let a = i128::from(amount);
        match self {
            Kind::Income => a,
            Kind::Expense => -a,
        }
    }
}

impl FromStr for Kind {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" | "pemasukan" => Ok(Kind::Income),
            "expense" | "pengeluaran" => Ok(Kind::Expense),
            _ => Err(crate::error::Error::InvalidKind(s.to_string())),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    #[serde(alias = "jenis")]
    pub kind: Kind,
    #[serde(alias = "jumlah")]
    pub amount: u64,
    #[serde(alias = "keterangan")]
    pub note: String,
    #[serde(alias = "tanggal")]
    pub date: NaiveDate,
}

/// View restriction for the transaction list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    All,
    Income,
    Expense,
}

impl Filter {
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Income, Filter::Expense];

    pub fn matches(self, kind: Kind) -> bool {
        match self {
            Filter::All => true,
            Filter::Income => kind == Kind::Income,
            Filter::Expense => kind == Kind::Expense,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Income => "income",
            Filter::Expense => "expense",
        }
    }
}

impl FromStr for Filter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" | "semua" => Ok(Filter::All),
            "income" | "pemasukan" => Ok(Filter::Income),
            "expense" | "pengeluaran" => Ok(Filter::Expense),
            other => Err(anyhow::anyhow!(
                "Unknown filter '{}' (use all|income|expense)",
                other
            )),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
