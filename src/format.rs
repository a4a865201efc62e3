// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Currency and date formatting rules.
//!
//! Defaults reproduce id-ID Rupiah output: symbol `Rp`, `.` between digit
//! groups, no fractional digits, dates as `dd/mm/yyyy`. Every rule can be
//! overridden through the `format.*` keys of the settings store.

use anyhow::{Result, bail};
use chrono::NaiveDate;
use chrono::format::{Item, StrftimeItems};
use serde::Serialize;
use std::fmt::Write;

use crate::store::KeyValueStore;

pub const CURRENCY_SYMBOL_KEY: &str = "format.currency_symbol";
pub const GROUP_SEPARATOR_KEY: &str = "format.group_separator";
pub const DATE_FORMAT_KEY: &str = "format.date_format";

const DEFAULT_SYMBOL: &str = "Rp";
const DEFAULT_SEPARATOR: &str = ".";
const DEFAULT_DATE_FORMAT: &str = "%d/%m/%Y";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormatRules {
    pub currency_symbol: String,
    pub group_separator: String,
    pub date_format: String,
}

impl Default for FormatRules {
    fn default() -> Self {
        Self {
            currency_symbol: DEFAULT_SYMBOL.to_string(),
            group_separator: DEFAULT_SEPARATOR.to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl FormatRules {
    /// Reads overrides from `kv`, falling back to the defaults per key.
    pub fn load<S: KeyValueStore>(kv: &S) -> crate::error::Result<Self> {
        let d = Self::default();
        Ok(Self {
            currency_symbol: kv.get(CURRENCY_SYMBOL_KEY)?.unwrap_or(d.currency_symbol),
            group_separator: kv.get(GROUP_SEPARATOR_KEY)?.unwrap_or(d.group_separator),
            date_format: kv
                .get(DATE_FORMAT_KEY)?
                .filter(|f| valid_date_format(f))
                .unwrap_or(d.date_format),
        })
    }

    /// Stores one rule. `name` is the user-facing setting name.
    pub fn set<S: KeyValueStore>(kv: &mut S, name: &str, value: &str) -> Result<()> {
        let key = match name.trim() {
            "currency-symbol" => CURRENCY_SYMBOL_KEY,
            "group-separator" => GROUP_SEPARATOR_KEY,
            "date-format" => {
                if !valid_date_format(value) {
                    bail!("Invalid date format '{}'", value);
                }
                DATE_FORMAT_KEY
            }
            other => bail!(
                "Unknown setting '{}' (use currency-symbol|group-separator|date-format)",
                other
            ),
        };
        kv.set(key, value)?;
        Ok(())
    }

    /// `Rp20.000`
    pub fn money(&self, amount: u64) -> String {
        format!(
            "{}{}",
            self.currency_symbol,
            group_digits(u128::from(amount), &self.group_separator)
        )
    }

    /// `-Rp20.000` / `+Rp50.000`
    pub fn signed_money(&self, sign: char, amount: u64) -> String {
        format!("{}{}", sign, self.money(amount))
    }

    /// Balance amounts carry a minus only when negative.
    pub fn balance(&self, amount: i128) -> String {
        let text = format!(
            "{}{}",
            self.currency_symbol,
            group_digits(amount.unsigned_abs(), &self.group_separator)
        );
        if amount < 0 { format!("-{}", text) } else { text }
    }

    pub fn date(&self, d: NaiveDate) -> String {
        let mut out = String::new();
        if write!(out, "{}", d.format(&self.date_format)).is_err() {
            out.clear();
            let _ = write!(out, "{}", d.format(DEFAULT_DATE_FORMAT));
        }
        out
    }
}

fn valid_date_format(f: &str) -> bool {
    !f.is_empty() && !StrftimeItems::new(f).any(|i| matches!(i, Item::Error))
}

fn group_digits(n: u128, sep: &str) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 * sep.len());
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push_str(sep);
        }
        out.push(c);
    }
    out
}
