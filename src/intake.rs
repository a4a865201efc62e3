// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;

use crate::error::{Error, Field, Result};
use crate::models::Kind;

/// Raw, unvalidated form contents. `None` and blank strings are both missing.
#[derive(Debug, Clone, Default)]
pub struct RawForm<'a> {
    pub kind: Option<&'a str>,
    pub amount: Option<&'a str>,
    pub note: Option<&'a str>,
    pub date: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedInput {
    pub kind: Kind,
    pub amount: u64,
    pub note: String,
    pub date: NaiveDate,
}

fn required<'a>(v: Option<&'a str>, field: Field) -> Result<&'a str> {
    match v.map(str::trim) {
        Some(s) if !s.is_empty() => Ok(s),
        _ => Err(Error::MissingField(field)),
    }
}

/// Every field is checked for presence before any is parsed, so an empty
/// form always reports a missing field first.
pub fn validate(form: &RawForm<'_>) -> Result<ValidatedInput> {
    let kind = required(form.kind, Field::Kind)?;
    let amount = required(form.amount, Field::Amount)?;
    let note = required(form.note, Field::Note)?;
    let date = required(form.date, Field::Date)?;

    Ok(ValidatedInput {
        kind: kind.parse()?,
        amount: parse_amount(amount)?,
        note: note.to_string(),
        date: parse_date(date)?,
    })
}

/// Largest amount a single entry may carry.
pub const MAX_AMOUNT: u64 = i64::MAX as u64;

/// Whole, non-negative units only: no sign, no decimals, no separators,
/// at most [`MAX_AMOUNT`].
pub fn parse_amount(s: &str) -> Result<u64> {
    let t = s.trim();
    if t.is_empty() || !t.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::InvalidAmount(s.to_string()));
    }
    match t.parse::<u64>() {
        Ok(a) if a <= MAX_AMOUNT => Ok(a),
        _ => Err(Error::InvalidAmount(s.to_string())),
    }
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| Error::InvalidDate(s.to_string()))
}
