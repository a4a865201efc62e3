// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Rendering of the ledger.
//!
//! [`render`] and [`render_balance`] are pure: they turn records into row
//! descriptors and never touch the screen. Putting those descriptors in front
//! of the user is the job of a [`View`]; [`TerminalView`] prints them as
//! tables.

use chrono::NaiveDate;
use comfy_table::{Cell, Color};
use serde::Serialize;
use std::io::{self, Write};
use tracing::warn;

use crate::format::FormatRules;
use crate::models::{Filter, Kind, Transaction};
use crate::utils::pretty_table;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowView {
    pub kind: Kind,
    pub label: String,
    pub note: String,
    pub date: String,
    pub amount: String,
    /// Id handed back to `delete` when the row's delete action is used.
    pub delete_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum RenderedList {
    Empty { filter: Filter, message: String },
    Rows { filter: Filter, rows: Vec<RowView> },
}

impl RenderedList {
    pub fn rows(&self) -> &[RowView] {
        match self {
            RenderedList::Empty { .. } => &[],
            RenderedList::Rows { rows, .. } => rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, RenderedList::Empty { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Positive,
    Negative,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedBalance {
    pub amount: i128,
    pub text: String,
    pub tone: Tone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FilterButton {
    pub filter: Filter,
    pub active: bool,
}

pub fn empty_message(filter: Filter) -> String {
    match filter {
        Filter::All => "No transactions to display.".to_string(),
        f => format!("No {} transactions to display.", f.name()),
    }
}

pub fn render(records: &[Transaction], filter: Filter, rules: &FormatRules) -> RenderedList {
    let rows: Vec<RowView> = records
        .iter()
        .filter(|t| filter.matches(t.kind))
        .map(|t| RowView {
            kind: t.kind,
            label: t.kind.label().to_string(),
            note: t.note.clone(),
            date: rules.date(t.date),
            amount: rules.signed_money(t.kind.sign(), t.amount),
            delete_id: t.id.clone(),
        })
        .collect();
    if rows.is_empty() {
        RenderedList::Empty {
            filter,
            message: empty_message(filter),
        }
    } else {
        RenderedList::Rows { filter, rows }
    }
}

pub fn render_balance(amount: i128, rules: &FormatRules) -> FormattedBalance {
    FormattedBalance {
        amount,
        text: rules.balance(amount),
        tone: if amount < 0 {
            Tone::Negative
        } else {
            Tone::Positive
        },
    }
}

/// One button per filter, exactly one of them active.
pub fn filter_bar(active: Filter) -> Vec<FilterButton> {
    Filter::ALL
        .iter()
        .map(|&filter| FilterButton {
            filter,
            active: filter == active,
        })
        .collect()
}

/// Applies rendered descriptors to whatever the user is looking at.
pub trait View {
    fn show_list(&mut self, list: &RenderedList);
    fn show_balance(&mut self, balance: &FormattedBalance);
    fn show_filters(&mut self, bar: &[FilterButton]);
    fn notify(&mut self, message: &str);
    /// Clears the entry form and primes its date field.
    fn reset_form(&mut self, today: NaiveDate);
}

pub struct TerminalView<W> {
    out: W,
    primed_date: Option<NaiveDate>,
}

impl TerminalView<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            primed_date: None,
        }
    }

    /// Date the entry form was last primed with.
    pub fn primed_date(&self) -> Option<NaiveDate> {
        self.primed_date
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text) {
            warn!(error = %e, "failed to write to terminal");
        }
    }
}

impl<W: Write> View for TerminalView<W> {
    fn show_list(&mut self, list: &RenderedList) {
        match list {
            RenderedList::Empty { message, .. } => self.line(message),
            RenderedList::Rows { rows, .. } => {
                let data: Vec<Vec<String>> = rows
                    .iter()
                    .map(|r| {
                        vec![
                            r.delete_id.clone(),
                            r.label.clone(),
                            r.note.clone(),
                            r.date.clone(),
                            r.amount.clone(),
                        ]
                    })
                    .collect();
                let table = pretty_table(&["ID", "Type", "Note", "Date", "Amount"], data);
                self.line(&table.to_string());
            }
        }
    }

    fn show_balance(&mut self, balance: &FormattedBalance) {
        let color = match balance.tone {
            Tone::Positive => Color::Green,
            Tone::Negative => Color::Red,
        };
        let mut t = pretty_table(&["Balance"], Vec::new());
        t.add_row(vec![Cell::new(&balance.text).fg(color)]);
        self.line(&t.to_string());
    }

    fn show_filters(&mut self, bar: &[FilterButton]) {
        let labels: Vec<String> = bar
            .iter()
            .map(|b| {
                if b.active {
                    format!("[{}]", b.filter)
                } else {
                    b.filter.to_string()
                }
            })
            .collect();
        self.line(&format!("Filter: {}", labels.join(" ")));
    }

    fn notify(&mut self, message: &str) {
        self.line(message);
    }

    fn reset_form(&mut self, today: NaiveDate) {
        self.primed_date = Some(today);
    }
}
