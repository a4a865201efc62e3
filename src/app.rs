// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The controller: one object that owns the ledger and the active filter and
//! reacts to form submissions, filter changes and delete requests.

use std::io::{self, BufRead, Write};

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::format::FormatRules;
use crate::intake::{self, RawForm};
use crate::ledger::{Clock, Ledger};
use crate::models::{Filter, Transaction};
use crate::store::{KeyValueStore, TransactionStore};
use crate::view::{self, FormattedBalance, RenderedList, View};

/// Yes/no question put to the user before a destructive action.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Used for `--yes`.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysConfirm;

impl Confirm for AlwaysConfirm {
    fn confirm(&mut self, _prompt: &str) -> bool {
        true
    }
}

/// Asks on stderr and reads one line from stdin. Anything but y/yes declines.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&mut self, prompt: &str) -> bool {
        eprint!("{} [y/N] ", prompt);
        if let Err(e) = io::stderr().flush() {
            warn!(error = %e, "failed to flush confirmation prompt");
        }
        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FilterController {
    active: Filter,
}

impl FilterController {
    pub fn active(&self) -> Filter {
        self.active
    }

    pub fn set(&mut self, value: Filter) {
        self.active = value;
    }
}

pub struct App<S, V> {
    ledger: Ledger<S>,
    filter: FilterController,
    rules: FormatRules,
    view: V,
    confirm: Box<dyn Confirm>,
}

impl<S: KeyValueStore, V: View> App<S, V> {
    /// Loads the ledger and formatting rules from `kv`. A corrupt stored
    /// ledger is dropped silently; the user starts from an empty list.
    pub fn open(kv: S, view: V, confirm: Box<dyn Confirm>, clock: Box<dyn Clock>) -> Result<Self> {
        let rules = FormatRules::load(&kv)?;
        let ledger = Ledger::open_or_empty(TransactionStore::new(kv), clock)?;
        Ok(Self {
            ledger,
            filter: FilterController::default(),
            rules,
            view,
            confirm,
        })
    }

    /// Initial paint: filters, balance and list.
    pub fn start(&mut self) {
        let today = self.ledger.today();
        self.view.reset_form(today);
        self.view
            .show_filters(&view::filter_bar(self.filter.active()));
        self.refresh();
    }

    fn refresh(&mut self) {
        let balance = self.balance();
        self.view.show_balance(&balance);
        let list = self.rendered();
        self.view.show_list(&list);
    }

    /// Validates the form and records the transaction. On any failure the
    /// user is notified and nothing changes.
    pub fn submit(&mut self, form: &RawForm<'_>) -> Result<Transaction> {
        let added = intake::validate(form).and_then(|input| {
            self.ledger
                .add(input.kind, input.amount, &input.note, input.date)
        });
        match added {
            Ok(tx) => {
                info!(id = %tx.id, "recorded transaction");
                let today = self.ledger.today();
                self.view.reset_form(today);
                self.refresh();
                Ok(tx)
            }
            Err(e) => {
                self.view.notify(&e.to_string());
                Err(e)
            }
        }
    }

    /// Removes `id` after the user confirms. Returns `Ok(false)` for an
    /// unknown id; a declined prompt is [`Error::ConfirmationDeclined`].
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        let Some(tx) = self.ledger.get(id) else {
            self.view
                .notify(&format!("No transaction with id '{}'", id));
            return Ok(false);
        };
        let prompt = format!(
            "Delete {} '{}' of {} on {}?",
            tx.kind.label().to_lowercase(),
            tx.note,
            self.rules.money(tx.amount),
            self.rules.date(tx.date)
        );
        if !self.confirm.confirm(&prompt) {
            debug!(%id, "delete declined");
            return Err(Error::ConfirmationDeclined);
        }
        let removed = match self.ledger.remove(id) {
            Ok(r) => r,
            Err(e) => {
                self.view.notify(&e.to_string());
                return Err(e);
            }
        };
        if removed {
            info!(%id, "deleted transaction");
            self.refresh();
        }
        Ok(removed)
    }

    pub fn set_filter(&mut self, value: Filter) {
        self.filter.set(value);
        self.view.show_filters(&view::filter_bar(value));
        let list = self.rendered();
        self.view.show_list(&list);
    }

    pub fn rendered(&self) -> RenderedList {
        view::render(self.ledger.records(), self.filter.active(), &self.rules)
    }

    pub fn balance(&self) -> FormattedBalance {
        view::render_balance(self.ledger.balance(), &self.rules)
    }

    pub fn active_filter(&self) -> Filter {
        self.filter.active()
    }

    pub fn today(&self) -> NaiveDate {
        self.ledger.today()
    }

    pub fn ledger(&self) -> &Ledger<S> {
        &self.ledger
    }

    pub fn rules(&self) -> &FormatRules {
        &self.rules
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }
}
