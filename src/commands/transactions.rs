// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::app::{AlwaysConfirm, App, Confirm, StdinConfirm};
use crate::error::{Error, Reported};
use crate::intake::RawForm;
use crate::ledger::SystemClock;
use crate::models::Filter;
use crate::store::KeyValueStore;
use crate::utils::maybe_print_json;
use crate::view::{RenderedList, TerminalView, View};
use anyhow::{Context, Result};
use std::io;

fn open_app<S: KeyValueStore, V: View>(
    kv: S,
    view: V,
    confirm: Box<dyn Confirm>,
) -> Result<App<S, V>> {
    App::open(kv, view, confirm, Box::new(SystemClock)).context("Failed to load transactions")
}

pub fn add<S: KeyValueStore>(kv: S, sub: &clap::ArgMatches) -> Result<()> {
    let mut app = open_app(kv, TerminalView::stdout(), Box::new(AlwaysConfirm))?;
    // An omitted --date behaves like the form's pre-filled date field.
    let today = app.today().to_string();
    let form = RawForm {
        kind: sub.get_one::<String>("kind").map(String::as_str),
        amount: sub.get_one::<String>("amount").map(String::as_str),
        note: sub.get_one::<String>("note").map(String::as_str),
        date: Some(
            sub.get_one::<String>("date")
                .map(String::as_str)
                .unwrap_or(&today),
        ),
    };
    let tx = app
        .submit(&form)
        .map_err(Reported)
        .context("Transaction not recorded")?;
    println!(
        "Recorded {} {} '{}' on {} (id {})",
        tx.kind.label().to_lowercase(),
        app.rules().money(tx.amount),
        tx.note,
        app.rules().date(tx.date),
        tx.id
    );
    Ok(())
}

fn filter_arg(sub: &clap::ArgMatches) -> Result<Filter> {
    Ok(sub
        .get_one::<String>("filter")
        .map(|s| s.parse::<Filter>())
        .transpose()?
        .unwrap_or_default())
}

/// The list as it would be shown with `filter` active.
pub fn rendered_list<S: KeyValueStore>(kv: S, filter: Filter) -> Result<RenderedList> {
    let mut app = open_app(kv, TerminalView::new(io::sink()), Box::new(AlwaysConfirm))?;
    app.set_filter(filter);
    Ok(app.rendered())
}

pub fn list<S: KeyValueStore>(kv: S, sub: &clap::ArgMatches) -> Result<()> {
    let filter = filter_arg(sub)?;
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    if json_flag || jsonl_flag {
        let data = rendered_list(kv, filter)?;
        maybe_print_json(json_flag, jsonl_flag, &data.rows())?;
        return Ok(());
    }
    let mut app = open_app(kv, TerminalView::stdout(), Box::new(AlwaysConfirm))?;
    app.set_filter(filter);
    Ok(())
}

pub fn balance<S: KeyValueStore>(kv: S, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let mut app = open_app(kv, TerminalView::stdout(), Box::new(AlwaysConfirm))?;
    let b = app.balance();
    if !maybe_print_json(json_flag, false, &b)? {
        app.view_mut().show_balance(&b);
    }
    Ok(())
}

/// Returns whether a transaction was removed.
pub fn remove<S: KeyValueStore>(kv: S, sub: &clap::ArgMatches) -> Result<bool> {
    let id = sub.get_one::<String>("id").map(|s| s.trim()).unwrap_or_default();
    let confirm: Box<dyn Confirm> = if sub.get_flag("yes") {
        Box::new(AlwaysConfirm)
    } else {
        Box::new(StdinConfirm)
    };
    let mut app = open_app(kv, TerminalView::stdout(), confirm)?;
    match app.delete(id) {
        Ok(removed) => Ok(removed),
        Err(Error::ConfirmationDeclined) => {
            println!("Deletion cancelled");
            Ok(false)
        }
        Err(e) => Err(Reported(e)).with_context(|| format!("Could not delete '{}'", id)),
    }
}
