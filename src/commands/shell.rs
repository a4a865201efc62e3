// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Interactive session. The active filter lives for as long as the session
//! does, the way it lived for as long as the page stayed open.

use crate::app::App;
use crate::error::Error;
use crate::intake::RawForm;
use crate::models::Filter;
use crate::store::KeyValueStore;
use crate::view::{TerminalView, View};
use anyhow::Result;
use std::io::{self, Write};

const HELP: &str = "\
Commands:
  add <income|expense> <amount> <YYYY-MM-DD|today> <note...>
  filter <all|income|expense>
  list
  balance
  rm <id>
  help
  quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Reads one line from stdin after printing the prompt; `None` on EOF.
pub fn read_stdin_line() -> io::Result<Option<String>> {
    print!("saldo> ");
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

/// Text following the first `n` whitespace-separated tokens, inner spacing
/// kept as typed.
fn rest_after(line: &str, n: usize) -> Option<&str> {
    let mut rest = line.trim_start();
    for _ in 0..n {
        let end = rest.find(char::is_whitespace)?;
        rest = rest[end..].trim_start();
    }
    Some(rest.trim_end())
}

pub fn run<S, W>(
    app: &mut App<S, TerminalView<W>>,
    mut next_line: impl FnMut() -> io::Result<Option<String>>,
) -> Result<()>
where
    S: KeyValueStore,
    W: Write,
{
    app.start();
    while let Some(line) = next_line()? {
        if execute_line(app, &line) == Flow::Quit {
            break;
        }
    }
    Ok(())
}

/// Handles one command. Failures are shown to the user and never end the
/// session.
pub fn execute_line<S, W>(app: &mut App<S, TerminalView<W>>, line: &str) -> Flow
where
    S: KeyValueStore,
    W: Write,
{
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some(&cmd) = tokens.first() else {
        return Flow::Continue;
    };
    match cmd.to_lowercase().as_str() {
        "add" => {
            let primed = app
                .view()
                .primed_date()
                .unwrap_or_else(|| app.today())
                .to_string();
            let date = match tokens.get(3) {
                Some(d) if d.eq_ignore_ascii_case("today") => Some(primed.as_str()),
                other => other.copied(),
            };
            let form = RawForm {
                kind: tokens.get(1).copied(),
                amount: tokens.get(2).copied(),
                note: rest_after(line, 4),
                date,
            };
            // Already reported through the view.
            let _ = app.submit(&form);
        }
        "filter" => match tokens.get(1).map(|s| s.parse::<Filter>()) {
            Some(Ok(f)) => app.set_filter(f),
            Some(Err(e)) => app.view_mut().notify(&e.to_string()),
            None => app.view_mut().notify("usage: filter <all|income|expense>"),
        },
        "list" => {
            let f = app.active_filter();
            app.set_filter(f);
        }
        "balance" => {
            let b = app.balance();
            app.view_mut().show_balance(&b);
        }
        "rm" | "delete" => match tokens.get(1) {
            Some(id) => match app.delete(id) {
                Err(Error::ConfirmationDeclined) => app.view_mut().notify("Deletion cancelled"),
                Ok(_) | Err(_) => {}
            },
            None => app.view_mut().notify("usage: rm <id>"),
        },
        "help" | "?" => app.view_mut().notify(HELP),
        "quit" | "exit" | "q" => return Flow::Quit,
        other => app
            .view_mut()
            .notify(&format!("Unknown command '{}'. Type 'help'.", other)),
    }
    Flow::Continue
}
