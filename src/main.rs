// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use saldo::app::{App, StdinConfirm};
use saldo::error::already_reported;
use saldo::ledger::SystemClock;
use saldo::view::TerminalView;
use saldo::{cli, commands, db};

fn main() -> ExitCode {
    let matches = cli::build_cli().get_matches();
    init_logger(log_level(&matches));

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if already_reported(&e) => {
            debug!("{e:#}");
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn log_level(m: &clap::ArgMatches) -> LevelFilter {
    if m.get_flag("quiet") {
        return LevelFilter::ERROR;
    }
    match m.get_count("verbose") {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

fn run(matches: &clap::ArgMatches) -> Result<()> {
    let db_arg = matches.get_one::<PathBuf>("db");
    let mut store = db::open_or_init(db_arg.map(PathBuf::as_path))?;
    debug!(db = ?db_arg, "store opened");

    match matches.subcommand() {
        Some(("init", _)) => match db_arg {
            Some(p) => println!("Database initialized at {}", p.display()),
            None => println!("Database initialized at {}", db::db_path()?.display()),
        },
        Some(("add", sub)) => commands::transactions::add(&mut store, sub)?,
        Some(("list", sub)) => commands::transactions::list(&mut store, sub)?,
        Some(("balance", sub)) => commands::transactions::balance(&mut store, sub)?,
        Some(("rm", sub)) => {
            commands::transactions::remove(&mut store, sub)?;
        }
        Some(("export", sub)) => commands::exporter::handle(&mut store, sub)?,
        Some(("config", sub)) => commands::settings::handle(&mut store, sub)?,
        Some(("shell", _)) => {
            let mut app = App::open(
                &mut store,
                TerminalView::stdout(),
                Box::new(StdinConfirm),
                Box::new(SystemClock),
            )?;
            commands::shell::run(&mut app, commands::shell::read_stdin_line)?;
        }
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}

fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => EnvFilter::from_default_env(),
        None => EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), level)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
