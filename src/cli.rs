// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version, value_parser};
use std::path::PathBuf;

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
}

pub fn build_cli() -> Command {
    Command::new("saldo")
        .version(crate_version!())
        .about("Track income and expenses with a running balance")
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Database file (default: platform data dir; ':memory:' for a throwaway one)"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("More logging (-v info, -vv debug, -vvv trace)"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .global(true)
                .action(ArgAction::SetTrue)
                .conflicts_with("verbose")
                .help("Only log errors"),
        )
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("add")
                .about("Record an income or expense")
                .arg(
                    Arg::new("kind")
                        .long("kind")
                        .short('k')
                        .help("income|expense"),
                )
                .arg(
                    Arg::new("amount")
                        .long("amount")
                        .short('a')
                        .allow_hyphen_values(true)
                        .help("Whole units, e.g. 50000"),
                )
                .arg(Arg::new("note").long("note").short('n'))
                .arg(
                    Arg::new("date")
                        .long("date")
                        .short('d')
                        .help("YYYY-MM-DD (default: today)"),
                ),
        )
        .subcommand(json_flags(
            Command::new("list")
                .about("Show transactions")
                .arg(
                    Arg::new("filter")
                        .long("filter")
                        .short('f')
                        .help("all|income|expense"),
                )
                .arg(
                    Arg::new("jsonl")
                        .long("jsonl")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("json")
                        .help("Print one JSON row per line"),
                ),
        ))
        .subcommand(json_flags(
            Command::new("balance").about("Show income minus expenses"),
        ))
        .subcommand(
            Command::new("rm")
                .about("Delete a transaction")
                .arg(Arg::new("id").required(true))
                .arg(
                    Arg::new("yes")
                        .long("yes")
                        .short('y')
                        .action(ArgAction::SetTrue)
                        .help("Skip the confirmation prompt"),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Write all transactions to a file")
                .arg(
                    Arg::new("format")
                        .long("format")
                        .default_value("csv")
                        .help("csv|json"),
                )
                .arg(Arg::new("out").long("out").required(true)),
        )
        .subcommand(
            Command::new("config")
                .about("Formatting settings")
                .subcommand(json_flags(Command::new("show")))
                .subcommand(
                    Command::new("set")
                        .about("currency-symbol | group-separator | date-format")
                        .arg(Arg::new("name").required(true))
                        .arg(Arg::new("value").required(true).allow_hyphen_values(true)),
                ),
        )
        .subcommand(Command::new("shell").about("Interactive session"))
}
