// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::format::FormatRules;
use crate::store::KeyValueStore;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::{Context, Result};

pub fn handle<S: KeyValueStore>(mut kv: S, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => {
            let rules = FormatRules::load(&kv)?;
            if !maybe_print_json(sub.get_flag("json"), false, &rules)? {
                let rows = vec![
                    vec!["currency-symbol".to_string(), rules.currency_symbol],
                    vec!["group-separator".to_string(), rules.group_separator],
                    vec!["date-format".to_string(), rules.date_format],
                ];
                println!("{}", pretty_table(&["Setting", "Value"], rows));
            }
        }
        Some(("set", sub)) => {
            let name = sub
                .get_one::<String>("name")
                .context("setting name is required")?;
            let value = sub
                .get_one::<String>("value")
                .context("setting value is required")?;
            FormatRules::set(&mut kv, name, value)?;
            println!("Set {} = '{}'", name.trim(), value);
        }
        _ => {}
    }
    Ok(())
}
