// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::{KeyValueStore, TransactionStore};
use anyhow::{Context, Result, bail};

pub fn handle<S: KeyValueStore>(kv: S, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub
        .get_one::<String>("format")
        .map(|s| s.trim().to_lowercase())
        .unwrap_or_else(|| "csv".to_string());
    let Some(out) = sub.get_one::<String>("out") else {
        bail!("--out is required");
    };
    if fmt != "csv" && fmt != "json" {
        bail!("Unknown format: {} (use csv|json)", fmt);
    }

    let txs = TransactionStore::new(kv)
        .load()
        .context("Stored transactions are unreadable; nothing exported")?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            if txs.is_empty() {
                wtr.write_record(["id", "kind", "amount", "note", "date"])?;
            }
            for t in &txs {
                wtr.serialize(t)?;
            }
            wtr.flush()?;
        }
        _ => {
            std::fs::write(out, serde_json::to_string_pretty(&txs)?)
                .with_context(|| format!("Write {}", out))?;
        }
    }
    println!("Exported {} transactions to {}", txs.len(), out);
    Ok(())
}
