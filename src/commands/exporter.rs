// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Transaction;
use crate::store::{Collection, KeyValue, RecordStore};
use crate::utils::required;
use anyhow::{Result, bail};
use csv::{QuoteStyle, WriterBuilder};
use std::io::Write;

pub const CSV_HEADER: [&str; 5] = ["Date", "Type", "Category", "Amount", "Description"];

/// Writes the header plus one row per transaction. The description column
/// is always quoted; the other columns never need it.
pub fn write_csv<W: Write>(out: W, txs: &[Transaction]) -> Result<()> {
    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .from_writer(out);
    wtr.write_record(CSV_HEADER)?;
    for t in txs {
        let description = t.description.as_deref().unwrap_or_default();
        wtr.write_record([
            t.date.to_string(),
            t.kind.to_string(),
            t.category.to_string(),
            t.amount.to_string(),
            quoted(description),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

fn quoted(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

pub fn handle<S: KeyValue>(store: &RecordStore<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(store, sub),
        _ => Ok(()),
    }
}

fn export_transactions<S: KeyValue>(store: &RecordStore<S>, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = required(sub, "format")?.to_lowercase();
    let out = required(sub, "out")?;
    if fmt != "csv" && fmt != "json" {
        bail!("Unknown format: {} (use csv|json)", fmt);
    }

    let txs: Vec<Transaction> = store.list(Collection::Transactions)?;
    if txs.is_empty() {
        bail!("No data to export!");
    }
    match fmt.as_str() {
        "csv" => {
            let file = std::fs::File::create(out)?;
            write_csv(file, &txs)?;
        }
        _ => {
            std::fs::write(out, serde_json::to_string_pretty(&txs)?)?;
        }
    }
    println!("Exported {} transactions to {}", txs.len(), out);
    Ok(())
}
