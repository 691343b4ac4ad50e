// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::autosave;
use crate::store::{KeyValue, RecordStore};
use crate::utils::{
    current_currency, fmt_money, json_flags, maybe_print_json, parse_amount, required,
};
use anyhow::Result;
use chrono::NaiveDateTime;

pub fn handle<S: KeyValue>(
    store: &mut RecordStore<S>,
    m: &clap::ArgMatches,
    now: NaiveDateTime,
) -> Result<()> {
    match m.subcommand() {
        Some(("status", sub)) => {
            let (json_flag, jsonl_flag) = json_flags(sub);
            let config = autosave::load_config(store).unwrap_or_default();
            if !maybe_print_json(json_flag, jsonl_flag, &config)? {
                let state = if config.enabled { "enabled" } else { "disabled" };
                let last = config
                    .last_run
                    .map(|ts| ts.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_else(|| "never".into());
                println!(
                    "Auto-save {}: {}/day, last run {}",
                    state,
                    fmt_money(&config.amount, current_currency(store)),
                    last
                );
            }
        }
        Some(("enable", sub)) => {
            let amount = parse_amount(required(sub, "amount")?)?;
            let config = autosave::enable(store, amount, now)?;
            println!(
                "Auto-save enabled: {}/day",
                fmt_money(&config.amount, current_currency(store))
            );
        }
        Some(("disable", _)) => {
            autosave::disable(store)?;
            println!("Auto-save disabled");
        }
        Some(("run", _)) => match autosave::run(store, now)? {
            Some(run) => println!(
                "Auto-saved {} to {}",
                fmt_money(&run.amount, current_currency(store)),
                run.goal_name
            ),
            None => println!("Nothing to auto-save today"),
        },
        _ => {}
    }
    Ok(())
}
