// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Currency, Theme};
use crate::store::{KeyValue, RecordStore, keys};
use crate::utils::{current_currency, optional};
use anyhow::Result;

pub fn set_currency<S: KeyValue>(store: &mut RecordStore<S>, ccy: Currency) -> Result<()> {
    store.put(keys::CURRENCY, ccy.code())?;
    Ok(())
}

pub fn theme<S: KeyValue>(store: &RecordStore<S>) -> Theme {
    match store.get_text(keys::THEME) {
        Ok(Some(t)) => t.parse().unwrap_or(Theme::Dark),
        _ => Theme::Dark,
    }
}

pub fn set_theme<S: KeyValue>(store: &mut RecordStore<S>, theme: Theme) -> Result<()> {
    store.put(keys::THEME, theme.as_str())?;
    Ok(())
}

pub fn handle<S: KeyValue>(store: &mut RecordStore<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("currency", sub)) => match optional(sub, "value") {
            Some(v) => {
                let ccy: Currency = v.parse()?;
                set_currency(store, ccy)?;
                println!("Currency set to {} ({})", ccy.code(), ccy.symbol());
            }
            None => {
                let ccy = current_currency(store);
                println!("{} ({})", ccy.code(), ccy.symbol());
            }
        },
        Some(("theme", sub)) => match optional(sub, "value") {
            Some(v) => {
                let t: Theme = v.parse()?;
                set_theme(store, t)?;
                println!("Theme set to {}", t.as_str());
            }
            None => println!("{}", theme(store).as_str()),
        },
        _ => {}
    }
    Ok(())
}
