// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Daily auto-save into the first goal. Runs at startup, at most once per
//! calendar day.

use crate::models::{AutoSaveConfig, Category, Goal, Transaction, TxType};
use crate::store::{Collection, KeyValue, RecordStore, keys};
use anyhow::{Result, bail};
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AutoSaveRun {
    pub goal_id: i64,
    pub goal_name: String,
    pub amount: Decimal,
    pub transaction_id: i64,
}

/// An unreadable config is reported and treated as never configured, so
/// startup keeps going and `enable`/`disable` can overwrite it.
pub fn load_config<S: KeyValue>(store: &RecordStore<S>) -> Option<AutoSaveConfig> {
    match store.get(keys::AUTO_SAVE_CONFIG) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("warning: {}; auto-save skipped", err);
            None
        }
    }
}

fn is_due(config: &AutoSaveConfig, today: NaiveDate) -> bool {
    let last = config
        .last_run
        .map(|ts| ts.date())
        .unwrap_or(NaiveDate::MIN);
    today > last
}

pub fn run<S: KeyValue>(store: &mut RecordStore<S>, now: NaiveDateTime) -> Result<Option<AutoSaveRun>> {
    let Some(mut config) = load_config(store) else {
        return Ok(None);
    };
    if !config.enabled || !is_due(&config, now.date()) {
        return Ok(None);
    }
    let goals: Vec<Goal> = store.list(Collection::Goals)?;
    let Some(mut goal) = goals.into_iter().next() else {
        return Ok(None);
    };

    goal.current += config.amount;
    store.replace(Collection::Goals, goal.clone())?;

    let id = store.next_id::<Transaction>(Collection::Transactions, now)?;
    store.insert(
        Collection::Transactions,
        Transaction {
            id,
            kind: TxType::Expense,
            amount: config.amount,
            category: Category::Investment,
            date: now.date(),
            description: Some(format!("Auto-Save: {}", goal.name)),
        },
    )?;

    config.last_run = Some(now);
    store.put(keys::AUTO_SAVE_CONFIG, &config)?;

    Ok(Some(AutoSaveRun {
        goal_id: goal.id,
        goal_name: goal.name,
        amount: config.amount,
        transaction_id: id,
    }))
}

/// Enabling stamps `lastRun` with now, so the first deposit lands tomorrow.
pub fn enable<S: KeyValue>(
    store: &mut RecordStore<S>,
    amount: Decimal,
    now: NaiveDateTime,
) -> Result<AutoSaveConfig> {
    if amount <= Decimal::ZERO {
        bail!("Auto-save amount must be positive, got {}", amount);
    }
    let mut config = load_config(store).unwrap_or_default();
    config.enabled = true;
    config.amount = amount;
    config.last_run = Some(now);
    store.put(keys::AUTO_SAVE_CONFIG, &config)?;
    Ok(config)
}

pub fn disable<S: KeyValue>(store: &mut RecordStore<S>) -> Result<AutoSaveConfig> {
    let mut config = load_config(store).unwrap_or_default();
    config.enabled = false;
    store.put(keys::AUTO_SAVE_CONFIG, &config)?;
    Ok(config)
}
