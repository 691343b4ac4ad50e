// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::calc::{self, ChartKind, Totals};
use crate::gamification::GameState;
use crate::models::{Budget, Goal, Transaction};
use crate::store::{Collection, KeyValue, RecordStore};
use crate::utils::{
    current_currency, fmt_money, fmt_percent, json_flags, maybe_print_json, pretty_table,
    required,
};
use anyhow::Result;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;

/// Everything the dashboard shows after a mutation.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub totals: Totals,
    pub savings: Decimal,
    pub health: calc::HealthScore,
    pub level: u64,
    pub xp: u64,
    pub streak: u32,
    pub goals: usize,
    pub budgets: usize,
}

pub fn dashboard<S: KeyValue>(store: &RecordStore<S>) -> Result<Dashboard> {
    let txs: Vec<Transaction> = store.list_or_default(Collection::Transactions);
    let budgets: Vec<Budget> = store.list_or_default(Collection::Budgets);
    let goals: Vec<Goal> = store.list_or_default(Collection::Goals);
    let game = GameState::load(store)?;
    let totals = calc::totals(&txs);
    Ok(Dashboard {
        totals,
        savings: totals.balance,
        health: calc::health_score(&txs, &budgets),
        level: game.level(),
        xp: game.xp,
        streak: game.streak,
        goals: goals.len(),
        budgets: budgets.len(),
    })
}

pub fn handle<S: KeyValue>(
    store: &RecordStore<S>,
    m: &clap::ArgMatches,
    now: NaiveDateTime,
) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(store, sub)?,
        Some(("health", sub)) => health(store, sub)?,
        Some(("categories", sub)) => categories(store, sub)?,
        Some(("budgets", sub)) => super::budgets::list(store, sub)?,
        Some(("weekly", sub)) => weekly(store, sub, now)?,
        Some(("balance", sub)) => balance(store, sub)?,
        Some(("chart", sub)) => {
            let kind = match required(sub, "kind")? {
                "bar" => ChartKind::Bar,
                "line" => ChartKind::Line,
                "weekly" => ChartKind::Weekly,
                _ => ChartKind::Doughnut,
            };
            let txs: Vec<Transaction> = store.list_or_default(Collection::Transactions);
            let series = calc::chart(kind, &txs, now.date());
            println!("{}", serde_json::to_string_pretty(&series)?);
        }
        _ => {}
    }
    Ok(())
}

fn summary<S: KeyValue>(store: &RecordStore<S>, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let d = dashboard(store)?;
    if maybe_print_json(json_flag, jsonl_flag, &d)? {
        return Ok(());
    }
    let ccy = current_currency(store);
    let rows = vec![
        vec!["Income".into(), format!("+{}", fmt_money(&d.totals.income, ccy))],
        vec!["Expense".into(), format!("-{}", fmt_money(&d.totals.expense, ccy))],
        vec!["Balance".into(), fmt_money(&d.totals.balance, ccy)],
        vec!["Health".into(), d.health.total.to_string()],
        vec!["Level".into(), format!("Lvl {} ({} XP)", d.level, d.xp)],
        vec!["Streak".into(), format!("{} days", d.streak)],
    ];
    println!("{}", pretty_table(&["Metric", "Value"], rows));
    Ok(())
}

fn health<S: KeyValue>(store: &RecordStore<S>, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let txs: Vec<Transaction> = store.list_or_default(Collection::Transactions);
    let budgets: Vec<Budget> = store.list_or_default(Collection::Budgets);
    let score = calc::health_score(&txs, &budgets);
    if maybe_print_json(json_flag, jsonl_flag, &score)? {
        return Ok(());
    }
    println!("Financial health: {}/100", score.total);
    println!(
        "  savings {:.1}/50, budgets {}/50",
        score.savings, score.budget
    );
    println!("{}", score.tier.message());
    Ok(())
}

fn categories<S: KeyValue>(store: &RecordStore<S>, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let txs: Vec<Transaction> = store.list_or_default(Collection::Transactions);
    let spend = calc::category_spend(&txs);
    if maybe_print_json(json_flag, jsonl_flag, &spend)? {
        return Ok(());
    }
    let total: Decimal = spend.values().copied().sum();
    let ccy = current_currency(store);
    let mut items: Vec<_> = spend.into_iter().collect();
    items.sort_by(|a, b| b.1.cmp(&a.1));
    let rows: Vec<Vec<String>> = items
        .into_iter()
        .map(|(cat, amt)| {
            vec![
                cat.label(),
                fmt_money(&amt, ccy),
                fmt_percent(&calc::capped_percent(amt, total)),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Category", "Spent", "Share"], rows));
    Ok(())
}

fn weekly<S: KeyValue>(
    store: &RecordStore<S>,
    sub: &clap::ArgMatches,
    now: NaiveDateTime,
) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let txs: Vec<Transaction> = store.list_or_default(Collection::Transactions);
    let days = calc::weekly_series(&txs, now.date());
    if maybe_print_json(json_flag, jsonl_flag, &days)? {
        return Ok(());
    }
    let ccy = current_currency(store);
    let rows: Vec<Vec<String>> = days
        .iter()
        .map(|b| {
            vec![
                b.label.clone(),
                b.date.to_string(),
                fmt_money(&b.income, ccy),
                fmt_money(&b.expense, ccy),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Day", "Date", "Income", "Expense"], rows)
    );
    Ok(())
}

fn balance<S: KeyValue>(store: &RecordStore<S>, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let txs: Vec<Transaction> = store.list_or_default(Collection::Transactions);
    let points = calc::running_balance(&txs);
    if maybe_print_json(json_flag, jsonl_flag, &points)? {
        return Ok(());
    }
    let ccy = current_currency(store);
    let rows: Vec<Vec<String>> = points
        .iter()
        .map(|p| vec![p.date.to_string(), fmt_money(&p.balance, ccy)])
        .collect();
    println!("{}", pretty_table(&["Date", "Balance"], rows));
    Ok(())
}
