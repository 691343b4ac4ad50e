// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::calc::{self, Severity};
use crate::models::{Budget, Category, Transaction};
use crate::store::{Collection, KeyValue, RecordStore};
use crate::utils::{
    current_currency, fmt_money, fmt_percent, json_flags, maybe_print_json, parse_decimal,
    parse_id, pretty_table, require_yes, required,
};
use anyhow::{Result, bail};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;

fn check_limit(limit: Decimal) -> Result<()> {
    if limit < Decimal::ZERO {
        bail!("Budget limit cannot be negative, got {}", limit);
    }
    Ok(())
}

pub fn set<S: KeyValue>(
    store: &mut RecordStore<S>,
    category: Category,
    limit: Decimal,
    now: NaiveDateTime,
) -> Result<Budget> {
    check_limit(limit)?;
    let budget = Budget {
        id: store.next_id::<Budget>(Collection::Budgets, now)?,
        category,
        limit,
    };
    store.insert(Collection::Budgets, budget.clone())?;
    Ok(budget)
}

pub fn edit<S: KeyValue>(
    store: &mut RecordStore<S>,
    id: i64,
    category: Category,
    limit: Decimal,
) -> Result<Budget> {
    check_limit(limit)?;
    let budget = Budget {
        id,
        category,
        limit,
    };
    if !store.replace(Collection::Budgets, budget.clone())? {
        bail!("Budget {} not found", id);
    }
    Ok(budget)
}

pub fn remove<S: KeyValue>(store: &mut RecordStore<S>, id: i64) -> Result<bool> {
    Ok(store.remove_by_id::<Budget>(Collection::Budgets, id)?)
}

pub fn handle<S: KeyValue>(
    store: &mut RecordStore<S>,
    m: &clap::ArgMatches,
    now: NaiveDateTime,
) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => {
            let category: Category = required(sub, "category")?.parse()?;
            let limit = parse_decimal(required(sub, "limit")?)?;
            let b = set(store, category, limit, now)?;
            println!(
                "Budget set: {} = {} [id {}]",
                b.category,
                fmt_money(&b.limit, current_currency(store)),
                b.id
            );
        }
        Some(("edit", sub)) => {
            let id = parse_id(required(sub, "id")?)?;
            let category: Category = required(sub, "category")?.parse()?;
            let limit = parse_decimal(required(sub, "limit")?)?;
            edit(store, id, category, limit)?;
            println!("Budget updated");
        }
        Some(("rm", sub)) => {
            require_yes(sub, "delete this budget")?;
            let id = parse_id(required(sub, "id")?)?;
            if remove(store, id)? {
                println!("Budget deleted");
            } else {
                println!("No budget with id {}", id);
            }
        }
        Some(("list", sub)) => list(store, sub)?,
        _ => {}
    }
    Ok(())
}

pub fn list<S: KeyValue>(store: &RecordStore<S>, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let budgets: Vec<Budget> = store.list_or_default(Collection::Budgets);
    let txs: Vec<Transaction> = store.list_or_default(Collection::Transactions);
    let usage = calc::budget_utilization(&budgets, &txs);
    if maybe_print_json(json_flag, jsonl_flag, &usage)? {
        return Ok(());
    }
    if usage.is_empty() {
        println!("No budgets set. Create one to start tracking!");
        return Ok(());
    }
    let ccy = current_currency(store);
    let rows: Vec<Vec<String>> = usage
        .iter()
        .map(|u| {
            vec![
                u.budget.id.to_string(),
                u.budget.category.label(),
                fmt_money(&u.spent, ccy),
                fmt_money(&u.budget.limit, ccy),
                fmt_percent(&u.percent),
                match u.severity {
                    Severity::Danger => "danger".to_string(),
                    Severity::Normal => String::new(),
                },
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["ID", "Category", "Spent", "Limit", "Used", ""], rows)
    );
    Ok(())
}
