// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::calc;
use crate::models::{Category, Goal, Transaction, TxType};
use crate::store::{Collection, KeyValue, RecordStore};
use crate::utils::{
    current_currency, fmt_money, fmt_percent, json_flags, maybe_print_json, optional,
    parse_amount, parse_decimal, parse_id, pretty_table, require_yes, required,
};
use anyhow::{Context, Result, bail};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;

pub fn add<S: KeyValue>(
    store: &mut RecordStore<S>,
    name: &str,
    target: Decimal,
    current: Decimal,
    now: NaiveDateTime,
) -> Result<Goal> {
    let name = name.trim();
    if name.is_empty() {
        bail!("Goal name cannot be empty");
    }
    let goal = Goal {
        id: store.next_id::<Goal>(Collection::Goals, now)?,
        name: name.to_string(),
        target,
        current,
    };
    store.insert(Collection::Goals, goal.clone())?;
    Ok(goal)
}

pub fn edit<S: KeyValue>(store: &mut RecordStore<S>, goal: Goal) -> Result<Goal> {
    if !store.replace(Collection::Goals, goal.clone())? {
        bail!("Goal {} not found", goal.id);
    }
    Ok(goal)
}

/// Applies the flags given on the command line over the stored goal.
pub fn edited(sub: &clap::ArgMatches, mut goal: Goal) -> Result<Goal> {
    if let Some(name) = optional(sub, "name") {
        let name = name.trim();
        if name.is_empty() {
            bail!("Goal name cannot be empty");
        }
        goal.name = name.to_string();
    }
    if let Some(t) = optional(sub, "target") {
        goal.target = parse_amount(t)?;
    }
    if let Some(c) = optional(sub, "current") {
        goal.current = parse_decimal(c)?;
    }
    Ok(goal)
}

pub fn remove<S: KeyValue>(store: &mut RecordStore<S>, id: i64) -> Result<bool> {
    Ok(store.remove_by_id::<Goal>(Collection::Goals, id)?)
}

/// Moves money into a goal and books it as an investment expense.
pub fn deposit<S: KeyValue>(
    store: &mut RecordStore<S>,
    id: i64,
    amount: Decimal,
    now: NaiveDateTime,
) -> Result<(Goal, Transaction)> {
    if amount <= Decimal::ZERO {
        bail!("Deposit must be positive, got {}", amount);
    }
    let mut goal: Goal = store
        .find(Collection::Goals, id)?
        .with_context(|| format!("Goal {} not found", id))?;
    goal.current += amount;
    store.replace(Collection::Goals, goal.clone())?;

    let tx = Transaction {
        id: store.next_id::<Transaction>(Collection::Transactions, now)?,
        kind: TxType::Expense,
        amount,
        category: Category::Investment,
        date: now.date(),
        description: Some(format!("Deposit to {}", goal.name)),
    };
    store.insert(Collection::Transactions, tx.clone())?;
    Ok((goal, tx))
}

pub fn handle<S: KeyValue>(
    store: &mut RecordStore<S>,
    m: &clap::ArgMatches,
    now: NaiveDateTime,
) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = required(sub, "name")?;
            let target = parse_amount(required(sub, "target")?)?;
            let current = optional(sub, "current")
                .map(parse_decimal)
                .transpose()?
                .unwrap_or(Decimal::ZERO);
            let g = add(store, name, target, current, now)?;
            println!("Goal added: {} [id {}]", g.name, g.id);
        }
        Some(("edit", sub)) => {
            let id = parse_id(required(sub, "id")?)?;
            let stored: Goal = store
                .find(Collection::Goals, id)?
                .with_context(|| format!("Goal {} not found", id))?;
            edit(store, edited(sub, stored)?)?;
            println!("Goal updated");
        }
        Some(("rm", sub)) => {
            require_yes(sub, "delete this goal")?;
            let id = parse_id(required(sub, "id")?)?;
            if remove(store, id)? {
                println!("Goal deleted");
            } else {
                println!("No goal with id {}", id);
            }
        }
        Some(("deposit", sub)) => {
            let id = parse_id(required(sub, "id")?)?;
            let amount = parse_amount(required(sub, "amount")?)?;
            let (goal, _) = deposit(store, id, amount, now)?;
            let ccy = current_currency(store);
            println!(
                "Deposited {} to {} ({} of {})",
                fmt_money(&amount, ccy),
                goal.name,
                fmt_money(&goal.current, ccy),
                fmt_money(&goal.target, ccy)
            );
        }
        Some(("list", sub)) => list(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn list<S: KeyValue>(store: &RecordStore<S>, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let goals: Vec<Goal> = store.list_or_default(Collection::Goals);
    if maybe_print_json(json_flag, jsonl_flag, &goals)? {
        return Ok(());
    }
    if goals.is_empty() {
        println!("No goals yet. Dream big!");
        return Ok(());
    }
    let ccy = current_currency(store);
    let rows: Vec<Vec<String>> = goals
        .iter()
        .map(|g| {
            vec![
                g.id.to_string(),
                g.name.clone(),
                fmt_money(&g.current, ccy),
                fmt_money(&g.target, ccy),
                fmt_percent(&calc::goal_progress(g)),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["ID", "Goal", "Saved", "Target", "Progress"], rows)
    );
    Ok(())
}
