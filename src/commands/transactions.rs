// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::calc::{self, BudgetExceeded};
use crate::gamification::{GameState, XpAward};
use crate::models::{Budget, Category, Transaction, TxType};
use crate::store::{Collection, KeyValue, RecordStore};
use crate::utils::{
    current_currency, fmt_money, json_flags, maybe_print_json, optional, parse_amount, parse_date,
    parse_id, pretty_table, require_yes, required,
};
use anyhow::{Context, Result, anyhow, bail};
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

pub const RECENT_COUNT: usize = 5;

/// Parsed form fields for a new or edited entry.
#[derive(Debug, Clone)]
pub struct TxDraft {
    pub kind: TxType,
    pub amount: Decimal,
    pub category: Option<Category>,
    pub date: NaiveDate,
    pub description: Option<String>,
}

impl TxDraft {
    fn resolved_category(&self) -> Result<Category> {
        match self.kind {
            TxType::Income => Ok(Category::Salary),
            TxType::Expense => self
                .category
                .ok_or_else(|| anyhow!("Expenses need a --category")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AddOutcome {
    pub transaction: Transaction,
    pub award: XpAward,
}

fn admit<S: KeyValue>(
    store: &RecordStore<S>,
    draft: &TxDraft,
    category: Category,
    editing: Option<i64>,
) -> Result<()> {
    if draft.amount <= Decimal::ZERO {
        bail!("Amount must be positive, got {}", draft.amount);
    }
    let budgets: Vec<Budget> = store.list(Collection::Budgets)?;
    let txs: Vec<Transaction> = store.list(Collection::Transactions)?;
    calc::check_budget(&budgets, &txs, draft.kind, category, draft.amount, editing)?;
    Ok(())
}

/// Records a new entry and awards XP for it. Expenses that would overrun
/// their category budget are refused with a `BudgetExceeded` error and
/// nothing is stored.
pub fn add<S: KeyValue>(
    store: &mut RecordStore<S>,
    draft: TxDraft,
    now: NaiveDateTime,
) -> Result<AddOutcome> {
    let category = draft.resolved_category()?;
    admit(store, &draft, category, None)?;

    let transaction = Transaction {
        id: store.next_id::<Transaction>(Collection::Transactions, now)?,
        kind: draft.kind,
        amount: draft.amount,
        category,
        date: draft.date,
        description: draft.description,
    };
    store.insert(Collection::Transactions, transaction.clone())?;

    let mut game = GameState::load(store)?;
    let award = game.award(transaction.amount);
    game.save(store)?;

    Ok(AddOutcome { transaction, award })
}

/// Full replace by id. Edits never award XP.
pub fn edit<S: KeyValue>(store: &mut RecordStore<S>, id: i64, draft: TxDraft) -> Result<Transaction> {
    let category = draft.resolved_category()?;
    admit(store, &draft, category, Some(id))?;
    let transaction = Transaction {
        id,
        kind: draft.kind,
        amount: draft.amount,
        category,
        date: draft.date,
        description: draft.description,
    };
    if !store.replace(Collection::Transactions, transaction.clone())? {
        bail!("Transaction {} not found", id);
    }
    Ok(transaction)
}

pub fn remove<S: KeyValue>(store: &mut RecordStore<S>, id: i64) -> Result<bool> {
    Ok(store.remove_by_id::<Transaction>(Collection::Transactions, id)?)
}

/// Clears the whole history and returns how many entries were dropped.
pub fn reset<S: KeyValue>(store: &mut RecordStore<S>) -> Result<usize> {
    let count = store.list_or_default::<Transaction>(Collection::Transactions).len();
    store.set_all::<Transaction>(Collection::Transactions, &[])?;
    Ok(count)
}

pub fn handle<S: KeyValue>(
    store: &mut RecordStore<S>,
    m: &clap::ArgMatches,
    now: NaiveDateTime,
) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add_cmd(store, sub, now)?,
        Some(("edit", sub)) => edit_cmd(store, sub)?,
        Some(("rm", sub)) => {
            require_yes(sub, "delete this transaction")?;
            let id = parse_id(required(sub, "id")?)?;
            if remove(store, id)? {
                println!("Transaction deleted");
            } else {
                println!("No transaction with id {}", id);
            }
        }
        Some(("list", sub)) => list(store, sub)?,
        Some(("recent", sub)) => {
            let txs: Vec<Transaction> = store.list_or_default(Collection::Transactions);
            print_rows(store, sub, calc::recent(&txs, RECENT_COUNT))?;
        }
        Some(("reset", sub)) => {
            require_yes(sub, "delete ALL income and expense history")?;
            let n = reset(store)?;
            println!("All transactions cleared ({} removed)", n);
        }
        _ => {}
    }
    Ok(())
}

fn draft_from(sub: &clap::ArgMatches, today: NaiveDate) -> Result<TxDraft> {
    let kind: TxType = required(sub, "type")?.parse()?;
    let amount = parse_amount(required(sub, "amount")?)?;
    let category = optional(sub, "category")
        .map(|c| c.parse::<Category>())
        .transpose()?;
    let date = match optional(sub, "date") {
        Some(s) => parse_date(s)?,
        None => today,
    };
    let description = optional(sub, "description").map(|s| s.to_string());
    Ok(TxDraft {
        kind,
        amount,
        category,
        date,
        description,
    })
}

/// Starts from the stored entry; only the flags given on the command line
/// replace its fields.
pub fn edit_draft(sub: &clap::ArgMatches, stored: &Transaction) -> Result<TxDraft> {
    let kind = match optional(sub, "type") {
        Some(t) => t.parse()?,
        None => stored.kind,
    };
    let amount = match optional(sub, "amount") {
        Some(a) => parse_amount(a)?,
        None => stored.amount,
    };
    let category = match optional(sub, "category") {
        Some(c) => c.parse::<Category>()?,
        None => stored.category,
    };
    let date = match optional(sub, "date") {
        Some(s) => parse_date(s)?,
        None => stored.date,
    };
    let description = match optional(sub, "description") {
        Some(s) => Some(s.to_string()),
        None => stored.description.clone(),
    };
    Ok(TxDraft {
        kind,
        amount,
        category: Some(category),
        date,
        description,
    })
}

fn refused<S: KeyValue>(store: &RecordStore<S>, err: anyhow::Error) -> anyhow::Error {
    match err.downcast_ref::<BudgetExceeded>() {
        Some(b) => {
            let ccy = current_currency(store);
            anyhow!(
                "Transaction invalid! Exceeds budget of {} for {}. Remaining: {}",
                fmt_money(&b.limit, ccy),
                b.category,
                fmt_money(&b.remaining, ccy)
            )
        }
        None => err,
    }
}

fn add_cmd<S: KeyValue>(
    store: &mut RecordStore<S>,
    sub: &clap::ArgMatches,
    now: NaiveDateTime,
) -> Result<()> {
    let draft = draft_from(sub, now.date())?;
    let out = match add(store, draft, now) {
        Ok(out) => out,
        Err(err) => return Err(refused(store, err)),
    };
    let t = &out.transaction;
    println!(
        "{} {} ({}) on {} [id {}], +{} XP",
        if t.kind == TxType::Income {
            "Funds added:"
        } else {
            "Expense logged:"
        },
        fmt_money(&t.amount, current_currency(store)),
        t.category,
        t.date,
        t.id,
        out.award.gained
    );
    if out.award.leveled_up() {
        println!("Level Up! You are now Level {}!", out.award.new_level);
    }
    Ok(())
}

fn edit_cmd<S: KeyValue>(store: &mut RecordStore<S>, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(required(sub, "id")?)?;
    let stored: Transaction = store
        .find(Collection::Transactions, id)?
        .with_context(|| format!("Transaction {} not found", id))?;
    let draft = edit_draft(sub, &stored)?;
    match edit(store, id, draft) {
        Ok(t) => {
            println!("Transaction {} updated", t.id);
            Ok(())
        }
        Err(err) => Err(refused(store, err)),
    }
}

/// Newest date first, later ids first within a day, optionally truncated.
pub fn query_rows<S: KeyValue>(store: &RecordStore<S>, limit: Option<usize>) -> Vec<Transaction> {
    let mut txs: Vec<Transaction> = store.list_or_default(Collection::Transactions);
    txs.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
    if let Some(n) = limit {
        txs.truncate(n);
    }
    txs
}

fn list<S: KeyValue>(store: &RecordStore<S>, sub: &clap::ArgMatches) -> Result<()> {
    let limit = sub.get_one::<usize>("limit").copied();
    print_rows(store, sub, query_rows(store, limit))
}

fn print_rows<S: KeyValue>(
    store: &RecordStore<S>,
    sub: &clap::ArgMatches,
    data: Vec<Transaction>,
) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    if maybe_print_json(json_flag, jsonl_flag, &data)? {
        return Ok(());
    }
    let ccy = current_currency(store);
    let rows: Vec<Vec<String>> = data
        .iter()
        .map(|t| {
            let signed = match t.kind {
                TxType::Income => format!("+{}", fmt_money(&t.amount, ccy)),
                TxType::Expense => format!("-{}", fmt_money(&t.amount, ccy)),
            };
            vec![
                t.id.to_string(),
                t.date.to_string(),
                t.kind.to_string(),
                t.category.label(),
                signed,
                t.description.clone().unwrap_or_default(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["ID", "Date", "Type", "Category", "Amount", "Description"],
            rows
        )
    );
    Ok(())
}
