// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use buddybudget::calc::BudgetExceeded;
use buddybudget::commands::{budgets, transactions};
use buddybudget::commands::transactions::TxDraft;
use buddybudget::gamification::GameState;
use buddybudget::models::{Category, Transaction, TxType};
use buddybudget::store::{Collection, MemoryStore, RecordStore};
use buddybudget::{cli, store::keys};
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 16)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn expense(amount: i64, category: Category) -> TxDraft {
    TxDraft {
        kind: TxType::Expense,
        amount: Decimal::from(amount),
        category: Some(category),
        date: now().date(),
        description: None,
    }
}

fn setup() -> RecordStore<MemoryStore> {
    RecordStore::new(MemoryStore::new())
}

#[test]
fn income_is_always_salary() {
    let mut store = setup();
    let draft = TxDraft {
        kind: TxType::Income,
        amount: Decimal::from(500),
        category: Some(Category::Food),
        date: now().date(),
        description: Some("payday".into()),
    };
    let out = transactions::add(&mut store, draft, now()).unwrap();
    assert_eq!(out.transaction.category, Category::Salary);
    assert_eq!(out.award.gained, 60);
}

#[test]
fn expense_over_budget_is_refused() {
    let mut store = setup();
    budgets::set(&mut store, Category::Food, Decimal::from(100), now()).unwrap();
    transactions::add(&mut store, expense(90, Category::Food), now()).unwrap();

    let err = transactions::add(&mut store, expense(20, Category::Food), now()).unwrap_err();
    let refused = err.downcast_ref::<BudgetExceeded>().unwrap();
    assert_eq!(refused.remaining, Decimal::from(10));
    let txs: Vec<Transaction> = store.list(Collection::Transactions).unwrap();
    assert_eq!(txs.len(), 1);

    transactions::add(&mut store, expense(10, Category::Food), now()).unwrap();
    let txs: Vec<Transaction> = store.list(Collection::Transactions).unwrap();
    assert_eq!(txs.len(), 2);
}

#[test]
fn other_categories_ignore_the_budget() {
    let mut store = setup();
    budgets::set(&mut store, Category::Food, Decimal::from(10), now()).unwrap();
    transactions::add(&mut store, expense(500, Category::Travel), now()).unwrap();
}

#[test]
fn edit_excludes_its_own_amount_from_the_check() {
    let mut store = setup();
    budgets::set(&mut store, Category::Food, Decimal::from(100), now()).unwrap();
    let out = transactions::add(&mut store, expense(90, Category::Food), now()).unwrap();

    let edited =
        transactions::edit(&mut store, out.transaction.id, expense(100, Category::Food)).unwrap();
    assert_eq!(edited.amount, Decimal::from(100));
    assert!(transactions::edit(&mut store, out.transaction.id, expense(101, Category::Food)).is_err());
}

#[test]
fn edit_of_missing_id_fails_and_awards_nothing() {
    let mut store = setup();
    transactions::add(&mut store, expense(10, Category::Other), now()).unwrap();
    let xp_before = GameState::load(&store).unwrap().xp;
    assert!(transactions::edit(&mut store, 42, expense(10, Category::Other)).is_err());
    assert_eq!(GameState::load(&store).unwrap().xp, xp_before);
}

#[test]
fn crossing_a_thousand_xp_levels_up_once() {
    let mut store = setup();
    store.put(keys::XP, &990u64).unwrap();

    let out = transactions::add(&mut store, expense(100, Category::Shopping), now()).unwrap();
    assert_eq!(out.award.xp, 1010);
    assert!(out.award.leveled_up());
    assert_eq!(out.award.new_level, 2);

    let again = transactions::add(&mut store, expense(100, Category::Shopping), now()).unwrap();
    assert!(!again.award.leveled_up());
    assert_eq!(again.award.xp, 1030);
}

#[test]
fn ids_are_unique_within_the_same_millisecond() {
    let mut store = setup();
    let a = transactions::add(&mut store, expense(1, Category::Other), now()).unwrap();
    let b = transactions::add(&mut store, expense(1, Category::Other), now()).unwrap();
    assert!(b.transaction.id > a.transaction.id);
}

#[test]
fn rm_requires_confirmation() {
    let mut store = setup();
    let out = transactions::add(&mut store, expense(5, Category::Other), now()).unwrap();
    let id = out.transaction.id.to_string();

    let matches = cli::build_cli().get_matches_from(["buddybudget", "tx", "rm", "--id", &id]);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        let err = transactions::handle(&mut store, tx_m, now()).unwrap_err();
        assert!(err.to_string().contains("--yes"));
    } else {
        panic!("no tx subcommand");
    }
    assert_eq!(store.list::<Transaction>(Collection::Transactions).unwrap().len(), 1);

    let matches =
        cli::build_cli().get_matches_from(["buddybudget", "tx", "rm", "--id", &id, "--yes"]);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        transactions::handle(&mut store, tx_m, now()).unwrap();
    } else {
        panic!("no tx subcommand");
    }
    assert!(store.list::<Transaction>(Collection::Transactions).unwrap().is_empty());
}

#[test]
fn list_limit_respected() {
    let mut store = setup();
    for day in 1..=3 {
        let mut d = expense(10, Category::Food);
        d.date = NaiveDate::from_ymd_opt(2025, 1, day).unwrap();
        transactions::add(&mut store, d, now()).unwrap();
    }
    let rows = transactions::query_rows(&store, Some(2));
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].date.to_string(), "2025-01-03");
}

#[test]
fn reset_clears_history() {
    let mut store = setup();
    transactions::add(&mut store, expense(5, Category::Other), now()).unwrap();
    transactions::add(&mut store, expense(6, Category::Other), now()).unwrap();
    assert_eq!(transactions::reset(&mut store).unwrap(), 2);
    assert!(store.list::<Transaction>(Collection::Transactions).unwrap().is_empty());
}

fn run_tx(store: &mut RecordStore<MemoryStore>, args: &[&str]) {
    let matches = cli::build_cli().get_matches_from(["buddybudget", "tx"].iter().chain(args).copied());
    if let Some(("tx", tx_m)) = matches.subcommand() {
        transactions::handle(store, tx_m, now()).unwrap();
    } else {
        panic!("no tx subcommand");
    }
}

#[test]
fn edit_keeps_fields_that_were_not_given() {
    let mut store = setup();
    let mut lunch = expense(10, Category::Food);
    lunch.date = NaiveDate::from_ymd_opt(2026, 1, 2).unwrap();
    lunch.description = Some("lunch".into());
    let lunch = transactions::add(&mut store, lunch, now()).unwrap().transaction;
    let pay = TxDraft {
        kind: TxType::Income,
        amount: Decimal::from(200),
        category: None,
        date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        description: Some("wages".into()),
    };
    let pay = transactions::add(&mut store, pay, now()).unwrap().transaction;

    run_tx(&mut store, &["edit", "--id", &lunch.id.to_string(), "--amount", "12"]);
    run_tx(&mut store, &["edit", "--id", &pay.id.to_string(), "--amount", "250"]);

    let lunch_now: Transaction = store.find(Collection::Transactions, lunch.id).unwrap().unwrap();
    assert_eq!(lunch_now.amount, Decimal::from(12));
    assert_eq!(lunch_now.date, lunch.date);
    assert_eq!(lunch_now.description.as_deref(), Some("lunch"));
    assert_eq!(lunch_now.kind, TxType::Expense);
    assert_eq!(lunch_now.category, Category::Food);

    let pay_now: Transaction = store.find(Collection::Transactions, pay.id).unwrap().unwrap();
    assert_eq!(pay_now.kind, TxType::Income);
    assert_eq!(pay_now.category, Category::Salary);
    assert_eq!(pay_now.amount, Decimal::from(250));
    assert_eq!(pay_now.description.as_deref(), Some("wages"));
}
