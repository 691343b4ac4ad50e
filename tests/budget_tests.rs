// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use buddybudget::calc::{self, HealthTier, Severity};
use buddybudget::commands::budgets;
use buddybudget::models::{Budget, Category, Transaction, TxType};
use buddybudget::store::{Collection, MemoryStore, RecordStore};
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 16)
        .unwrap()
        .and_hms_opt(8, 30, 0)
        .unwrap()
}

fn tx(id: i64, kind: TxType, amount: i64, category: Category) -> Transaction {
    Transaction {
        id,
        kind,
        amount: Decimal::from(amount),
        category,
        date: now().date(),
        description: None,
    }
}

#[test]
fn budget_crud_round() {
    let mut store = RecordStore::new(MemoryStore::new());
    let b = budgets::set(&mut store, Category::Food, Decimal::from(100), now()).unwrap();
    budgets::edit(&mut store, b.id, Category::Health, Decimal::from(40)).unwrap();
    let all: Vec<Budget> = store.list(Collection::Budgets).unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].category, Category::Health);
    assert!(budgets::edit(&mut store, b.id + 1, Category::Food, Decimal::ONE).is_err());
    assert!(budgets::remove(&mut store, b.id).unwrap());
    assert!(!budgets::remove(&mut store, b.id).unwrap());
}

#[test]
fn negative_limit_rejected() {
    let mut store = RecordStore::new(MemoryStore::new());
    assert!(budgets::set(&mut store, Category::Food, Decimal::from(-1), now()).is_err());
}

#[test]
fn health_with_budgets_and_savings() {
    let budgets = vec![
        Budget {
            id: 1,
            category: Category::Food,
            limit: Decimal::from(100),
        },
        Budget {
            id: 2,
            category: Category::Travel,
            limit: Decimal::from(50),
        },
    ];
    let txs = vec![
        tx(1, TxType::Income, 1000, Category::Salary),
        tx(2, TxType::Expense, 150, Category::Food),
        tx(3, TxType::Expense, 650, Category::Shopping),
    ];
    let score = calc::health_score(&txs, &budgets);
    assert_eq!(score.savings, Decimal::from(50));
    assert_eq!(score.budget, Decimal::from(35));
    assert_eq!(score.total, 85);
    assert_eq!(score.tier, HealthTier::Excellent);

    let usage = calc::budget_utilization(&budgets, &txs);
    assert_eq!(usage[0].severity, Severity::Danger);
    assert_eq!(usage[1].severity, Severity::Normal);
    assert_eq!(usage[1].percent, Decimal::ZERO);
}

#[test]
fn spending_without_income_scores_only_budgets() {
    let txs = vec![tx(1, TxType::Expense, 100, Category::Food)];
    let score = calc::health_score(&txs, &[]);
    assert_eq!(score.savings, Decimal::ZERO);
    assert_eq!(score.total, 50);
    assert_eq!(score.tier, HealthTier::NeedsAttention);
}

#[test]
fn balance_is_income_minus_expense() {
    let txs = vec![
        tx(1, TxType::Income, 300, Category::Salary),
        tx(2, TxType::Expense, 120, Category::Food),
        tx(3, TxType::Expense, 200, Category::Utilities),
    ];
    let t = calc::totals(&txs);
    assert_eq!(t.balance, Decimal::from(-20));
}

#[test]
fn danger_starts_above_ninety_percent() {
    let budgets = vec![
        Budget {
            id: 1,
            category: Category::Food,
            limit: Decimal::from(100),
        },
        Budget {
            id: 2,
            category: Category::Travel,
            limit: Decimal::from(100),
        },
    ];
    let txs = vec![
        tx(1, TxType::Expense, 90, Category::Food),
        tx(2, TxType::Expense, 91, Category::Travel),
    ];
    let usage = calc::budget_utilization(&budgets, &txs);
    assert_eq!(usage[0].percent, Decimal::from(90));
    assert_eq!(usage[0].severity, Severity::Normal);
    assert_eq!(usage[1].percent, Decimal::from(91));
    assert_eq!(usage[1].severity, Severity::Danger);
}
