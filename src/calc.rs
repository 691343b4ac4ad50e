// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Derived state: pure folds over the stored collections.

use crate::models::{Budget, Category, Goal, Transaction, TxType};
use chrono::{Duration, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;
const HALF_SCORE: Decimal = Decimal::from_parts(50, 0, 0, false, 0);
// A 20% savings rate earns the full 50 points, i.e. 250 points per unit rate.
const SAVINGS_SLOPE: Decimal = Decimal::from_parts(250, 0, 0, false, 0);
const OVER_BUDGET_PENALTY: i64 = 15;
const DANGER_PERCENT: Decimal = Decimal::from_parts(90, 0, 0, false, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
}

pub fn totals(txs: &[Transaction]) -> Totals {
    let mut income = Decimal::ZERO;
    let mut expense = Decimal::ZERO;
    for t in txs {
        match t.kind {
            TxType::Income => income += t.amount,
            TxType::Expense => expense += t.amount,
        }
    }
    Totals {
        income,
        expense,
        balance: income - expense,
    }
}

pub fn category_spend(txs: &[Transaction]) -> BTreeMap<Category, Decimal> {
    let mut out = BTreeMap::new();
    for t in txs.iter().filter(|t| t.kind == TxType::Expense) {
        *out.entry(t.category).or_insert(Decimal::ZERO) += t.amount;
    }
    out
}

/// Expense total for one category, optionally ignoring the record being edited.
pub fn spent_in(txs: &[Transaction], category: Category, exclude_id: Option<i64>) -> Decimal {
    txs.iter()
        .filter(|t| t.kind == TxType::Expense && t.category == category)
        .filter(|t| Some(t.id) != exclude_id)
        .map(|t| t.amount)
        .sum()
}

/// `value / whole` as a percentage capped at 100. A zero `whole` counts as full.
pub fn capped_percent(value: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return HUNDRED;
    }
    (value / whole * HUNDRED).min(HUNDRED)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Normal,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetUsage {
    pub budget: Budget,
    pub spent: Decimal,
    pub percent: Decimal,
    pub severity: Severity,
}

pub fn budget_utilization(budgets: &[Budget], txs: &[Transaction]) -> Vec<BudgetUsage> {
    budgets
        .iter()
        .map(|b| {
            let spent = spent_in(txs, b.category, None);
            let percent = capped_percent(spent, b.limit);
            let severity = if percent > DANGER_PERCENT {
                Severity::Danger
            } else {
                Severity::Normal
            };
            BudgetUsage {
                budget: b.clone(),
                spent,
                percent,
                severity,
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "Exceeds budget of {limit} for {category}. Remaining: {remaining}"
)]
pub struct BudgetExceeded {
    pub category: Category,
    pub limit: Decimal,
    pub spent: Decimal,
    pub remaining: Decimal,
}

/// Admission rule for expenses: spend in the category, plus this amount,
/// must stay within the first budget set for that category.
pub fn check_budget(
    budgets: &[Budget],
    txs: &[Transaction],
    kind: TxType,
    category: Category,
    amount: Decimal,
    editing: Option<i64>,
) -> Result<(), BudgetExceeded> {
    if kind != TxType::Expense {
        return Ok(());
    }
    let Some(budget) = budgets.iter().find(|b| b.category == category) else {
        return Ok(());
    };
    let spent = spent_in(txs, category, editing);
    if spent + amount > budget.limit {
        return Err(BudgetExceeded {
            category,
            limit: budget.limit,
            spent,
            remaining: budget.limit - spent,
        });
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthTier {
    Excellent,
    Good,
    NeedsAttention,
}

impl HealthTier {
    fn for_score(total: u8) -> Self {
        if total > 80 {
            HealthTier::Excellent
        } else if total > 50 {
            HealthTier::Good
        } else {
            HealthTier::NeedsAttention
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            HealthTier::Excellent => "Excellent! You're a financial master.",
            HealthTier::Good => "Good job! Keep watching those budgets.",
            HealthTier::NeedsAttention => "Needs attention. Try to save more!",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HealthScore {
    pub savings: Decimal,
    pub budget: Decimal,
    pub total: u8,
    pub tier: HealthTier,
}

pub fn savings_component(income: Decimal, expense: Decimal) -> Decimal {
    if income.is_zero() {
        return if expense.is_zero() {
            HALF_SCORE
        } else {
            Decimal::ZERO
        };
    }
    let rate = (income - expense) / income;
    (rate * SAVINGS_SLOPE).max(Decimal::ZERO).min(HALF_SCORE)
}

pub fn budget_component(budgets: &[Budget], txs: &[Transaction]) -> Decimal {
    let over = budgets
        .iter()
        .filter(|b| spent_in(txs, b.category, None) > b.limit)
        .count() as i64;
    Decimal::from((50 - over * OVER_BUDGET_PENALTY).max(0))
}

pub fn health_score(txs: &[Transaction], budgets: &[Budget]) -> HealthScore {
    let t = totals(txs);
    let savings = savings_component(t.income, t.expense);
    let budget = budget_component(budgets, txs);
    let total = (savings + budget)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u8()
        .unwrap_or(0)
        .min(100);
    HealthScore {
        savings,
        budget,
        total,
        tier: HealthTier::for_score(total),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub label: String,
    pub income: Decimal,
    pub expense: Decimal,
}

/// Seven daily buckets ending on `today`, oldest first.
pub fn weekly_series(txs: &[Transaction], today: NaiveDate) -> Vec<DayBucket> {
    let mut buckets: Vec<DayBucket> = (0..7)
        .rev()
        .map(|back| {
            let date = today - Duration::days(back);
            DayBucket {
                date,
                label: date.format("%a").to_string(),
                income: Decimal::ZERO,
                expense: Decimal::ZERO,
            }
        })
        .collect();
    for t in txs {
        if let Some(b) = buckets.iter_mut().find(|b| b.date == t.date) {
            match t.kind {
                TxType::Income => b.income += t.amount,
                TxType::Expense => b.expense += t.amount,
            }
        }
    }
    buckets
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalancePoint {
    pub id: i64,
    pub date: NaiveDate,
    pub balance: Decimal,
}

pub const BALANCE_WINDOW: usize = 10;

/// Cumulative balance over the last ten transactions in creation order.
pub fn running_balance(txs: &[Transaction]) -> Vec<BalancePoint> {
    let mut sorted: Vec<&Transaction> = txs.iter().collect();
    sorted.sort_by_key(|t| t.id);
    let skip = sorted.len().saturating_sub(BALANCE_WINDOW);
    let mut balance = Decimal::ZERO;
    sorted
        .into_iter()
        .skip(skip)
        .map(|t| {
            match t.kind {
                TxType::Income => balance += t.amount,
                TxType::Expense => balance -= t.amount,
            }
            BalancePoint {
                id: t.id,
                date: t.date,
                balance,
            }
        })
        .collect()
}

/// Newest first.
pub fn recent(txs: &[Transaction], n: usize) -> Vec<Transaction> {
    let mut sorted = txs.to_vec();
    sorted.sort_by(|a, b| b.id.cmp(&a.id));
    sorted.truncate(n);
    sorted
}

pub fn goal_progress(goal: &Goal) -> Decimal {
    capped_percent(goal.current, goal.target)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Doughnut,
    Bar,
    Line,
    Weekly,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub label: String,
    pub data: Vec<Decimal>,
}

/// Labels plus one or more value arrays, shaped for a chart consumer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

pub fn chart(kind: ChartKind, txs: &[Transaction], today: NaiveDate) -> ChartSeries {
    match kind {
        ChartKind::Doughnut => {
            let spend = category_spend(txs);
            ChartSeries {
                labels: spend.keys().map(|c| c.label()).collect(),
                datasets: vec![Dataset {
                    label: "Spending".into(),
                    data: spend.values().copied().collect(),
                }],
            }
        }
        ChartKind::Bar => {
            let t = totals(txs);
            ChartSeries {
                labels: vec!["Income".into(), "Expense".into()],
                datasets: vec![Dataset {
                    label: "Amount".into(),
                    data: vec![t.income, t.expense],
                }],
            }
        }
        ChartKind::Line => {
            let points = running_balance(txs);
            ChartSeries {
                labels: points.iter().map(|p| p.date.to_string()).collect(),
                datasets: vec![Dataset {
                    label: "Balance".into(),
                    data: points.iter().map(|p| p.balance).collect(),
                }],
            }
        }
        ChartKind::Weekly => {
            let days = weekly_series(txs, today);
            ChartSeries {
                labels: days.iter().map(|d| d.label.clone()).collect(),
                datasets: vec![
                    Dataset {
                        label: "Income".into(),
                        data: days.iter().map(|d| d.income).collect(),
                    },
                    Dataset {
                        label: "Expense".into(),
                        data: days.iter().map(|d| d.expense).collect(),
                    },
                ],
            }
        }
    }
}
