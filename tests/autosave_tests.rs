// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use buddybudget::autosave;
use buddybudget::cli;
use buddybudget::commands::goals;
use buddybudget::models::{AutoSaveConfig, Category, Goal, Transaction};
use buddybudget::startup;
use buddybudget::store::{Collection, MemoryStore, RecordStore, keys};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

fn at(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

fn setup(config: AutoSaveConfig) -> RecordStore<MemoryStore> {
    let mut store = RecordStore::new(MemoryStore::new());
    goals::add(&mut store, "Vacation", Decimal::from(1000), Decimal::from(20), at(1, 9)).unwrap();
    goals::add(&mut store, "Laptop", Decimal::from(1500), Decimal::ZERO, at(1, 9)).unwrap();
    store.put(keys::AUTO_SAVE_CONFIG, &config).unwrap();
    store
}

#[test]
fn runs_once_per_day() {
    let mut store = setup(AutoSaveConfig {
        enabled: true,
        amount: Decimal::from(5),
        last_run: Some(at(15, 23)),
    });

    let run = autosave::run(&mut store, at(16, 7)).unwrap().unwrap();
    assert_eq!(run.goal_name, "Vacation");
    let goals: Vec<Goal> = store.list(Collection::Goals).unwrap();
    assert_eq!(goals[0].current, Decimal::from(25));
    assert_eq!(goals[1].current, Decimal::ZERO);
    let txs: Vec<Transaction> = store.list(Collection::Transactions).unwrap();
    assert_eq!(txs.len(), 1);
    assert_eq!(txs[0].category, Category::Investment);
    assert_eq!(txs[0].description.as_deref(), Some("Auto-Save: Vacation"));

    assert!(autosave::run(&mut store, at(16, 22)).unwrap().is_none());
    let txs: Vec<Transaction> = store.list(Collection::Transactions).unwrap();
    assert_eq!(txs.len(), 1);

    assert!(autosave::run(&mut store, at(17, 0)).unwrap().is_some());
}

#[test]
fn disabled_or_goalless_does_nothing() {
    let mut store = setup(AutoSaveConfig {
        enabled: false,
        amount: Decimal::from(5),
        last_run: None,
    });
    assert!(autosave::run(&mut store, at(16, 7)).unwrap().is_none());

    let mut empty = RecordStore::new(MemoryStore::new());
    autosave::enable(&mut empty, Decimal::from(5), at(14, 7)).unwrap();
    assert!(autosave::run(&mut empty, at(16, 7)).unwrap().is_none());
    let config: AutoSaveConfig = empty.get(keys::AUTO_SAVE_CONFIG).unwrap().unwrap();
    assert_eq!(config.last_run, Some(at(14, 7)));
}

#[test]
fn enabling_waits_for_tomorrow() {
    let mut store = setup(AutoSaveConfig::default());
    autosave::enable(&mut store, Decimal::from(3), at(16, 7)).unwrap();
    assert!(autosave::run(&mut store, at(16, 20)).unwrap().is_none());
    assert!(autosave::run(&mut store, at(17, 6)).unwrap().is_some());
}

#[test]
fn startup_counts_visit_and_auto_saves() {
    let mut store = setup(AutoSaveConfig {
        enabled: true,
        amount: Decimal::from(5),
        last_run: Some(at(15, 8)),
    });
    store.put(keys::STREAK, &4u32).unwrap();
    store.put(keys::LAST_LOGIN, "Thu Oct 15 2026").unwrap();

    let boot = startup::on_load(&mut store, at(16, 8)).unwrap();
    assert!(boot.new_day);
    assert_eq!(boot.streak, 5);
    assert!(boot.auto_save.is_some());

    let again = startup::on_load(&mut store, at(16, 9)).unwrap();
    assert!(!again.new_day);
    assert_eq!(again.streak, 5);
    assert!(again.auto_save.is_none());
}

#[test]
fn deposit_moves_money_into_goal() {
    let mut store = setup(AutoSaveConfig::default());
    let first: Vec<Goal> = store.list(Collection::Goals).unwrap();
    let (goal, tx) = goals::deposit(&mut store, first[1].id, Decimal::from(75), at(16, 9)).unwrap();
    assert_eq!(goal.current, Decimal::from(75));
    assert_eq!(tx.description.as_deref(), Some("Deposit to Laptop"));
    assert!(goals::deposit(&mut store, 1, Decimal::from(5), at(16, 9)).is_err());
    assert!(goals::deposit(&mut store, first[1].id, Decimal::ZERO, at(16, 9)).is_err());
}

#[test]
fn browser_written_config_with_utc_timestamp_loads() {
    let mut store = setup(AutoSaveConfig::default());
    store
        .put(
            keys::AUTO_SAVE_CONFIG,
            &serde_json::json!({
                "enabled": true,
                "amount": 10,
                "lastRun": "2026-10-14T08:00:00.000Z"
            }),
        )
        .unwrap();

    let config = autosave::load_config(&store).unwrap();
    assert!(config.enabled);
    assert_eq!(config.amount, Decimal::from(10));
    assert_eq!(config.last_run.map(|ts| ts.date().day()), Some(14));

    let boot = startup::on_load(&mut store, at(16, 12)).unwrap();
    assert!(boot.auto_save.is_some());
    let goals: Vec<Goal> = store.list(Collection::Goals).unwrap();
    assert_eq!(goals[0].current, Decimal::from(30));
}

#[test]
fn unreadable_config_does_not_block_startup() {
    let mut store = setup(AutoSaveConfig::default());
    store.put(keys::AUTO_SAVE_CONFIG, "garbage").unwrap();

    let boot = startup::on_load(&mut store, at(16, 12)).unwrap();
    assert!(boot.new_day);
    assert!(boot.auto_save.is_none());

    let config = autosave::disable(&mut store).unwrap();
    assert!(!config.enabled);
    assert_eq!(autosave::load_config(&store), Some(config));
}

#[test]
fn goal_edit_keeps_saved_amount() {
    let mut store = RecordStore::new(MemoryStore::new());
    let trip = goals::add(&mut store, "Trip", Decimal::from(1000), Decimal::from(400), at(1, 9)).unwrap();
    let id = trip.id.to_string();

    let matches = cli::build_cli().get_matches_from([
        "buddybudget", "goal", "edit", "--id", &id, "--name", "Big Trip", "--target", "2000",
    ]);
    if let Some(("goal", goal_m)) = matches.subcommand() {
        goals::handle(&mut store, goal_m, at(16, 9)).unwrap();
    } else {
        panic!("no goal subcommand");
    }

    let stored: Goal = store.find(Collection::Goals, trip.id).unwrap().unwrap();
    assert_eq!(stored.name, "Big Trip");
    assert_eq!(stored.target, Decimal::from(2000));
    assert_eq!(stored.current, Decimal::from(400));
}
