// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::gamification::GameState;
use crate::store::{KeyValue, RecordStore};
use crate::utils::{json_flags, maybe_print_json, require_yes};
use anyhow::Result;
use chrono::NaiveDateTime;
use serde_json::json;

pub fn reset<S: KeyValue>(store: &mut RecordStore<S>, now: NaiveDateTime) -> Result<GameState> {
    let mut game = GameState::load(store)?;
    game.reset(now.date());
    game.save(store)?;
    Ok(game)
}

pub fn handle<S: KeyValue>(
    store: &mut RecordStore<S>,
    m: &clap::ArgMatches,
    now: NaiveDateTime,
) -> Result<()> {
    match m.subcommand() {
        Some(("status", sub)) => {
            let (json_flag, jsonl_flag) = json_flags(sub);
            let game = GameState::load(store)?;
            let view = json!({
                "level": game.level(),
                "xp": game.xp,
                "progress": game.progress(),
                "streak": game.streak,
                "lastLogin": game.last_login,
            });
            if !maybe_print_json(json_flag, jsonl_flag, &view)? {
                println!(
                    "Lvl {} | {} XP ({}% to next) | {}-day streak",
                    game.level(),
                    game.xp,
                    game.progress(),
                    game.streak
                );
            }
        }
        Some(("share", _)) => {
            println!("{}", GameState::load(store)?.share_text());
        }
        Some(("reset", sub)) => {
            require_yes(sub, "reset your level and streak")?;
            reset(store, now)?;
            println!("Level and Streak reset!");
        }
        _ => {}
    }
    Ok(())
}
