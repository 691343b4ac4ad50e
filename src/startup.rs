// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::autosave::{self, AutoSaveRun};
use crate::gamification::GameState;
use crate::store::{KeyValue, RecordStore};
use anyhow::{Context, Result};
use chrono::NaiveDateTime;

#[derive(Debug, Clone, PartialEq)]
pub struct Startup {
    pub new_day: bool,
    pub streak: u32,
    pub auto_save: Option<AutoSaveRun>,
}

/// Runs on every start: count today's visit, then the daily auto-save.
pub fn on_load<S: KeyValue>(store: &mut RecordStore<S>, now: NaiveDateTime) -> Result<Startup> {
    let mut game = GameState::load(store)?;
    let new_day = game.register_visit(now.date());
    if new_day {
        game.save(store).context("Failed to record today's visit")?;
    }
    let auto_save = autosave::run(store, now).context("Auto-save failed")?;
    Ok(Startup {
        new_day,
        streak: game.streak,
        auto_save,
    })
}
