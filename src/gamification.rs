// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Streaks, XP and levels.

use crate::store::{KeyValue, RecordStore, keys};
use anyhow::Result;
use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

pub const XP_PER_LEVEL: u64 = 1000;
pub const BASE_XP: u64 = 10;

pub fn level(xp: u64) -> u64 {
    xp / XP_PER_LEVEL + 1
}

/// Percent of the way through the current level.
pub fn level_progress(xp: u64) -> u64 {
    (xp % XP_PER_LEVEL) / 10
}

/// Ten points per transaction plus one per ten units of amount.
pub fn xp_for(amount: Decimal) -> u64 {
    let bonus = (amount / Decimal::TEN).floor().to_u64().unwrap_or(0);
    BASE_XP + bonus
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct XpAward {
    pub gained: u64,
    pub xp: u64,
    pub old_level: u64,
    pub new_level: u64,
}

impl XpAward {
    pub fn leveled_up(&self) -> bool {
        self.new_level > self.old_level
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GameState {
    pub xp: u64,
    pub streak: u32,
    pub last_login: Option<NaiveDate>,
}

impl GameState {
    pub fn load<S: KeyValue>(store: &RecordStore<S>) -> Result<Self> {
        let last_login = store
            .get_text(keys::LAST_LOGIN)?
            .and_then(|s| parse_login_date(&s));
        Ok(Self {
            xp: store.get_or_default(keys::XP),
            streak: store.get_or_default(keys::STREAK),
            last_login,
        })
    }

    pub fn save<S: KeyValue>(&self, store: &mut RecordStore<S>) -> Result<()> {
        store.put(keys::XP, &self.xp)?;
        store.put(keys::STREAK, &self.streak)?;
        match self.last_login {
            Some(d) => store.put(keys::LAST_LOGIN, &d.to_string())?,
            None => store.delete(keys::LAST_LOGIN)?,
        }
        Ok(())
    }

    pub fn level(&self) -> u64 {
        level(self.xp)
    }

    pub fn progress(&self) -> u64 {
        level_progress(self.xp)
    }

    /// First activity of the day extends or restarts the streak.
    /// Returns false when today was already counted.
    pub fn register_visit(&mut self, today: NaiveDate) -> bool {
        if self.last_login == Some(today) {
            return false;
        }
        let yesterday = today - Duration::days(1);
        if self.last_login == Some(yesterday) {
            self.streak += 1;
        } else {
            self.streak = 1;
        }
        self.last_login = Some(today);
        true
    }

    pub fn award(&mut self, amount: Decimal) -> XpAward {
        let old_level = self.level();
        let gained = xp_for(amount);
        self.xp += gained;
        XpAward {
            gained,
            xp: self.xp,
            old_level,
            new_level: self.level(),
        }
    }

    pub fn reset(&mut self, today: NaiveDate) {
        self.xp = 0;
        self.streak = 0;
        self.last_login = Some(today);
    }

    pub fn share_text(&self) -> String {
        format!(
            "I'm Level {} with a {}-day streak on BuddyBudget! Can you beat me? #BuddyBudget",
            self.level(),
            self.streak
        )
    }
}

/// Accepts ISO dates and the older "Fri Oct 16 2026" form.
pub fn parse_login_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%a %b %d %Y"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn levels_start_at_one() {
        assert_eq!(level(0), 1);
        assert_eq!(level(999), 1);
        assert_eq!(level(1000), 2);
        assert_eq!(level_progress(1550), 55);
    }

    #[test]
    fn xp_for_floors_the_bonus() {
        assert_eq!(xp_for(Decimal::from(100)), 20);
        assert_eq!(xp_for(Decimal::new(999, 2)), 10);
        assert_eq!(xp_for(Decimal::new(12345, 1)), 133);
    }

    #[test]
    fn streak_transitions() {
        let mut g = GameState::default();
        assert!(g.register_visit(d(2026, 10, 14)));
        assert_eq!(g.streak, 1);
        assert!(g.register_visit(d(2026, 10, 15)));
        assert_eq!(g.streak, 2);
        assert!(!g.register_visit(d(2026, 10, 15)));
        assert_eq!(g.streak, 2);
        assert!(g.register_visit(d(2026, 10, 18)));
        assert_eq!(g.streak, 1);
    }

    #[test]
    fn legacy_login_dates_load() {
        assert_eq!(parse_login_date("Fri Oct 16 2026"), Some(d(2026, 10, 16)));
        assert_eq!(parse_login_date("2026-10-16"), Some(d(2026, 10, 16)));
        assert_eq!(parse_login_date("yesterday"), None);
    }

    #[test]
    fn state_round_trips_through_store() {
        let mut store = RecordStore::new(MemoryStore::new());
        let g = GameState {
            xp: 1234,
            streak: 3,
            last_login: Some(d(2026, 10, 16)),
        };
        g.save(&mut store).unwrap();
        assert_eq!(store.raw("lastLogin").unwrap().as_deref(), Some("\"2026-10-16\""));
        assert_eq!(GameState::load(&store).unwrap(), g);
    }
}
