// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::profile;
use crate::gamification::GameState;
use crate::models::Friend;
use crate::store::{Collection, KeyValue, RecordStore};
use crate::utils::{json_flags, maybe_print_json, pretty_table, require_yes, required};
use anyhow::{Result, bail};
use serde::Serialize;

fn friend(name: &str, level: u32, streak: u32, avatar: &str) -> Friend {
    Friend {
        name: name.into(),
        level,
        streak,
        avatar: avatar.into(),
    }
}

pub fn default_friends() -> Vec<Friend> {
    vec![
        friend("Alice", 5, 12, "user-3"),
        friend("Bob", 3, 4, "user-star"),
        friend("Charlie", 7, 30, "user-heart"),
        friend("Dave", 2, 1, "user-smile"),
    ]
}

fn seed_if_missing<S: KeyValue>(store: &mut RecordStore<S>) -> Result<()> {
    if store.raw(Collection::Friends.key())?.is_none() {
        store.set_all(Collection::Friends, &default_friends())?;
    }
    Ok(())
}

/// Seeds the mock friends the first time the list is read. Fails on a
/// corrupted list so add/rm never overwrite it.
pub fn load_or_seed<S: KeyValue>(store: &mut RecordStore<S>) -> Result<Vec<Friend>> {
    seed_if_missing(store)?;
    Ok(store.list(Collection::Friends)?)
}

pub fn add<S: KeyValue>(store: &mut RecordStore<S>, name: &str) -> Result<Friend> {
    let name = name.trim();
    if name.is_empty() {
        bail!("Friend name cannot be empty");
    }
    let mut friends = load_or_seed(store)?;
    if friends
        .iter()
        .any(|f| f.name.to_lowercase() == name.to_lowercase())
    {
        bail!("Friend already added!");
    }
    let f = friend(name, 1, 0, "user");
    friends.push(f.clone());
    store.set_all(Collection::Friends, &friends)?;
    Ok(f)
}

pub fn remove<S: KeyValue>(store: &mut RecordStore<S>, name: &str) -> Result<bool> {
    let friends = load_or_seed(store)?;
    let before = friends.len();
    let kept: Vec<Friend> = friends.into_iter().filter(|f| f.name != name).collect();
    if kept.len() == before {
        return Ok(false);
    }
    store.set_all(Collection::Friends, &kept)?;
    Ok(true)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub name: String,
    pub level: u64,
    pub streak: u32,
    pub is_user: bool,
}

/// Friends plus the user, by level then streak, both descending.
pub fn leaderboard<S: KeyValue>(store: &mut RecordStore<S>) -> Result<Vec<LeaderboardEntry>> {
    seed_if_missing(store)?;
    let friends: Vec<Friend> = store.list_or_default(Collection::Friends);
    let me = profile::load(store);
    let game = GameState::load(store)?;

    let mut all: Vec<(String, u64, u32, bool)> = friends
        .into_iter()
        .map(|f| (f.name, u64::from(f.level), f.streak, false))
        .collect();
    all.push((me.name, game.level(), game.streak, true));
    all.sort_by(|a, b| b.1.cmp(&a.1).then(b.2.cmp(&a.2)));

    Ok(all
        .into_iter()
        .enumerate()
        .map(|(i, (name, level, streak, is_user))| LeaderboardEntry {
            rank: i + 1,
            name,
            level,
            streak,
            is_user,
        })
        .collect())
}

pub fn handle<S: KeyValue>(store: &mut RecordStore<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => {
            let (json_flag, jsonl_flag) = json_flags(sub);
            let board = leaderboard(store)?;
            if !maybe_print_json(json_flag, jsonl_flag, &board)? {
                let rows: Vec<Vec<String>> = board
                    .iter()
                    .map(|e| {
                        let name = if e.is_user {
                            format!("{} (You)", e.name)
                        } else {
                            e.name.clone()
                        };
                        vec![
                            format!("#{}", e.rank),
                            name,
                            format!("Lvl {}", e.level),
                            e.streak.to_string(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["Rank", "Name", "Level", "Streak"], rows)
                );
            }
        }
        Some(("add", sub)) => {
            let f = add(store, required(sub, "name")?)?;
            println!("Friend request sent to {}!", f.name);
        }
        Some(("rm", sub)) => {
            let name = required(sub, "name")?;
            require_yes(sub, &format!("remove {} from friends", name))?;
            if remove(store, name)? {
                println!("{} removed.", name);
            } else {
                println!("No friend named {}", name);
            }
        }
        _ => {}
    }
    Ok(())
}
