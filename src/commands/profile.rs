// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::gamification::GameState;
use crate::models::Profile;
use crate::store::{KeyValue, RecordStore, keys};
use crate::utils::{json_flags, maybe_print_json, optional, pretty_table};
use anyhow::Result;
use serde_json::json;

pub fn load<S: KeyValue>(store: &RecordStore<S>) -> Profile {
    store
        .get_or_default::<Option<Profile>>(keys::USER_PROFILE)
        .unwrap_or_default()
}

pub fn save<S: KeyValue>(store: &mut RecordStore<S>, profile: &Profile) -> Result<()> {
    store.put(keys::USER_PROFILE, profile)?;
    Ok(())
}

pub fn handle<S: KeyValue>(store: &mut RecordStore<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => show(store, sub)?,
        Some(("set", sub)) => {
            let mut profile = load(store);
            if let Some(v) = optional(sub, "name") {
                profile.name = v.to_string();
            }
            if let Some(v) = optional(sub, "title") {
                profile.title = v.to_string();
            }
            if let Some(v) = sub.get_one::<String>("bio") {
                profile.bio = v.clone();
            }
            if let Some(v) = optional(sub, "avatar") {
                profile.avatar = v.to_string();
            }
            save(store, &profile)?;
            println!("Profile Updated!");
        }
        _ => {}
    }
    Ok(())
}

fn show<S: KeyValue>(store: &RecordStore<S>, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let profile = load(store);
    let game = GameState::load(store)?;
    let view = json!({
        "profile": profile,
        "level": game.level(),
        "xp": game.xp,
        "streak": game.streak,
    });
    if maybe_print_json(json_flag, jsonl_flag, &view)? {
        return Ok(());
    }
    let rows = vec![
        vec!["Name".into(), profile.name],
        vec!["Title".into(), profile.title],
        vec!["Bio".into(), profile.bio],
        vec!["Avatar".into(), profile.avatar],
        vec!["Level".into(), game.level().to_string()],
        vec!["Streak".into(), game.streak.to_string()],
        vec!["XP".into(), game.xp.to_string()],
    ];
    println!("{}", pretty_table(&["Field", "Value"], rows));
    Ok(())
}
