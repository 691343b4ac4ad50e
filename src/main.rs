// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::Local;

use buddybudget::store::RecordStore;
use buddybudget::utils::{current_currency, fmt_money};
use buddybudget::{cli, commands, db, startup};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let mut store = RecordStore::new(db::open_or_init()?);
    let now = Local::now().naive_local();

    let boot = startup::on_load(&mut store, now)?;
    if let Some(run) = &boot.auto_save {
        println!(
            "Auto-saved {} to {}",
            fmt_money(&run.amount, current_currency(&store)),
            run.goal_name
        );
    }

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Store initialized at {}", db::db_path()?.display());
        }
        Some(("tx", sub)) => commands::transactions::handle(&mut store, sub, now)?,
        Some(("budget", sub)) => commands::budgets::handle(&mut store, sub, now)?,
        Some(("goal", sub)) => commands::goals::handle(&mut store, sub, now)?,
        Some(("report", sub)) => commands::reports::handle(&store, sub, now)?,
        Some(("export", sub)) => commands::exporter::handle(&store, sub)?,
        Some(("profile", sub)) => commands::profile::handle(&mut store, sub)?,
        Some(("friends", sub)) => commands::friends::handle(&mut store, sub)?,
        Some(("autosave", sub)) => commands::autosave::handle(&mut store, sub, now)?,
        Some(("settings", sub)) => commands::settings::handle(&mut store, sub)?,
        Some(("game", sub)) => commands::game::handle(&mut store, sub, now)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
