// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn yes_arg() -> Arg {
    Arg::new("yes")
        .long("yes")
        .short('y')
        .action(ArgAction::SetTrue)
        .help("Confirm a destructive action")
}

fn id_arg() -> Arg {
    Arg::new("id").long("id").required(true)
}

fn tx_fields(cmd: Command, editing: bool) -> Command {
    let kind = Arg::new("type")
        .long("type")
        .value_parser(["income", "expense"]);
    let kind = if editing {
        kind.help("Defaults to the stored type")
    } else {
        kind.default_value("expense")
    };
    cmd.arg(kind)
        .arg(Arg::new("amount").long("amount").required(!editing))
        .arg(
            Arg::new("category")
                .long("category")
                .help("Expense category; income is always recorded as salary"),
        )
        .arg(Arg::new("date").long("date").help(if editing {
            "YYYY-MM-DD, defaults to the stored date"
        } else {
            "YYYY-MM-DD, defaults to today"
        }))
        .arg(Arg::new("description").long("description"))
}

pub fn build_cli() -> Command {
    Command::new("buddybudget")
        .about("BuddyBudget: budgets, goals, streaks and auto-save from the terminal")
        .version(clap::crate_version!())
        .subcommand(Command::new("init").about("Create the data store"))
        .subcommand(
            Command::new("tx")
                .about("Income and expense entries")
                .subcommand(tx_fields(Command::new("add"), false))
                .subcommand(tx_fields(Command::new("edit").arg(id_arg()), true))
                .subcommand(Command::new("rm").arg(id_arg()).arg(yes_arg()))
                .subcommand(json_args(
                    Command::new("list").arg(
                        Arg::new("limit")
                            .long("limit")
                            .value_parser(value_parser!(usize)),
                    ),
                ))
                .subcommand(json_args(Command::new("recent")))
                .subcommand(Command::new("reset").arg(yes_arg())),
        )
        .subcommand(
            Command::new("budget")
                .about("Per-category spending limits")
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("limit").long("limit").required(true)),
                )
                .subcommand(
                    Command::new("edit")
                        .arg(id_arg())
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("limit").long("limit").required(true)),
                )
                .subcommand(Command::new("rm").arg(id_arg()).arg(yes_arg()))
                .subcommand(json_args(Command::new("list"))),
        )
        .subcommand(
            Command::new("goal")
                .about("Savings goals")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("target").long("target").required(true))
                        .arg(Arg::new("current").long("current")),
                )
                .subcommand(
                    Command::new("edit")
                        .arg(id_arg())
                        .arg(Arg::new("name").long("name"))
                        .arg(Arg::new("target").long("target"))
                        .arg(Arg::new("current").long("current")),
                )
                .subcommand(Command::new("rm").arg(id_arg()).arg(yes_arg()))
                .subcommand(
                    Command::new("deposit")
                        .arg(id_arg())
                        .arg(Arg::new("amount").long("amount").required(true)),
                )
                .subcommand(json_args(Command::new("list"))),
        )
        .subcommand(
            Command::new("report")
                .about("Derived figures")
                .subcommand(json_args(Command::new("summary")))
                .subcommand(json_args(Command::new("health")))
                .subcommand(json_args(Command::new("categories")))
                .subcommand(json_args(Command::new("budgets")))
                .subcommand(json_args(Command::new("weekly")))
                .subcommand(json_args(Command::new("balance")))
                .subcommand(
                    Command::new("chart").arg(
                        Arg::new("kind")
                            .long("kind")
                            .default_value("doughnut")
                            .value_parser(["doughnut", "bar", "line", "weekly"]),
                    ),
                ),
        )
        .subcommand(
            Command::new("export").subcommand(
                Command::new("transactions")
                    .arg(
                        Arg::new("format")
                            .long("format")
                            .default_value("csv")
                            .help("csv|json"),
                    )
                    .arg(
                        Arg::new("out")
                            .long("out")
                            .default_value("buddybudget_data.csv"),
                    ),
            ),
        )
        .subcommand(
            Command::new("profile")
                .subcommand(json_args(Command::new("show")))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("name").long("name"))
                        .arg(Arg::new("title").long("title"))
                        .arg(Arg::new("bio").long("bio"))
                        .arg(Arg::new("avatar").long("avatar")),
                ),
        )
        .subcommand(
            Command::new("friends")
                .about("Mock leaderboard")
                .subcommand(json_args(Command::new("list")))
                .subcommand(Command::new("add").arg(Arg::new("name").long("name").required(true)))
                .subcommand(
                    Command::new("rm")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(yes_arg()),
                ),
        )
        .subcommand(
            Command::new("autosave")
                .about("Daily transfer into the first goal")
                .subcommand(json_args(Command::new("status")))
                .subcommand(
                    Command::new("enable").arg(Arg::new("amount").long("amount").required(true)),
                )
                .subcommand(Command::new("disable"))
                .subcommand(Command::new("run")),
        )
        .subcommand(
            Command::new("settings")
                .subcommand(Command::new("currency").arg(Arg::new("value")))
                .subcommand(Command::new("theme").arg(Arg::new("value"))),
        )
        .subcommand(
            Command::new("game")
                .about("Streak, XP and level")
                .subcommand(json_args(Command::new("status")))
                .subcommand(Command::new("share"))
                .subcommand(Command::new("reset").arg(yes_arg())),
        )
}
