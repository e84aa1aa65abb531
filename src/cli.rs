// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version, value_parser};

use crate::config::{DEFAULT_COLLECTION, DEFAULT_POLL_MS};

fn type_arg(default: Option<&'static str>) -> Arg {
    let arg = Arg::new("type")
        .long("type")
        .short('t')
        .value_parser(["income", "expense"])
        .help("Transaction type");
    match default {
        Some(d) => arg.default_value(d),
        None => arg,
    }
}

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    )
}

pub fn build_cli() -> Command {
    Command::new("moneyjar")
        .about("Track income and expenses with a live balance")
        .version(crate_version!())
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .env("MONEYJAR_DB")
                .value_name("PATH")
                .help("SQLite file shared by every client (defaults to the platform data dir)"),
        )
        .arg(
            Arg::new("collection")
                .long("collection")
                .global(true)
                .env("MONEYJAR_COLLECTION")
                .default_value(DEFAULT_COLLECTION)
                .help("Store path holding the transactions"),
        )
        .arg(
            Arg::new("poll_ms")
                .long("poll-ms")
                .global(true)
                .env("MONEYJAR_POLL_MS")
                .value_parser(value_parser!(u64))
                .default_value(DEFAULT_POLL_MS)
                .help("How often subscriptions check for changes, in milliseconds"),
        )
        .subcommand(Command::new("init").about("Create the database if it does not exist"))
        .subcommand(
            Command::new("tx")
                .about("Record, list and delete transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction")
                        .arg(
                            Arg::new("description")
                                .long("description")
                                .short('d')
                                .required(true),
                        )
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .short('a')
                                .required(true)
                                .allow_hyphen_values(true),
                        )
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .short('c')
                                .required(true),
                        )
                        .arg(type_arg(Some("income"))),
                )
                .subcommand(json_args(
                    Command::new("list").about("List transactions, newest first").arg(
                        Arg::new("limit")
                            .long("limit")
                            .value_parser(value_parser!(usize)),
                    ),
                ))
                .subcommand(
                    Command::new("rm")
                        .about("Delete one transaction by its store key")
                        .arg(Arg::new("key").long("key").required(true)),
                )
                .subcommand(
                    Command::new("clear").about("Delete every transaction").arg(
                        Arg::new("yes")
                            .long("yes")
                            .short('y')
                            .action(ArgAction::SetTrue)
                            .help("Skip the confirmation prompt"),
                    ),
                ),
        )
        .subcommand(json_args(
            Command::new("summary").about("Show balance, income and expense totals"),
        ))
        .subcommand(
            Command::new("category")
                .about("Show the category registry")
                .subcommand(Command::new("list").arg(type_arg(None))),
        )
        .subcommand(
            Command::new("watch")
                .about("Follow live updates and re-render on every change")
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize)),
                ),
        )
}
