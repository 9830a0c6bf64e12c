// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::ENDPOINT_ENV;
use crate::report::Period;
use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Pretty JSON output"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("One JSON object per line"),
    )
}

fn period_arg() -> Arg {
    Arg::new("period")
        .long("period")
        .value_parser(Period::NAMES)
        .default_value("day")
}

pub fn build_cli() -> Command {
    Command::new("kasir")
        .version(clap::crate_version!())
        .about("Point-of-sale and bookkeeping client for a spreadsheet-backed endpoint")
        .arg(
            Arg::new("endpoint")
                .long("endpoint")
                .global(true)
                .env(ENDPOINT_ENV)
                .help("Base URL of the remote endpoint"),
        )
        .subcommand(
            Command::new("login")
                .about("Log in and remember the role")
                .arg(Arg::new("username").long("username").short('u').required(true))
                .arg(
                    Arg::new("password")
                        .long("password")
                        .short('p')
                        .env("KASIR_PASSWORD")
                        .hide_env_values(true)
                        .required(true),
                ),
        )
        .subcommand(Command::new("logout").about("Forget the stored role"))
        .subcommand(Command::new("open").about("Open the page for the stored role"))
        .subcommand(Command::new("seller").about("Interactive cashier page"))
        .subcommand(Command::new("admin").about("Interactive admin page"))
        .subcommand(json_flags(
            Command::new("report")
                .about("Income/expense per day for a period")
                .arg(period_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .value_parser(["csv", "json"])
                        .requires("out"),
                )
                .arg(Arg::new("out").long("out").requires("format")),
        ))
        .subcommand(json_flags(
            Command::new("products").about("List products"),
        ))
        .subcommand(json_flags(
            Command::new("records")
                .about("List transactions, newest first")
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize)),
                ),
        ))
        .subcommand(
            Command::new("config")
                .about("Client configuration")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(
                    Command::new("set-endpoint").arg(Arg::new("url").required(true)),
                )
                .subcommand(Command::new("show")),
        )
}

fn repl(name: &'static str) -> Command {
    Command::new(name)
        .no_binary_name(true)
        .disable_help_flag(true)
        .disable_version_flag(true)
        .subcommand_required(true)
        .subcommand(Command::new("go").arg(Arg::new("page").required(true)))
        .subcommand(Command::new("show").alias("render"))
        .subcommand(Command::new("refresh"))
        .subcommand(Command::new("logout"))
        .subcommand(Command::new("quit").alias("exit"))
}

/// Line grammar of the interactive cashier page.
pub fn seller_repl() -> Command {
    repl("seller")
        .subcommand(Command::new("add").arg(Arg::new("id").required(true)))
        .subcommand(Command::new("remove").arg(Arg::new("id").required(true)))
        .subcommand(Command::new("paid").arg(Arg::new("amount").required(true)))
        .subcommand(Command::new("pay").arg(Arg::new("amount")))
        .subcommand(
            Command::new("record")
                .arg(
                    Arg::new("type")
                        .required(true)
                        .value_parser(["income", "expense"]),
                )
                .arg(Arg::new("amount").required(true))
                .arg(
                    Arg::new("description")
                        .required(true)
                        .num_args(1..)
                        .trailing_var_arg(true),
                ),
        )
}

/// Line grammar of the interactive admin page.
pub fn admin_repl() -> Command {
    repl("admin")
        .subcommand(Command::new("filter").arg(Arg::new("period").required(true).value_parser(Period::NAMES)))
        .subcommand(
            Command::new("add-product")
                .arg(Arg::new("name").required(true))
                .arg(Arg::new("price").required(true))
                .arg(Arg::new("stock").required(true)),
        )
        .subcommand(
            Command::new("delete-product")
                .arg(Arg::new("id").required(true))
                .arg(
                    Arg::new("yes")
                        .short('y')
                        .long("yes")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("export")
                .arg(Arg::new("format").required(true).value_parser(["csv", "json"]))
                .arg(Arg::new("out").required(true)),
        )
}
