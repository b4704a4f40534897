// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

use clap::{Arg, ArgAction, Command, command, value_parser};

fn period_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("month")
            .long("month")
            .help("Billing month YYYY-MM (default: previous month)")
            .conflicts_with_all(["from", "to"]),
    )
    .arg(
        Arg::new("from")
            .long("from")
            .help("Range start YYYY-MM-DD")
            .requires("to"),
    )
    .arg(
        Arg::new("to")
            .long("to")
            .help("Range end YYYY-MM-DD, inclusive")
            .requires("from"),
    )
    .arg(
        Arg::new("company")
            .long("company")
            .help("Only accounts of this company"),
    )
}

fn sort_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("sort")
            .long("sort")
            .value_parser(["name", "amount"])
            .help("Sort key (default from config)"),
    )
    .arg(
        Arg::new("order")
            .long("order")
            .value_parser(["asc", "desc"])
            .help("Sort direction (default from config)"),
    )
}

fn output_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl"),
    )
    .arg(Arg::new("jsonl").long("jsonl").action(ArgAction::SetTrue))
}

fn grouping_arg(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("by")
            .long("by")
            .value_parser(["account", "total"])
            .default_value("account")
            .help("One share chart per account, or one over all accounts"),
    )
}

fn export_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("format")
            .long("format")
            .required(true)
            .help("csv | json"),
    )
    .arg(Arg::new("out").long("out").required(true).help("Output file"))
}

pub fn build_cli() -> Command {
    command!()
        .name("costboard")
        .about("AWS cost reports: sortable tables, bar and share charts")
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Config file (default: $COSTBOARD_CONFIG or platform config dir)"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("More log output on stderr (-v, -vv, -vvv)"),
        )
        .subcommand(output_args(sort_args(period_args(
            Command::new("costs")
                .about("Cost per account for a period")
                .arg(
                    Arg::new("no-chart")
                        .long("no-chart")
                        .action(ArgAction::SetTrue)
                        .help("Table only"),
                ),
        ))))
        .subcommand(output_args(grouping_arg(sort_args(period_args(
            Command::new("breakdown").about("Service shares per account for a period"),
        )))))
        .subcommand(output_args(
            Command::new("months").about("Billing months available in the database"),
        ))
        .subcommand(
            Command::new("export")
                .about("Write a shaped report to a file")
                .subcommand_required(true)
                .subcommand(export_args(sort_args(period_args(
                    Command::new("costs").about("Cost per account"),
                ))))
                .subcommand(export_args(grouping_arg(sort_args(period_args(
                    Command::new("breakdown").about("Service shares"),
                ))))),
        )
        .subcommand(Command::new("doctor").about("Check connection, tables and amounts"))
}
