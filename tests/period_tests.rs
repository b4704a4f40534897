// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use costboard::cli;
use costboard::models::{Period, Sort, SortKey, SortOrder};
use costboard::utils::{period_from_args, sort_from_args};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn costs_matches(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["costboard", "costs"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    match matches.subcommand() {
        Some(("costs", sub)) => sub.clone(),
        _ => panic!("costs subcommand not parsed"),
    }
}

#[test]
fn month_bounds_are_half_open() {
    assert_eq!(
        Period::month(d(2025, 3, 17)).bounds(),
        (d(2025, 3, 1), d(2025, 4, 1))
    );
    assert_eq!(
        Period::month(d(2024, 12, 1)).bounds(),
        (d(2024, 12, 1), d(2025, 1, 1))
    );
}

#[test]
fn range_end_becomes_exclusive_next_day() {
    let p = Period::Range {
        start: d(2025, 2, 1),
        end: d(2025, 2, 28),
    };
    assert_eq!(p.bounds(), (d(2025, 2, 1), d(2025, 3, 1)));
    assert_eq!(p.to_string(), "2025-02-01 to 2025-02-28");
}

#[test]
fn default_period_is_previous_month() {
    assert_eq!(
        period_from_args(&costs_matches(&[]), d(2025, 1, 15)).unwrap(),
        Period::Month(d(2024, 12, 1))
    );
    assert_eq!(Period::previous_month(d(2025, 3, 31)).to_string(), "2025-02");
}

#[test]
fn period_args_parse_month_and_range() {
    let m = costs_matches(&["--month", "2025-03"]);
    assert_eq!(
        period_from_args(&m, d(2026, 1, 1)).unwrap(),
        Period::Month(d(2025, 3, 1))
    );
    let m = costs_matches(&["--from", "2025-03-01", "--to", "2025-03-15"]);
    assert_eq!(
        period_from_args(&m, d(2026, 1, 1)).unwrap(),
        Period::Range {
            start: d(2025, 3, 1),
            end: d(2025, 3, 15)
        }
    );
    let m = costs_matches(&["--month", "2025-3x"]);
    assert!(period_from_args(&m, d(2026, 1, 1)).is_err());
}

#[test]
fn sort_args_override_config_default() {
    let default = Sort::new(SortKey::Amount, SortOrder::Asc);
    let m = costs_matches(&[]);
    assert_eq!(sort_from_args(&m, default).unwrap(), default);
    let m = costs_matches(&["--sort", "name", "--order", "desc"]);
    assert_eq!(
        sort_from_args(&m, default).unwrap(),
        Sort::new(SortKey::Name, SortOrder::Desc)
    );
}
