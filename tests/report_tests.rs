// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use costboard::models::{AggregateRow, CostRow, Outcome, Sort, SortKey, SortOrder};
use costboard::report::{derive_shares, shape_breakdown, shape_costs};
use costboard::error::ShapeError;
use rusqlite::types::Value;
use rust_decimal::Decimal;

fn row(id: &str, name: Option<&str>, amount: Value) -> CostRow {
    CostRow {
        account_id: id.into(),
        company: name.map(String::from),
        amount,
    }
}

fn ids(outcome: Outcome<costboard::models::CostTable>) -> Vec<String> {
    outcome
        .into_data()
        .expect("data")
        .records
        .into_iter()
        .map(|r| r.account_id)
        .collect()
}

fn sample() -> Vec<CostRow> {
    vec![
        row("a", Some(""), Value::Integer(10)),
        row("b", Some("Acme"), Value::Integer(5)),
    ]
}

#[test]
fn absent_or_blank_name_falls_back_to_identifier() {
    let rows = vec![
        row("111", None, Value::Integer(1)),
        row("222", Some(""), Value::Integer(2)),
        row("333", Some("   "), Value::Integer(3)),
        row("444", Some("Globex"), Value::Integer(4)),
    ];
    let table = shape_costs(rows, Sort::default()).unwrap().into_data().unwrap();
    let names: Vec<(&str, &str)> = table
        .records
        .iter()
        .map(|r| (r.account_id.as_str(), r.display_name.as_str()))
        .collect();
    assert_eq!(
        names,
        vec![("111", "111"), ("222", "222"), ("333", "333"), ("444", "Globex")]
    );
    assert_eq!(table.records[1].company, None);
    assert_eq!(table.total, Decimal::from(10));
}

#[test]
fn amount_ascending_and_name_orders() {
    let by_amount = shape_costs(sample(), Sort::new(SortKey::Amount, SortOrder::Asc)).unwrap();
    assert_eq!(ids(by_amount), vec!["b", "a"]);

    let by_name = shape_costs(sample(), Sort::new(SortKey::Name, SortOrder::Asc)).unwrap();
    assert_eq!(ids(by_name), vec!["a", "b"]);

    let by_name_desc = shape_costs(sample(), Sort::new(SortKey::Name, SortOrder::Desc)).unwrap();
    assert_eq!(ids(by_name_desc), vec!["b", "a"]);

    let by_amount_desc =
        shape_costs(sample(), Sort::new(SortKey::Amount, SortOrder::Desc)).unwrap();
    assert_eq!(ids(by_amount_desc), vec!["a", "b"]);
}

#[test]
fn equal_amounts_order_by_identifier() {
    let rows = vec![
        row("z", None, Value::Integer(7)),
        row("m", None, Value::Integer(7)),
        row("c", None, Value::Integer(7)),
    ];
    let out = shape_costs(rows, Sort::new(SortKey::Amount, SortOrder::Asc)).unwrap();
    assert_eq!(ids(out), vec!["c", "m", "z"]);
}

#[test]
fn empty_rows_are_no_data() {
    assert!(shape_costs(Vec::new(), Sort::default()).unwrap().is_no_data());
    assert!(shape_breakdown(Vec::new(), Sort::default()).unwrap().is_no_data());
}

#[test]
fn mixed_amount_cells_are_coerced() {
    let rows = vec![
        row("t", None, Value::Text("12.34".into())),
        row("r", None, Value::Real(0.5)),
        row("i", None, Value::Integer(3)),
    ];
    let table = shape_costs(rows, Sort::default()).unwrap().into_data().unwrap();
    assert_eq!(table.total, Decimal::new(1584, 2));
}

#[test]
fn malformed_amount_is_an_error() {
    let rows = vec![
        row("ok", None, Value::Integer(1)),
        row("bad", Some("Initech"), Value::Text("n/a".into())),
    ];
    let err = shape_costs(rows, Sort::default()).unwrap_err();
    assert_eq!(
        err,
        ShapeError::InvalidAmount {
            id: "bad".into(),
            value: "'n/a'".into()
        }
    );
}

#[test]
fn rows_for_the_same_account_are_added_up() {
    let rows = vec![
        row("111", None, Value::Integer(10)),
        row("222", Some("Globex"), Value::Integer(1)),
        row("111", Some("Acme"), Value::Text("2.50".into())),
    ];
    let table = shape_costs(rows, Sort::default()).unwrap().into_data().unwrap();
    assert_eq!(table.records.len(), 2);
    assert_eq!(table.records[1].account_id, "111");
    assert_eq!(table.records[1].display_name, "Acme");
    assert_eq!(table.records[1].amount, Decimal::new(1250, 2));
    assert_eq!(table.total, Decimal::new(1350, 2));
}

#[test]
fn bad_cell_among_rows_of_one_account_is_an_error() {
    let rows = vec![
        row("111", Some("Acme"), Value::Integer(10)),
        row("111", Some("Acme"), Value::Null),
    ];
    let err = shape_costs(rows, Sort::default()).unwrap_err();
    assert!(matches!(err, ShapeError::InvalidAmount { ref id, .. } if id == "111"));
}

#[test]
fn cost_total_out_of_range_is_an_error() {
    let rows = vec![
        row("a", None, Value::Real(5e28)),
        row("b", None, Value::Real(5e28)),
    ];
    let err = shape_costs(rows, Sort::default()).unwrap_err();
    assert_eq!(err, ShapeError::Overflow { id: "total".into() });
}

fn agg(group: &str, name: Option<&str>, category: &str, total: i64) -> AggregateRow {
    AggregateRow {
        group_id: group.into(),
        group_name: name.map(String::from),
        category: category.into(),
        total: Value::Integer(total),
    }
}

#[test]
fn percentages_sum_to_one_hundred() {
    let cases: Vec<Vec<i64>> = vec![
        vec![1],
        vec![1, 1, 1],
        vec![7, 11, 13, 17, 19],
        vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12],
        vec![999_999, 1, 3],
    ];
    for totals in cases {
        let items = totals
            .iter()
            .enumerate()
            .map(|(i, t)| (format!("svc{}", i), Decimal::from(*t)))
            .collect();
        let group = derive_shares("g", "G", items, Sort::default()).unwrap().unwrap();
        let sum: f64 = group.records.iter().map(|r| r.percentage).sum();
        assert!((sum - 100.0).abs() < 1e-9, "sum was {} for {:?}", sum, totals);
    }
}

#[test]
fn zero_total_group_has_no_chart() {
    assert!(derive_shares("g", "G", Vec::new(), Sort::default()).unwrap().is_none());
    let zeros = vec![("EC2".to_string(), Decimal::ZERO)];
    assert!(derive_shares("g", "G", zeros, Sort::default()).unwrap().is_none());
}

#[test]
fn breakdown_groups_labels_and_fallback_names() {
    let rows = vec![
        agg("111", Some("Acme"), "EC2", 75),
        agg("111", Some("Acme"), "S3", 25),
        agg("222", None, "EC2", 20),
        agg("333", Some("Hooli"), "EC2", 0),
    ];
    let b = shape_breakdown(rows, Sort::new(SortKey::Amount, SortOrder::Desc))
        .unwrap()
        .into_data()
        .unwrap();
    let names: Vec<&str> = b.groups.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, vec!["222", "Acme"]);

    let acme = &b.groups[1];
    assert_eq!(acme.total, Decimal::from(100));
    let labels: Vec<&str> = acme.records.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, vec!["EC2 (75.0%)", "S3 (25.0%)"]);
    assert_eq!(b.groups[0].records[0].label, "EC2 (100.0%)");
}

#[test]
fn breakdown_with_only_zero_groups_is_no_data() {
    let rows = vec![agg("1", None, "EC2", 0), agg("2", None, "S3", 0)];
    assert!(shape_breakdown(rows, Sort::default()).unwrap().is_no_data());
}

#[test]
fn huge_single_amount_is_one_hundred_percent() {
    let rows = vec![AggregateRow {
        group_id: "111".into(),
        group_name: Some("Acme".into()),
        category: "EC2".into(),
        total: Value::Real(1e27),
    }];
    let b = shape_breakdown(rows, Sort::default())
        .unwrap()
        .into_data()
        .unwrap();
    assert_eq!(b.groups[0].records[0].label, "EC2 (100.0%)");
}

#[test]
fn breakdown_total_out_of_range_is_an_error() {
    let huge = |category: &str| AggregateRow {
        group_id: "111".into(),
        group_name: Some("Acme".into()),
        category: category.into(),
        total: Value::Real(5e28),
    };
    let err = shape_breakdown(vec![huge("EC2"), huge("S3")], Sort::default()).unwrap_err();
    assert_eq!(err, ShapeError::Overflow { id: "111".into() });
}

#[test]
fn repeated_category_cells_are_added_up() {
    let rows = vec![
        agg("111", Some("Acme"), "EC2", 30),
        agg("111", Some("Acme"), "S3", 25),
        agg("111", Some("Acme"), "EC2", 45),
    ];
    let b = shape_breakdown(rows, Sort::new(SortKey::Amount, SortOrder::Desc))
        .unwrap()
        .into_data()
        .unwrap();
    let labels: Vec<&str> = b.groups[0].records.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, vec!["EC2 (75.0%)", "S3 (25.0%)"]);
}
