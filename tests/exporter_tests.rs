// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use kasir::commands::export::{ExportFormat, export_report};
use kasir::view::ReportRow;
use serde_json::json;
use tempfile::tempdir;

fn rows() -> Vec<ReportRow> {
    vec![
        ReportRow {
            date: "2/3/2025".into(),
            income: 24000,
            expense: 4000,
            profit: 20000,
        },
        ReportRow {
            date: "1/3/2025".into(),
            income: 0,
            expense: 12500,
            profit: -12500,
        },
    ]
}

#[test]
fn export_report_writes_pretty_json() {
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("report.json");
    export_report(&rows(), ExportFormat::Json, &out_path).unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(
        parsed,
        json!([
            {"date": "2/3/2025", "income": 24000, "expense": 4000, "profit": 20000},
            {"date": "1/3/2025", "income": 0, "expense": 12500, "profit": -12500}
        ])
    );
}

#[test]
fn export_report_writes_csv() {
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("report.csv");
    export_report(&rows(), ExportFormat::Csv, &out_path).unwrap();
    let contents = std::fs::read_to_string(&out_path).unwrap();
    assert_eq!(
        contents,
        "date,income,expense,profit\n2/3/2025,24000,4000,20000\n1/3/2025,0,12500,-12500\n"
    );
}

#[test]
fn unknown_format_is_rejected() {
    let err = "xml".parse::<ExportFormat>().unwrap_err();
    assert!(err.to_string().contains("use csv|json"));
}
