// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! One-shot, scriptable views of the remote data.

use crate::commands::export::{ExportFormat, export_report};
use crate::models::Transaction;
use crate::remote::Endpoint;
use crate::report::{Period, aggregate_by_date, filter_by_period};
use crate::sync::fetch_all;
use crate::utils::maybe_print_json;
use crate::view::{self, ReportRow};
use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone};
use std::path::Path;

pub fn report_rows<Tz: TimeZone>(
    transactions: &[Transaction],
    period: Period,
    now: &DateTime<Tz>,
) -> Vec<ReportRow> {
    let filtered = filter_by_period(transactions, period, now);
    aggregate_by_date(filtered, &now.timezone())
        .iter()
        .map(ReportRow::from)
        .collect()
}

/// Newest first, optionally truncated.
pub fn record_rows(transactions: &[Transaction], limit: Option<usize>) -> Vec<Transaction> {
    let it = transactions.iter().rev().cloned();
    match limit {
        Some(n) => it.take(n).collect(),
        None => it.collect(),
    }
}

pub fn handle_report<E: Endpoint + ?Sized>(endpoint: &E, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let period: Period = sub
        .get_one::<String>("period")
        .map(String::as_str)
        .unwrap_or("day")
        .parse()?;
    let data = fetch_all(endpoint).context("Gagal memuat data")?;
    let rows = report_rows(&data.transactions, period, &chrono::Local::now());

    if let (Some(fmt), Some(out)) = (
        sub.get_one::<String>("format"),
        sub.get_one::<String>("out"),
    ) {
        let format: ExportFormat = fmt.parse()?;
        export_report(&rows, format, Path::new(out))?;
        println!("Exported report to {}", out);
        return Ok(());
    }
    if !maybe_print_json(json_flag, jsonl_flag, &rows)? {
        println!("{}", view::report_table(&rows));
    }
    Ok(())
}

pub fn handle_products<E: Endpoint + ?Sized>(endpoint: &E, sub: &clap::ArgMatches) -> Result<()> {
    let products = endpoint.products().context("Gagal memuat produk")?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &products)? {
        println!("{}", view::product_admin_list(&products));
    }
    Ok(())
}

pub fn handle_records<E: Endpoint + ?Sized>(endpoint: &E, sub: &clap::ArgMatches) -> Result<()> {
    let transactions = endpoint.transactions().context("Gagal memuat transaksi")?;
    let rows = record_rows(&transactions, sub.get_one::<usize>("limit").copied());
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &rows)? {
        // `view::records` reverses again, so hand it chronological order.
        let chronological: Vec<Transaction> = rows.into_iter().rev().collect();
        println!("{}", view::records(&chronological, &chrono::Local));
    }
    Ok(())
}
