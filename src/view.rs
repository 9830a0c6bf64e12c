// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Text renderers. Pure functions of page state; no fetching, no mutation.

use crate::cart::{Cart, change_due};
use crate::models::{Product, Transaction};
use crate::report::{ChartPoint, DailyTotals, DateBucket};
use crate::utils::{fmt_datetime, fmt_rupiah, pretty_table};
use chrono::TimeZone;
use comfy_table::Table;
use serde::Serialize;
use std::fmt::Write as _;

const CHART_WIDTH: usize = 40;

pub fn seller_dashboard(t: &DailyTotals) -> Table {
    pretty_table(
        &["Penjualan Hari Ini", "Pemasukan Hari Ini", "Keuntungan Hari Ini"],
        vec![vec![
            t.sales_count.to_string(),
            fmt_rupiah(t.income),
            fmt_rupiah(t.profit),
        ]],
    )
}

pub fn admin_dashboard(t: &DailyTotals) -> Table {
    pretty_table(
        &["Pemasukan", "Pengeluaran", "Keuntungan"],
        vec![vec![
            fmt_rupiah(t.income),
            fmt_rupiah(t.expense),
            fmt_rupiah(t.profit),
        ]],
    )
}

pub fn product_cards(products: &[Product]) -> Table {
    let rows = products
        .iter()
        .map(|p| vec![p.id.clone(), p.name.clone(), fmt_rupiah(p.price)])
        .collect();
    pretty_table(&["ID", "Produk", "Harga"], rows)
}

pub fn product_admin_list(products: &[Product]) -> Table {
    let rows = products
        .iter()
        .map(|p| {
            vec![
                p.id.clone(),
                p.name.clone(),
                fmt_rupiah(p.price),
                p.stock.to_string(),
            ]
        })
        .collect();
    pretty_table(&["ID", "Nama", "Harga", "Stok"], rows)
}

/// Cart lines, total, and the change due for the current payment input.
pub fn cart(cart: &Cart, paid: Option<i64>) -> String {
    let total = cart.total();
    let mut out = String::new();
    if cart.is_empty() {
        out.push_str("(keranjang kosong)\n");
    } else {
        let rows = cart
            .items()
            .iter()
            .map(|i| {
                vec![
                    i.product.id.clone(),
                    format!("{} x {}", i.product.name, i.quantity),
                    fmt_rupiah(i.subtotal()),
                ]
            })
            .collect();
        let _ = writeln!(out, "{}", pretty_table(&["ID", "Item", "Subtotal"], rows));
    }
    let _ = writeln!(out, "Total:     {}", fmt_rupiah(total));
    let paid = paid.unwrap_or(0);
    let _ = writeln!(out, "Bayar:     {}", fmt_rupiah(paid));
    let _ = write!(out, "Kembalian: {}", fmt_rupiah(change_due(paid, total)));
    out
}

/// Every transaction, newest first.
pub fn records<Tz: TimeZone>(transactions: &[Transaction], tz: &Tz) -> Table
where
    Tz::Offset: std::fmt::Display,
{
    let rows = transactions
        .iter()
        .rev()
        .map(|t| {
            vec![
                t.date
                    .map(|d| fmt_datetime(&d.with_timezone(tz)))
                    .unwrap_or_else(|| "-".to_string()),
                t.description.clone(),
                t.r#type.to_string(),
                fmt_rupiah(t.amount),
            ]
        })
        .collect();
    pretty_table(&["Tanggal", "Deskripsi", "Tipe", "Jumlah"], rows)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub date: String,
    pub income: i64,
    pub expense: i64,
    pub profit: i64,
}

impl From<&DateBucket> for ReportRow {
    fn from(b: &DateBucket) -> Self {
        Self {
            date: b.label(),
            income: b.income,
            expense: b.expense,
            profit: b.profit(),
        }
    }
}

pub fn report_table(rows: &[ReportRow]) -> Table {
    let data = rows
        .iter()
        .map(|r| {
            vec![
                r.date.clone(),
                fmt_rupiah(r.income),
                fmt_rupiah(r.expense),
                fmt_rupiah(r.profit),
            ]
        })
        .collect();
    pretty_table(&["Tanggal", "Pemasukan", "Pengeluaran", "Keuntungan"], data)
}

/// Horizontal profit bars in chronological order. Losses are drawn with `-`.
pub fn profit_chart(points: &[ChartPoint]) -> String {
    if points.is_empty() {
        return "(tidak ada data)".to_string();
    }
    let max = points
        .iter()
        .map(|p| p.profit.unsigned_abs())
        .max()
        .unwrap_or(0)
        .max(1);
    let label_w = points.iter().map(|p| p.label.len()).max().unwrap_or(0);
    let mut out = String::from("Keuntungan\n");
    for p in points {
        let len = ((p.profit.unsigned_abs() as u128 * CHART_WIDTH as u128) / max as u128) as usize;
        let glyph = if p.profit < 0 { "-" } else { "#" };
        let bar = glyph.repeat(len);
        let _ = writeln!(
            out,
            "{:>w$} | {:<cw$} {}",
            p.label,
            bar,
            fmt_rupiah(p.profit),
            w = label_w,
            cw = CHART_WIDTH
        );
    }
    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_scales_to_largest_magnitude() {
        let pts = vec![
            ChartPoint {
                label: "1/3/2025".into(),
                profit: 10000,
            },
            ChartPoint {
                label: "2/3/2025".into(),
                profit: -5000,
            },
        ];
        let s = profit_chart(&pts);
        let lines: Vec<&str> = s.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].matches('#').count(), CHART_WIDTH);
        assert_eq!(lines[2].matches('-').count(), CHART_WIDTH / 2 + 1);
        assert!(lines[2].ends_with("-Rp 5.000"));
    }

    #[test]
    fn cart_view_shows_change() {
        let mut c = Cart::new();
        c.add(&Product {
            id: "1".into(),
            name: "Kopi".into(),
            price: 12000,
            stock: 3,
        });
        let s = cart(&c, Some(20000));
        assert!(s.contains("Kopi x 1"));
        assert!(s.contains("Total:     Rp 12.000"));
        assert!(s.ends_with("Kembalian: Rp 8.000"));
    }
}
