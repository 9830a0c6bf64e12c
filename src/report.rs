// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Period filtering and date-bucketed aggregation over fetched transactions.
//!
//! Everything here is evaluated against a caller-supplied "now" so the same
//! code serves the live pages (`chrono::Local::now()`) and tests (fixed offsets).
//! Comparisons happen on local wall-clock time, which keeps day boundaries
//! well defined across DST changes.

use crate::cart::SALE_MARKER;
use crate::models::{Transaction, TxType};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Day,
    Month,
    Year,
    All,
}

impl Period {
    pub const NAMES: [&'static str; 4] = ["day", "month", "year", "all"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Day => "day",
            Period::Month => "month",
            Period::Year => "year",
            Period::All => "all",
        }
    }

    /// Inclusive local wall-clock bounds, or `None` for [`Period::All`].
    pub fn bounds(&self, today: NaiveDate) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let (first, last) = match self {
            Period::Day => (today, today),
            Period::Month => (
                today.with_day(1)?,
                last_day_of_month(today.year(), today.month())?,
            ),
            Period::Year => (
                NaiveDate::from_ymd_opt(today.year(), 1, 1)?,
                NaiveDate::from_ymd_opt(today.year(), 12, 31)?,
            ),
            Period::All => return None,
        };
        Some((first.and_hms_opt(0, 0, 0)?, end_of_day(last)?))
    }

    pub fn contains<Tz: TimeZone>(&self, t: &Transaction, now: &DateTime<Tz>) -> bool {
        match self.bounds(now.date_naive()) {
            None => true,
            Some((start, end)) => {
                // Undated rows only ever show under `all`.
                local_time(t, &now.timezone()).is_some_and(|at| at >= start && at <= end)
            }
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" => Ok(Period::Day),
            "month" => Ok(Period::Month),
            "year" => Ok(Period::Year),
            "all" => Ok(Period::All),
            other => Err(anyhow::anyhow!(
                "Invalid period '{}', expected day|month|year|all",
                other
            )),
        }
    }
}

fn end_of_day(d: NaiveDate) -> Option<NaiveDateTime> {
    d.and_hms_milli_opt(23, 59, 59, 999)
}

fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (y, m) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(y, m, 1)?.pred_opt()
}

fn local_time<Tz: TimeZone>(t: &Transaction, tz: &Tz) -> Option<NaiveDateTime> {
    t.date.map(|d| d.with_timezone(tz).naive_local())
}

pub fn filter_by_period<'a, Tz: TimeZone>(
    transactions: &'a [Transaction],
    period: Period,
    now: &DateTime<Tz>,
) -> Vec<&'a Transaction> {
    transactions
        .iter()
        .filter(|t| period.contains(t, now))
        .collect()
}

/// Short Indonesian locale date, e.g. `5/3/2025`.
pub fn date_label(d: NaiveDate) -> String {
    d.format("%-d/%-m/%Y").to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateBucket {
    pub date: NaiveDate,
    pub income: i64,
    pub expense: i64,
}

impl DateBucket {
    pub fn profit(&self) -> i64 {
        self.income - self.expense
    }

    pub fn label(&self) -> String {
        date_label(self.date)
    }
}

/// Groups by local calendar date. Buckets come back most recent first.
pub fn aggregate_by_date<'a, I, Tz>(transactions: I, tz: &Tz) -> Vec<DateBucket>
where
    I: IntoIterator<Item = &'a Transaction>,
    Tz: TimeZone,
{
    let mut map: BTreeMap<NaiveDate, (i64, i64)> = BTreeMap::new();
    for t in transactions {
        let Some(at) = local_time(t, tz) else {
            log::warn!("transaction {} has no usable date, left out of the report", t.id);
            continue;
        };
        let entry = map.entry(at.date()).or_insert((0, 0));
        match t.r#type {
            TxType::Income => entry.0 += t.amount,
            TxType::Expense => entry.1 += t.amount,
        }
    }
    map.into_iter()
        .rev()
        .map(|(date, (income, expense))| DateBucket {
            date,
            income,
            expense,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub profit: i64,
}

/// Chronological profit series for plotting: the table buckets, reversed.
pub fn chart_series(buckets: &[DateBucket]) -> Vec<ChartPoint> {
    buckets
        .iter()
        .rev()
        .map(|b| ChartPoint {
            label: b.label(),
            profit: b.profit(),
        })
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DailyTotals {
    pub income: i64,
    pub expense: i64,
    pub profit: i64,
    pub sales_count: usize,
}

pub fn daily_totals<Tz: TimeZone>(transactions: &[Transaction], now: &DateTime<Tz>) -> DailyTotals {
    let mut totals = DailyTotals::default();
    for t in filter_by_period(transactions, Period::Day, now) {
        match t.r#type {
            TxType::Income => totals.income += t.amount,
            TxType::Expense => totals.expense += t.amount,
        }
        if t.description.starts_with(SALE_MARKER) {
            totals.sales_count += 1;
        }
    }
    totals.profit = totals.income - totals.expense;
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, FixedOffset, Utc};

    fn wib() -> FixedOffset {
        FixedOffset::east_opt(7 * 3600).unwrap()
    }

    fn at(tz: &FixedOffset, y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32, ms: u32) -> DateTime<Utc> {
        tz.from_local_datetime(
            &NaiveDate::from_ymd_opt(y, m, d)
                .unwrap()
                .and_hms_milli_opt(h, mi, s, ms)
                .unwrap(),
        )
        .unwrap()
        .with_timezone(&Utc)
    }

    fn tx(id: i64, r#type: TxType, amount: i64, date: DateTime<Utc>, desc: &str) -> Transaction {
        Transaction {
            id,
            r#type,
            description: desc.into(),
            amount,
            date: Some(date),
        }
    }

    #[test]
    fn day_filter_is_inclusive_to_the_last_millisecond() {
        let tz = wib();
        let now = at(&tz, 2025, 3, 10, 12, 0, 0, 0).with_timezone(&tz);
        let last = at(&tz, 2025, 3, 10, 23, 59, 59, 999);
        let txs = vec![
            tx(1, TxType::Income, 100, last, "a"),
            tx(2, TxType::Income, 100, last + Duration::milliseconds(1), "b"),
            tx(3, TxType::Income, 100, at(&tz, 2025, 3, 10, 0, 0, 0, 0), "c"),
            tx(4, TxType::Income, 100, at(&tz, 2025, 3, 10, 0, 0, 0, 0) - Duration::milliseconds(1), "d"),
        ];
        let ids: Vec<i64> = filter_by_period(&txs, Period::Day, &now)
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn month_and_year_bounds() {
        let today = NaiveDate::from_ymd_opt(2024, 2, 14).unwrap();
        let (s, e) = Period::Month.bounds(today).unwrap();
        assert_eq!(s.to_string(), "2024-02-01 00:00:00");
        assert_eq!(e.date(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        let (s, e) = Period::Year.bounds(today).unwrap();
        assert_eq!(s.date(), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(e.date(), NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
        let (_, e) = Period::Month
            .bounds(NaiveDate::from_ymd_opt(2024, 12, 3).unwrap())
            .unwrap();
        assert_eq!(e.date(), NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
        assert!(Period::All.bounds(today).is_none());
    }

    #[test]
    fn all_period_keeps_everything() {
        let tz = wib();
        let now = at(&tz, 2025, 3, 10, 12, 0, 0, 0).with_timezone(&tz);
        let txs = vec![
            tx(1, TxType::Income, 1, at(&tz, 1999, 1, 1, 0, 0, 0, 0), "old"),
            tx(2, TxType::Expense, 1, at(&tz, 2030, 1, 1, 0, 0, 0, 0), "future"),
        ];
        assert_eq!(filter_by_period(&txs, Period::All, &now).len(), 2);
        assert!(filter_by_period(&txs, Period::Year, &now).is_empty());
    }

    #[test]
    fn undated_rows_only_match_all() {
        let tz = wib();
        let now = at(&tz, 2025, 3, 10, 12, 0, 0, 0).with_timezone(&tz);
        let mut undated = tx(1, TxType::Income, 500, at(&tz, 2025, 3, 10, 9, 0, 0, 0), "x");
        undated.date = None;
        let txs = vec![
            undated,
            tx(2, TxType::Income, 700, at(&tz, 2025, 3, 10, 9, 0, 0, 0), "y"),
        ];
        for p in [Period::Day, Period::Month, Period::Year] {
            let ids: Vec<i64> = filter_by_period(&txs, p, &now).iter().map(|t| t.id).collect();
            assert_eq!(ids, vec![2], "{}", p);
        }
        let all = filter_by_period(&txs, Period::All, &now);
        assert_eq!(all.len(), 2);
        let buckets = aggregate_by_date(all, &tz);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].income, 700);
    }

    #[test]
    fn aggregation_buckets_by_local_date() {
        let tz = wib();
        let txs = vec![
            tx(1, TxType::Income, 50000, at(&tz, 2025, 3, 1, 9, 0, 0, 0), "Penjualan: A x1"),
            tx(2, TxType::Expense, 20000, at(&tz, 2025, 3, 1, 17, 0, 0, 0), "Gas"),
            tx(3, TxType::Income, 10000, at(&tz, 2025, 3, 3, 8, 0, 0, 0), "Penjualan: B x1"),
            tx(4, TxType::Expense, 5000, at(&tz, 2025, 3, 2, 23, 30, 0, 0), "Es"),
            tx(5, TxType::Income, 7000, at(&tz, 2025, 3, 2, 0, 15, 0, 0), "Penjualan: C x1"),
        ];
        let buckets = aggregate_by_date(&txs, &tz);
        assert_eq!(buckets.len(), 3);
        assert_eq!(buckets[0].label(), "3/3/2025");
        assert_eq!((buckets[0].income, buckets[0].expense), (10000, 0));
        assert_eq!(buckets[1].label(), "2/3/2025");
        assert_eq!((buckets[1].income, buckets[1].expense), (7000, 5000));
        assert_eq!(buckets[2].label(), "1/3/2025");
        assert_eq!(buckets[2].profit(), 30000);

        let chart = chart_series(&buckets);
        let labels: Vec<&str> = chart.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["1/3/2025", "2/3/2025", "3/3/2025"]);
        assert_eq!(chart[1].profit, 2000);
    }

    #[test]
    fn daily_totals_counts_sales_marker() {
        let tz = wib();
        let now = at(&tz, 2025, 3, 2, 20, 0, 0, 0).with_timezone(&tz);
        let txs = vec![
            tx(1, TxType::Income, 25000, at(&tz, 2025, 3, 2, 9, 0, 0, 0), "Penjualan: Kopi x2"),
            tx(2, TxType::Income, 5000, at(&tz, 2025, 3, 2, 10, 0, 0, 0), "Modal tambahan"),
            tx(3, TxType::Expense, 8000, at(&tz, 2025, 3, 2, 11, 0, 0, 0), "Gula"),
            tx(4, TxType::Income, 99000, at(&tz, 2025, 3, 1, 11, 0, 0, 0), "Penjualan: kemarin"),
        ];
        let totals = daily_totals(&txs, &now);
        assert_eq!(
            totals,
            DailyTotals {
                income: 30000,
                expense: 8000,
                profit: 22000,
                sales_count: 1,
            }
        );
    }
}
