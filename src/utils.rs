// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone};
use comfy_table::{presets::UTF8_FULL, Cell, Table};

const UA: &str = concat!("kasir/", env!("CARGO_PKG_VERSION"));

pub fn http_client() -> Result<reqwest::blocking::Client> {
    let c = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(15))
        .user_agent(UA)
        .build()?;
    Ok(c)
}

/// Whole Rupiah. Dots and underscores are accepted as thousands separators.
pub fn parse_amount(s: &str) -> Result<i64> {
    let cleaned: String = s
        .trim()
        .trim_start_matches("Rp")
        .trim()
        .chars()
        .filter(|c| *c != '.' && *c != '_')
        .collect();
    let v = cleaned
        .parse::<i64>()
        .with_context(|| format!("Invalid amount '{}'", s.trim()))?;
    if v < 0 {
        return Err(anyhow::anyhow!("Amount must not be negative: {}", v));
    }
    Ok(v)
}

/// `Rp 25.000`, `-Rp 5.000`.
pub fn fmt_rupiah(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    if amount < 0 {
        format!("-Rp {}", grouped)
    } else {
        format!("Rp {}", grouped)
    }
}

/// `d/m/yyyy HH.MM.SS` in the given timezone.
pub fn fmt_datetime<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format("%-d/%-m/%Y %H.%M.%S").to_string()
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rupiah_groups_thousands() {
        assert_eq!(fmt_rupiah(0), "Rp 0");
        assert_eq!(fmt_rupiah(999), "Rp 999");
        assert_eq!(fmt_rupiah(25000), "Rp 25.000");
        assert_eq!(fmt_rupiah(1234567), "Rp 1.234.567");
        assert_eq!(fmt_rupiah(-5000), "-Rp 5.000");
    }

    #[test]
    fn parse_amount_accepts_separators() {
        assert_eq!(parse_amount(" 30000 ").unwrap(), 30000);
        assert_eq!(parse_amount("30.000").unwrap(), 30000);
        assert_eq!(parse_amount("Rp 1.500").unwrap(), 1500);
        assert!(parse_amount("-5").is_err());
        assert!(parse_amount("abc").is_err());
    }
}
