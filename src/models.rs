// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxType {
    Income,
    Expense,
}

impl TxType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxType::Income => "income",
            TxType::Expense => "expense",
        }
    }
}

impl fmt::Display for TxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TxType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TxType::Income),
            "expense" => Ok(TxType::Expense),
            other => Err(anyhow::anyhow!(
                "Invalid transaction type '{}', expected income|expense",
                other
            )),
        }
    }
}

/// A ledger entry as stored by the remote endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(deserialize_with = "de_int")]
    pub id: i64,
    pub r#type: TxType,
    #[serde(default)]
    pub description: String,
    #[serde(deserialize_with = "de_int")]
    pub amount: i64,
    /// `None` when the stored cell is empty or not a recognisable timestamp.
    #[serde(default, deserialize_with = "de_date")]
    pub date: Option<DateTime<Utc>>,
}

/// Append payload. The remote store assigns `date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTransaction {
    pub id: i64,
    pub r#type: TxType,
    pub description: String,
    pub amount: i64,
}

impl NewTransaction {
    /// Builds a transaction stamped with the current time in milliseconds.
    pub fn now(r#type: TxType, description: impl Into<String>, amount: i64) -> Self {
        Self {
            id: Utc::now().timestamp_millis(),
            r#type,
            description: description.into(),
            amount,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub name: String,
    #[serde(deserialize_with = "de_int")]
    pub price: i64,
    #[serde(default, deserialize_with = "de_int")]
    pub stock: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProduct {
    pub name: String,
    pub price: i64,
    pub stock: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u32,
}

impl CartItem {
    pub fn subtotal(&self) -> i64 {
        self.product.price.saturating_mul(i64::from(self.quantity))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    Admin,
    Seller,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "admin",
            Role::Seller => "penjual",
            Role::Other(s) => s,
        }
    }
}

impl From<&str> for Role {
    fn from(s: &str) -> Self {
        match s {
            "admin" => Role::Admin,
            "penjual" => Role::Seller,
            other => Role::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub status: String,
    #[serde(default)]
    pub role: Option<String>,
}

impl LoginResponse {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

// Spreadsheet cells come back either as JSON numbers or as numeric strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Int(i64),
    Float(f64),
    Text(String),
}

fn de_int<'de, D>(d: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match Loose::deserialize(d)? {
        Loose::Int(i) => Ok(i),
        Loose::Float(f) => Ok(f.round() as i64),
        Loose::Text(s) => {
            let t = s.trim();
            if t.is_empty() {
                return Ok(0);
            }
            t.parse::<i64>()
                .or_else(|_| t.parse::<f64>().map(|f| f.round() as i64))
                .map_err(|_| serde::de::Error::custom(format!("invalid number '{}'", s)))
        }
    }
}

fn de_date<'de, D>(d: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let parsed = match Option::<Loose>::deserialize(d)? {
        None => None,
        Some(Loose::Int(ms)) => DateTime::from_timestamp_millis(ms),
        Some(Loose::Float(ms)) => DateTime::from_timestamp_millis(ms as i64),
        Some(Loose::Text(s)) => parse_date(s.trim()),
    };
    Ok(parsed)
}

fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc())
}

fn de_id<'de, D>(d: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Loose::deserialize(d)? {
        Loose::Int(i) => Ok(i.to_string()),
        Loose::Float(f) => Ok(f.to_string()),
        Loose::Text(s) => Ok(s),
    }
}
