// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{CartItem, NewTransaction, Product, TxType};
use thiserror::Error;

/// Every sale recorded from the cart starts with this word; the seller
/// dashboard counts sales by it.
pub const SALE_MARKER: &str = "Penjualan";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaymentError {
    #[error("Keranjang masih kosong! (cart is empty)")]
    EmptyCart,
    #[error("Uang bayar tidak cukup! (paid {paid}, total {total})")]
    InsufficientPayment { total: i64, paid: i64 },
}

#[derive(Debug, Default, Clone)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Adds one unit. Stock is not checked.
    pub fn add(&mut self, product: &Product) {
        if let Some(item) = self.items.iter_mut().find(|i| i.product.id == product.id) {
            item.quantity += 1;
        } else {
            self.items.push(CartItem {
                product: product.clone(),
                quantity: 1,
            });
        }
    }

    /// Drops the whole line for `product_id`. Returns whether anything was removed.
    pub fn remove(&mut self, product_id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.product.id != product_id);
        self.items.len() != before
    }

    pub fn total(&self) -> i64 {
        self.items
            .iter()
            .map(CartItem::subtotal)
            .fold(0i64, i64::saturating_add)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn description(&self) -> String {
        let lines: Vec<String> = self
            .items
            .iter()
            .map(|i| format!("{} x{}", i.product.name, i.quantity))
            .collect();
        format!("{}: {}", SALE_MARKER, lines.join(", "))
    }

    /// Applies the payment rules and builds the income entry for this cart.
    /// The cart itself is left untouched; callers clear it once the entry is stored.
    pub fn checkout(&self, amount_paid: i64, id: i64) -> Result<NewTransaction, PaymentError> {
        let total = self.total();
        if total == 0 {
            return Err(PaymentError::EmptyCart);
        }
        if amount_paid < total {
            return Err(PaymentError::InsufficientPayment {
                total,
                paid: amount_paid,
            });
        }
        Ok(NewTransaction {
            id,
            r#type: TxType::Income,
            description: self.description(),
            amount: total,
        })
    }
}

pub fn change_due(amount_paid: i64, total: i64) -> i64 {
    amount_paid.saturating_sub(total).max(0)
}
