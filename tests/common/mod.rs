// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

#![allow(dead_code)]

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use kasir::models::{
    LoginResponse, NewProduct, NewTransaction, Product, Transaction, TxType,
};
use kasir::remote::{Endpoint, RemoteError, RemoteResult};
use std::sync::Mutex;

/// In-memory stand-in for the spreadsheet endpoint. Records every call.
pub struct FakeEndpoint {
    pub transactions: Mutex<Vec<Transaction>>,
    pub products: Mutex<Vec<Product>>,
    pub calls: Mutex<Vec<String>>,
    pub fail_reads: Mutex<bool>,
    pub fail_writes: Mutex<bool>,
    pub fail_products_only: Mutex<bool>,
    pub login_reply: Mutex<Option<LoginResponse>>,
    /// Date the store assigns to appended transactions.
    pub stamp: DateTime<Utc>,
    next_product_id: Mutex<u32>,
}

impl FakeEndpoint {
    pub fn new(stamp: DateTime<Utc>) -> Self {
        Self {
            transactions: Mutex::new(Vec::new()),
            products: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
            fail_reads: Mutex::new(false),
            fail_writes: Mutex::new(false),
            fail_products_only: Mutex::new(false),
            login_reply: Mutex::new(None),
            stamp,
            next_product_id: Mutex::new(100),
        }
    }

    pub fn with_products(self, products: Vec<Product>) -> Self {
        *self.products.lock().unwrap() = products;
        self
    }

    pub fn with_transactions(self, txs: Vec<Transaction>) -> Self {
        *self.transactions.lock().unwrap() = txs;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, name: &str) -> usize {
        self.calls().iter().filter(|c| c.as_str() == name).count()
    }

    pub fn set_fail_reads(&self, v: bool) {
        *self.fail_reads.lock().unwrap() = v;
    }

    pub fn set_fail_writes(&self, v: bool) {
        *self.fail_writes.lock().unwrap() = v;
    }

    fn log(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }

    fn read_guard(&self) -> RemoteResult<()> {
        if *self.fail_reads.lock().unwrap() {
            return Err(RemoteError::Other("connection reset".into()));
        }
        Ok(())
    }

    fn write_guard(&self) -> RemoteResult<()> {
        if *self.fail_writes.lock().unwrap() {
            return Err(RemoteError::Other("write refused".into()));
        }
        Ok(())
    }
}

impl Endpoint for FakeEndpoint {
    fn transactions(&self) -> RemoteResult<Vec<Transaction>> {
        self.log("transactions");
        self.read_guard()?;
        Ok(self.transactions.lock().unwrap().clone())
    }

    fn products(&self) -> RemoteResult<Vec<Product>> {
        self.log("products");
        self.read_guard()?;
        if *self.fail_products_only.lock().unwrap() {
            return Err(RemoteError::Other("products sheet missing".into()));
        }
        Ok(self.products.lock().unwrap().clone())
    }

    fn login(&self, username: &str, password: &str) -> RemoteResult<LoginResponse> {
        self.log("login");
        self.write_guard()?;
        if let Some(r) = self.login_reply.lock().unwrap().clone() {
            return Ok(r);
        }
        let ok = password == "rahasia";
        Ok(LoginResponse {
            status: if ok { "success".into() } else { "error".into() },
            role: ok.then(|| {
                if username == "admin" {
                    "admin".to_string()
                } else {
                    "penjual".to_string()
                }
            }),
        })
    }

    fn append_transaction(&self, tx: &NewTransaction) -> RemoteResult<()> {
        self.log("append");
        self.write_guard()?;
        self.transactions.lock().unwrap().push(Transaction {
            id: tx.id,
            r#type: tx.r#type,
            description: tx.description.clone(),
            amount: tx.amount,
            date: Some(self.stamp),
        });
        Ok(())
    }

    fn add_product(&self, product: &NewProduct) -> RemoteResult<()> {
        self.log("add_product");
        self.write_guard()?;
        let mut next = self.next_product_id.lock().unwrap();
        *next += 1;
        self.products.lock().unwrap().push(Product {
            id: next.to_string(),
            name: product.name.clone(),
            price: product.price,
            stock: product.stock,
        });
        Ok(())
    }

    fn delete_product(&self, id: &str) -> RemoteResult<()> {
        self.log("delete_product");
        self.write_guard()?;
        self.products.lock().unwrap().retain(|p| p.id != id);
        Ok(())
    }
}

pub fn product(id: &str, name: &str, price: i64) -> Product {
    Product {
        id: id.into(),
        name: name.into(),
        price,
        stock: 10,
    }
}

/// A local wall-clock instant on the fixed test day.
pub fn local(y: i32, m: u32, d: u32, h: u32, mi: u32) -> DateTime<Local> {
    Local
        .from_local_datetime(
            &NaiveDate::from_ymd_opt(y, m, d)
                .unwrap()
                .and_hms_opt(h, mi, 0)
                .unwrap(),
        )
        .earliest()
        .unwrap()
}

pub fn test_now() -> DateTime<Local> {
    local(2025, 3, 2, 12, 0)
}

pub fn tx(id: i64, r#type: TxType, amount: i64, at: DateTime<Local>, desc: &str) -> Transaction {
    Transaction {
        id,
        r#type,
        description: desc.into(),
        amount,
        date: Some(at.with_timezone(&Utc)),
    }
}
