// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{NewProduct, NewTransaction, Product, Transaction};
use crate::remote::{Endpoint, RemoteError, RemoteResult};
use std::thread;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    /// Nothing was written.
    #[error("write failed: {0}")]
    Write(#[source] RemoteError),
    /// The write went through but the reload did not; local state is stale.
    #[error("saved, but reloading data failed: {0}")]
    Reload(#[source] RemoteError),
}

impl SyncError {
    pub fn was_written(&self) -> bool {
        matches!(self, SyncError::Reload(_))
    }
}

#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub transactions: Vec<Transaction>,
    pub products: Vec<Product>,
}

/// Reads transactions and products in parallel. Either failure fails the whole call.
pub fn fetch_all<E: Endpoint + ?Sized>(endpoint: &E) -> RemoteResult<Snapshot> {
    let (transactions, products) = thread::scope(|s| {
        let tx_handle = s.spawn(|| endpoint.transactions());
        let products = endpoint.products();
        let transactions = tx_handle
            .join()
            .unwrap_or_else(|_| Err(RemoteError::Other("transaction fetch panicked".into())));
        (transactions, products)
    });
    let snapshot = Snapshot {
        transactions: transactions?,
        products: products?,
    };
    log::debug!(
        "fetched {} transactions, {} products",
        snapshot.transactions.len(),
        snapshot.products.len()
    );
    Ok(snapshot)
}

#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    AppendTransaction(NewTransaction),
    AddProduct(NewProduct),
    DeleteProduct(String),
}

impl Mutation {
    fn send<E: Endpoint + ?Sized>(&self, endpoint: &E) -> RemoteResult<()> {
        match self {
            Mutation::AppendTransaction(tx) => endpoint.append_transaction(tx),
            Mutation::AddProduct(p) => endpoint.add_product(p),
            Mutation::DeleteProduct(id) => endpoint.delete_product(id),
        }
    }
}

/// Remote-backed page state. Only ever replaced wholesale by a successful fetch.
#[derive(Debug, Clone, Default)]
pub struct DataState {
    snapshot: Snapshot,
    loaded: bool,
}

impl DataState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.snapshot.transactions
    }

    pub fn products(&self) -> &[Product] {
        &self.snapshot.products
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.snapshot.products.iter().find(|p| p.id == id)
    }

    /// On failure the previous snapshot stays in place.
    pub fn refresh<E: Endpoint + ?Sized>(&mut self, endpoint: &E) -> RemoteResult<()> {
        match fetch_all(endpoint) {
            Ok(s) => {
                self.snapshot = s;
                self.loaded = true;
                Ok(())
            }
            Err(e) => {
                log::error!("fetch failed, keeping stale data: {}", e);
                Err(e)
            }
        }
    }

    /// Write, then reload everything. The write response is never trusted.
    pub fn mutate<E: Endpoint + ?Sized>(
        &mut self,
        endpoint: &E,
        mutation: Mutation,
    ) -> Result<(), SyncError> {
        log::info!("mutation: {:?}", mutation);
        mutation.send(endpoint).map_err(SyncError::Write)?;
        self.refresh(endpoint).map_err(SyncError::Reload)
    }
}
