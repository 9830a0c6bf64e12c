// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Client for the spreadsheet-backed HTTP endpoint.
//!
//! Reads are plain GETs on the base URL; every write is a POST of a JSON body to
//! the same URL, discriminated by an `action` field (a bare transaction object
//! has none and means "append").

use crate::models::{LoginResponse, NewProduct, NewTransaction, Product, Transaction};
use crate::utils::http_client;
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("unexpected response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("{0}")]
    Other(String),
}

pub type RemoteResult<T> = Result<T, RemoteError>;

/// Everything the pages need from the datastore. `Sync` so both reads of a
/// refresh can run at once.
pub trait Endpoint: Sync {
    fn transactions(&self) -> RemoteResult<Vec<Transaction>>;
    fn products(&self) -> RemoteResult<Vec<Product>>;
    fn login(&self, username: &str, password: &str) -> RemoteResult<LoginResponse>;
    fn append_transaction(&self, tx: &NewTransaction) -> RemoteResult<()>;
    fn add_product(&self, product: &NewProduct) -> RemoteResult<()>;
    fn delete_product(&self, id: &str) -> RemoteResult<()>;
}

pub struct HttpEndpoint {
    base: String,
    client: reqwest::blocking::Client,
}

impl HttpEndpoint {
    pub fn new(base: impl Into<String>) -> anyhow::Result<Self> {
        Ok(Self {
            base: base.into(),
            client: http_client()?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    pub fn products_url(&self) -> String {
        let sep = if self.base.contains('?') { '&' } else { '?' };
        format!("{}{}action=getProducts", self.base, sep)
    }

    fn get_text(&self, url: &str) -> RemoteResult<String> {
        log::debug!("GET {}", url);
        let http = |source: reqwest::Error| RemoteError::Http {
            url: url.to_string(),
            source,
        };
        self.client
            .get(url)
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.text())
            .map_err(http)
    }

    fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> RemoteResult<T> {
        let body = self.get_text(url)?;
        serde_json::from_str(&body).map_err(|source| RemoteError::Decode {
            url: url.to_string(),
            source,
        })
    }

    fn post<B: Serialize + ?Sized>(&self, body: &B) -> RemoteResult<String> {
        log::debug!("POST {}", self.base);
        let http = |source: reqwest::Error| RemoteError::Http {
            url: self.base.clone(),
            source,
        };
        self.client
            .post(&self.base)
            .json(body)
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.text())
            .map_err(http)
    }
}

impl Endpoint for HttpEndpoint {
    fn transactions(&self) -> RemoteResult<Vec<Transaction>> {
        self.get_json(&self.base)
    }

    fn products(&self) -> RemoteResult<Vec<Product>> {
        self.get_json(&self.products_url())
    }

    fn login(&self, username: &str, password: &str) -> RemoteResult<LoginResponse> {
        let body = self.post(&json!({
            "action": "login",
            "username": username,
            "password": password,
        }))?;
        serde_json::from_str(&body).map_err(|source| RemoteError::Decode {
            url: self.base.clone(),
            source,
        })
    }

    fn append_transaction(&self, tx: &NewTransaction) -> RemoteResult<()> {
        self.post(tx).map(|_| ())
    }

    fn add_product(&self, product: &NewProduct) -> RemoteResult<()> {
        self.post(&json!({
            "action": "addProduct",
            "name": product.name,
            "price": product.price,
            "stock": product.stock,
        }))
        .map(|_| ())
    }

    fn delete_product(&self, id: &str) -> RemoteResult<()> {
        self.post(&json!({ "action": "deleteProduct", "id": id }))
            .map(|_| ())
    }
}
