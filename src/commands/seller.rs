// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::cart::Cart;
use crate::cli::seller_repl;
use crate::commands::page::{Flow, PageController};
use crate::models::{NewTransaction, TxType};
use crate::nav::{Navigator, Page, SellerPage};
use crate::remote::Endpoint;
use crate::report::daily_totals;
use crate::sync::{DataState, Mutation};
use crate::utils::{fmt_rupiah, parse_amount};
use crate::view;
use anyhow::{Context, Result};
use chrono::{DateTime, Local, Utc};

pub struct SellerController<'a, E: Endpoint + ?Sized> {
    endpoint: &'a E,
    data: DataState,
    cart: Cart,
    payment_input: Option<i64>,
    nav: Navigator<SellerPage>,
    clock: fn() -> DateTime<Local>,
}

impl<'a, E: Endpoint + ?Sized> SellerController<'a, E> {
    pub fn new(endpoint: &'a E) -> Self {
        Self {
            endpoint,
            data: DataState::new(),
            cart: Cart::new(),
            payment_input: None,
            nav: Navigator::new(SellerPage::Dashboard),
            clock: Local::now,
        }
    }

    pub fn with_clock(mut self, clock: fn() -> DateTime<Local>) -> Self {
        self.clock = clock;
        self
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn data(&self) -> &DataState {
        &self.data
    }

    pub fn payment_input(&self) -> Option<i64> {
        self.payment_input
    }

    pub fn active_page(&self) -> SellerPage {
        self.nav.active()
    }

    pub fn add_to_cart(&mut self, product_id: &str) -> Result<()> {
        let product = self
            .data
            .product(product_id)
            .with_context(|| format!("Product '{}' not found", product_id))?;
        self.cart.add(product);
        Ok(())
    }

    pub fn remove_from_cart(&mut self, product_id: &str) {
        self.cart.remove(product_id);
    }

    pub fn set_payment_input(&mut self, amount: i64) {
        self.payment_input = Some(amount);
    }

    /// Records the sale, then clears the cart and the payment input.
    pub fn submit_payment(&mut self) -> Result<String> {
        let paid = self.payment_input.unwrap_or(0);
        let tx = self.cart.checkout(paid, Utc::now().timestamp_millis())?;
        let change = paid - tx.amount;
        let reload = match self.data.mutate(self.endpoint, Mutation::AppendTransaction(tx)) {
            Ok(()) => None,
            Err(e) if e.was_written() => Some(e),
            Err(e) => return Err(e.into()),
        };
        self.cart.clear();
        self.payment_input = None;
        if let Some(e) = reload {
            return Err(e.into());
        }
        log::info!("sale recorded, change {}", change);
        Ok(format!(
            "Penjualan berhasil disimpan! Kembalian: {}",
            fmt_rupiah(change)
        ))
    }

    pub fn record(&mut self, r#type: TxType, amount: i64, description: &str) -> Result<String> {
        let tx = NewTransaction::now(r#type, description, amount);
        self.data
            .mutate(self.endpoint, Mutation::AppendTransaction(tx))?;
        Ok("Transaksi berhasil disimpan!".to_string())
    }
}

impl<E: Endpoint + ?Sized> PageController for SellerController<'_, E> {
    fn grammar(&self) -> clap::Command {
        seller_repl()
    }

    fn prompt(&self) -> String {
        format!("kasir/{}", self.nav.active().id())
    }

    fn load(&mut self) -> Result<()> {
        self.data
            .refresh(self.endpoint)
            .context("Gagal memuat data. Periksa koneksi atau URL endpoint.")
    }

    fn render(&self) -> String {
        let now = (self.clock)();
        let body = match self.nav.active() {
            SellerPage::Dashboard => {
                view::seller_dashboard(&daily_totals(self.data.transactions(), &now)).to_string()
            }
            SellerPage::Cashier => format!(
                "{}\n\n{}",
                view::product_cards(self.data.products()),
                view::cart(&self.cart, self.payment_input)
            ),
            SellerPage::Records => view::records(self.data.transactions(), &Local).to_string(),
        };
        format!("== {} ==\n{}", self.nav.title(), body)
    }

    fn dispatch(&mut self, m: &clap::ArgMatches) -> Result<Flow> {
        let arg = |sub: &clap::ArgMatches, name: &str| -> String {
            sub.get_one::<String>(name)
                .map(|s| s.trim().to_string())
                .unwrap_or_default()
        };
        match m.subcommand() {
            Some(("go", sub)) => {
                let id = arg(sub, "page");
                let page = SellerPage::parse(&id).with_context(|| {
                    let known: Vec<&str> = SellerPage::ALL.iter().map(|p| p.id()).collect();
                    format!("Unknown page '{}' (one of {})", id, known.join(", "))
                })?;
                if self.nav.navigate(page) {
                    self.load()?;
                }
                Ok(Flow::Render)
            }
            Some(("show", _)) => Ok(Flow::Render),
            Some(("refresh", _)) => {
                self.load()?;
                Ok(Flow::Render)
            }
            Some(("add", sub)) => {
                self.add_to_cart(&arg(sub, "id"))?;
                Ok(Flow::Render)
            }
            Some(("remove", sub)) => {
                self.remove_from_cart(&arg(sub, "id"));
                Ok(Flow::Render)
            }
            Some(("paid", sub)) => {
                self.set_payment_input(parse_amount(&arg(sub, "amount"))?);
                Ok(Flow::Render)
            }
            Some(("pay", sub)) => {
                if sub.contains_id("amount") {
                    self.set_payment_input(parse_amount(&arg(sub, "amount"))?);
                }
                Ok(Flow::Notice(self.submit_payment()?))
            }
            Some(("record", sub)) => {
                let r#type: TxType = arg(sub, "type").parse()?;
                let amount = parse_amount(&arg(sub, "amount"))?;
                let description = sub
                    .get_many::<String>("description")
                    .map(|v| v.cloned().collect::<Vec<_>>().join(" "))
                    .unwrap_or_default();
                Ok(Flow::Notice(self.record(r#type, amount, &description)?))
            }
            Some(("logout", _)) => Ok(Flow::Logout),
            Some(("quit", _)) => Ok(Flow::Quit),
            _ => Ok(Flow::Message("Unknown command; try `help`".into())),
        }
    }
}
