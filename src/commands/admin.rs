// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::cli::admin_repl;
use crate::commands::export::{ExportFormat, export_report};
use crate::commands::page::{Flow, PageController};
use crate::models::NewProduct;
use crate::nav::{AdminPage, Navigator, Page};
use crate::remote::Endpoint;
use crate::report::{
    DateBucket, Period, aggregate_by_date, chart_series, daily_totals, filter_by_period,
};
use crate::sync::{DataState, Mutation};
use crate::utils::parse_amount;
use crate::view::{self, ReportRow};
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::path::Path;

pub struct AdminController<'a, E: Endpoint + ?Sized> {
    endpoint: &'a E,
    data: DataState,
    nav: Navigator<AdminPage>,
    active_filter: Period,
    pending_delete: Option<String>,
    clock: fn() -> DateTime<Local>,
}

impl<'a, E: Endpoint + ?Sized> AdminController<'a, E> {
    pub fn new(endpoint: &'a E) -> Self {
        Self {
            endpoint,
            data: DataState::new(),
            nav: Navigator::new(AdminPage::Dashboard),
            active_filter: Period::Day,
            pending_delete: None,
            clock: Local::now,
        }
    }

    pub fn with_clock(mut self, clock: fn() -> DateTime<Local>) -> Self {
        self.clock = clock;
        self
    }

    pub fn data(&self) -> &DataState {
        &self.data
    }

    pub fn active_page(&self) -> AdminPage {
        self.nav.active()
    }

    pub fn active_filter(&self) -> Period {
        self.active_filter
    }

    /// Buckets for the active filter, evaluated against the clock on every call.
    fn buckets(&self) -> Vec<DateBucket> {
        let now = (self.clock)();
        let filtered = filter_by_period(self.data.transactions(), self.active_filter, &now);
        aggregate_by_date(filtered, &Local)
    }

    pub fn report_rows(&self) -> Vec<ReportRow> {
        self.buckets().iter().map(ReportRow::from).collect()
    }

    pub fn add_product(&mut self, product: NewProduct) -> Result<()> {
        self.data
            .mutate(self.endpoint, Mutation::AddProduct(product))?;
        Ok(())
    }

    pub fn delete_product(&mut self, id: &str) -> Result<()> {
        self.data
            .mutate(self.endpoint, Mutation::DeleteProduct(id.to_string()))?;
        Ok(())
    }

    fn render_report(&self) -> String {
        let buckets = self.buckets();
        let rows: Vec<ReportRow> = buckets.iter().map(ReportRow::from).collect();
        format!(
            "Filter: {}\n{}\n\n{}",
            self.active_filter,
            view::report_table(&rows),
            view::profit_chart(&chart_series(&buckets))
        )
    }
}

impl<E: Endpoint + ?Sized> PageController for AdminController<'_, E> {
    fn grammar(&self) -> clap::Command {
        admin_repl()
    }

    fn prompt(&self) -> String {
        format!("admin/{}", self.nav.active().id())
    }

    fn load(&mut self) -> Result<()> {
        self.data
            .refresh(self.endpoint)
            .context("Gagal memuat data. Periksa koneksi atau URL endpoint.")
    }

    fn render(&self) -> String {
        let body = match self.nav.active() {
            AdminPage::Dashboard => {
                let now = (self.clock)();
                view::admin_dashboard(&daily_totals(self.data.transactions(), &now)).to_string()
            }
            AdminPage::Products => view::product_admin_list(self.data.products()).to_string(),
            AdminPage::Report => self.render_report(),
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
                let page = AdminPage::parse(&id).with_context(|| {
                    let known: Vec<&str> = AdminPage::ALL.iter().map(|p| p.id()).collect();
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
            Some(("filter", sub)) => {
                self.active_filter = arg(sub, "period").parse()?;
                if self.nav.active() != AdminPage::Report && self.nav.navigate(AdminPage::Report) {
                    self.load()?;
                }
                Ok(Flow::Render)
            }
            Some(("add-product", sub)) => {
                let name = arg(sub, "name");
                if name.is_empty() {
                    anyhow::bail!("Product name must not be empty");
                }
                let price = parse_amount(&arg(sub, "price"))?;
                let stock = arg(sub, "stock")
                    .parse::<i64>()
                    .with_context(|| format!("Invalid stock '{}'", arg(sub, "stock")))?;
                self.add_product(NewProduct { name, price, stock })?;
                Ok(Flow::Render)
            }
            Some(("delete-product", sub)) => {
                let id = arg(sub, "id");
                if sub.get_flag("yes") {
                    self.delete_product(&id)?;
                    return Ok(Flow::Render);
                }
                let name = self
                    .data
                    .product(&id)
                    .map(|p| p.name.clone())
                    .unwrap_or_else(|| id.clone());
                self.pending_delete = Some(id);
                Ok(Flow::Confirm(format!(
                    "Yakin ingin menghapus produk '{}'?",
                    name
                )))
            }
            Some(("export", sub)) => {
                let format: ExportFormat = arg(sub, "format").parse()?;
                let out = arg(sub, "out");
                export_report(&self.report_rows(), format, Path::new(&out))?;
                Ok(Flow::Message(format!("Exported report to {}", out)))
            }
            Some(("logout", _)) => Ok(Flow::Logout),
            Some(("quit", _)) => Ok(Flow::Quit),
            _ => Ok(Flow::Message("Unknown command; try `help`".into())),
        }
    }

    fn confirm(&mut self, yes: bool) -> Result<Flow> {
        match self.pending_delete.take() {
            Some(id) if yes => {
                self.delete_product(&id)?;
                Ok(Flow::Render)
            }
            _ => Ok(Flow::Message("Dibatalkan.".into())),
        }
    }
}
