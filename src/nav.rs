// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt::Debug;

/// A fixed set of page sections one controller can switch between.
pub trait Page: Copy + Eq + Debug + 'static {
    const ALL: &'static [Self];

    /// Identifier typed by the user (`go <id>`).
    fn id(&self) -> &'static str;
    /// Menu label; becomes the page title when selected.
    fn label(&self) -> &'static str;
    /// Whether entering this page refetches remote state.
    fn refreshes_on_enter(&self) -> bool {
        false
    }

    fn parse(s: &str) -> Option<Self> {
        let s = s.trim().trim_start_matches('#');
        Self::ALL.iter().copied().find(|p| p.id().eq_ignore_ascii_case(s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SellerPage {
    Dashboard,
    Cashier,
    Records,
}

impl Page for SellerPage {
    const ALL: &'static [Self] = &[SellerPage::Dashboard, SellerPage::Cashier, SellerPage::Records];

    fn id(&self) -> &'static str {
        match self {
            SellerPage::Dashboard => "dashboard",
            SellerPage::Cashier => "kasir",
            SellerPage::Records => "catatan",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            SellerPage::Dashboard => "Dashboard",
            SellerPage::Cashier => "Kasir",
            SellerPage::Records => "Catatan Keuangan",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminPage {
    Dashboard,
    Products,
    Report,
}

impl Page for AdminPage {
    const ALL: &'static [Self] = &[AdminPage::Dashboard, AdminPage::Products, AdminPage::Report];

    fn id(&self) -> &'static str {
        match self {
            AdminPage::Dashboard => "dashboard",
            AdminPage::Products => "produk",
            AdminPage::Report => "laporan",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            AdminPage::Dashboard => "Dashboard",
            AdminPage::Products => "Manajemen Produk",
            AdminPage::Report => "Laporan Keuangan",
        }
    }

    fn refreshes_on_enter(&self) -> bool {
        matches!(self, AdminPage::Dashboard | AdminPage::Report)
    }
}

#[derive(Debug, Clone)]
pub struct Navigator<P: Page> {
    active: P,
    title: &'static str,
}

impl<P: Page> Navigator<P> {
    pub fn new(start: P) -> Self {
        Self {
            active: start,
            title: start.label(),
        }
    }

    pub fn active(&self) -> P {
        self.active
    }

    pub fn title(&self) -> &'static str {
        self.title
    }

    /// Switches the visible section. Returns `true` when the caller should
    /// refetch and re-render.
    pub fn navigate(&mut self, page: P) -> bool {
        log::debug!("navigate {:?} -> {:?}", self.active, page);
        self.active = page;
        self.title = page.label();
        page.refreshes_on_enter()
    }
}
