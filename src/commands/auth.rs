// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::admin::AdminController;
use crate::commands::page::{self, Exit, PageController};
use crate::commands::seller::SellerController;
use crate::models::Role;
use crate::remote::Endpoint;
use crate::session::SessionStore;
use anyhow::Result;
use std::io::{BufRead, Write};

pub const LOGIN_FAILED: &str = "Username atau password salah!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Success(Role),
    Rejected,
}

/// Any non-success answer, and any transport failure, is a rejection.
/// Only a successful login touches the stored session.
pub fn login<E: Endpoint + ?Sized>(
    endpoint: &E,
    store: &SessionStore,
    username: &str,
    password: &str,
) -> Result<LoginOutcome> {
    let resp = match endpoint.login(username.trim(), password) {
        Ok(r) => r,
        Err(e) => {
            log::error!("login error: {}", e);
            return Ok(LoginOutcome::Rejected);
        }
    };
    if !resp.is_success() {
        log::info!("login rejected for '{}' (status {})", username.trim(), resp.status);
        return Ok(LoginOutcome::Rejected);
    }
    let role = Role::from(resp.role.as_deref().unwrap_or_default());
    store.store(&role)?;
    log::info!("logged in as {}", role);
    Ok(LoginOutcome::Success(role))
}

/// The page a role lands on; `None` for roles without one.
pub fn landing_page(role: &Role) -> Option<&'static str> {
    match role {
        Role::Admin => Some("admin"),
        Role::Seller => Some("seller"),
        Role::Other(_) => None,
    }
}

pub fn handle_login<E: Endpoint + ?Sized>(
    endpoint: &E,
    store: &SessionStore,
    m: &clap::ArgMatches,
) -> Result<LoginOutcome> {
    let username = m
        .get_one::<String>("username")
        .map(String::as_str)
        .unwrap_or_default();
    let password = m
        .get_one::<String>("password")
        .map(String::as_str)
        .unwrap_or_default();
    let outcome = login(endpoint, store, username, password)?;
    match &outcome {
        LoginOutcome::Success(role) => match landing_page(role) {
            Some(page) => println!("Logged in as {}. Run `kasir open` (or `kasir {}`).", role, page),
            None => println!("Logged in as {}, which has no page.", role),
        },
        LoginOutcome::Rejected => eprintln!("{}", LOGIN_FAILED),
    }
    Ok(outcome)
}

pub fn handle_logout(store: &SessionStore) -> Result<()> {
    store.clear()?;
    println!("Logged out.");
    Ok(())
}

/// Runs a page session; logging out from inside the page clears the stored role.
pub fn run_page<C, R, W>(
    page: &mut C,
    store: &SessionStore,
    input: R,
    out: &mut W,
) -> Result<Exit>
where
    C: PageController + ?Sized,
    R: BufRead,
    W: Write,
{
    let exit = page::run(page, input, out)?;
    if exit == Exit::Logout {
        store.clear()?;
        writeln!(out, "Logged out.")?;
    }
    Ok(exit)
}

/// Routes to the page for the stored role.
pub fn open<E, R, W>(endpoint: &E, store: &SessionStore, input: R, out: &mut W) -> Result<()>
where
    E: Endpoint + ?Sized,
    R: BufRead,
    W: Write,
{
    match store.role()? {
        Some(Role::Admin) => {
            run_page(&mut AdminController::new(endpoint), store, input, out)?;
        }
        Some(Role::Seller) => {
            run_page(&mut SellerController::new(endpoint), store, input, out)?;
        }
        Some(Role::Other(r)) => anyhow::bail!("Role '{}' has no page", r),
        None => anyhow::bail!("Not logged in; run `kasir login` first"),
    }
    Ok(())
}
