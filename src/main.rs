// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::io;

use kasir::commands::admin::AdminController;
use kasir::commands::seller::SellerController;
use kasir::commands::{auth, listing, settings};
use kasir::config::{self, Config};
use kasir::remote::HttpEndpoint;
use kasir::session::SessionStore;
use kasir::cli;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let config_path = config::config_path()?;
    if let Some(("config", sub)) = matches.subcommand() {
        return settings::handle(&config_path, sub);
    }

    let store = SessionStore::default_location()?;
    if let Some(("logout", _)) = matches.subcommand() {
        return auth::handle_logout(&store);
    }
    if matches.subcommand().is_none() {
        cli::build_cli().print_help()?;
        println!();
        return Ok(());
    }

    let cfg = Config::load_from(&config_path)?;
    let url = cfg.resolve_endpoint(matches.get_one::<String>("endpoint").map(String::as_str))?;
    let endpoint = HttpEndpoint::new(url)?;
    log::debug!("endpoint {}", endpoint.base_url());

    let stdin = io::stdin().lock();
    let mut stdout = io::stdout();
    match matches.subcommand() {
        Some(("login", sub)) => {
            if auth::handle_login(&endpoint, &store, sub)? == auth::LoginOutcome::Rejected {
                std::process::exit(1);
            }
        }
        Some(("open", _)) => auth::open(&endpoint, &store, stdin, &mut stdout)?,
        Some(("seller", _)) => {
            auth::run_page(&mut SellerController::new(&endpoint), &store, stdin, &mut stdout)?;
        }
        Some(("admin", _)) => {
            auth::run_page(&mut AdminController::new(&endpoint), &store, stdin, &mut stdout)?;
        }
        Some(("report", sub)) => listing::handle_report(&endpoint, sub)?,
        Some(("products", sub)) => listing::handle_products(&endpoint, sub)?,
        Some(("records", sub)) => listing::handle_records(&endpoint, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
