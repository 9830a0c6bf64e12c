// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Config;
use crate::utils::pretty_table;
use anyhow::Result;
use std::path::Path;

pub fn handle(path: &Path, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set-endpoint", sub)) => {
            let url = sub
                .get_one::<String>("url")
                .map(|s| s.trim().to_string())
                .unwrap_or_default();
            set_endpoint(path, &url)?;
            println!("Endpoint set to {}", url);
        }
        Some(("show", _)) => {
            let cfg = Config::load_from(path)?;
            println!(
                "{}",
                pretty_table(
                    &["Key", "Value"],
                    vec![
                        vec!["file".into(), path.display().to_string()],
                        vec!["endpoint".into(), cfg.endpoint.unwrap_or_default()],
                    ],
                )
            );
        }
        _ => {}
    }
    Ok(())
}

pub fn set_endpoint(path: &Path, url: &str) -> Result<()> {
    let url = url.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        anyhow::bail!("Invalid endpoint '{}', expected an http(s) URL", url);
    }
    let mut cfg = Config::load_from(path)?;
    cfg.endpoint = Some(url.to_string());
    cfg.save_to(path)
}
