// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("id.kasir", "Kasir", "kasir"));

pub const ENDPOINT_ENV: &str = "KASIR_ENDPOINT";

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")
}

pub fn config_path() -> Result<PathBuf> {
    let proj = project_dirs()?;
    let dir = proj.config_dir();
    fs::create_dir_all(dir).context("Failed to create config dir")?;
    Ok(dir.join("config.json"))
}

pub fn data_dir() -> Result<PathBuf> {
    let proj = project_dirs()?;
    let dir = proj.data_dir();
    fs::create_dir_all(dir).context("Failed to create data dir")?;
    Ok(dir.to_path_buf())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub endpoint: Option<String>,
}

impl Config {
    /// A missing file is an empty config.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Read config at {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("Parse config at {}", path.display()))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        fs::write(path, serde_json::to_string_pretty(self)?)
            .with_context(|| format!("Write config at {}", path.display()))
    }

    /// `override_url` is the `--endpoint` flag or `KASIR_ENDPOINT`, already merged by clap.
    pub fn resolve_endpoint(&self, override_url: Option<&str>) -> Result<String> {
        override_url
            .map(str::to_string)
            .or_else(|| self.endpoint.clone())
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .with_context(|| {
                format!(
                    "No endpoint configured; pass --endpoint, set {} or run `kasir config set-endpoint <url>`",
                    ENDPOINT_ENV
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn flag_wins_over_file() {
        let cfg = Config {
            endpoint: Some("https://file.example/exec".into()),
        };
        assert_eq!(
            cfg.resolve_endpoint(Some("https://flag.example/exec")).unwrap(),
            "https://flag.example/exec"
        );
        assert_eq!(cfg.resolve_endpoint(None).unwrap(), "https://file.example/exec");
        assert!(Config::default().resolve_endpoint(Some("  ")).is_err());
    }

    #[test]
    fn missing_file_loads_empty_and_saves_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());
        let cfg = Config {
            endpoint: Some("https://x.example/exec".into()),
        };
        cfg.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), cfg);
    }
}
