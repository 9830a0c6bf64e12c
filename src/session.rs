// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Stored login role, the terminal counterpart of browser session storage.

use crate::models::Role;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize)]
struct SessionFile {
    role: String,
}

#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn default_location() -> Result<Self> {
        Ok(Self::at(crate::config::data_dir()?.join("session.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn role(&self) -> Result<Option<Role>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("Read session at {}", self.path.display()))?;
        let s: SessionFile = serde_json::from_str(&raw)
            .with_context(|| format!("Parse session at {}", self.path.display()))?;
        Ok(Some(Role::from(s.role.as_str())))
    }

    pub fn store(&self, role: &Role) -> Result<()> {
        let body = serde_json::to_string(&SessionFile {
            role: role.as_str().to_string(),
        })?;
        fs::write(&self.path, body)
            .with_context(|| format!("Write session at {}", self.path.display()))
    }

    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)
                .with_context(|| format!("Remove session at {}", self.path.display()))?;
        }
        Ok(())
    }
}
