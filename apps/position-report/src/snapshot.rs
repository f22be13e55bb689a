//! Input and output documents of the position report

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use clmm_math::PositionReport;
use clmm_types::{PoolSnapshot, PositionSnapshot};
use serde::{Deserialize, Serialize};

/// Pools keyed by an opaque caller-chosen name, and the positions to evaluate
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportInput {
    #[serde(default)]
    pub pools: BTreeMap<String, PoolSnapshot>,
    #[serde(default)]
    pub positions: Vec<PositionSnapshot>,
}

impl ReportInput {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read input {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse input {}", path.display()))
    }

    /// Pool a position refers to. A position without a pool key may only be
    /// evaluated against a single-pool document.
    pub fn pool_for(&self, position: &PositionSnapshot) -> Option<(&str, &PoolSnapshot)> {
        match &position.pool {
            Some(key) => self
                .pools
                .get_key_value(key)
                .map(|(key, pool)| (key.as_str(), pool)),
            None if self.pools.len() == 1 => self
                .pools
                .iter()
                .next()
                .map(|(key, pool)| (key.as_str(), pool)),
            None => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PositionOutcome {
    Report(PositionReport),
    Failed { id: Option<String>, error: String },
}

impl PositionOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, PositionOutcome::Failed { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportOutput {
    /// Unix seconds
    pub generated_at: u64,
    pub positions: Vec<PositionOutcome>,
}

impl ReportOutput {
    pub fn write(&self, path: Option<&Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        match path {
            Some(path) => std::fs::write(path, json + "\n")
                .with_context(|| format!("failed to write report {}", path.display())),
            None => {
                println!("{json}");
                Ok(())
            }
        }
    }
}
