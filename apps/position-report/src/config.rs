//! Configuration for the position report

use std::path::Path;

use anyhow::{bail, Context, Result};
use clmm_math::ReportOptions;
use serde::{Deserialize, Serialize};

/// Keeps the scaled price remainder inside 512 bits for common token decimals
const MAX_DECIMAL_PLACES: u32 = 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: String,
    pub report: ReportSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    pub decimal_places: u32,
    pub include_price: bool,
    /// Fail positions whose pool or range breaks a snapshot invariant
    pub strict: bool,
    /// Worker threads, 0 lets rayon decide
    pub threads: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            report: ReportSettings::default(),
        }
    }
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            decimal_places: 18,
            include_price: true,
            strict: false,
            threads: 0,
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.log_level.trim().is_empty() {
            bail!("log_level cannot be empty");
        }
        if self.report.decimal_places > MAX_DECIMAL_PLACES {
            bail!(
                "decimal_places must be at most {MAX_DECIMAL_PLACES}, got {}",
                self.report.decimal_places
            );
        }
        Ok(())
    }

    pub fn report_options(&self) -> ReportOptions {
        ReportOptions {
            decimal_places: self.report.decimal_places,
            include_price: self.report.include_price,
        }
    }
}
