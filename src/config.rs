//! Dashboard configuration.
//!
//! Values come from an optional YAML file and are then overridden by
//! command-line flags. Statistical constants (phase boundaries, economy
//! minimum, classifier thresholds) live with the code that applies them.

use std::{
    fs::File,
    io::Read,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

pub const DEFAULT_TOP: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// Match-level table
    pub matches: PathBuf,
    /// Ball-by-ball table
    pub deliveries: PathBuf,
    /// Character encoding of both input files
    pub encoding: Option<String>,
    /// Default number of rows in ranked tables
    pub top: usize,
    /// Directory receiving per-player CSV exports; exports are off when unset
    pub export_dir: Option<PathBuf>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            matches: PathBuf::from("data/matches.csv"),
            deliveries: PathBuf::from("data/deliveries.csv"),
            encoding: None,
            top: DEFAULT_TOP,
            export_dir: None,
        }
    }
}

impl DashboardConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let mut file = File::open(path).with_context(|| format!("Opening config file {path:?}"))?;
        let mut raw = String::new();
        file.read_to_string(&mut raw)
            .with_context(|| format!("Reading config file {path:?}"))?;
        Self::from_yaml(&raw).with_context(|| format!("Parsing config file {path:?}"))
    }

    pub fn from_yaml(raw: &str) -> Result<Self> {
        let config: DashboardConfig = serde_yaml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.top > 0, "top must be at least 1");
        Ok(())
    }
}
