// src/config.rs
//! Pipeline configuration.
//!
//! Resolution order (later wins):
//! 1) built-in defaults
//! 2) TOML file: $PIPELINE_CONFIG_PATH, else `config/pipeline.toml` when present
//! 3) env overrides: PIPELINE_INPUT_DIR, PIPELINE_OUTPUT_DIR, PIPELINE_CUTOFF
//! 4) CLI flags (applied by the binary)

use crate::temporal::{TimePolicy, DEFAULT_CUTOFF, DEFAULT_UTC_OFFSET_HOURS};
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "config/pipeline.toml";

pub const ENV_CONFIG_PATH: &str = "PIPELINE_CONFIG_PATH";
pub const ENV_INPUT_DIR: &str = "PIPELINE_INPUT_DIR";
pub const ENV_OUTPUT_DIR: &str = "PIPELINE_OUTPUT_DIR";
pub const ENV_CUTOFF: &str = "PIPELINE_CUTOFF";

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct PipelineConfig {
    #[serde(default)]
    pub paths: PathsSection,
    #[serde(default)]
    pub time: TimeSection,
    #[serde(default)]
    pub schedule: ScheduleSection,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct PathsSection {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub domestic_table: PathBuf,
    pub european_table: PathBuf,
}

impl Default for PathsSection {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("data/rss_by_day"),
            output_dir: PathBuf::from("data/rss_clean_final"),
            domestic_table: PathBuf::from("clubs_with_leagues.csv"),
            european_table: PathBuf::from("european_clubs_in_leagues.csv"),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct TimeSection {
    pub utc_offset_hours: i32,
    /// RFC 3339 instant; earlier articles are dropped.
    pub cutoff: String,
}

impl Default for TimeSection {
    fn default() -> Self {
        Self {
            utc_offset_hours: DEFAULT_UTC_OFFSET_HOURS,
            cutoff: DEFAULT_CUTOFF.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScheduleSection {
    /// 0 = run once.
    pub interval_secs: u64,
}

impl PipelineConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(s).context("parsing pipeline config")?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading pipeline config from {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    /// An explicit config file, then env overrides.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        let mut cfg = Self::load_from(path)?;
        cfg.apply_env();
        cfg.validate()?;
        Ok(cfg)
    }

    /// Defaults, then the config file, then env overrides.
    pub fn load_default() -> Result<Self> {
        let mut cfg = if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
            }
            Self::load_from(&pb)?
        } else {
            let default = PathBuf::from(DEFAULT_CONFIG_PATH);
            if default.exists() {
                Self::load_from(&default)?
            } else {
                Self::default()
            }
        };
        cfg.apply_env();
        cfg.validate()?;
        Ok(cfg)
    }

    fn apply_env(&mut self) {
        if let Some(v) = env_non_empty(ENV_INPUT_DIR) {
            self.paths.input_dir = PathBuf::from(v);
        }
        if let Some(v) = env_non_empty(ENV_OUTPUT_DIR) {
            self.paths.output_dir = PathBuf::from(v);
        }
        if let Some(v) = env_non_empty(ENV_CUTOFF) {
            self.time.cutoff = v;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(-12..=14).contains(&self.time.utc_offset_hours) {
            return Err(anyhow!(
                "utc_offset_hours must be within -12..=14, got {}",
                self.time.utc_offset_hours
            ));
        }
        self.time_policy().map(|_| ())
    }

    pub fn time_policy(&self) -> Result<TimePolicy> {
        TimePolicy::new(self.time.utc_offset_hours, &self.time.cutoff)
            .with_context(|| format!("invalid cutoff `{}`", self.time.cutoff))
    }
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
