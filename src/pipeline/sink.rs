// src/pipeline/sink.rs
use crate::model::EnrichedArticle;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

/// Receiver of finished date partitions. Writing a partition replaces any
/// earlier version of it.
pub trait PartitionSink {
    fn write(&self, date: NaiveDate, articles: &[EnrichedArticle]) -> Result<()>;
}

/// Writes `<dir>/YYYY-MM-DD.json`, pretty-printed UTF-8.
#[derive(Debug, Clone)]
pub struct JsonDirSink {
    dir: PathBuf,
}

impl JsonDirSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, date: NaiveDate) -> PathBuf {
        self.dir.join(format!("{}.json", date.format("%Y-%m-%d")))
    }
}

impl PartitionSink for JsonDirSink {
    fn write(&self, date: NaiveDate, articles: &[EnrichedArticle]) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("creating output directory {}", self.dir.display()))?;
        let path = self.path_for(date);
        let body = serde_json::to_string_pretty(articles)?;
        fs::write(&path, body).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }
}

// --- Test helper ---
#[derive(Default)]
pub struct MemorySink {
    pub partitions: std::sync::Mutex<Vec<(NaiveDate, Vec<EnrichedArticle>)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Vec<(NaiveDate, Vec<EnrichedArticle>)> {
        self.partitions
            .lock()
            .map(|g| g.clone())
            .unwrap_or_default()
    }
}

impl PartitionSink for MemorySink {
    fn write(&self, date: NaiveDate, articles: &[EnrichedArticle]) -> Result<()> {
        let mut guard = self
            .partitions
            .lock()
            .map_err(|_| anyhow::anyhow!("memory sink poisoned"))?;
        guard.retain(|(d, _)| *d != date);
        guard.push((date, articles.to_vec()));
        Ok(())
    }
}
