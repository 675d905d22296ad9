// src/pipeline/source.rs
use crate::error::ArticleParseError;
use crate::model::RawArticle;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// One input file (or equivalent unit) of raw articles.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    pub name: String,
    pub articles: Vec<RawArticle>,
}

/// Supplier of raw article batches. A broken batch is reported per item so
/// the run can skip it; an `Err` from `load` means nothing could be listed.
pub trait ArticleSource {
    fn load(&self) -> Result<Vec<std::result::Result<Batch, ArticleParseError>>>;
    fn name(&self) -> &str;
}

/// Reads every `*.json` file of a directory, in file-name order.
#[derive(Debug, Clone)]
pub struct JsonDirSource {
    dir: PathBuf,
}

impl JsonDirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn read_batch(path: &Path) -> std::result::Result<Batch, ArticleParseError> {
        let content = fs::read_to_string(path).map_err(|e| ArticleParseError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let articles: Vec<RawArticle> =
            serde_json::from_str(&content).map_err(|e| ArticleParseError::Json {
                path: path.to_path_buf(),
                source: e,
            })?;
        Ok(Batch {
            name: path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
            articles,
        })
    }
}

impl ArticleSource for JsonDirSource {
    fn load(&self) -> Result<Vec<std::result::Result<Batch, ArticleParseError>>> {
        let mut paths: Vec<PathBuf> = fs::read_dir(&self.dir)
            .with_context(|| format!("listing input directory {}", self.dir.display()))?
            .flatten()
            .map(|e| e.path())
            .filter(|p| p.extension().and_then(|s| s.to_str()) == Some("json"))
            .collect();
        paths.sort();
        Ok(paths.iter().map(|p| Self::read_batch(p)).collect())
    }

    fn name(&self) -> &str {
        "json-dir"
    }
}

/// In-memory batches, for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    pub batches: Vec<Batch>,
}

impl ArticleSource for MemorySource {
    fn load(&self) -> Result<Vec<std::result::Result<Batch, ArticleParseError>>> {
        Ok(self.batches.iter().cloned().map(Ok).collect())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
