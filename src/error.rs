// src/error.rs
//! Error taxonomy of the enrichment run.
//!
//! Only `ReferenceDataError` is fatal. The other two are reported, logged and
//! the offending file or article is skipped.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReferenceDataError {
    #[error("cannot read reference table {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("reference table {path} has no `{column}` column")]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error("reference table {path}, row {row}: {source}")]
    BadRow {
        path: PathBuf,
        row: u64,
        #[source]
        source: csv::Error,
    },
}

#[derive(Debug, Error)]
pub enum ArticleParseError {
    #[error("cannot read article batch {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("article batch {path} is not a JSON array of articles: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unrecognized date `{input}`")]
pub struct DateParseError {
    pub input: String,
}
