// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod config;
pub mod detect;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod reference;
pub mod relevance;
pub mod search;
pub mod temporal;
pub mod text;

// ---- Re-exports for stable public API ----
pub use crate::detect::detect_clubs_and_leagues;
pub use crate::error::{ArticleParseError, DateParseError, ReferenceDataError};
pub use crate::model::{Detection, EnrichedArticle, RawArticle};
pub use crate::pipeline::{run_from_config, run_pipeline, RunReport};
pub use crate::reference::{build_keyword_maps, ReferenceMaps};
pub use crate::relevance::is_football_article;
pub use crate::temporal::to_canonical_time;
