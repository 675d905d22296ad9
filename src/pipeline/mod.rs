// src/pipeline/mod.rs
//! Batch enrichment: raw batches -> relevance -> canonical time + cutoff ->
//! entity detection -> date partitions (dedup by title/source, sorted by time).
//!
//! Each run recomputes every partition it touches from the full input and
//! overwrites the previous file, so re-running is safe.

pub mod scheduler;
pub mod sink;
pub mod source;

use crate::config::PipelineConfig;
use crate::detect::detect_clubs_and_leagues;
use crate::error::DateParseError;
use crate::model::{EnrichedArticle, RawArticle};
use crate::reference::{build_keyword_maps, ReferenceMaps};
use crate::relevance::is_football_article;
use crate::temporal::TimePolicy;
use crate::text::normalize_text;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use metrics::{counter, describe_counter, describe_gauge, gauge};
use once_cell::sync::OnceCell;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use tracing::{debug, info, warn};

use self::sink::{JsonDirSink, PartitionSink};
use self::source::{ArticleSource, JsonDirSource};

/// One-time metrics registration.
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("pipeline_articles_total", "Raw articles read from input batches.");
        describe_counter!(
            "pipeline_irrelevant_total",
            "Articles dropped by the relevance gate."
        );
        describe_counter!(
            "pipeline_date_errors_total",
            "Articles dropped because their date could not be parsed."
        );
        describe_counter!(
            "pipeline_stale_total",
            "Articles dropped for predating the cutoff."
        );
        describe_counter!(
            "pipeline_duplicates_total",
            "Articles dropped as (title, source) repeats within a partition."
        );
        describe_counter!(
            "pipeline_file_errors_total",
            "Input batches skipped because they could not be read."
        );
        describe_counter!("pipeline_written_total", "Articles written to partitions.");
        describe_gauge!(
            "pipeline_last_run_ts",
            "Unix ts when the pipeline last finished."
        );
    });
}

/// What happened to a single raw article.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Irrelevant,
    BadDate(DateParseError),
    Stale,
    Enriched(EnrichedArticle),
}

/// The first club (in club order) whose domestic league is among the
/// article's non-continental leagues.
pub fn select_main_league(
    clubs: &BTreeSet<String>,
    leagues: &BTreeSet<String>,
    refs: &ReferenceMaps,
) -> Option<String> {
    let domestic: Vec<&String> = leagues.iter().filter(|l| !refs.is_continental(l)).collect();
    if domestic.is_empty() {
        return None;
    }
    clubs
        .iter()
        .filter_map(|c| refs.domestic_league(c))
        .find(|l| domestic.iter().any(|d| d.as_str() == *l))
        .map(str::to_string)
}

pub fn enrich_article(raw: &RawArticle, refs: &ReferenceMaps, time: &TimePolicy) -> Outcome {
    if !is_football_article(raw, refs) {
        return Outcome::Irrelevant;
    }
    let date = match time.normalize(&raw.date) {
        Ok(d) => d,
        Err(e) => return Outcome::BadDate(e),
    };
    if time.is_stale(&date) {
        return Outcome::Stale;
    }

    let detection = detect_clubs_and_leagues(&normalize_text(&raw.text()), &raw.url, refs);
    let main_league = select_main_league(&detection.clubs, &detection.leagues, refs);

    Outcome::Enriched(EnrichedArticle {
        title: raw.title.clone(),
        url: raw.url.clone(),
        summary: raw.summary.clone(),
        date,
        source: raw.source.clone(),
        clubs: detection.clubs,
        leagues: detection.leagues,
        main_league,
    })
}

/// Enriched articles bucketed by calendar date of their canonical timestamp.
#[derive(Debug, Default)]
pub struct Partitions {
    buckets: BTreeMap<NaiveDate, Vec<EnrichedArticle>>,
}

impl Partitions {
    pub fn push(&mut self, article: EnrichedArticle) {
        self.buckets
            .entry(article.date.date_naive())
            .or_default()
            .push(article);
    }

    /// Dedup and sort every bucket. Returns the partitions and the number of
    /// dropped duplicates.
    pub fn finish(self) -> (BTreeMap<NaiveDate, Vec<EnrichedArticle>>, usize) {
        let mut dropped = 0usize;
        let out = self
            .buckets
            .into_iter()
            .map(|(date, articles)| {
                let (mut unique, d) = dedup_by_identity(articles);
                dropped += d;
                sort_by_time(&mut unique);
                (date, unique)
            })
            .collect();
        (out, dropped)
    }
}

/// Keep the first article of every (title, source) pair, in encounter order.
pub fn dedup_by_identity(articles: Vec<EnrichedArticle>) -> (Vec<EnrichedArticle>, usize) {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut keep = Vec::with_capacity(articles.len());
    let mut dropped = 0usize;
    for a in articles {
        let (title, source) = a.identity();
        if !seen.insert((title.to_string(), source.to_string())) {
            dropped += 1;
            continue;
        }
        keep.push(a);
    }
    (keep, dropped)
}

/// Ascending by timestamp; equal timestamps keep encounter order (stable sort).
pub fn sort_by_time(articles: &mut [EnrichedArticle]) {
    articles.sort_by_key(|a| a.date);
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub batches: usize,
    pub batch_errors: usize,
    pub articles: usize,
    pub irrelevant: usize,
    pub bad_dates: usize,
    pub stale: usize,
    pub duplicates: usize,
    pub written: usize,
    pub partitions: usize,
}

/// Run one enrichment pass from `source` into `sink`.
pub fn run_pipeline(
    source: &dyn ArticleSource,
    sink: &dyn PartitionSink,
    refs: &ReferenceMaps,
    time: &TimePolicy,
) -> Result<RunReport> {
    ensure_metrics_described();
    let mut report = RunReport::default();
    let mut parts = Partitions::default();

    for batch in source.load()? {
        let batch = match batch {
            Ok(b) => b,
            Err(e) => {
                warn!(target: "pipeline", error = %e, "skipping unreadable batch");
                report.batch_errors += 1;
                continue;
            }
        };
        report.batches += 1;
        debug!(target: "pipeline", batch = %batch.name, articles = batch.articles.len(), "processing batch");

        for raw in &batch.articles {
            report.articles += 1;
            match enrich_article(raw, refs, time) {
                Outcome::Irrelevant => report.irrelevant += 1,
                Outcome::BadDate(e) => {
                    warn!(target: "pipeline", batch = %batch.name, title = %raw.title, error = %e, "dropping article");
                    report.bad_dates += 1;
                }
                Outcome::Stale => report.stale += 1,
                Outcome::Enriched(a) => parts.push(a),
            }
        }
    }

    let (partitions, duplicates) = parts.finish();
    report.duplicates = duplicates;
    for (date, articles) in &partitions {
        sink.write(*date, articles)
            .with_context(|| format!("writing partition {date}"))?;
        info!(
            target: "pipeline",
            %date,
            articles = articles.len(),
            "partition saved"
        );
        report.written += articles.len();
    }
    report.partitions = partitions.len();

    counter!("pipeline_articles_total").increment(report.articles as u64);
    counter!("pipeline_irrelevant_total").increment(report.irrelevant as u64);
    counter!("pipeline_date_errors_total").increment(report.bad_dates as u64);
    counter!("pipeline_stale_total").increment(report.stale as u64);
    counter!("pipeline_duplicates_total").increment(report.duplicates as u64);
    counter!("pipeline_file_errors_total").increment(report.batch_errors as u64);
    counter!("pipeline_written_total").increment(report.written as u64);
    gauge!("pipeline_last_run_ts").set(chrono::Utc::now().timestamp() as f64);

    info!(
        target: "pipeline",
        source = source.name(),
        batches = report.batches,
        batch_errors = report.batch_errors,
        articles = report.articles,
        irrelevant = report.irrelevant,
        bad_dates = report.bad_dates,
        stale = report.stale,
        duplicates = report.duplicates,
        written = report.written,
        partitions = report.partitions,
        "enrichment run finished"
    );
    Ok(report)
}

/// Load reference data and run over the configured directories.
/// Reference data problems abort before any article is looked at.
pub fn run_from_config(cfg: &PipelineConfig) -> Result<RunReport> {
    let refs = build_keyword_maps(&cfg.paths.domestic_table, &cfg.paths.european_table)
        .context("loading reference data")?;
    let time = cfg.time_policy()?;
    info!(
        target: "pipeline",
        input = %cfg.paths.input_dir.display(),
        output = %cfg.paths.output_dir.display(),
        cutoff = %time.cutoff,
        "starting enrichment run"
    );
    let source = JsonDirSource::new(&cfg.paths.input_dir);
    let sink = JsonDirSink::new(&cfg.paths.output_dir);
    run_pipeline(&source, &sink, &refs, &time)
}
