//! Football news enricher: binary entrypoint.
//! Runs the batch enrichment once or on an interval, plus a few triage helpers.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use football_news_enricher::config::PipelineConfig;
use football_news_enricher::detect::detect_with_trace;
use football_news_enricher::model::RawArticle;
use football_news_enricher::pipeline::{run_from_config, scheduler};
use football_news_enricher::reference::{build_keyword_maps, import::import_competition};
use football_news_enricher::relevance::relevance_verdict;
use football_news_enricher::search::{self, SearchRequest, SortOrder};
use football_news_enricher::text::normalize_text;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(
    name = "football-news-enricher",
    about = "Classify football news into clubs and leagues, partitioned by day"
)]
struct Cli {
    /// Path to config TOML file (falls back to $PIPELINE_CONFIG_PATH, then config/pipeline.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Enrich every input batch and (re)write the date partitions
    Enrich {
        #[arg(long)]
        input: Option<PathBuf>,
        #[arg(long)]
        output: Option<PathBuf>,
        /// Repeat every N seconds instead of running once
        #[arg(long)]
        every: Option<u64>,
    },
    /// Show how a single article would be classified
    Classify {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        summary: String,
        #[arg(long, default_value = "")]
        url: String,
    },
    /// Merge a competition fixture file into the European table
    ImportCompetition {
        fixture: PathBuf,
        /// Defaults to the configured European table
        #[arg(long)]
        table: Option<PathBuf>,
    },
    /// Print the search request body for the given filters
    SearchBody {
        #[arg(long, default_value = "")]
        query: String,
        #[arg(long, default_value = "")]
        league: String,
        #[arg(long, default_value = "")]
        club: String,
        #[arg(long, default_value = "")]
        source: String,
        #[arg(long, default_value = "desc", value_parser = parse_order)]
        order: SortOrder,
        #[arg(long, default_value_t = 0)]
        from: usize,
    },
    /// Print the search index mapping
    IndexMapping,
}

fn parse_order(s: &str) -> Result<SortOrder, String> {
    match s.to_ascii_lowercase().as_str() {
        "asc" => Ok(SortOrder::Asc),
        "desc" => Ok(SortOrder::Desc),
        other => Err(format!("expected asc or desc, got `{other}`")),
    }
}

/// Compact logs by default, JSON with LOG_FORMAT=json. Level via RUST_LOG.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer().compact()).init();
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<PipelineConfig> {
    match path {
        Some(p) => PipelineConfig::load_with_env(p),
        None => PipelineConfig::load_default(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Command::Enrich {
            input,
            output,
            every,
        } => {
            let mut cfg = load_config(cli.config.as_ref())?;
            if let Some(p) = input {
                cfg.paths.input_dir = p;
            }
            if let Some(p) = output {
                cfg.paths.output_dir = p;
            }
            let interval = every.unwrap_or(cfg.schedule.interval_secs);
            if interval > 0 {
                tracing::info!(interval_secs = interval, "starting periodic enrichment");
                scheduler::spawn_periodic(cfg, Duration::from_secs(interval))
                    .await
                    .context("scheduler task ended")?;
            } else {
                let report = tokio::task::spawn_blocking(move || run_from_config(&cfg)).await??;
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
        }
        Command::Classify {
            title,
            summary,
            url,
        } => {
            let cfg = load_config(cli.config.as_ref())?;
            let refs = build_keyword_maps(&cfg.paths.domestic_table, &cfg.paths.european_table)?;
            let article = RawArticle {
                title,
                summary,
                url,
                ..Default::default()
            };
            let verdict = relevance_verdict(&article, &refs);
            let (detection, trace) = detect_with_trace(&normalize_text(&article.text()), &article.url, &refs);
            let out = serde_json::json!({
                "relevance": verdict,
                "detection": detection,
                "trace": trace,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Command::ImportCompetition { fixture, table } => {
            let table = match table {
                Some(t) => t,
                None => load_config(cli.config.as_ref())?.paths.european_table,
            };
            let added = import_competition(&fixture, &table)?;
            println!("Added {} new club entries to {}", added.len(), table.display());
        }
        Command::SearchBody {
            query,
            league,
            club,
            source,
            order,
            from,
        } => {
            let req = SearchRequest {
                query,
                league,
                club,
                source,
                order,
                from,
            };
            println!("{}", serde_json::to_string_pretty(&search::build_search_body(&req))?);
        }
        Command::IndexMapping => {
            tracing::debug!(index = search::INDEX_NAME, "index mapping");
            println!("{}", serde_json::to_string_pretty(&search::index_mapping())?);
        }
    }
    Ok(())
}
