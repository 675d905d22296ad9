// src/search.rs
//! Request bodies for the search index that serves the enriched articles.
//!
//! Nothing here talks to the network: the index loader and the query
//! endpoint live elsewhere and send these bodies as-is.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const INDEX_NAME: &str = "football_news";
pub const PAGE_SIZE: usize = 20;
const FACET_SIZE: usize = 1000;

/// Phrase-matched fields with boosts; structured tags outrank body text.
pub const SEARCH_FIELDS: &[&str] = &[
    "title^3",
    "summary^2",
    "source",
    "clubs^5",
    "leagues^6",
    "main_league^7",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Filters accepted by the query endpoint. Empty strings mean "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchRequest {
    pub query: String,
    pub league: String,
    pub club: String,
    pub source: String,
    #[serde(rename = "date")]
    pub order: SortOrder,
    pub from: usize,
}

/// Field mapping used when (re)creating the index.
pub fn index_mapping() -> Value {
    json!({
        "mappings": {
            "properties": {
                "title": {"type": "text"},
                "summary": {"type": "text"},
                "url": {"type": "keyword"},
                "date": {"type": "date"},
                "source": {"type": "keyword"},
                "clubs": {"type": "keyword"},
                "leagues": {"type": "keyword"},
                "main_league": {"type": "keyword"}
            }
        }
    })
}

pub fn build_search_body(req: &SearchRequest) -> Value {
    let must = if req.query.trim().is_empty() {
        json!([{"match_all": {}}])
    } else {
        json!([{
            "multi_match": {
                "query": req.query,
                "type": "phrase",
                "fields": SEARCH_FIELDS
            }
        }])
    };

    let filter: Vec<Value> = [
        ("main_league", &req.league),
        ("clubs", &req.club),
        ("source", &req.source),
    ]
    .into_iter()
    .filter(|(_, v)| !v.is_empty())
    .map(|(field, v)| {
        let mut term = serde_json::Map::new();
        term.insert(field.to_string(), Value::String(v.clone()));
        json!({ "term": term })
    })
    .collect();

    json!({
        "query": {"bool": {"must": must, "filter": filter}},
        "sort": [{"date": {"order": req.order.as_str()}}],
        "size": PAGE_SIZE,
        "from": req.from
    })
}

/// Distinct values of `field` (clubs, leagues, source), optionally within one main league.
pub fn facet_body(field: &str, league: Option<&str>) -> Value {
    let query = match league.filter(|l| !l.is_empty()) {
        Some(l) => json!({"term": {"main_league": l}}),
        None => json!({"match_all": {}}),
    };
    json!({
        "size": 0,
        "query": query,
        "aggs": {"values": {"terms": {"field": field, "size": FACET_SIZE}}}
    })
}

/// A hit as returned to API clients.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub summary: String,
    pub url: String,
    pub source: String,
    pub date: String,
    pub clubs: Vec<String>,
    pub leagues: Vec<String>,
}

impl SearchHit {
    /// Reshape one raw hit (`{"_source": {...}}`); missing fields become empty.
    pub fn from_hit(hit: &Value) -> Self {
        let src = &hit["_source"];
        let text = |k: &str| src[k].as_str().unwrap_or_default().to_string();
        let list = |k: &str| -> Vec<String> {
            src[k]
                .as_array()
                .map(|a| {
                    a.iter()
                        .filter_map(|v| v.as_str().map(str::to_string))
                        .collect()
                })
                .unwrap_or_default()
        };
        Self {
            title: text("title"),
            summary: text("summary"),
            url: text("url"),
            source: text("source"),
            date: text("date"),
            clubs: list("clubs"),
            leagues: list("leagues"),
        }
    }
}

/// Sorted bucket keys of the `values` aggregation from `facet_body`.
pub fn facet_values(response: &Value) -> Vec<String> {
    let mut out: Vec<String> = response["aggregations"]["values"]["buckets"]
        .as_array()
        .map(|b| {
            b.iter()
                .filter_map(|x| x["key"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default();
    out.sort();
    out
}
