// src/detect/mod.rs
//! Entity detection: which clubs an article is about and which leagues or
//! competitions it belongs to.
//!
//! Order of evaluation:
//! 1) club keywords (word boundaries, guarded keywords)
//! 2) continental competition mentions (text + url)
//! 3) league rules (`rules::LEAGUE_RULES`, first match wins)
//! 4) bare major-league mention when nothing else was found
//! 5) URL slug hint

pub mod clubs;
pub mod continental;
pub mod rules;

use crate::model::Detection;
use crate::reference::competitions::Competition;
use crate::reference::ReferenceMaps;
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::debug;

/// How a detection came about; handy when triaging odd tags.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct DetectionTrace {
    pub keywords: Vec<String>,
    pub mentioned: Vec<String>,
    pub rule: &'static str,
    pub bare_fallback: bool,
    pub url_hint: Option<&'static str>,
    pub url_hint_applied: bool,
}

pub fn detect_clubs_and_leagues(text: &str, url: &str, refs: &ReferenceMaps) -> Detection {
    detect_with_trace(text, url, refs).0
}

pub fn detect_with_trace(
    text: &str,
    url: &str,
    refs: &ReferenceMaps,
) -> (Detection, DetectionTrace) {
    let text_lower = text.to_lowercase();
    let url_lower = url.to_lowercase();
    let full_text = format!("{text_lower} {url_lower}");

    let found = clubs::match_clubs(&text_lower, refs);
    let mut mentioned: BTreeSet<Competition> = continental::mentioned_competitions(&full_text);

    let mut trace = DetectionTrace {
        keywords: found.keywords.clone(),
        mentioned: mentioned.iter().map(|c| c.name().to_string()).collect(),
        ..Default::default()
    };

    let ev = rules::Evidence {
        text_lower: &text_lower,
        url_lower: &url_lower,
        clubs: &found,
        mentioned: &mentioned,
        refs,
    };
    let (mut leagues, rule) = rules::resolve_leagues(&ev);
    trace.rule = rule;

    if found.clubs.is_empty() && leagues.is_empty() {
        if let Some(major) = rules::bare_league_fallback(&text_lower) {
            leagues.insert(major.name().to_string());
            trace.bare_fallback = true;
        }
    }

    if let Some(hint) = rules::url_hint(&url_lower) {
        trace.url_hint = Some(hint.name());
        trace.url_hint_applied =
            rules::apply_url_hint(hint, &mut leagues, &mut mentioned, &found.domestic_leagues);
    }

    debug!(
        target: "detect",
        clubs = ?found.clubs,
        leagues = ?leagues,
        rule,
        url_hint = ?trace.url_hint,
        "detection"
    );

    (
        Detection {
            clubs: found.clubs,
            leagues,
        },
        trace,
    )
}
