// src/relevance.rs
//! Relevance gate: is a raw article about (men's) football at all?
//!
//! Plain substring matching over `title + summary + url`, lowercased:
//! 1. any blocklisted term  -> not relevant (wins over everything below)
//! 2. any general football term -> relevant
//! 3. any known club keyword or alias -> relevant
//!
//! Substrings are matched without word boundaries, so a club alias that is
//! also an ordinary word ("forest", "villa", "inter") lets unrelated text in,
//! and short blocklist terms ("ring", "f1") reject some genuine football
//! stories. Both are accepted trade-offs of this gate.

use crate::model::RawArticle;
use crate::reference::ReferenceMaps;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockCategory {
    OtherSport,
    OtherSportEvent,
    WomensGame,
    Noise,
}

pub const BLOCKLIST: &[(&str, BlockCategory)] = &[
    ("rugby", BlockCategory::OtherSport),
    ("atp", BlockCategory::OtherSport),
    ("tennis", BlockCategory::OtherSport),
    ("boxing", BlockCategory::OtherSport),
    ("mma", BlockCategory::OtherSport),
    ("ufc", BlockCategory::OtherSport),
    ("fighting", BlockCategory::OtherSport),
    ("ring", BlockCategory::Noise),
    ("golf", BlockCategory::OtherSport),
    ("cricket", BlockCategory::OtherSport),
    ("basketball", BlockCategory::OtherSport),
    ("nba", BlockCategory::OtherSport),
    ("mlb", BlockCategory::OtherSport),
    ("nfl", BlockCategory::OtherSport),
    ("baseball", BlockCategory::OtherSport),
    ("horse racing", BlockCategory::OtherSport),
    ("cycling", BlockCategory::OtherSport),
    ("olympics", BlockCategory::OtherSportEvent),
    ("hockey", BlockCategory::OtherSport),
    ("ice hockey", BlockCategory::OtherSport),
    ("wrestling", BlockCategory::OtherSport),
    ("f1", BlockCategory::OtherSport),
    ("motogp", BlockCategory::OtherSport),
    ("snooker", BlockCategory::OtherSport),
    ("badminton", BlockCategory::OtherSport),
    ("volleyball", BlockCategory::OtherSport),
    ("darts", BlockCategory::OtherSport),
    ("table tennis", BlockCategory::OtherSport),
    ("handball", BlockCategory::OtherSport),
    ("swimming", BlockCategory::OtherSport),
    ("weight", BlockCategory::Noise),
    ("wta", BlockCategory::OtherSport),
    ("grand slam", BlockCategory::OtherSportEvent),
    ("match point", BlockCategory::OtherSportEvent),
    ("set point", BlockCategory::OtherSportEvent),
    ("opening round", BlockCategory::OtherSportEvent),
    ("madrid open", BlockCategory::OtherSportEvent),
    ("australian open", BlockCategory::OtherSportEvent),
    ("wimbledon", BlockCategory::OtherSportEvent),
    ("us open", BlockCategory::OtherSportEvent),
    ("french open", BlockCategory::OtherSportEvent),
    ("roland garros", BlockCategory::OtherSportEvent),
    ("pga tour", BlockCategory::OtherSportEvent),
    ("gold cup", BlockCategory::OtherSportEvent),
    ("ipl", BlockCategory::OtherSportEvent),
    ("racing", BlockCategory::OtherSport),
    ("wsl", BlockCategory::WomensGame),
    ("woman", BlockCategory::WomensGame),
    ("women", BlockCategory::WomensGame),
    ("china open", BlockCategory::OtherSportEvent),
    ("rbc heritage", BlockCategory::OtherSportEvent),
    ("driver", BlockCategory::Noise),
];

pub const GENERAL_FOOTBALL_WORDS: &[&str] = &[
    "football",
    "soccer",
    "match",
    "goal",
    "golden goal",
    "manager",
    "player",
    "coach",
    "transfer",
    "signs",
    "joins",
    "defeats",
    "beats",
    "cup",
    "final",
    "semi-final",
    "semi-finals",
    "quarter-final",
    "quarter-finals",
    "fa cup",
    "premier league",
    "champions league",
    "europa league",
    "super cup",
    "derby",
    "draw",
    "title",
    "retention",
    "promotion",
    "relegation",
    "kickoff",
    "stadium",
];

/// Which rule decided, with the term that triggered it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum RelevanceVerdict {
    Blocked {
        term: &'static str,
        category: BlockCategory,
    },
    FootballTerm {
        term: &'static str,
    },
    ClubKeyword {
        keyword: String,
    },
    NoMatch,
}

impl RelevanceVerdict {
    pub fn is_relevant(&self) -> bool {
        matches!(
            self,
            RelevanceVerdict::FootballTerm { .. } | RelevanceVerdict::ClubKeyword { .. }
        )
    }
}

/// Lowercased `title summary url`, the haystack of every check below.
pub fn combined_text(article: &RawArticle) -> String {
    format!("{} {}", article.text(), article.url).to_lowercase()
}

pub fn relevance_verdict(article: &RawArticle, refs: &ReferenceMaps) -> RelevanceVerdict {
    let combined = combined_text(article);

    let verdict = if let Some(&(term, category)) =
        BLOCKLIST.iter().find(|(t, _)| combined.contains(t))
    {
        RelevanceVerdict::Blocked { term, category }
    } else if let Some(&term) = GENERAL_FOOTBALL_WORDS.iter().find(|w| combined.contains(*w)) {
        RelevanceVerdict::FootballTerm { term }
    } else if let Some(kw) = refs
        .keywords()
        .iter()
        .find(|k| combined.contains(k.keyword.as_str()))
    {
        RelevanceVerdict::ClubKeyword {
            keyword: kw.keyword.clone(),
        }
    } else {
        RelevanceVerdict::NoMatch
    };

    debug!(target: "relevance", title = %article.title, ?verdict);
    verdict
}

pub fn is_football_article(article: &RawArticle, refs: &ReferenceMaps) -> bool {
    relevance_verdict(article, refs).is_relevant()
}
