// src/detect/continental.rs
//! Continental competition mentions.
//!
//! A phrase only counts when the text also reads like a match report (one of
//! `CONTEXT_WORDS`) and is not about qualifying for the competition.

use crate::reference::competitions::{Competition, COMPETITION_PHRASES};
use std::collections::BTreeSet;

pub const CONTEXT_WORDS: &[&str] = &[
    "win",
    "beat",
    "match",
    "tie",
    "semi-final",
    "quarter-final",
    "advance",
    "progress",
    "clash",
    "remontada",
    "eliminate",
    "knockout",
    "draw",
    "leg",
    "aggregate",
];

pub const QUALIFYING_PHRASES: &[&str] = &[
    "race for",
    "fight for",
    "battle for",
    "chase for",
    "push for",
    "aim for",
    "qualify for",
    "qualification to",
    "hope to qualify",
];

/// Qualification talk: some qualifying phrase anywhere in the text while the
/// competition phrase is present anywhere as well. The two are not required
/// to be near each other, so "X beat Y; Z in the race for the top four" also
/// suppresses a Champions League mention.
pub fn is_qualification_context(phrase: &str, full_text: &str) -> bool {
    QUALIFYING_PHRASES.iter().any(|q| full_text.contains(q)) && full_text.contains(phrase)
}

/// Competitions mentioned in `full_text` (lowercased text + url).
pub fn mentioned_competitions(full_text: &str) -> BTreeSet<Competition> {
    let has_context = CONTEXT_WORDS.iter().any(|w| full_text.contains(w));
    COMPETITION_PHRASES
        .iter()
        .filter(|(phrase, _)| {
            full_text.contains(phrase)
                && has_context
                && !is_qualification_context(phrase, full_text)
        })
        .map(|&(_, comp)| comp)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phrase_with_context_is_mentioned() {
        let m = mentioned_competitions("arsenal beat real madrid in the champions league");
        assert_eq!(m, BTreeSet::from([Competition::ChampionsLeague]));
    }

    #[test]
    fn phrase_without_context_is_ignored() {
        assert!(mentioned_competitions("champions league anthem explained").is_empty());
    }

    #[test]
    fn synonyms_collapse_to_one_competition() {
        let m = mentioned_competitions("uefa europa league: spurs advance");
        assert_eq!(m, BTreeSet::from([Competition::EuropaLeague]));
    }

    #[test]
    fn qualification_talk_is_excluded() {
        assert!(mentioned_competitions("villa win to stay in the race for the champions league").is_empty());
    }

    #[test]
    fn qualification_check_ignores_proximity() {
        // The qualifying phrase is about a different competition, yet the
        // Champions League result is suppressed too.
        let t = "inter beat barcelona in the champions league semi-final; roma in the fight for europa league spots";
        assert!(mentioned_competitions(t).is_empty());
    }
}
