// src/detect/clubs.rs
use crate::reference::ReferenceMaps;
use std::collections::BTreeSet;

/// Keywords that also exist as ordinary words; each only counts when the
/// paired phrase is present in the same text.
pub const GUARDED_KEYWORDS: &[(&str, &str)] = &[("hearts", "heart of midlothian")];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClubMatches {
    pub clubs: BTreeSet<String>,
    /// One entry per matched keyword, duplicates included.
    pub domestic_leagues: Vec<String>,
    pub keywords: Vec<String>,
}

pub fn keyword_allowed(keyword: &str, text_lower: &str) -> bool {
    GUARDED_KEYWORDS
        .iter()
        .filter(|(kw, _)| *kw == keyword)
        .all(|(_, required)| text_lower.contains(required))
}

/// Word-boundary match of every known keyword against lowercased text.
pub fn match_clubs(text_lower: &str, refs: &ReferenceMaps) -> ClubMatches {
    let mut out = ClubMatches::default();
    for entry in refs.keywords() {
        if !entry.matches(text_lower) || !keyword_allowed(&entry.keyword, text_lower) {
            continue;
        }
        out.clubs.insert(entry.club.clone());
        out.keywords.push(entry.keyword.clone());
        if let Some(league) = refs.domestic_league(&entry.club) {
            out.domestic_leagues.push(league.to_string());
        }
    }
    out
}
