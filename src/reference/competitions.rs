// src/reference/competitions.rs
//! Fixed competition identifiers for the 2024/25 season.
//!
//! Heuristic tables (text phrases, URL slugs) refer to these enums; the
//! human-readable names only appear when a detection is turned into output.

use std::fmt;

/// Continental (UEFA) club competitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Competition {
    ChampionsLeague,
    EuropaLeague,
    ConferenceLeague,
}

impl Competition {
    pub const ALL: [Competition; 3] = [
        Competition::ChampionsLeague,
        Competition::EuropaLeague,
        Competition::ConferenceLeague,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Competition::ChampionsLeague => "UEFA Champions League 2024/25",
            Competition::EuropaLeague => "UEFA Europa League 2024/25",
            Competition::ConferenceLeague => "UEFA Europa Conference League 2024/25",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }
}

impl fmt::Display for Competition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Synonyms that count as a textual mention of a competition (lowercase).
pub const COMPETITION_PHRASES: &[(&str, Competition)] = &[
    ("uefa champions league", Competition::ChampionsLeague),
    ("champions league", Competition::ChampionsLeague),
    ("uefa europa league", Competition::EuropaLeague),
    ("europa league", Competition::EuropaLeague),
    ("uefa europa conference league", Competition::ConferenceLeague),
    ("conference league", Competition::ConferenceLeague),
];

/// The five big domestic leagues, used by the bare-mention fallback and URL hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MajorLeague {
    Premier,
    LaLiga,
    SerieA,
    Bundesliga,
    Ligue1,
}

impl MajorLeague {
    /// Order matters: the bare-mention fallback picks the first hit.
    pub const ALL: [MajorLeague; 5] = [
        MajorLeague::Premier,
        MajorLeague::LaLiga,
        MajorLeague::SerieA,
        MajorLeague::Bundesliga,
        MajorLeague::Ligue1,
    ];

    pub fn name(self) -> &'static str {
        match self {
            MajorLeague::Premier => "English Premier League 2024/25",
            MajorLeague::LaLiga => "Spain Primera División 2024/25",
            MajorLeague::SerieA => "Italian Serie A 2024/25",
            MajorLeague::Bundesliga => "Deutsche Bundesliga 2024/25",
            MajorLeague::Ligue1 => "French Ligue 1 2024/25",
        }
    }

    /// How the league is commonly written in headlines.
    pub fn mention(self) -> &'static str {
        match self {
            MajorLeague::Premier => "premier league",
            MajorLeague::LaLiga => "la liga",
            MajorLeague::SerieA => "serie a",
            MajorLeague::Bundesliga => "bundesliga",
            MajorLeague::Ligue1 => "ligue 1",
        }
    }
}

impl fmt::Display for MajorLeague {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A league hinted at by a URL path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlHint {
    Domestic(MajorLeague),
    Continental(Competition),
}

impl UrlHint {
    pub fn name(self) -> &'static str {
        match self {
            UrlHint::Domestic(l) => l.name(),
            UrlHint::Continental(c) => c.name(),
        }
    }
}

/// Hyphenated slugs in table order; only the first one found in a URL is used.
pub const URL_HINTS: &[(&str, UrlHint)] = &[
    ("premier-league", UrlHint::Domestic(MajorLeague::Premier)),
    ("la-liga", UrlHint::Domestic(MajorLeague::LaLiga)),
    ("serie-a", UrlHint::Domestic(MajorLeague::SerieA)),
    ("bundesliga", UrlHint::Domestic(MajorLeague::Bundesliga)),
    ("ligue-1", UrlHint::Domestic(MajorLeague::Ligue1)),
    ("champions-league", UrlHint::Continental(Competition::ChampionsLeague)),
    ("europa-league", UrlHint::Continental(Competition::EuropaLeague)),
    ("conference-league", UrlHint::Continental(Competition::ConferenceLeague)),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_lookup() {
        for c in Competition::ALL {
            assert_eq!(Competition::from_name(c.name()), Some(c));
        }
        assert_eq!(Competition::from_name("English Premier League 2024/25"), None);
    }

    #[test]
    fn every_phrase_is_lowercase() {
        for (p, _) in COMPETITION_PHRASES {
            assert_eq!(*p, p.to_lowercase());
        }
        for l in MajorLeague::ALL {
            assert_eq!(l.mention(), l.mention().to_lowercase());
        }
    }
}
