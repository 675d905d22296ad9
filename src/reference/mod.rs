// src/reference/mod.rs
//! Reference data: which keywords name which club, which domestic league a
//! club plays in, and which continental competitions it entered this season.
//!
//! Built once from two `club_name,league_name` tables plus the alias table and
//! then shared read-only by the relevance filter and the entity detector.

pub mod aliases;
pub mod competitions;
pub mod import;

use crate::error::ReferenceDataError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

pub use competitions::{Competition, MajorLeague, UrlHint};

/// One row of either reference table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    pub club_name: String,
    pub league_name: String,
}

/// A lowercase keyword and the canonical club it resolves to.
#[derive(Debug, Clone)]
pub struct KeywordEntry {
    pub keyword: String,
    pub club: String,
    pattern: Regex,
}

impl KeywordEntry {
    fn new(keyword: String, club: String) -> Self {
        // Escaped literal wrapped in word boundaries always compiles.
        let pattern = Regex::new(&format!(r"\b{}\b", regex::escape(&keyword)))
            .expect("escaped keyword regex");
        Self {
            keyword,
            club,
            pattern,
        }
    }

    /// Word-boundary match against already lowercased text.
    pub fn matches(&self, text_lower: &str) -> bool {
        self.pattern.is_match(text_lower)
    }
}

/// Immutable lookup structures shared by filter and detector.
#[derive(Debug, Clone, Default)]
pub struct ReferenceMaps {
    // Table order; a later duplicate keyword replaces the club in place.
    keywords: Vec<KeywordEntry>,
    keyword_index: HashMap<String, usize>,
    club_to_league: HashMap<String, String>,
    club_to_euro: HashMap<String, BTreeSet<String>>,
    continental_names: BTreeSet<String>,
}

/// Load both tables from disk and build the maps.
pub fn build_keyword_maps(
    domestic: &Path,
    european: &Path,
) -> Result<ReferenceMaps, ReferenceDataError> {
    let domestic_rows = read_table_file(domestic)?;
    let european_rows = read_table_file(european)?;
    let maps = ReferenceMaps::from_rows(&domestic_rows, &european_rows);
    info!(
        target: "reference",
        clubs = maps.club_to_league.len(),
        keywords = maps.keywords.len(),
        continental_clubs = maps.club_to_euro.len(),
        "reference maps built"
    );
    Ok(maps)
}

pub fn read_table_file(path: &Path) -> Result<Vec<TableRow>, ReferenceDataError> {
    let file = std::fs::File::open(path).map_err(|e| ReferenceDataError::Unreadable {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    read_table(file, path)
}

/// Parse a `club_name,league_name` table. `label` is only used in errors.
pub fn read_table<R: Read>(reader: R, label: &Path) -> Result<Vec<TableRow>, ReferenceDataError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| ReferenceDataError::Unreadable {
            path: label.to_path_buf(),
            source: e,
        })?
        .clone();
    for column in ["club_name", "league_name"] {
        if !headers.iter().any(|h| h == column) {
            return Err(ReferenceDataError::MissingColumn {
                path: label.to_path_buf(),
                column,
            });
        }
    }

    let mut rows = Vec::new();
    for (i, rec) in rdr.deserialize::<TableRow>().enumerate() {
        let row = rec.map_err(|e| ReferenceDataError::BadRow {
            path: label.to_path_buf(),
            row: i as u64 + 2, // 1-based, after the header
            source: e,
        })?;
        if row.club_name.is_empty() || row.league_name.is_empty() {
            warn!(target: "reference", table = %label.display(), row = i + 2, "skipping blank row");
            continue;
        }
        rows.push(row);
    }
    Ok(rows)
}

impl ReferenceMaps {
    pub fn from_rows(domestic: &[TableRow], european: &[TableRow]) -> Self {
        let mut maps = Self::default();

        for row in domestic {
            let club = row.club_name.trim();
            let league = row.league_name.trim();
            maps.club_to_league.insert(club.to_string(), league.to_string());
            maps.register(club.to_lowercase(), club);
            for alias in aliases::aliases_for(club) {
                maps.register(alias.to_lowercase(), club);
            }
        }

        for row in european {
            let club = row.club_name.trim();
            let comp = row.league_name.trim();
            maps.club_to_euro
                .entry(club.to_string())
                .or_default()
                .insert(comp.to_string());
            maps.continental_names.insert(comp.to_string());
        }

        maps
    }

    /// Convenience for inline CSV fixtures.
    pub fn from_csv_str(domestic: &str, european: &str) -> Result<Self, ReferenceDataError> {
        let d = read_table(domestic.as_bytes(), Path::new("<domestic>"))?;
        let e = read_table(european.as_bytes(), Path::new("<european>"))?;
        Ok(Self::from_rows(&d, &e))
    }

    fn register(&mut self, keyword: String, club: &str) {
        match self.keyword_index.get(&keyword) {
            Some(&slot) => {
                if self.keywords[slot].club != club {
                    debug!(target: "reference", %keyword, old = %self.keywords[slot].club, new = club, "keyword reassigned");
                }
                self.keywords[slot].club = club.to_string();
            }
            None => {
                self.keyword_index.insert(keyword.clone(), self.keywords.len());
                self.keywords.push(KeywordEntry::new(keyword, club.to_string()));
            }
        }
    }

    /// Keywords in registration order.
    pub fn keywords(&self) -> &[KeywordEntry] {
        &self.keywords
    }

    pub fn club_for_keyword(&self, keyword: &str) -> Option<&str> {
        self.keyword_index
            .get(keyword)
            .map(|&i| self.keywords[i].club.as_str())
    }

    pub fn domestic_league(&self, club: &str) -> Option<&str> {
        self.club_to_league.get(club).map(String::as_str)
    }

    /// Continental competitions of `club`; empty when it entered none.
    pub fn euro_competitions(&self, club: &str) -> BTreeSet<String> {
        self.club_to_euro.get(club).cloned().unwrap_or_default()
    }

    /// True for the known UEFA competitions and any competition listed in the European table.
    pub fn is_continental(&self, league: &str) -> bool {
        Competition::from_name(league).is_some() || self.continental_names.contains(league)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOMESTIC: &str = "club_name,league_name
Manchester United FC,English Premier League 2024/25
Real Madrid CF,Spain Primera División 2024/25
Heart of Midlothian,Scottish Premiership 2024/25
";
    const EUROPEAN: &str = "club_name,league_name
Real Madrid CF,UEFA Champions League 2024/25
Manchester United FC,UEFA Europa League 2024/25
";

    #[test]
    fn registers_canonical_names_and_aliases() {
        let m = ReferenceMaps::from_csv_str(DOMESTIC, EUROPEAN).unwrap();
        assert_eq!(m.club_for_keyword("manchester united fc"), Some("Manchester United FC"));
        assert_eq!(m.club_for_keyword("man utd"), Some("Manchester United FC"));
        assert_eq!(m.club_for_keyword("hearts"), Some("Heart of Midlothian"));
        // alias of a club absent from the domestic table stays inert
        assert_eq!(m.club_for_keyword("liverpool"), None);
        for kw in m.keywords() {
            assert_eq!(kw.keyword, kw.keyword.to_lowercase());
        }
    }

    #[test]
    fn euro_sets_and_continental_names() {
        let m = ReferenceMaps::from_csv_str(DOMESTIC, EUROPEAN).unwrap();
        assert!(m
            .euro_competitions("Real Madrid CF")
            .contains("UEFA Champions League 2024/25"));
        assert!(m.euro_competitions("Heart of Midlothian").is_empty());
        assert!(m.is_continental("UEFA Europa League 2024/25"));
        assert!(!m.is_continental("English Premier League 2024/25"));
    }

    #[test]
    fn missing_column_is_reported() {
        let err = ReferenceMaps::from_csv_str("club,league\nA,B\n", EUROPEAN).unwrap_err();
        assert!(matches!(
            err,
            ReferenceDataError::MissingColumn { column: "club_name", .. }
        ));
    }

    #[test]
    fn values_are_trimmed() {
        let m = ReferenceMaps::from_csv_str(
            "club_name,league_name\n  Real Madrid CF , Spain Primera División 2024/25 \n",
            "club_name,league_name\n",
        )
        .unwrap();
        assert_eq!(
            m.domestic_league("Real Madrid CF"),
            Some("Spain Primera División 2024/25")
        );
    }

    #[test]
    fn keyword_match_respects_word_boundaries() {
        let m = ReferenceMaps::from_csv_str(DOMESTIC, EUROPEAN).unwrap();
        let real = m
            .keywords()
            .iter()
            .find(|k| k.keyword == "real madrid")
            .unwrap();
        assert!(real.matches("real madrid beat city"));
        assert!(!real.matches("unreal madridistas"));
    }
}
