// src/reference/import.rs
//! Grow the European table from a season fixture file.
//!
//! The fixture format is the one published per competition:
//! `{ "name": "UEFA Europa League 2024/25", "matches": [{ "team1": .., "team2": .. }] }`.
//! Every team seen in a match is recorded as a participant of that competition.

use super::{read_table_file, TableRow};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fs;
use std::path::Path;
use tracing::info;

/// Fixture team names that differ from the canonical club names.
const CLUB_NORMALIZATION: &[(&str, &str)] = &[
    ("Inter", "FC Internazionale Milano"),
    ("Roma", "AS Roma"),
    ("Lazio", "SS Lazio"),
    ("Feyenoord", "Feyenoord Rotterdam"),
    ("Ajax", "AFC Ajax"),
    ("Rangers", "Rangers FC"),
    ("Celtic", "Celtic FC"),
    ("Braga", "SC Braga"),
    ("Betis", "Real Betis Balompié"),
];

#[derive(Debug, Deserialize)]
pub struct FixtureFile {
    pub name: String,
    #[serde(default)]
    pub matches: Vec<FixtureMatch>,
}

#[derive(Debug, Deserialize)]
pub struct FixtureMatch {
    #[serde(default)]
    pub team1: String,
    #[serde(default)]
    pub team2: String,
}

pub fn normalize_team(team: &str) -> &str {
    CLUB_NORMALIZATION
        .iter()
        .find(|(short, _)| *short == team)
        .map(|(_, canon)| *canon)
        .unwrap_or(team)
}

/// Distinct (club, competition) pairs of a fixture, sorted by club.
pub fn participants(fixture: &FixtureFile) -> Vec<TableRow> {
    let league = fixture.name.trim();
    let mut clubs: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for m in &fixture.matches {
        for team in [m.team1.trim(), m.team2.trim()] {
            if team.is_empty() {
                continue;
            }
            clubs.entry(normalize_team(team)).or_default().insert(league);
        }
    }
    clubs
        .into_iter()
        .flat_map(|(club, leagues)| {
            leagues.into_iter().map(move |l| TableRow {
                club_name: club.to_string(),
                league_name: l.to_string(),
            })
        })
        .collect()
}

/// Rows of `candidates` not yet present in `existing`, keeping candidate order.
pub fn new_rows(existing: &[TableRow], candidates: Vec<TableRow>) -> Vec<TableRow> {
    let mut seen: HashSet<(String, String)> = existing
        .iter()
        .map(|r| (r.club_name.clone(), r.league_name.clone()))
        .collect();
    candidates
        .into_iter()
        .filter(|r| seen.insert((r.club_name.clone(), r.league_name.clone())))
        .collect()
}

/// Merge a fixture file into the European table at `table`, creating it when missing.
/// Returns the rows that were appended.
pub fn import_competition(fixture_path: &Path, table: &Path) -> Result<Vec<TableRow>> {
    let content = fs::read_to_string(fixture_path)
        .with_context(|| format!("reading fixture {}", fixture_path.display()))?;
    let fixture: FixtureFile = serde_json::from_str(&content)
        .with_context(|| format!("parsing fixture {}", fixture_path.display()))?;

    let exists = table.exists();
    let existing = if exists {
        read_table_file(table)?
    } else {
        Vec::new()
    };
    let added = new_rows(&existing, participants(&fixture));

    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(table)
        .with_context(|| format!("opening {}", table.display()))?;
    let mut wtr = csv::WriterBuilder::new().has_headers(!exists).from_writer(file);
    if !exists && added.is_empty() {
        wtr.write_record(["club_name", "league_name"])?;
    }
    for row in &added {
        info!(target: "reference", club = %row.club_name, competition = %row.league_name, "new club entry");
        wtr.serialize(row)?;
    }
    wtr.flush()?;

    info!(
        target: "reference",
        competition = %fixture.name,
        added = added.len(),
        "competition imported"
    );
    Ok(added)
}
