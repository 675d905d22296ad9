// src/detect/rules.rs
//! League resolution as an ordered list of pure rules.
//!
//! `LEAGUE_RULES` is evaluated top to bottom and the first rule returning
//! `Some` decides. The bare-mention fallback and the URL hint run afterwards
//! as separate passes over the result.

use super::clubs::ClubMatches;
use crate::reference::competitions::{Competition, MajorLeague, UrlHint, URL_HINTS};
use crate::reference::ReferenceMaps;
use std::collections::BTreeSet;

/// Everything the rules may look at. All text is lowercased.
#[derive(Debug)]
pub struct Evidence<'a> {
    pub text_lower: &'a str,
    pub url_lower: &'a str,
    pub clubs: &'a ClubMatches,
    pub mentioned: &'a BTreeSet<Competition>,
    pub refs: &'a ReferenceMaps,
}

pub type LeagueRule = fn(&Evidence<'_>) -> Option<BTreeSet<String>>;

pub const LEAGUE_RULES: &[(&str, LeagueRule)] = &[
    ("multi_club", multi_club),
    ("continental_mention", continental_mention),
    ("domestic", domestic),
];

fn competition_names(comps: &BTreeSet<Competition>) -> BTreeSet<String> {
    comps.iter().map(|c| c.name().to_string()).collect()
}

/// Two or more clubs: the competitions they all share, else the mentioned
/// competitions, else their domestic leagues.
pub fn multi_club(ev: &Evidence<'_>) -> Option<BTreeSet<String>> {
    if ev.clubs.clubs.len() < 2 {
        return None;
    }
    let shared = ev
        .clubs
        .clubs
        .iter()
        .map(|c| ev.refs.euro_competitions(c))
        .reduce(|acc, s| acc.intersection(&s).cloned().collect())
        .unwrap_or_default();
    if !shared.is_empty() {
        return Some(shared);
    }
    if !ev.mentioned.is_empty() {
        return Some(competition_names(ev.mentioned));
    }
    Some(ev.clubs.domestic_leagues.iter().cloned().collect())
}

/// At most one club and a continental competition is mentioned.
pub fn continental_mention(ev: &Evidence<'_>) -> Option<BTreeSet<String>> {
    (!ev.mentioned.is_empty()).then(|| competition_names(ev.mentioned))
}

/// Domestic leagues spelled out in the text, else all leagues of the matched clubs.
pub fn domestic(ev: &Evidence<'_>) -> Option<BTreeSet<String>> {
    let named: BTreeSet<String> = ev
        .clubs
        .domestic_leagues
        .iter()
        .filter(|l| ev.text_lower.contains(&l.to_lowercase()))
        .cloned()
        .collect();
    if !named.is_empty() {
        return Some(named);
    }
    Some(ev.clubs.domestic_leagues.iter().cloned().collect())
}

/// Returns the leagues and the name of the rule that produced them.
pub fn resolve_leagues(ev: &Evidence<'_>) -> (BTreeSet<String>, &'static str) {
    for &(name, rule) in LEAGUE_RULES {
        if let Some(leagues) = rule(ev) {
            return (leagues, name);
        }
    }
    (BTreeSet::new(), "none")
}

/// With no club and no league at all, a bare mention of a major league decides.
pub fn bare_league_fallback(text_lower: &str) -> Option<MajorLeague> {
    MajorLeague::ALL
        .into_iter()
        .find(|l| text_lower.contains(l.mention()))
}

/// First slug of `URL_HINTS` found in the URL, in table order.
pub fn url_hint(url_lower: &str) -> Option<UrlHint> {
    URL_HINTS
        .iter()
        .find(|(slug, _)| url_lower.contains(slug))
        .map(|&(_, hint)| hint)
}

/// Apply a URL hint to already resolved leagues.
///
/// A continental hint only fills an empty result. A domestic hint replaces a
/// continental assignment when the hinted league belongs to one of the
/// matched clubs; otherwise it too only fills an empty result.
/// Returns true when the hint changed `leagues`.
pub fn apply_url_hint(
    hint: UrlHint,
    leagues: &mut BTreeSet<String>,
    mentioned: &mut BTreeSet<Competition>,
    domestic_leagues: &[String],
) -> bool {
    let name = hint.name();
    match hint {
        UrlHint::Continental(_) if leagues.is_empty() => {
            leagues.insert(name.to_string());
            true
        }
        UrlHint::Continental(_) => false,
        UrlHint::Domestic(_) => {
            if !mentioned.is_empty() && domestic_leagues.iter().any(|l| l == name) {
                *leagues = BTreeSet::from([name.to_string()]);
                mentioned.clear();
                true
            } else if leagues.is_empty() {
                leagues.insert(name.to_string());
                true
            } else {
                false
            }
        }
    }
}
