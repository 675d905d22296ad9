// tests/pipeline_e2e.rs
// End-to-end: JSON batches on disk -> date partitions on disk.
// Uses temp dirs only; reference tables are written next to the input.

use chrono::NaiveDate;
use football_news_enricher::config::{PathsSection, PipelineConfig};
use football_news_enricher::model::EnrichedArticle;
use football_news_enricher::pipeline::run_from_config;
use serde_json::json;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

const DOMESTIC: &str = "club_name,league_name
Real Madrid CF,Spain Primera División 2024/25
Liverpool FC,English Premier League 2024/25
Arsenal FC,English Premier League 2024/25
Rangers FC,Scottish Premiership 2024/25
Celtic FC,Scottish Premiership 2024/25
Heart of Midlothian,Scottish Premiership 2024/25
";

const EUROPEAN: &str = "club_name,league_name
Real Madrid CF,UEFA Champions League 2024/25
Liverpool FC,UEFA Champions League 2024/25
Arsenal FC,UEFA Champions League 2024/25
Celtic FC,UEFA Champions League 2024/25
Rangers FC,UEFA Europa League 2024/25
";

fn article(title: &str, url: &str, date: &str, source: &str) -> serde_json::Value {
    json!({"title": title, "summary": "", "url": url, "date": date, "source": source})
}

/// Lays out reference tables, two good batches and one broken one.
fn setup(root: &Path) -> PipelineConfig {
    let input = root.join("in");
    fs::create_dir_all(&input).unwrap();
    fs::write(root.join("domestic.csv"), DOMESTIC).unwrap();
    fs::write(root.join("european.csv"), EUROPEAN).unwrap();

    let first = json!([
        article(
            "Arsenal beat Real Madrid in Champions League quarter-final",
            "https://www.bbc.co.uk/sport/football/articles/a1",
            "Wed, 16 Apr 2025 21:00:00 GMT",
            "BBC"
        ),
        // same (title, source) later the same local day
        article(
            "Arsenal beat Real Madrid in Champions League quarter-final",
            "https://www.bbc.co.uk/sport/football/articles/a1-live",
            "Wed, 16 Apr 2025 22:00:00 GMT",
            "BBC"
        ),
        article(
            "Alcaraz wins Barcelona Open tennis final",
            "https://www.bbc.co.uk/sport/tennis/articles/t1",
            "2025-04-20T12:00:00Z",
            "BBC"
        ),
        article(
            "Celtic beat Aberdeen to move closer to the title",
            "https://www.bbc.co.uk/sport/football/articles/c1",
            "2025-04-10T10:00:00Z",
            "BBC"
        ),
        article(
            "Liverpool manager speaks to the press",
            "https://www.bbc.co.uk/sport/football/articles/l0",
            "soon",
            "BBC"
        ),
    ]);
    let second = json!([
        article(
            "Liverpool clinch Premier League title",
            "https://www.theguardian.com/football/premier-league/liverpool-title",
            "2025-04-27T15:30:00Z",
            "Guardian"
        ),
        article(
            "Hearts beat Rangers at Tynecastle",
            "https://www.bbc.co.uk/sport/football/articles/h1",
            "Sat, 26 Apr 2025 14:00:00 GMT",
            "BBC"
        ),
        article(
            "Chelsea sign new goalkeeper",
            "https://example.com/football/chelsea-goalkeeper",
            "2025-04-27T01:00:00Z",
            "Guardian"
        ),
    ]);
    fs::write(input.join("a_batch.json"), first.to_string()).unwrap();
    fs::write(input.join("b_batch.json"), second.to_string()).unwrap();
    fs::write(input.join("broken.json"), "{ this is not json").unwrap();
    fs::write(input.join("README.txt"), "not a batch").unwrap();

    PipelineConfig {
        paths: PathsSection {
            input_dir: input,
            output_dir: root.join("out"),
            domestic_table: root.join("domestic.csv"),
            european_table: root.join("european.csv"),
        },
        ..Default::default()
    }
}

fn read_partition(dir: &Path, day: &str) -> Vec<EnrichedArticle> {
    let body = fs::read_to_string(dir.join(format!("{day}.json"))).unwrap();
    serde_json::from_str(&body).unwrap()
}

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn run_reports_every_drop_reason() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg = setup(tmp.path());
    let report = run_from_config(&cfg).unwrap();

    assert_eq!(report.batches, 2);
    assert_eq!(report.batch_errors, 1);
    assert_eq!(report.articles, 8);
    assert_eq!(report.irrelevant, 1);
    assert_eq!(report.stale, 1);
    assert_eq!(report.bad_dates, 1);
    assert_eq!(report.duplicates, 1);
    assert_eq!(report.written, 4);
    assert_eq!(report.partitions, 3);
}

#[test]
fn partitions_follow_local_calendar_day() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg = setup(tmp.path());
    run_from_config(&cfg).unwrap();

    let mut names: Vec<String> = fs::read_dir(&cfg.paths.output_dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    // 21:00 GMT on the 16th is already the 17th at +07:00.
    assert_eq!(names, ["2025-04-17.json", "2025-04-26.json", "2025-04-27.json"]);

    let day = read_partition(&cfg.paths.output_dir, "2025-04-17");
    assert_eq!(day.len(), 1);
    assert_eq!(day[0].url, "https://www.bbc.co.uk/sport/football/articles/a1");
    assert_eq!(day[0].date.to_rfc3339(), "2025-04-17T04:00:00+07:00");
    assert_eq!(day[0].clubs, set(&["Arsenal FC", "Real Madrid CF"]));
    assert_eq!(day[0].leagues, set(&["UEFA Champions League 2024/25"]));
    assert_eq!(day[0].main_league, None);
}

#[test]
fn partitions_are_deduplicated_and_sorted() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg = setup(tmp.path());
    run_from_config(&cfg).unwrap();

    for day in ["2025-04-17", "2025-04-26", "2025-04-27"] {
        let articles = read_partition(&cfg.paths.output_dir, day);
        let ids: BTreeSet<(String, String)> = articles
            .iter()
            .map(|a| (a.title.clone(), a.source.clone()))
            .collect();
        assert_eq!(ids.len(), articles.len(), "duplicate identity in {day}");
        assert!(articles.windows(2).all(|w| w[0].date <= w[1].date));
        let expected = NaiveDate::parse_from_str(day, "%Y-%m-%d").unwrap();
        assert!(articles.iter().all(|a| a.date.date_naive() == expected));
    }

    let last = read_partition(&cfg.paths.output_dir, "2025-04-27");
    assert_eq!(last[0].title, "Chelsea sign new goalkeeper");
    assert!(last[0].clubs.is_empty() && last[0].leagues.is_empty());
    assert_eq!(last[1].title, "Liverpool clinch Premier League title");
    assert_eq!(
        last[1].main_league.as_deref(),
        Some("English Premier League 2024/25")
    );
}

#[test]
fn hearts_story_is_tagged_with_rangers_only() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg = setup(tmp.path());
    run_from_config(&cfg).unwrap();

    let day = read_partition(&cfg.paths.output_dir, "2025-04-26");
    assert_eq!(day.len(), 1);
    assert_eq!(day[0].clubs, set(&["Rangers FC"]));
    assert_eq!(day[0].main_league.as_deref(), Some("Scottish Premiership 2024/25"));
}

#[test]
fn rerun_produces_identical_files() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg = setup(tmp.path());
    run_from_config(&cfg).unwrap();
    let first = fs::read(cfg.paths.output_dir.join("2025-04-27.json")).unwrap();

    // A stale file from an older run of the same day is overwritten.
    fs::write(cfg.paths.output_dir.join("2025-04-17.json"), "[]").unwrap();
    run_from_config(&cfg).unwrap();

    assert_eq!(fs::read(cfg.paths.output_dir.join("2025-04-27.json")).unwrap(), first);
    assert_eq!(read_partition(&cfg.paths.output_dir, "2025-04-17").len(), 1);
}

#[test]
fn cutoff_from_config_moves_the_window() {
    let tmp = tempfile::tempdir().unwrap();
    let mut cfg = setup(tmp.path());
    cfg.time.cutoff = "2025-04-27T00:00:00+07:00".into();
    let report = run_from_config(&cfg).unwrap();

    assert_eq!(report.partitions, 1);
    assert_eq!(report.stale, 4);
    assert!(!cfg.paths.output_dir.join("2025-04-17.json").exists());
}

#[test]
fn missing_reference_column_aborts_before_output() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg = setup(tmp.path());
    fs::write(&cfg.paths.domestic_table, "club,league\nArsenal FC,EPL\n").unwrap();

    let err = run_from_config(&cfg).unwrap_err();
    assert!(format!("{err:#}").contains("club_name"));
    assert!(!cfg.paths.output_dir.exists());
}

#[test]
fn missing_reference_file_aborts() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg = setup(tmp.path());
    fs::remove_file(&cfg.paths.european_table).unwrap();
    assert!(run_from_config(&cfg).is_err());
    assert!(!cfg.paths.output_dir.exists());
}
