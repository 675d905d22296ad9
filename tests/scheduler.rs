// tests/scheduler.rs
use football_news_enricher::config::{PathsSection, PipelineConfig};
use football_news_enricher::pipeline::scheduler::spawn_periodic;
use std::fs;
use std::time::Duration;

#[tokio::test]
async fn first_tick_runs_immediately_and_writes_partitions() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    fs::create_dir_all(root.join("in")).unwrap();
    fs::write(
        root.join("domestic.csv"),
        "club_name,league_name\nArsenal FC,English Premier League 2024/25\n",
    )
    .unwrap();
    fs::write(root.join("european.csv"), "club_name,league_name\n").unwrap();
    fs::write(
        root.join("in/day.json"),
        r#"[{"title":"Arsenal win late","summary":"Winning goal in stoppage time","url":"","date":"2025-04-20T12:00:00Z","source":"BBC"}]"#,
    )
    .unwrap();

    let cfg = PipelineConfig {
        paths: PathsSection {
            input_dir: root.join("in"),
            output_dir: root.join("out"),
            domestic_table: root.join("domestic.csv"),
            european_table: root.join("european.csv"),
        },
        ..Default::default()
    };
    let expected = root.join("out/2025-04-20.json");

    let handle = spawn_periodic(cfg, Duration::from_secs(3600));
    let mut written: Option<serde_json::Value> = None;
    for _ in 0..200 {
        let body = fs::read_to_string(&expected).unwrap_or_default();
        if let Ok(v) = serde_json::from_str::<serde_json::Value>(&body) {
            written = Some(v);
            break;
        }
        tokio::time::sleep(Duration::from_millis(25)).await;
    }
    handle.abort();

    let day = written.expect("scheduled run did not write the partition");
    assert_eq!(day[0]["clubs"][0], "Arsenal FC");
}
