// src/pipeline/scheduler.rs
use crate::config::PipelineConfig;
use metrics::counter;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Re-run the enrichment every `interval`. The first run starts immediately.
/// A failed run is logged and the loop carries on with the next tick.
pub fn spawn_periodic(cfg: PipelineConfig, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let run_cfg = cfg.clone();
            match tokio::task::spawn_blocking(move || super::run_from_config(&run_cfg)).await {
                Ok(Ok(report)) => {
                    counter!("pipeline_runs_total").increment(1);
                    tracing::info!(
                        target: "scheduler",
                        written = report.written,
                        partitions = report.partitions,
                        "scheduled run done"
                    );
                }
                Ok(Err(e)) => {
                    counter!("pipeline_run_errors_total").increment(1);
                    tracing::warn!(target: "scheduler", error = ?e, "scheduled run failed");
                }
                Err(e) => {
                    counter!("pipeline_run_errors_total").increment(1);
                    tracing::warn!(target: "scheduler", error = %e, "scheduled run panicked");
                }
            }
        }
    })
}
