//! Runs cycles forever (or a bounded number of times) with a fixed pause

use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info, info_span, Instrument};

use super::state_machine::CycleRunner;
use crate::report::CycleReport;

pub struct Scheduler {
    runner: Arc<CycleRunner>,
    interval: Duration,
}

impl Scheduler {
    pub fn new(runner: Arc<CycleRunner>, interval: Duration) -> Self {
        Self { runner, interval }
    }

    /// Runs cycles back to back until `max_cycles` is reached; never returns
    /// when unbounded. No cycle failure, panics included, stops the loop.
    pub async fn run(&self, max_cycles: Option<u64>) -> u64 {
        let mut seq = 0u64;
        loop {
            seq += 1;
            let report = self.run_cycle(seq).await;
            match report.to_json() {
                Ok(json) => info!(target: "cycle_report", "{}", json),
                Err(e) => error!("Failed to serialize cycle report: {}", e),
            }

            if max_cycles.is_some_and(|max| seq >= max) {
                info!("Completed {} cycle(s), stopping", seq);
                return seq;
            }
            info!("Sleeping {}s until next cycle...", self.interval.as_secs());
            sleep(self.interval).await;
        }
    }

    /// Runs one cycle on its own task so a panic is caught here
    pub async fn run_cycle(&self, seq: u64) -> CycleReport {
        let runner = self.runner.clone();
        let span = info_span!("cycle", seq);
        let task = tokio::spawn(
            async move {
                info!("=== Cycle start ===");
                let mut report = CycleReport::start(seq);
                match runner.run_once(&mut report).await {
                    Ok(outcome) => report.finish(outcome),
                    Err(e) => {
                        let err = anyhow::Error::from(e);
                        error!("Cycle error: {:#}", err);
                        report.fail(format!("{:#}", err));
                    }
                }
                info!("=== Cycle end ===");
                report
            }
            .instrument(span),
        );

        match task.await {
            Ok(report) => report,
            Err(join_err) => {
                error!(seq, "Cycle task aborted: {}", join_err);
                let mut report = CycleReport::start(seq);
                report.fail(format!("cycle task aborted: {}", join_err));
                report
            }
        }
    }
}
