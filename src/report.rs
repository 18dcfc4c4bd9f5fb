// src/report.rs
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::cycle::outcome::CycleOutcome;

/// Status summary of one cycle, logged once the cycle ends
#[derive(Debug, Clone, Default, Serialize)]
pub struct CycleReport {
    pub seq: u64,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,

    // Collect
    pub collect_signature: Option<String>,
    pub collected_lamports: Option<u64>,

    // Buy
    pub spend_lamports: Option<u64>,
    pub buy_signature: Option<String>,
    pub bought_raw: Option<u64>,
    pub token_decimals: Option<u8>,

    // Deposit
    pub deposit_raw: Option<u64>,
    pub sol_cap_lamports: Option<u64>,

    pub outcome: Option<CycleOutcome>,
    pub error: Option<String>,
}

impl CycleReport {
    pub fn start(seq: u64) -> Self {
        Self {
            seq,
            started_at: Some(Utc::now()),
            ..Default::default()
        }
    }

    pub fn finish(&mut self, outcome: CycleOutcome) {
        self.outcome = Some(outcome);
        self.finished_at = Some(Utc::now());
    }

    pub fn fail(&mut self, error: String) {
        self.error = Some(error);
        self.finished_at = Some(Utc::now());
    }

    pub fn deposited(&self) -> bool {
        matches!(self.outcome, Some(CycleOutcome::Deposited { success: true }))
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
