//! Per-stage results and cycle outcomes

use serde::Serialize;
use std::fmt;

use crate::shared::utils::format_sol;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Collect,
    EvaluateCollect,
    Buy,
    EvaluateBuy,
    Deposit,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Collect => "collect fees",
            Stage::EvaluateCollect => "evaluate collect",
            Stage::Buy => "buy",
            Stage::EvaluateBuy => "evaluate buy",
            Stage::Deposit => "deposit",
        }
    }
}

/// Why a cycle stopped before the deposit stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum AbortReason {
    /// The relay answered without a usable transaction reference
    NoSignature { stage: Stage },
    /// The transaction errored on-chain or timed out
    NotConfirmed { stage: Stage, reference: String },
    CollectedBelowGasBuffer { collected: u64, gas_buffer: u64 },
    SpendNotPositive { collected: u64 },
    NothingBought,
    SolCapNotPositive { balance: u64 },
}

impl AbortReason {
    pub fn stage(&self) -> Stage {
        match self {
            AbortReason::NoSignature { stage } | AbortReason::NotConfirmed { stage, .. } => *stage,
            AbortReason::CollectedBelowGasBuffer { .. } => Stage::EvaluateCollect,
            AbortReason::SpendNotPositive { .. } | AbortReason::NothingBought => Stage::Buy,
            AbortReason::SolCapNotPositive { .. } => Stage::EvaluateBuy,
        }
    }
}

impl fmt::Display for AbortReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbortReason::NoSignature { stage } => {
                write!(f, "{}: no signature, skipping rest of cycle", stage.as_str())
            }
            AbortReason::NotConfirmed { stage, reference } => write!(
                f,
                "{}: tx {} not confirmed or failed, skipping rest of cycle",
                stage.as_str(),
                reference
            ),
            AbortReason::CollectedBelowGasBuffer { collected, gas_buffer } => write!(
                f,
                "collected {} SOL is not above the {} SOL gas buffer; leaving it for next cycle",
                format_sol(*collected),
                format_sol(*gas_buffer)
            ),
            AbortReason::SpendNotPositive { collected } => write!(
                f,
                "buy spend computed <= 0 from {} SOL collected; skipping buy",
                format_sol(*collected)
            ),
            AbortReason::NothingBought => write!(f, "no tokens bought; skipping LP"),
            AbortReason::SolCapNotPositive { balance } => write!(
                f,
                "sol cap <= 0 with {} SOL in wallet; skipping LP",
                format_sol(*balance)
            ),
        }
    }
}

/// Result of a stage whose precondition may not hold
#[derive(Debug, Clone, PartialEq)]
pub enum StageResult<T> {
    Proceed(T),
    Abort(AbortReason),
}

/// How a cycle ended, when it did not fail with an error
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CycleOutcome {
    Aborted(AbortReason),
    Deposited { success: bool },
}
