//! Fee compounder - collects creator fees, buys the token with half of them
//! and deposits the result into a PumpSwap pool, forever.

pub mod app;
pub mod config;
pub mod domain;
pub mod exchanges;
pub mod infrastructure;
pub mod math;
pub mod report;
pub mod shared;

#[cfg(test)]
pub mod testing;

pub use config::Config;
pub use domain::cycle::{CycleOutcome, CycleRunner, Scheduler};
pub use report::CycleReport;
