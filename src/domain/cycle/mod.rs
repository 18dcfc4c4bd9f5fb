//! One collect -> buy -> deposit cycle and the loop that repeats it

pub mod outcome;
pub mod scheduler;
pub mod state_machine;

pub use outcome::{AbortReason, CycleOutcome, Stage, StageResult};
pub use scheduler::Scheduler;
pub use state_machine::{Collaborators, CycleRunner};
