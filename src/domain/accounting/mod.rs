//! Balance-delta accounting around relay-submitted actions

pub mod delta_accountant;
pub mod reference;
pub mod snapshot;

pub use delta_accountant::{DeltaAccountant, Measurement};
pub use reference::extract_reference;
pub use snapshot::snapshot;
