pub mod poller;

pub use poller::{BackoffConfig, ConfirmationPoller};
