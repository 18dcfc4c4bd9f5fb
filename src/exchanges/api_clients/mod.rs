pub mod pumpportal_client;

pub use pumpportal_client::PumpPortalClient;
