//! Adapters for the external venues the bot trades through

pub mod api_clients;
pub mod compute_budget;
pub mod pump_amm;
