//! Infrastructure layer - RPC access to the chain

pub mod blockchain;
