//! Error handling for the application

use thiserror::Error;

/// Trade relay errors
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid relay request: {0}")]
    InvalidRequest(String),
}

/// Chain read errors
#[derive(Error, Debug, Clone)]
pub enum ChainError {
    #[error("RPC request failed: {0}")]
    Rpc(String),

    #[error("Associated token account {account} does not exist yet")]
    TokenAccountMissing { account: String },

    #[error("Invalid transaction reference: {0}")]
    InvalidReference(String),

    #[error("Account not found: {0}")]
    AccountNotFound(String),

    #[error("Invalid account data for {account}: {reason}")]
    InvalidAccountData { account: String, reason: String },
}

/// Pool key normalization errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PoolKeyError {
    #[error("Missing pool field: {0}")]
    MissingField(&'static str),

    #[error("Invalid address in field {field}: {reason}")]
    InvalidAddress { field: &'static str, reason: String },

    #[error("Pool record matches no known layout (current: {current}; legacy: {legacy})")]
    UnknownLayout { current: Box<PoolKeyError>, legacy: Box<PoolKeyError> },
}

/// Deposit preparation errors
#[derive(Error, Debug)]
pub enum DepositError {
    #[error("Pool has no base reserve")]
    EmptyPool,

    #[error("Pool has zero LP supply")]
    ZeroLpSupply,

    #[error("Instruction build failed: {0}")]
    Instruction(String),

    #[error(transparent)]
    Chain(#[from] ChainError),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Errors that escape a cycle and are caught at the scheduler boundary
#[derive(Error, Debug)]
pub enum CycleError {
    #[error("Relay error: {0}")]
    Relay(#[from] RelayError),

    #[error("Chain error: {0}")]
    Chain(#[from] ChainError),

    #[error("Pool key error: {0}")]
    PoolKeys(#[from] PoolKeyError),

    #[error("Deposit error: {0}")]
    Deposit(#[from] DepositError),
}
