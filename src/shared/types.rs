//! Common types used across the application

use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

/// Raw token amount together with its decimal exponent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenBalance {
    pub amount: u64,
    pub decimals: u8,
}

impl TokenBalance {
    pub fn new(amount: u64, decimals: u8) -> Self {
        Self { amount, decimals }
    }

    pub fn to_ui(&self) -> f64 {
        raw_to_ui(self.amount, self.decimals)
    }
}

/// Token program that owns a mint's accounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenProgram {
    Spl,
    Token2022,
}

impl TokenProgram {
    pub fn id(&self) -> Pubkey {
        match self {
            TokenProgram::Spl => spl_token::id(),
            TokenProgram::Token2022 => TOKEN_2022_PROGRAM_ID,
        }
    }
}

pub const TOKEN_2022_PROGRAM_ID: Pubkey =
    solana_sdk::pubkey!("TokenzQdBNbLqP5VEhdkAS6EPFLC1PeaWZy8AX7uRbP");

/// What a delta measurement reads before and after an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceProbe {
    Native,
    Token { mint: Pubkey, program: TokenProgram },
}

/// Confirmation level reported for a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConfirmationLevel {
    Processed,
    Confirmed,
    Finalized,
}

/// Status of a submitted transaction as seen by the chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxStatus {
    pub err: Option<String>,
    pub confirmation: Option<ConfirmationLevel>,
}

impl TxStatus {
    pub fn is_confirmed(&self) -> bool {
        self.err.is_none()
            && self
                .confirmation
                .map(|level| level >= ConfirmationLevel::Confirmed)
                .unwrap_or(false)
    }
}

pub fn raw_to_ui(amount: u64, decimals: u8) -> f64 {
    amount as f64 / 10_f64.powi(decimals as i32)
}
