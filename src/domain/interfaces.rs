//! Collaborator interfaces consumed by the cycle orchestrator

use async_trait::async_trait;
use serde_json::Value;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Keypair;

use crate::domain::pool::{PoolData, RawPoolRecord};
use crate::shared::errors::{ChainError, DepositError, RelayError};
use crate::shared::types::{TokenBalance, TokenProgram, TxStatus};

/// Action submitted to the trade relay
#[derive(Debug, Clone, PartialEq)]
pub enum TradeAction {
    CollectCreatorFee {
        mint: Pubkey,
        priority_fee_sol: f64,
    },
    Buy {
        mint: Pubkey,
        amount_sol: f64,
        slippage_pct: f64,
        priority_fee_sol: f64,
    },
}

impl TradeAction {
    pub fn label(&self) -> &'static str {
        match self {
            TradeAction::CollectCreatorFee { .. } => "collect fees",
            TradeAction::Buy { .. } => "buy",
        }
    }
}

/// Third-party relay that submits actions on-chain and answers with a
/// best-effort response (possibly carrying a transaction reference)
#[async_trait]
pub trait TradeRelay: Send + Sync {
    async fn submit(&self, action: &TradeAction) -> Result<Value, RelayError>;
}

/// Read-only chain access
#[async_trait]
pub trait ChainReader: Send + Sync {
    /// Native balance in lamports
    async fn balance(&self, owner: &Pubkey) -> Result<u64, ChainError>;

    /// Balance of the associated token account of (owner, mint, program)
    async fn token_balance(
        &self,
        owner: &Pubkey,
        mint: &Pubkey,
        program: TokenProgram,
    ) -> Result<TokenBalance, ChainError>;

    /// Balance of an explicit token account
    async fn token_account_balance(&self, account: &Pubkey) -> Result<TokenBalance, ChainError>;

    /// `Ok(None)` while the network has no status for the reference yet
    async fn signature_status(&self, reference: &str) -> Result<Option<TxStatus>, ChainError>;

    async fn mint_decimals(&self, mint: &Pubkey) -> Result<u8, ChainError>;
}

/// Fetches the raw pool-state record of a liquidity pool
#[async_trait]
pub trait PoolStateFetcher: Send + Sync {
    async fn fetch(&self, pool: &Pubkey) -> Result<RawPoolRecord, ChainError>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepositParams {
    pub slippage_pct: f64,
    pub priority_fee_lamports: u64,
    /// Most SOL the deposit may consume, in lamports
    pub sol_cap: u64,
    pub debug: bool,
}

/// Executes a liquidity deposit; only a success flag comes back
#[async_trait]
pub trait LiquidityDepositor: Send + Sync {
    async fn deposit(
        &self,
        pool: &PoolData,
        base_amount: u64,
        signer: &Keypair,
        params: &DepositParams,
    ) -> Result<bool, DepositError>;
}
