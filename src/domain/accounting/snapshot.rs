//! Point-in-time balance reads

use solana_sdk::pubkey::Pubkey;

use crate::domain::interfaces::ChainReader;
use crate::shared::errors::ChainError;
use crate::shared::types::{BalanceProbe, TokenBalance};

/// Native balance in lamports (9 decimals), or the probed token balance
pub async fn snapshot(
    chain: &dyn ChainReader,
    owner: &Pubkey,
    probe: BalanceProbe,
) -> Result<TokenBalance, ChainError> {
    match probe {
        BalanceProbe::Native => Ok(TokenBalance::new(chain.balance(owner).await?, 9)),
        BalanceProbe::Token { mint, program } => chain.token_balance(owner, &mint, program).await,
    }
}
