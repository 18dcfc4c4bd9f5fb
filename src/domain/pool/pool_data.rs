//! Deposit bundle: canonical keys plus fresh chain reads

use solana_sdk::pubkey::Pubkey;
use tracing::info;

use super::pool_keys::PoolKeys;
use crate::domain::interfaces::ChainReader;
use crate::shared::errors::ChainError;
use crate::shared::types::raw_to_ui;

#[derive(Debug, Clone, PartialEq)]
pub struct PoolData {
    pub pool: Pubkey,
    pub keys: PoolKeys,
    pub base_decimals: u8,
    /// Raw base tokens held by the pool's base token account
    pub base_reserve: u64,
    /// Lamports of wrapped SOL held by the pool's quote token account
    pub quote_reserve: u64,
}

impl PoolData {
    /// Reads decimals and reserves; never cached across cycles
    pub async fn assemble(
        chain: &dyn ChainReader,
        pool: Pubkey,
        keys: PoolKeys,
    ) -> Result<Self, ChainError> {
        let base_decimals = chain.mint_decimals(&keys.base_mint).await?;
        let base_reserve = chain.token_account_balance(&keys.pool_base_token_account).await?;
        let quote_reserve = chain.token_account_balance(&keys.pool_quote_token_account).await?;

        info!(
            "Pool {} reserves: base {:.6} / quote {:.9}, lp supply {}",
            pool,
            raw_to_ui(base_reserve.amount, base_decimals),
            raw_to_ui(quote_reserve.amount, quote_reserve.decimals),
            keys.lp_supply
        );

        Ok(Self {
            pool,
            keys,
            base_decimals,
            base_reserve: base_reserve.amount,
            quote_reserve: quote_reserve.amount,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pool::PoolLayout;
    use crate::shared::types::TokenBalance;
    use crate::testing::FakeChain;

    #[tokio::test]
    async fn test_assemble_reads_decimals_and_reserves() {
        let chain = FakeChain::new();
        let keys = PoolKeys {
            layout: PoolLayout::Current,
            creator: Pubkey::new_unique(),
            base_mint: Pubkey::new_unique(),
            quote_mint: spl_token::native_mint::id(),
            lp_mint: Pubkey::new_unique(),
            pool_base_token_account: Pubkey::new_unique(),
            pool_quote_token_account: Pubkey::new_unique(),
            coin_creator: Pubkey::new_unique(),
            lp_supply: 1_000_000,
        };
        chain.set_mint_decimals(keys.base_mint, 6);
        chain.set_token_account(keys.pool_base_token_account, TokenBalance::new(5_000_000, 6));
        chain.set_token_account(keys.pool_quote_token_account, TokenBalance::new(2_000_000_000, 9));

        let pool = Pubkey::new_unique();
        let data = PoolData::assemble(&chain, pool, keys.clone()).await.unwrap();

        assert_eq!(data.pool, pool);
        assert_eq!(data.base_decimals, 6);
        assert_eq!(data.base_reserve, 5_000_000);
        assert_eq!(data.quote_reserve, 2_000_000_000);
        assert_eq!(data.keys, keys);
    }
}
