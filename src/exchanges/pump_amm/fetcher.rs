use async_trait::async_trait;
use solana_sdk::pubkey::Pubkey;
use std::sync::Arc;

use super::parser::PumpAmmPoolParser;
use crate::domain::interfaces::PoolStateFetcher;
use crate::domain::pool::RawPoolRecord;
use crate::infrastructure::blockchain::SolanaRpcClient;
use crate::shared::errors::ChainError;

/// Reads the pool account fresh on every call
pub struct RpcPoolStateFetcher {
    rpc: Arc<SolanaRpcClient>,
}

impl RpcPoolStateFetcher {
    pub fn new(rpc: Arc<SolanaRpcClient>) -> Self {
        Self { rpc }
    }
}

#[async_trait]
impl PoolStateFetcher for RpcPoolStateFetcher {
    async fn fetch(&self, pool: &Pubkey) -> Result<RawPoolRecord, ChainError> {
        let data = self.rpc.get_account_data(pool).await?;
        PumpAmmPoolParser::parse_pool_data(pool, &data)
    }
}
