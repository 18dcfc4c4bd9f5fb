//! Solana RPC client for direct blockchain reading

use async_trait::async_trait;
use solana_client::client_error::ClientError;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_transaction_status::TransactionConfirmationStatus;
use spl_associated_token_account::get_associated_token_address_with_program_id;
use spl_token::solana_program::program_pack::Pack;
use spl_token::state::Mint;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

use crate::domain::interfaces::ChainReader;
use crate::shared::errors::ChainError;
use crate::shared::types::{ConfirmationLevel, TokenBalance, TokenProgram, TxStatus};

/// Solana RPC client wrapper, reading at `confirmed` commitment
pub struct SolanaRpcClient {
    client: Arc<RpcClient>,
    commitment: CommitmentConfig,
}

impl SolanaRpcClient {
    pub fn new(rpc_url: String) -> Self {
        Self::with_client(Arc::new(RpcClient::new_with_commitment(
            rpc_url,
            CommitmentConfig::confirmed(),
        )))
    }

    pub fn with_client(client: Arc<RpcClient>) -> Self {
        Self {
            client,
            commitment: CommitmentConfig::confirmed(),
        }
    }

    pub fn inner(&self) -> Arc<RpcClient> {
        self.client.clone()
    }

    /// Raw account data; a missing account is an error
    pub async fn get_account_data(&self, address: &Pubkey) -> Result<Vec<u8>, ChainError> {
        let response = self
            .client
            .get_account_with_commitment(address, self.commitment)
            .await
            .map_err(rpc_error)?;
        response
            .value
            .map(|account| account.data)
            .ok_or_else(|| ChainError::AccountNotFound(address.to_string()))
    }

    async fn read_token_account(&self, account: &Pubkey) -> Result<TokenBalance, ChainError> {
        let ui = self
            .client
            .get_token_account_balance_with_commitment(account, self.commitment)
            .await
            .map_err(|e| {
                if is_missing_account(&e) {
                    ChainError::TokenAccountMissing { account: account.to_string() }
                } else {
                    rpc_error(e)
                }
            })?
            .value;

        let amount = ui.amount.parse::<u64>().map_err(|e| ChainError::InvalidAccountData {
            account: account.to_string(),
            reason: format!("token amount {:?}: {}", ui.amount, e),
        })?;
        Ok(TokenBalance::new(amount, ui.decimals))
    }
}

#[async_trait]
impl ChainReader for SolanaRpcClient {
    async fn balance(&self, owner: &Pubkey) -> Result<u64, ChainError> {
        let response = self
            .client
            .get_balance_with_commitment(owner, self.commitment)
            .await
            .map_err(rpc_error)?;
        Ok(response.value)
    }

    async fn token_balance(
        &self,
        owner: &Pubkey,
        mint: &Pubkey,
        program: TokenProgram,
    ) -> Result<TokenBalance, ChainError> {
        let ata = get_associated_token_address_with_program_id(owner, mint, &program.id());
        debug!("Reading token balance of {} ({})", ata, mint);
        self.read_token_account(&ata).await
    }

    async fn token_account_balance(&self, account: &Pubkey) -> Result<TokenBalance, ChainError> {
        self.read_token_account(account).await
    }

    async fn signature_status(&self, reference: &str) -> Result<Option<TxStatus>, ChainError> {
        let signature = Signature::from_str(reference.trim())
            .map_err(|e| ChainError::InvalidReference(format!("{}: {}", reference, e)))?;

        let statuses = self
            .client
            .get_signature_statuses_with_history(&[signature])
            .await
            .map_err(rpc_error)?
            .value;

        Ok(statuses.into_iter().next().flatten().map(|status| TxStatus {
            err: status.err.map(|e| e.to_string()),
            confirmation: status.confirmation_status.map(confirmation_level),
        }))
    }

    async fn mint_decimals(&self, mint: &Pubkey) -> Result<u8, ChainError> {
        let data = self.get_account_data(mint).await?;
        let head = data.get(..Mint::LEN).ok_or_else(|| ChainError::InvalidAccountData {
            account: mint.to_string(),
            reason: format!("mint account is {} bytes", data.len()),
        })?;
        let state = Mint::unpack_from_slice(head).map_err(|e| ChainError::InvalidAccountData {
            account: mint.to_string(),
            reason: e.to_string(),
        })?;
        Ok(state.decimals)
    }
}

fn confirmation_level(status: TransactionConfirmationStatus) -> ConfirmationLevel {
    match status {
        TransactionConfirmationStatus::Processed => ConfirmationLevel::Processed,
        TransactionConfirmationStatus::Confirmed => ConfirmationLevel::Confirmed,
        TransactionConfirmationStatus::Finalized => ConfirmationLevel::Finalized,
    }
}

fn rpc_error(e: ClientError) -> ChainError {
    ChainError::Rpc(e.to_string())
}

fn is_missing_account(e: &ClientError) -> bool {
    let message = e.to_string();
    message.contains("could not find account") || message.contains("AccountNotFound")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirmation_levels_map_one_to_one() {
        assert_eq!(
            confirmation_level(TransactionConfirmationStatus::Processed),
            ConfirmationLevel::Processed
        );
        assert_eq!(
            confirmation_level(TransactionConfirmationStatus::Confirmed),
            ConfirmationLevel::Confirmed
        );
        assert_eq!(
            confirmation_level(TransactionConfirmationStatus::Finalized),
            ConfirmationLevel::Finalized
        );
    }

    #[tokio::test]
    async fn test_malformed_reference_is_rejected_before_any_request() {
        // Nothing listens here; the reference fails to parse first
        let client = SolanaRpcClient::new("http://127.0.0.1:1".to_string());
        let result = client.signature_status("not-a-signature").await;
        assert!(matches!(result, Err(ChainError::InvalidReference(_))));
    }
}
