use solana_sdk::pubkey::Pubkey;
use tracing::{debug, warn};

use crate::domain::pool::{AddressRepr, RawPoolRecord};
use crate::shared::errors::ChainError;

/// Anchor discriminator of the PumpSwap `Pool` account
pub const POOL_DISCRIMINATOR: [u8; 8] = [241, 154, 109, 4, 17, 177, 109, 188];

// discriminator(8) | pool_bump(1) | index(2)
const CREATOR_OFFSET: usize = 11;
const BASE_MINT_OFFSET: usize = 43;
const QUOTE_MINT_OFFSET: usize = 75;
const LP_MINT_OFFSET: usize = 107;
const POOL_BASE_TA_OFFSET: usize = 139;
const POOL_QUOTE_TA_OFFSET: usize = 171;
const LP_SUPPLY_OFFSET: usize = 203;
const COIN_CREATOR_OFFSET: usize = 211;

/// Accounts created before creator fees end after `lp_supply`
pub const LEGACY_POOL_LEN: usize = 211;
pub const POOL_LEN: usize = 243;

/// Decodes PumpSwap pool accounts into raw pool records
pub struct PumpAmmPoolParser;

impl PumpAmmPoolParser {
    pub fn parse_pool_data(pool: &Pubkey, data: &[u8]) -> Result<RawPoolRecord, ChainError> {
        debug!("Parsing PumpSwap pool {}, size: {} bytes", pool, data.len());

        if data.len() < LEGACY_POOL_LEN {
            return Err(ChainError::InvalidAccountData {
                account: pool.to_string(),
                reason: format!("pool account too short: {} bytes", data.len()),
            });
        }
        if data[..8] != POOL_DISCRIMINATOR {
            warn!("Pool {} has an unexpected discriminator {:?}", pool, &data[..8]);
        }

        let lp_supply_bytes: [u8; 8] = data[LP_SUPPLY_OFFSET..LP_SUPPLY_OFFSET + 8]
            .try_into()
            .map_err(|_| ChainError::InvalidAccountData {
                account: pool.to_string(),
                reason: "lp_supply out of bounds".to_string(),
            })?;

        let coin_creator = if data.len() >= POOL_LEN {
            Some(key_at(data, COIN_CREATOR_OFFSET))
        } else {
            None
        };

        Ok(RawPoolRecord {
            creator: Some(key_at(data, CREATOR_OFFSET)),
            base_mint: Some(key_at(data, BASE_MINT_OFFSET)),
            quote_mint: Some(key_at(data, QUOTE_MINT_OFFSET)),
            lp_mint: Some(key_at(data, LP_MINT_OFFSET)),
            pool_base_token_account: Some(key_at(data, POOL_BASE_TA_OFFSET)),
            pool_quote_token_account: Some(key_at(data, POOL_QUOTE_TA_OFFSET)),
            coin_creator,
            lp_supply: Some(u64::from_le_bytes(lp_supply_bytes)),
        })
    }
}

fn key_at(data: &[u8], offset: usize) -> AddressRepr {
    AddressRepr::Raw(data[offset..offset + 32].to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pool::{normalize_pool_keys, PoolLayout};

    struct PoolFixture {
        pub creator: Pubkey,
        pub base_mint: Pubkey,
        pub quote_mint: Pubkey,
        pub lp_mint: Pubkey,
        pub base_ta: Pubkey,
        pub quote_ta: Pubkey,
        pub coin_creator: Pubkey,
        pub lp_supply: u64,
    }

    impl PoolFixture {
        pub fn new() -> Self {
            Self {
                creator: Pubkey::new_unique(),
                base_mint: Pubkey::new_unique(),
                quote_mint: spl_token::native_mint::id(),
                lp_mint: Pubkey::new_unique(),
                base_ta: Pubkey::new_unique(),
                quote_ta: Pubkey::new_unique(),
                coin_creator: Pubkey::new_unique(),
                lp_supply: 4_193_388_536_304,
            }
        }

        pub fn encode(&self, with_coin_creator: bool) -> Vec<u8> {
            let mut data = POOL_DISCRIMINATOR.to_vec();
            data.push(254);
            data.extend_from_slice(&0u16.to_le_bytes());
            for key in [
                self.creator,
                self.base_mint,
                self.quote_mint,
                self.lp_mint,
                self.base_ta,
                self.quote_ta,
            ] {
                data.extend_from_slice(key.as_ref());
            }
            data.extend_from_slice(&self.lp_supply.to_le_bytes());
            if with_coin_creator {
                data.extend_from_slice(self.coin_creator.as_ref());
            }
            data
        }
    }

    #[test]
    fn test_parse_current_layout() {
        let fixture = PoolFixture::new();
        let data = fixture.encode(true);
        assert_eq!(data.len(), POOL_LEN);

        let record = PumpAmmPoolParser::parse_pool_data(&Pubkey::new_unique(), &data).unwrap();
        let keys = normalize_pool_keys(record).unwrap();

        assert_eq!(keys.layout, PoolLayout::Current);
        assert_eq!(keys.base_mint, fixture.base_mint);
        assert_eq!(keys.quote_mint, fixture.quote_mint);
        assert_eq!(keys.pool_quote_token_account, fixture.quote_ta);
        assert_eq!(keys.coin_creator, fixture.coin_creator);
        assert_eq!(keys.lp_supply, fixture.lp_supply);
    }

    #[test]
    fn test_parse_legacy_layout() {
        let fixture = PoolFixture::new();
        let data = fixture.encode(false);
        assert_eq!(data.len(), LEGACY_POOL_LEN);

        let record = PumpAmmPoolParser::parse_pool_data(&Pubkey::new_unique(), &data).unwrap();
        assert!(record.coin_creator.is_none());

        let keys = normalize_pool_keys(record).unwrap();
        assert_eq!(keys.layout, PoolLayout::Legacy);
        assert_eq!(keys.creator, fixture.creator);
        assert_eq!(keys.lp_mint, fixture.lp_mint);
    }

    #[test]
    fn test_short_account_rejected() {
        let data = vec![0u8; 100];
        let result = PumpAmmPoolParser::parse_pool_data(&Pubkey::new_unique(), &data);
        assert!(matches!(result, Err(ChainError::InvalidAccountData { .. })));
    }
}
