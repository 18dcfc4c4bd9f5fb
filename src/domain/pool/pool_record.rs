//! Raw pool-state record as handed over by the pool-state fetch

use serde::Deserialize;
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;

use crate::shared::errors::PoolKeyError;

/// Address field given either as base58 text or as raw bytes
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum AddressRepr {
    Text(String),
    Raw(Vec<u8>),
}

impl AddressRepr {
    pub fn raw(pubkey: &Pubkey) -> Self {
        AddressRepr::Raw(pubkey.to_bytes().to_vec())
    }

    pub fn text(pubkey: &Pubkey) -> Self {
        AddressRepr::Text(pubkey.to_string())
    }

    /// Text becomes raw bytes; raw bytes are left untouched
    pub fn into_raw(self, field: &'static str) -> Result<Self, PoolKeyError> {
        match self {
            AddressRepr::Raw(bytes) => Ok(AddressRepr::Raw(bytes)),
            AddressRepr::Text(s) => Pubkey::from_str(s.trim())
                .map(|pk| AddressRepr::raw(&pk))
                .map_err(|e| PoolKeyError::InvalidAddress {
                    field,
                    reason: format!("{}: {}", s, e),
                }),
        }
    }

    pub fn to_pubkey(&self, field: &'static str) -> Result<Pubkey, PoolKeyError> {
        match self {
            AddressRepr::Raw(bytes) => {
                let array: [u8; 32] = bytes.as_slice().try_into().map_err(|_| {
                    PoolKeyError::InvalidAddress {
                        field,
                        reason: format!("expected 32 bytes, got {}", bytes.len()),
                    }
                })?;
                Ok(Pubkey::new_from_array(array))
            }
            AddressRepr::Text(s) => Pubkey::from_str(s.trim()).map_err(|e| {
                PoolKeyError::InvalidAddress {
                    field,
                    reason: format!("{}: {}", s, e),
                }
            }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RawPoolRecord {
    pub creator: Option<AddressRepr>,
    pub base_mint: Option<AddressRepr>,
    pub quote_mint: Option<AddressRepr>,
    pub lp_mint: Option<AddressRepr>,
    pub pool_base_token_account: Option<AddressRepr>,
    pub pool_quote_token_account: Option<AddressRepr>,
    pub coin_creator: Option<AddressRepr>,
    pub lp_supply: Option<u64>,
}

impl RawPoolRecord {
    /// Promotes every text address field to raw form
    pub fn normalized(self) -> Result<Self, PoolKeyError> {
        fn promote(
            field: &'static str,
            value: Option<AddressRepr>,
        ) -> Result<Option<AddressRepr>, PoolKeyError> {
            value.map(|v| v.into_raw(field)).transpose()
        }

        Ok(Self {
            creator: promote("creator", self.creator)?,
            base_mint: promote("base_mint", self.base_mint)?,
            quote_mint: promote("quote_mint", self.quote_mint)?,
            lp_mint: promote("lp_mint", self.lp_mint)?,
            pool_base_token_account: promote("pool_base_token_account", self.pool_base_token_account)?,
            pool_quote_token_account: promote("pool_quote_token_account", self.pool_quote_token_account)?,
            coin_creator: promote("coin_creator", self.coin_creator)?,
            lp_supply: self.lp_supply,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_fields_become_raw() {
        let mint = Pubkey::new_unique();
        let creator = Pubkey::new_unique();
        let record = RawPoolRecord {
            creator: Some(AddressRepr::raw(&creator)),
            base_mint: Some(AddressRepr::text(&mint)),
            lp_supply: Some(42),
            ..Default::default()
        };

        let normalized = record.normalized().unwrap();
        assert_eq!(normalized.base_mint, Some(AddressRepr::raw(&mint)));
        assert_eq!(normalized.creator, Some(AddressRepr::raw(&creator)));
        assert_eq!(normalized.quote_mint, None);
        assert_eq!(normalized.lp_supply, Some(42));
    }

    #[test]
    fn test_invalid_text_field_is_reported() {
        let record = RawPoolRecord {
            lp_mint: Some(AddressRepr::Text("zzz".to_string())),
            ..Default::default()
        };
        assert!(matches!(
            record.normalized(),
            Err(PoolKeyError::InvalidAddress { field: "lp_mint", .. })
        ));
    }

    #[test]
    fn test_deserialize_mixed_json_record() {
        let mint = Pubkey::new_unique();
        let json = serde_json::json!({
            "base_mint": mint.to_string(),
            "quote_mint": mint.to_bytes().to_vec(),
            "lp_supply": 1_000_000u64,
        });
        let record: RawPoolRecord = serde_json::from_value(json).unwrap();
        assert_eq!(record.base_mint, Some(AddressRepr::Text(mint.to_string())));
        assert_eq!(record.quote_mint, Some(AddressRepr::raw(&mint)));
        assert_eq!(record.quote_mint.unwrap().to_pubkey("quote_mint").unwrap(), mint);
    }

    #[test]
    fn test_short_raw_address_rejected() {
        let short = AddressRepr::Raw(vec![1, 2, 3]);
        assert!(short.to_pubkey("creator").is_err());
    }
}
