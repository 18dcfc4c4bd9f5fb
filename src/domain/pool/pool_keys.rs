//! Canonical pool key layout and its resolution from raw pool records

use solana_sdk::pubkey::Pubkey;
use tracing::{debug, info, warn};

use super::pool_record::{AddressRepr, RawPoolRecord};
use crate::shared::errors::PoolKeyError;

/// Known pool account layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolLayout {
    /// Current layout, carries the coin-creator fee attribution
    Current,
    /// Legacy layout, predates coin-creator attribution
    Legacy,
}

impl PoolLayout {
    pub fn as_str(&self) -> &'static str {
        match self {
            PoolLayout::Current => "current",
            PoolLayout::Legacy => "legacy",
        }
    }
}

/// Typed identifiers for every pool component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolKeys {
    pub layout: PoolLayout,
    pub creator: Pubkey,
    pub base_mint: Pubkey,
    pub quote_mint: Pubkey,
    pub lp_mint: Pubkey,
    pub pool_base_token_account: Pubkey,
    pub pool_quote_token_account: Pubkey,
    pub coin_creator: Pubkey,
    /// Denominates the LP share math of a deposit
    pub lp_supply: u64,
}

fn required(field: &'static str, value: &Option<AddressRepr>) -> Result<Pubkey, PoolKeyError> {
    value
        .as_ref()
        .ok_or(PoolKeyError::MissingField(field))?
        .to_pubkey(field)
}

impl PoolKeys {
    pub fn from_current_layout(record: &RawPoolRecord) -> Result<Self, PoolKeyError> {
        Ok(Self {
            coin_creator: required("coin_creator", &record.coin_creator)?,
            ..Self::common_fields(record, PoolLayout::Current)?
        })
    }

    /// Legacy pools have no coin creator; the default key stands in for it
    pub fn from_legacy_layout(record: &RawPoolRecord) -> Result<Self, PoolKeyError> {
        Self::common_fields(record, PoolLayout::Legacy)
    }

    fn common_fields(record: &RawPoolRecord, layout: PoolLayout) -> Result<Self, PoolKeyError> {
        Ok(Self {
            layout,
            creator: required("creator", &record.creator)?,
            base_mint: required("base_mint", &record.base_mint)?,
            quote_mint: required("quote_mint", &record.quote_mint)?,
            lp_mint: required("lp_mint", &record.lp_mint)?,
            pool_base_token_account: required("pool_base_token_account", &record.pool_base_token_account)?,
            pool_quote_token_account: required("pool_quote_token_account", &record.pool_quote_token_account)?,
            coin_creator: Pubkey::default(),
            lp_supply: record.lp_supply.ok_or(PoolKeyError::MissingField("lp_supply"))?,
        })
    }
}

/// Normalizes address fields, then resolves the record under the current
/// layout, falling back to the legacy layout
pub fn normalize_pool_keys(record: RawPoolRecord) -> Result<PoolKeys, PoolKeyError> {
    let record = record.normalized()?;

    let current = match PoolKeys::from_current_layout(&record) {
        Ok(keys) => {
            debug!("Pool keys resolved under current layout");
            return Ok(keys);
        }
        Err(e) => e,
    };
    warn!("Current pool layout rejected ({}), trying legacy layout", current);

    match PoolKeys::from_legacy_layout(&record) {
        Ok(keys) => {
            info!("Pool keys resolved under legacy layout");
            Ok(keys)
        }
        Err(legacy) => Err(PoolKeyError::UnknownLayout {
            current: Box::new(current),
            legacy: Box::new(legacy),
        }),
    }
}
