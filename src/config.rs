use anyhow::{Context, Result};
use serde::Deserialize;
use solana_sdk::pubkey::Pubkey;
use std::{fs, path::Path, str::FromStr, time::Duration};

use crate::shared::errors::ConfigError;
use crate::shared::types::TokenProgram;
use crate::shared::utils::sol_to_lamports;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RpcCfg {
    pub url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RelayCfg {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for RelayCfg {
    fn default() -> Self {
        Self {
            base_url: "https://pumpportal.fun".to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TokensCfg {
    /// Mint whose creator fees are collected
    pub fee_mint: String,
    /// Mint bought with the collected SOL and deposited as pool base
    pub buy_mint: String,
    pub buy_token_program: TokenProgram,
}

impl Default for TokensCfg {
    fn default() -> Self {
        Self {
            fee_mint: "6Yk3ykeAzkmWMKoh2pT2rRyggUxF8vsrh5UcL2vopump".to_string(),
            buy_mint: "Gbu7JAKhTVtGyRryg8cYPiKNhonXpUqbrZuCDjfUpump".to_string(),
            buy_token_program: TokenProgram::Token2022,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PoolCfg {
    pub address: String,
}

impl Default for PoolCfg {
    fn default() -> Self {
        Self {
            address: "4KfHWqcSJWsrTq19FLzFYm3cGN4oASAj7ZCiUoFx16KS".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TradeCfg {
    pub slippage_pct: f64,
    pub relay_priority_fee_sol: f64,
    pub deposit_priority_fee_sol: f64,
    pub deposit_debug: bool,
}

impl Default for TradeCfg {
    fn default() -> Self {
        Self {
            slippage_pct: 10.0,
            relay_priority_fee_sol: 0.001,
            deposit_priority_fee_sol: 0.002,
            deposit_debug: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BuffersCfg {
    /// SOL left untouched by spend decisions each cycle
    pub gas_buffer_sol: f64,
    /// SOL left untouched when capping the deposit
    pub cap_buffer_sol: f64,
    /// Fraction of bought tokens kept out of the pool
    pub token_dust_fraction: f64,
}

impl Default for BuffersCfg {
    fn default() -> Self {
        Self {
            gas_buffer_sol: 0.03,
            cap_buffer_sol: 0.03,
            token_dust_fraction: 0.001,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScheduleCfg {
    pub loop_secs: u64,
    pub collect_timeout_secs: u64,
    pub buy_timeout_secs: u64,
}

impl Default for ScheduleCfg {
    fn default() -> Self {
        Self {
            loop_secs: 30 * 60,
            collect_timeout_secs: 90,
            buy_timeout_secs: 120,
        }
    }
}

/// Config.toml layout; every section is optional
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub rpc: RpcCfg,
    pub relay: RelayCfg,
    pub tokens: TokensCfg,
    pub pool: PoolCfg,
    pub trade: TradeCfg,
    pub buffers: BuffersCfg,
    pub schedule: ScheduleCfg,
}

impl FileConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let s = fs::read_to_string(path.as_ref())
            .with_context(|| format!("read {}", path.as_ref().display()))?;
        Self::from_toml_str(&s)
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(s).context("parse Config.toml")?;
        Ok(cfg)
    }
}

/// Immutable runtime configuration, built once at startup
#[derive(Debug, Clone)]
pub struct Config {
    pub relay_base_url: String,
    pub relay_timeout: Duration,
    pub fee_mint: Pubkey,
    pub buy_mint: Pubkey,
    pub buy_token_program: TokenProgram,
    pub pool_address: Pubkey,
    pub slippage_pct: f64,
    pub relay_priority_fee_sol: f64,
    pub deposit_priority_fee_lamports: u64,
    pub deposit_debug: bool,
    pub gas_buffer_lamports: u64,
    pub cap_buffer_lamports: u64,
    pub token_dust_fraction: f64,
    pub loop_interval: Duration,
    pub collect_timeout: Duration,
    pub buy_timeout: Duration,
}

impl Config {
    pub fn from_file_config(cfg: &FileConfig) -> Result<Self, ConfigError> {
        let fraction = cfg.buffers.token_dust_fraction;
        if !(0.0..1.0).contains(&fraction) {
            return Err(ConfigError::Invalid {
                field: "buffers.token_dust_fraction",
                reason: format!("{} is outside [0, 1)", fraction),
            });
        }
        if cfg.trade.slippage_pct < 0.0 {
            return Err(ConfigError::Invalid {
                field: "trade.slippage_pct",
                reason: "must not be negative".to_string(),
            });
        }
        for (field, value) in [
            ("buffers.gas_buffer_sol", cfg.buffers.gas_buffer_sol),
            ("buffers.cap_buffer_sol", cfg.buffers.cap_buffer_sol),
            ("trade.relay_priority_fee_sol", cfg.trade.relay_priority_fee_sol),
            ("trade.deposit_priority_fee_sol", cfg.trade.deposit_priority_fee_sol),
        ] {
            if value < 0.0 {
                return Err(ConfigError::Invalid { field, reason: "must not be negative".to_string() });
            }
        }

        Ok(Self {
            relay_base_url: cfg.relay.base_url.trim_end_matches('/').to_string(),
            relay_timeout: Duration::from_secs(cfg.relay.timeout_secs),
            fee_mint: parse_pubkey("tokens.fee_mint", &cfg.tokens.fee_mint)?,
            buy_mint: parse_pubkey("tokens.buy_mint", &cfg.tokens.buy_mint)?,
            buy_token_program: cfg.tokens.buy_token_program,
            pool_address: parse_pubkey("pool.address", &cfg.pool.address)?,
            slippage_pct: cfg.trade.slippage_pct,
            relay_priority_fee_sol: cfg.trade.relay_priority_fee_sol,
            deposit_priority_fee_lamports: sol_to_lamports(cfg.trade.deposit_priority_fee_sol),
            deposit_debug: cfg.trade.deposit_debug,
            gas_buffer_lamports: sol_to_lamports(cfg.buffers.gas_buffer_sol),
            cap_buffer_lamports: sol_to_lamports(cfg.buffers.cap_buffer_sol),
            token_dust_fraction: fraction,
            loop_interval: Duration::from_secs(cfg.schedule.loop_secs),
            collect_timeout: Duration::from_secs(cfg.schedule.collect_timeout_secs),
            buy_timeout: Duration::from_secs(cfg.schedule.buy_timeout_secs),
        })
    }
}

fn parse_pubkey(field: &'static str, value: &str) -> Result<Pubkey, ConfigError> {
    Pubkey::from_str(value.trim()).map_err(|e| ConfigError::Invalid {
        field,
        reason: format!("{}: {}", value, e),
    })
}
