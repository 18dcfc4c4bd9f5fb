// src/app.rs
use anyhow::{anyhow, Context, Result};
use solana_sdk::signature::{read_keypair_file, Keypair, Signer};
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::Config;
use crate::domain::confirmation::ConfirmationPoller;
use crate::domain::cycle::{Collaborators, CycleRunner, Scheduler};
use crate::exchanges::api_clients::PumpPortalClient;
use crate::exchanges::pump_amm::{PumpAmmDepositor, RpcPoolStateFetcher};
use crate::infrastructure::blockchain::SolanaRpcClient;
use crate::shared::utils::{format_sol, short_address};

/// Where the signing key comes from
#[derive(Clone)]
pub enum SignerSource {
    /// Base58-encoded 64-byte secret key
    PrivateKey(String),
    KeypairFile(String),
}

impl fmt::Debug for SignerSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignerSource::PrivateKey(_) => write!(f, "PrivateKey(<redacted>)"),
            SignerSource::KeypairFile(path) => write!(f, "KeypairFile({})", path),
        }
    }
}

impl SignerSource {
    pub fn load(&self) -> Result<Keypair> {
        match self {
            SignerSource::PrivateKey(encoded) => {
                let bytes = bs58::decode(encoded.trim())
                    .into_vec()
                    .context("decode PRIVATE_KEY as base58")?;
                Keypair::from_bytes(&bytes).map_err(|e| anyhow!("invalid PRIVATE_KEY: {}", e))
            }
            SignerSource::KeypairFile(path) => read_keypair_file(path)
                .map_err(|e| anyhow!("read keypair file {}: {}", path, e)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppCfg {
    pub rpc_url: String,
    pub signer: SignerSource,
    pub api_key: String,
    pub max_cycles: Option<u64>,
    pub config: Config,
}

fn redact_url(url: &str) -> &str {
    url.split('?').next().unwrap_or(url)
}

pub async fn run(app_cfg: AppCfg) -> Result<()> {
    let AppCfg { rpc_url, signer, api_key, max_cycles, config } = app_cfg;

    let signer = Arc::new(signer.load()?);
    info!("Starting fee compounder");
    info!("Wallet: {}", signer.pubkey());
    info!("RPC: {}", redact_url(&rpc_url));
    info!(
        "Fee mint {} -> buy mint {} -> pool {}",
        short_address(&config.fee_mint),
        short_address(&config.buy_mint),
        config.pool_address
    );
    info!(
        "Buffers: gas {} SOL, cap {} SOL, dust {}; loop every {}s",
        format_sol(config.gas_buffer_lamports),
        format_sol(config.cap_buffer_lamports),
        config.token_dust_fraction,
        config.loop_interval.as_secs()
    );
    if config.buy_timeout < config.collect_timeout {
        warn!(
            "Buy timeout {:?} is shorter than collect timeout {:?}",
            config.buy_timeout, config.collect_timeout
        );
    }

    let rpc = Arc::new(SolanaRpcClient::new(rpc_url));
    let relay = PumpPortalClient::new(config.relay_base_url.clone(), api_key, config.relay_timeout)
        .context("build relay client")?;

    let collaborators = Collaborators {
        chain: rpc.clone(),
        relay: Arc::new(relay),
        pool_fetcher: Arc::new(RpcPoolStateFetcher::new(rpc.clone())),
        depositor: Arc::new(PumpAmmDepositor::new(rpc.inner())),
    };

    let interval = config.loop_interval;
    let runner = CycleRunner::new(
        Arc::new(config),
        collaborators,
        signer,
        ConfirmationPoller::default(),
    );
    let scheduler = Scheduler::new(Arc::new(runner), interval);
    let cycles = scheduler.run(max_cycles).await;

    info!("Stopped after {} cycle(s)", cycles);
    Ok(())
}
