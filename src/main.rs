use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use fee_compounder::app::{self, AppCfg, SignerSource};
use fee_compounder::config::{Config, FileConfig};

#[derive(Parser, Debug)]
#[command(version, about = "Collects creator fees, buys the token and compounds it into PumpSwap liquidity")]
struct Args {
    /// Path to config file (optional)
    #[arg(long)]
    config: Option<PathBuf>,

    /// RPC endpoint URL (overrides config)
    #[arg(long, env = "HELIUS_RPC_URL")]
    rpc_url: Option<String>,

    /// Base58 secret key of the wallet
    #[arg(long, env = "PRIVATE_KEY", hide_env_values = true)]
    private_key: Option<String>,

    /// Path to keypair file (takes precedence over PRIVATE_KEY)
    #[arg(long)]
    keypair: Option<String>,

    /// Trade relay API key
    #[arg(long, env = "PUMP_SWAP_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Stop after this many cycles
    #[arg(long)]
    max_cycles: Option<u64>,

    /// Seconds between cycles (overrides config)
    #[arg(long)]
    interval_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let args = Args::parse();

    let file_cfg = match &args.config {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };

    // CLI / env > config file
    let rpc_url = args
        .rpc_url
        .or_else(|| file_cfg.rpc.url.clone())
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| anyhow!("HELIUS_RPC_URL (or --rpc-url) is required"))?;

    let signer = match (args.private_key, args.keypair) {
        (_, Some(path)) => SignerSource::KeypairFile(path),
        (Some(key), None) => SignerSource::PrivateKey(key),
        (None, None) => return Err(anyhow!("PRIVATE_KEY (or --keypair) is required")),
    };

    let api_key = args
        .api_key
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| anyhow!("PUMP_SWAP_API_KEY (or --api-key) is required"))?;

    let mut config = Config::from_file_config(&file_cfg).context("invalid configuration")?;
    if let Some(secs) = args.interval_secs {
        config.loop_interval = Duration::from_secs(secs);
    }

    app::run(AppCfg {
        rpc_url,
        signer,
        api_key,
        max_cycles: args.max_cycles,
        config,
    })
    .await
}
