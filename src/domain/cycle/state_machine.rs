//! collect -> evaluate -> buy -> evaluate -> deposit

use solana_sdk::signature::{Keypair, Signer};
use std::sync::Arc;
use tracing::{info, warn};

use super::outcome::{AbortReason, CycleOutcome, Stage, StageResult};
use crate::config::Config;
use crate::domain::accounting::DeltaAccountant;
use crate::domain::confirmation::ConfirmationPoller;
use crate::domain::interfaces::{
    ChainReader, DepositParams, LiquidityDepositor, PoolStateFetcher, TradeAction, TradeRelay,
};
use crate::domain::pool::{normalize_pool_keys, PoolData};
use crate::math::{deposit_amount, sol_cap, spend_amount};
use crate::report::CycleReport;
use crate::shared::errors::CycleError;
use crate::shared::types::{raw_to_ui, BalanceProbe};
use crate::shared::utils::{format_sol, lamports_to_sol};

/// Collaborators a cycle talks to
#[derive(Clone)]
pub struct Collaborators {
    pub chain: Arc<dyn ChainReader>,
    pub relay: Arc<dyn TradeRelay>,
    pub pool_fetcher: Arc<dyn PoolStateFetcher>,
    pub depositor: Arc<dyn LiquidityDepositor>,
}

pub struct CycleRunner {
    config: Arc<Config>,
    collaborators: Collaborators,
    signer: Arc<Keypair>,
    poller: ConfirmationPoller,
}

impl CycleRunner {
    pub fn new(
        config: Arc<Config>,
        collaborators: Collaborators,
        signer: Arc<Keypair>,
        poller: ConfirmationPoller,
    ) -> Self {
        Self { config, collaborators, signer, poller }
    }

    /// Runs one cycle to completion or to its first failed precondition.
    ///
    /// Aborts come back as `Ok(CycleOutcome::Aborted)`; only unexpected
    /// failures are `Err`.
    pub async fn run_once(&self, report: &mut CycleReport) -> Result<CycleOutcome, CycleError> {
        let cfg = self.config.as_ref();
        let owner = self.signer.pubkey();
        let chain = self.collaborators.chain.as_ref();
        let accountant = DeltaAccountant::new(chain, self.collaborators.relay.as_ref(), &self.poller);

        // Collect
        let collect = TradeAction::CollectCreatorFee {
            mint: cfg.fee_mint,
            priority_fee_sol: cfg.relay_priority_fee_sol,
        };
        let collected = match accountant
            .measure(Stage::Collect, &owner, &collect, BalanceProbe::Native, cfg.collect_timeout)
            .await?
        {
            StageResult::Proceed(m) => m,
            StageResult::Abort(reason) => return Ok(aborted(reason)),
        };
        report.collect_signature = Some(collected.reference.clone());
        report.collected_lamports = Some(collected.delta);
        info!("Collected SOL delta: {}", format_sol(collected.delta));

        // Evaluate collect
        if collected.delta <= cfg.gas_buffer_lamports {
            return Ok(aborted(AbortReason::CollectedBelowGasBuffer {
                collected: collected.delta,
                gas_buffer: cfg.gas_buffer_lamports,
            }));
        }

        // Buy
        let spend = spend_amount(collected.delta, cfg.gas_buffer_lamports);
        if spend == 0 {
            return Ok(aborted(AbortReason::SpendNotPositive { collected: collected.delta }));
        }
        report.spend_lamports = Some(spend);
        info!("Spending {} SOL on {}", format_sol(spend), cfg.buy_mint);

        let buy = TradeAction::Buy {
            mint: cfg.buy_mint,
            amount_sol: lamports_to_sol(spend),
            slippage_pct: cfg.slippage_pct,
            priority_fee_sol: cfg.relay_priority_fee_sol,
        };
        let probe = BalanceProbe::Token { mint: cfg.buy_mint, program: cfg.buy_token_program };
        let bought = match accountant
            .measure(Stage::Buy, &owner, &buy, probe, cfg.buy_timeout)
            .await?
        {
            StageResult::Proceed(m) => m,
            StageResult::Abort(reason) => return Ok(aborted(reason)),
        };
        let decimals = bought.after.decimals;
        report.buy_signature = Some(bought.reference.clone());
        report.bought_raw = Some(bought.delta);
        report.token_decimals = Some(decimals);
        info!("Bought token delta: {:.9} (raw {})", raw_to_ui(bought.delta, decimals), bought.delta);

        if bought.delta == 0 {
            return Ok(aborted(AbortReason::NothingBought));
        }

        // Evaluate buy
        let deposit_raw = deposit_amount(bought.delta, cfg.token_dust_fraction);
        let balance = chain.balance(&owner).await?;
        let cap = sol_cap(balance, cfg.cap_buffer_lamports);
        if cap == 0 {
            return Ok(aborted(AbortReason::SolCapNotPositive { balance }));
        }
        report.deposit_raw = Some(deposit_raw);
        report.sol_cap_lamports = Some(cap);
        info!(
            "Depositing {:.9} tokens with SOL cap {}",
            raw_to_ui(deposit_raw, decimals),
            format_sol(cap)
        );

        // Deposit
        let record = self.collaborators.pool_fetcher.fetch(&cfg.pool_address).await?;
        let keys = normalize_pool_keys(record)?;
        let pool = PoolData::assemble(chain, cfg.pool_address, keys).await?;
        let params = DepositParams {
            slippage_pct: cfg.slippage_pct,
            priority_fee_lamports: cfg.deposit_priority_fee_lamports,
            sol_cap: cap,
            debug: cfg.deposit_debug,
        };
        let success = self
            .collaborators
            .depositor
            .deposit(&pool, deposit_raw, &self.signer, &params)
            .await?;

        if success {
            info!("✅ Add liquidity succeeded");
        } else {
            warn!("❌ Add liquidity failed; bought tokens stay in the wallet");
        }
        Ok(CycleOutcome::Deposited { success })
    }
}

fn aborted(reason: AbortReason) -> CycleOutcome {
    info!("{}", reason);
    CycleOutcome::Aborted(reason)
}
