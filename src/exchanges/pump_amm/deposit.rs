//! Single-sided-input deposit into a PumpSwap pool: the wallet supplies base
//! tokens and enough wrapped SOL to match the pool ratio.

use async_trait::async_trait;
use borsh::BorshSerialize;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signer};
use solana_sdk::system_instruction;
use solana_sdk::transaction::Transaction;
use spl_associated_token_account::get_associated_token_address_with_program_id;
use spl_associated_token_account::instruction::create_associated_token_account_idempotent;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::{event_authority, global_config, PUMP_AMM_PROGRAM_ID};
use crate::domain::interfaces::{DepositParams, LiquidityDepositor};
use crate::domain::pool::PoolData;
use crate::exchanges::compute_budget::create_compute_budget_instructions;
use crate::math::{mul_div_ceil, mul_div_floor, with_slippage};
use crate::shared::errors::{ChainError, DepositError};
use crate::shared::types::{raw_to_ui, TOKEN_2022_PROGRAM_ID};
use crate::shared::utils::{format_sol, lamports_to_sol};

/// sha256("global:deposit")[..8]
pub const DEPOSIT_DISCRIMINATOR: [u8; 8] = [242, 35, 198, 137, 82, 225, 242, 182];

pub const DEPOSIT_COMPUTE_UNITS: u32 = 300_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize)]
pub struct DepositArgs {
    pub lp_token_amount_out: u64,
    pub max_base_amount_in: u64,
    pub max_quote_amount_in: u64,
}

/// Amounts of one deposit after pool-ratio and SOL-cap adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepositPlan {
    pub base_amount: u64,
    pub quote_amount: u64,
    pub args: DepositArgs,
}

/// Sizes a deposit of `base_amount` against current reserves.
///
/// Returns `Ok(None)` when the SOL cap leaves nothing worth depositing.
pub fn plan_deposit(
    pool: &PoolData,
    base_amount: u64,
    slippage_pct: f64,
    sol_cap: u64,
) -> Result<Option<DepositPlan>, DepositError> {
    if pool.base_reserve == 0 || pool.quote_reserve == 0 {
        return Err(DepositError::EmptyPool);
    }
    if pool.keys.lp_supply == 0 {
        return Err(DepositError::ZeroLpSupply);
    }

    let quote_for = |base: u64| {
        mul_div_ceil(base, pool.quote_reserve, pool.base_reserve)
            .ok_or_else(|| DepositError::Instruction("quote amount overflow".to_string()))
    };

    let mut base = base_amount;
    let mut quote = quote_for(base)?;
    let mut max_quote = with_slippage(quote, slippage_pct);

    if max_quote > sol_cap {
        base = mul_div_floor(base, sol_cap, max_quote).unwrap_or(0);
        quote = quote_for(base)?;
        max_quote = with_slippage(quote, slippage_pct).min(sol_cap);
        info!(
            "SOL cap {} binds; base scaled down to {} raw",
            format_sol(sol_cap),
            base
        );
    }

    let lp_out = mul_div_floor(base, pool.keys.lp_supply, pool.base_reserve).unwrap_or(0);
    if base == 0 || lp_out == 0 || quote > max_quote {
        return Ok(None);
    }

    Ok(Some(DepositPlan {
        base_amount: base,
        quote_amount: quote,
        args: DepositArgs {
            lp_token_amount_out: lp_out,
            max_base_amount_in: with_slippage(base, slippage_pct),
            max_quote_amount_in: max_quote,
        },
    }))
}

/// Accounts of the PumpSwap `deposit` instruction, in program order
#[derive(Debug, Clone)]
pub struct DepositAccounts {
    pub pool: Pubkey,
    pub user: Pubkey,
    pub base_mint: Pubkey,
    pub quote_mint: Pubkey,
    pub lp_mint: Pubkey,
    pub user_base_token_account: Pubkey,
    pub user_quote_token_account: Pubkey,
    pub user_pool_token_account: Pubkey,
    pub pool_base_token_account: Pubkey,
    pub pool_quote_token_account: Pubkey,
}

pub fn deposit_instruction(
    accounts: &DepositAccounts,
    args: &DepositArgs,
) -> Result<Instruction, DepositError> {
    let mut data = DEPOSIT_DISCRIMINATOR.to_vec();
    let encoded = args
        .try_to_vec()
        .map_err(|e| DepositError::Instruction(e.to_string()))?;
    data.extend_from_slice(&encoded);

    Ok(Instruction {
        program_id: PUMP_AMM_PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(accounts.pool, false),
            AccountMeta::new_readonly(global_config(), false),
            AccountMeta::new_readonly(accounts.user, true),
            AccountMeta::new_readonly(accounts.base_mint, false),
            AccountMeta::new_readonly(accounts.quote_mint, false),
            AccountMeta::new(accounts.lp_mint, false),
            AccountMeta::new(accounts.user_base_token_account, false),
            AccountMeta::new(accounts.user_quote_token_account, false),
            AccountMeta::new(accounts.user_pool_token_account, false),
            AccountMeta::new(accounts.pool_base_token_account, false),
            AccountMeta::new(accounts.pool_quote_token_account, false),
            AccountMeta::new_readonly(spl_token::id(), false),
            AccountMeta::new_readonly(TOKEN_2022_PROGRAM_ID, false),
            AccountMeta::new_readonly(event_authority(), false),
            AccountMeta::new_readonly(PUMP_AMM_PROGRAM_ID, false),
        ],
        data,
    })
}

/// Priority fee in lamports, spread across the unit limit
pub fn micro_lamports_per_unit(priority_fee_lamports: u64, compute_units: u32) -> u64 {
    if compute_units == 0 {
        return 0;
    }
    ((priority_fee_lamports as u128) * 1_000_000 / compute_units as u128) as u64
}

/// Full instruction list: budget, ATAs, wrap SOL, deposit, unwrap leftovers
pub fn build_deposit_instructions(
    pool: &PoolData,
    user: &Pubkey,
    base_token_program: &Pubkey,
    plan: &DepositPlan,
    priority_fee_lamports: u64,
) -> Result<Vec<Instruction>, DepositError> {
    let keys = &pool.keys;
    let wsol_ata = get_associated_token_address_with_program_id(user, &keys.quote_mint, &spl_token::id());
    let base_ata = get_associated_token_address_with_program_id(user, &keys.base_mint, base_token_program);
    let lp_ata = get_associated_token_address_with_program_id(user, &keys.lp_mint, &TOKEN_2022_PROGRAM_ID);

    let mut instructions = create_compute_budget_instructions(
        DEPOSIT_COMPUTE_UNITS,
        micro_lamports_per_unit(priority_fee_lamports, DEPOSIT_COMPUTE_UNITS),
    );

    instructions.push(create_associated_token_account_idempotent(
        user,
        user,
        &keys.quote_mint,
        &spl_token::id(),
    ));
    instructions.push(system_instruction::transfer(user, &wsol_ata, plan.args.max_quote_amount_in));
    instructions.push(
        spl_token::instruction::sync_native(&spl_token::id(), &wsol_ata)
            .map_err(|e| DepositError::Instruction(e.to_string()))?,
    );
    instructions.push(create_associated_token_account_idempotent(
        user,
        user,
        &keys.lp_mint,
        &TOKEN_2022_PROGRAM_ID,
    ));

    let accounts = DepositAccounts {
        pool: pool.pool,
        user: *user,
        base_mint: keys.base_mint,
        quote_mint: keys.quote_mint,
        lp_mint: keys.lp_mint,
        user_base_token_account: base_ata,
        user_quote_token_account: wsol_ata,
        user_pool_token_account: lp_ata,
        pool_base_token_account: keys.pool_base_token_account,
        pool_quote_token_account: keys.pool_quote_token_account,
    };
    instructions.push(deposit_instruction(&accounts, &plan.args)?);

    instructions.push(
        spl_token::instruction::close_account(&spl_token::id(), &wsol_ata, user, user, &[])
            .map_err(|e| DepositError::Instruction(e.to_string()))?,
    );

    Ok(instructions)
}

/// Submits PumpSwap deposits through RPC
pub struct PumpAmmDepositor {
    rpc: Arc<RpcClient>,
}

impl PumpAmmDepositor {
    pub fn new(rpc: Arc<RpcClient>) -> Self {
        Self { rpc }
    }

    async fn base_token_program(&self, mint: &Pubkey) -> Result<Pubkey, ChainError> {
        let account = self
            .rpc
            .get_account(mint)
            .await
            .map_err(|e| ChainError::Rpc(e.to_string()))?;
        Ok(account.owner)
    }
}

#[async_trait]
impl LiquidityDepositor for PumpAmmDepositor {
    async fn deposit(
        &self,
        pool: &PoolData,
        base_amount: u64,
        signer: &Keypair,
        params: &DepositParams,
    ) -> Result<bool, DepositError> {
        let Some(plan) = plan_deposit(pool, base_amount, params.slippage_pct, params.sol_cap)? else {
            warn!("Deposit would mint zero LP tokens; skipping");
            return Ok(false);
        };

        if params.debug {
            info!(
                "Deposit plan: base {:.6} (max {}), quote {} SOL (max {} SOL), lp out {}",
                raw_to_ui(plan.base_amount, pool.base_decimals),
                plan.args.max_base_amount_in,
                format_sol(plan.quote_amount),
                format_sol(plan.args.max_quote_amount_in),
                plan.args.lp_token_amount_out
            );
        }

        let user = signer.pubkey();
        let base_program = self.base_token_program(&pool.keys.base_mint).await?;
        let instructions =
            build_deposit_instructions(pool, &user, &base_program, &plan, params.priority_fee_lamports)?;
        debug!(
            "Deposit transaction: {} instructions, priority fee {} SOL",
            instructions.len(),
            lamports_to_sol(params.priority_fee_lamports)
        );

        let blockhash = self
            .rpc
            .get_latest_blockhash()
            .await
            .map_err(|e| ChainError::Rpc(e.to_string()))?;
        let transaction =
            Transaction::new_signed_with_payer(&instructions, Some(&user), &[signer], blockhash);

        match self.rpc.send_and_confirm_transaction(&transaction).await {
            Ok(signature) => {
                info!("Deposit confirmed: {}", signature);
                Ok(true)
            }
            Err(e) => {
                warn!("Deposit transaction failed: {}", e);
                Ok(false)
            }
        }
    }
}
