//! Scripted in-memory collaborators for tests

use async_trait::async_trait;
use serde_json::Value;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Keypair;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use crate::config::{Config, FileConfig};
use crate::domain::interfaces::{
    ChainReader, DepositParams, LiquidityDepositor, PoolStateFetcher, TradeAction, TradeRelay,
};
use crate::domain::pool::{PoolData, RawPoolRecord};
use crate::shared::errors::{ChainError, DepositError, RelayError};
use crate::shared::types::{TokenBalance, TokenProgram, TxStatus};

pub fn test_config() -> Config {
    let mut file = FileConfig::default();
    file.schedule.loop_secs = 0;
    Config::from_file_config(&file).unwrap()
}

/// Pops scripted values in order; the last one sticks
fn next_scripted<T: Clone>(queue: &mut VecDeque<T>) -> Option<T> {
    if queue.len() > 1 {
        queue.pop_front()
    } else {
        queue.front().cloned()
    }
}

#[derive(Default)]
struct ChainState {
    native: HashMap<Pubkey, VecDeque<u64>>,
    tokens: HashMap<(Pubkey, Pubkey), VecDeque<Result<TokenBalance, ChainError>>>,
    token_accounts: HashMap<Pubkey, TokenBalance>,
    statuses: HashMap<String, VecDeque<Result<Option<TxStatus>, ChainError>>>,
    status_queries: HashMap<String, usize>,
    mint_decimals: HashMap<Pubkey, u8>,
    balance_reads: usize,
    token_reads: usize,
}

#[derive(Default)]
pub struct FakeChain {
    state: Mutex<ChainState>,
}

impl FakeChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_balance(&self, owner: Pubkey, lamports: u64) {
        self.state.lock().unwrap().native.entry(owner).or_default().push_back(lamports);
    }

    pub fn push_token_balance(&self, owner: Pubkey, mint: Pubkey, balance: TokenBalance) {
        self.state
            .lock()
            .unwrap()
            .tokens
            .entry((owner, mint))
            .or_default()
            .push_back(Ok(balance));
    }

    pub fn push_token_error(&self, owner: Pubkey, mint: Pubkey, err: ChainError) {
        self.state
            .lock()
            .unwrap()
            .tokens
            .entry((owner, mint))
            .or_default()
            .push_back(Err(err));
    }

    pub fn set_token_account(&self, account: Pubkey, balance: TokenBalance) {
        self.state.lock().unwrap().token_accounts.insert(account, balance);
    }

    pub fn set_mint_decimals(&self, mint: Pubkey, decimals: u8) {
        self.state.lock().unwrap().mint_decimals.insert(mint, decimals);
    }

    pub fn push_status(&self, reference: &str, status: Option<TxStatus>) {
        self.state
            .lock()
            .unwrap()
            .statuses
            .entry(reference.to_string())
            .or_default()
            .push_back(Ok(status));
    }

    pub fn push_status_error(&self, reference: &str, err: ChainError) {
        self.state
            .lock()
            .unwrap()
            .statuses
            .entry(reference.to_string())
            .or_default()
            .push_back(Err(err));
    }

    pub fn status_queries(&self, reference: &str) -> usize {
        self.state.lock().unwrap().status_queries.get(reference).copied().unwrap_or(0)
    }

    pub fn total_status_queries(&self) -> usize {
        self.state.lock().unwrap().status_queries.values().sum()
    }

    pub fn balance_reads(&self) -> usize {
        self.state.lock().unwrap().balance_reads
    }

    pub fn token_reads(&self) -> usize {
        self.state.lock().unwrap().token_reads
    }
}

#[async_trait]
impl ChainReader for FakeChain {
    async fn balance(&self, owner: &Pubkey) -> Result<u64, ChainError> {
        let mut state = self.state.lock().unwrap();
        state.balance_reads += 1;
        state
            .native
            .get_mut(owner)
            .and_then(next_scripted)
            .ok_or_else(|| ChainError::AccountNotFound(owner.to_string()))
    }

    async fn token_balance(
        &self,
        owner: &Pubkey,
        mint: &Pubkey,
        _program: TokenProgram,
    ) -> Result<TokenBalance, ChainError> {
        let mut state = self.state.lock().unwrap();
        state.token_reads += 1;
        state
            .tokens
            .get_mut(&(*owner, *mint))
            .and_then(next_scripted)
            .unwrap_or_else(|| {
                Err(ChainError::TokenAccountMissing { account: format!("{owner}/{mint}") })
            })
    }

    async fn token_account_balance(&self, account: &Pubkey) -> Result<TokenBalance, ChainError> {
        self.state
            .lock()
            .unwrap()
            .token_accounts
            .get(account)
            .copied()
            .ok_or_else(|| ChainError::AccountNotFound(account.to_string()))
    }

    async fn signature_status(&self, reference: &str) -> Result<Option<TxStatus>, ChainError> {
        let mut state = self.state.lock().unwrap();
        *state.status_queries.entry(reference.to_string()).or_default() += 1;
        state
            .statuses
            .get_mut(reference)
            .and_then(next_scripted)
            .unwrap_or(Ok(None))
    }

    async fn mint_decimals(&self, mint: &Pubkey) -> Result<u8, ChainError> {
        self.state
            .lock()
            .unwrap()
            .mint_decimals
            .get(mint)
            .copied()
            .ok_or_else(|| ChainError::AccountNotFound(mint.to_string()))
    }
}

#[derive(Default)]
pub struct FakeRelay {
    responses: Mutex<VecDeque<Value>>,
    submitted: Mutex<Vec<TradeAction>>,
}

impl FakeRelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_response(&self, response: Value) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn submitted(&self) -> Vec<TradeAction> {
        self.submitted.lock().unwrap().clone()
    }
}

#[async_trait]
impl TradeRelay for FakeRelay {
    async fn submit(&self, action: &TradeAction) -> Result<Value, RelayError> {
        self.submitted.lock().unwrap().push(action.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| RelayError::InvalidRequest("no scripted response".to_string()))
    }
}

#[derive(Default)]
pub struct FakePoolFetcher {
    record: Mutex<Option<RawPoolRecord>>,
    fetches: Mutex<usize>,
}

impl FakePoolFetcher {
    pub fn with_record(record: RawPoolRecord) -> Self {
        Self { record: Mutex::new(Some(record)), fetches: Mutex::new(0) }
    }

    pub fn fetches(&self) -> usize {
        *self.fetches.lock().unwrap()
    }
}

#[async_trait]
impl PoolStateFetcher for FakePoolFetcher {
    async fn fetch(&self, pool: &Pubkey) -> Result<RawPoolRecord, ChainError> {
        *self.fetches.lock().unwrap() += 1;
        self.record
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| ChainError::AccountNotFound(pool.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DepositCall {
    pub pool: Pubkey,
    pub base_amount: u64,
    pub params: DepositParams,
}

pub struct FakeDepositor {
    succeed: bool,
    calls: Mutex<Vec<DepositCall>>,
}

impl FakeDepositor {
    pub fn new(succeed: bool) -> Self {
        Self { succeed, calls: Mutex::new(Vec::new()) }
    }

    pub fn calls(&self) -> Vec<DepositCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LiquidityDepositor for FakeDepositor {
    async fn deposit(
        &self,
        pool: &PoolData,
        base_amount: u64,
        _signer: &Keypair,
        params: &DepositParams,
    ) -> Result<bool, DepositError> {
        self.calls.lock().unwrap().push(DepositCall {
            pool: pool.pool,
            base_amount,
            params: *params,
        });
        Ok(self.succeed)
    }
}
