//! Measures what a relay-submitted action actually did by diffing balances
//! around its confirmed transaction

use solana_sdk::pubkey::Pubkey;
use std::time::Duration;
use tracing::{info, warn};

use super::reference::extract_reference;
use super::snapshot::snapshot;
use crate::domain::confirmation::ConfirmationPoller;
use crate::domain::cycle::outcome::{AbortReason, Stage, StageResult};
use crate::domain::interfaces::{ChainReader, TradeAction, TradeRelay};
use crate::math::balance_delta;
use crate::shared::errors::CycleError;
use crate::shared::types::{BalanceProbe, TokenBalance};

/// Confirmed, observed effect of one action
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub reference: String,
    pub before: TokenBalance,
    pub after: TokenBalance,
    /// `after - before`, floored at zero
    pub delta: u64,
}

impl Measurement {
    pub fn delta_balance(&self) -> TokenBalance {
        TokenBalance::new(self.delta, self.after.decimals)
    }
}

pub struct DeltaAccountant<'a> {
    chain: &'a dyn ChainReader,
    relay: &'a dyn TradeRelay,
    poller: &'a ConfirmationPoller,
}

impl<'a> DeltaAccountant<'a> {
    pub fn new(
        chain: &'a dyn ChainReader,
        relay: &'a dyn TradeRelay,
        poller: &'a ConfirmationPoller,
    ) -> Self {
        Self { chain, relay, poller }
    }

    /// snapshot -> submit -> extract reference -> confirm -> snapshot.
    ///
    /// Whatever amount the relay claims is ignored. The second snapshot is
    /// only taken once the transaction is confirmed.
    pub async fn measure(
        &self,
        stage: Stage,
        owner: &Pubkey,
        action: &TradeAction,
        probe: BalanceProbe,
        timeout: Duration,
    ) -> Result<StageResult<Measurement>, CycleError> {
        let before = snapshot(self.chain, owner, probe).await?;

        let response = self.relay.submit(action).await?;
        info!("{} relay response: {}", action.label(), response);

        let Some(reference) = extract_reference(&response) else {
            warn!("{}: no signature in relay response", action.label());
            return Ok(StageResult::Abort(AbortReason::NoSignature { stage }));
        };

        if !self.poller.wait_for(self.chain, &reference, timeout).await? {
            return Ok(StageResult::Abort(AbortReason::NotConfirmed { stage, reference }));
        }
        info!("✅ {} transaction confirmed: {}", action.label(), reference);

        let after = snapshot(self.chain, owner, probe).await?;
        let delta = balance_delta(before.amount, after.amount);
        if after.amount < before.amount {
            warn!(
                "{} balance dropped from {} to {}; counting it as zero",
                action.label(),
                before.amount,
                after.amount
            );
        }

        Ok(StageResult::Proceed(Measurement { reference, before, after, delta }))
    }
}
