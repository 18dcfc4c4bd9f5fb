use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, warn};

use crate::domain::interfaces::{TradeAction, TradeRelay};
use crate::shared::errors::RelayError;

/// Longest slice of a non-JSON body kept in the synthesized response
const BODY_PREVIEW_CHARS: usize = 300;

/// PumpPortal local-trade relay; signs and lands transactions on our behalf
pub struct PumpPortalClient {
    http_client: Client,
    base_url: String,
    api_key: String,
}

impl PumpPortalClient {
    pub fn new(base_url: String, api_key: String, timeout: Duration) -> Result<Self, RelayError> {
        if api_key.trim().is_empty() {
            return Err(RelayError::InvalidRequest("empty API key".to_string()));
        }
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn trade_url(&self) -> String {
        format!("{}/api/trade", self.base_url)
    }
}

/// Form fields for one action, in submission order
pub fn form_fields(action: &TradeAction) -> Vec<(&'static str, String)> {
    match action {
        TradeAction::CollectCreatorFee { mint, priority_fee_sol } => vec![
            ("action", "collectCreatorFee".to_string()),
            ("priorityFee", priority_fee_sol.to_string()),
            ("pool", "pump".to_string()),
            ("mint", mint.to_string()),
        ],
        TradeAction::Buy { mint, amount_sol, slippage_pct, priority_fee_sol } => vec![
            ("action", "buy".to_string()),
            ("mint", mint.to_string()),
            ("amount", amount_sol.to_string()),
            ("denominatedInSol", "true".to_string()),
            ("slippage", slippage_pct.to_string()),
            ("priorityFee", priority_fee_sol.to_string()),
            ("pool", "auto".to_string()),
        ],
    }
}

/// JSON body as-is, or a synthesized error object for anything else
pub fn parse_response(status: u16, body: &str) -> Value {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => value,
        Err(_) => json!({
            "error": "non-json response",
            "status": status,
            "text": body.chars().take(BODY_PREVIEW_CHARS).collect::<String>(),
        }),
    }
}

#[async_trait]
impl TradeRelay for PumpPortalClient {
    async fn submit(&self, action: &TradeAction) -> Result<Value, RelayError> {
        let fields = form_fields(action);
        debug!("Submitting {} to relay: {:?}", action.label(), fields);

        let response = self
            .http_client
            .post(self.trade_url())
            .query(&[("api-key", self.api_key.as_str())])
            .form(&fields)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            warn!("Relay returned status {} for {}", status, action.label());
        }
        Ok(parse_response(status.as_u16(), &body))
    }
}
