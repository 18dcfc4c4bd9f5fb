pub mod deposit;
pub mod fetcher;
pub mod parser;

pub use deposit::PumpAmmDepositor;
pub use fetcher::RpcPoolStateFetcher;
pub use parser::PumpAmmPoolParser;

use solana_sdk::pubkey;
use solana_sdk::pubkey::Pubkey;

pub const PUMP_AMM_PROGRAM_ID: Pubkey = pubkey!("pAMMBay6oceH9fJKBRHGP5D4bD4sWpmSwMn52FMfXEA");

pub fn global_config() -> Pubkey {
    Pubkey::find_program_address(&[b"global_config"], &PUMP_AMM_PROGRAM_ID).0
}

pub fn event_authority() -> Pubkey {
    Pubkey::find_program_address(&[b"__event_authority"], &PUMP_AMM_PROGRAM_ID).0
}
