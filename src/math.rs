// src/math.rs
//! Buffer-safe amount calculations. SOL amounts are lamports, token amounts
//! are raw units. A zero result means "skip this stage".

/// Half of the newly collected SOL, minus the gas buffer, floored at zero
pub fn spend_amount(collected_lamports: u64, gas_buffer_lamports: u64) -> u64 {
    (collected_lamports / 2).saturating_sub(gas_buffer_lamports)
}

/// Bought tokens minus the retained dust.
///
/// Dust is rounded up, so at least one raw unit stays in the wallet whenever
/// `dust_fraction > 0` and something was bought.
pub fn deposit_amount(bought_raw: u64, dust_fraction: f64) -> u64 {
    if bought_raw == 0 || dust_fraction <= 0.0 {
        return bought_raw;
    }
    let dust = ((bought_raw as f64) * dust_fraction).ceil() as u64;
    bought_raw.saturating_sub(dust.max(1))
}

/// Current SOL balance minus the cap buffer, floored at zero
pub fn sol_cap(balance_lamports: u64, cap_buffer_lamports: u64) -> u64 {
    balance_lamports.saturating_sub(cap_buffer_lamports)
}

/// Non-negative balance delta; a decrease reads as "nothing gained"
pub fn balance_delta(before: u64, after: u64) -> u64 {
    after.saturating_sub(before)
}

/// Upper bound for an input once slippage tolerance is applied
pub fn with_slippage(amount: u64, slippage_pct: f64) -> u64 {
    let scaled = (amount as f64) * (1.0 + slippage_pct.max(0.0) / 100.0);
    if scaled >= u64::MAX as f64 {
        u64::MAX
    } else {
        scaled.floor() as u64
    }
}

/// `a * b / c` without intermediate overflow, rounding down
pub fn mul_div_floor(a: u64, b: u64, c: u64) -> Option<u64> {
    if c == 0 {
        return None;
    }
    u64::try_from((a as u128) * (b as u128) / (c as u128)).ok()
}

/// `a * b / c` without intermediate overflow, rounding up
pub fn mul_div_ceil(a: u64, b: u64, c: u64) -> Option<u64> {
    if c == 0 {
        return None;
    }
    let c = c as u128;
    u64::try_from(((a as u128) * (b as u128) + c - 1) / c).ok()
}
