use solana_sdk::pubkey::Pubkey;

/// Convert a whole-unit amount into the smallest unit, truncating any remainder
pub fn to_raw_amount(amount: f64, precision: u64) -> u64 {
    (amount * precision as f64) as u64
}

pub fn from_raw_amount(raw: u64, precision: u64) -> f64 {
    raw as f64 / precision as f64
}

/// Relative move from `last` to `current`, in percent
pub fn price_change_percent(last: f64, current: f64) -> f64 {
    (current - last) / last * 100.0
}

pub fn short_mint(mint: &Pubkey) -> String {
    let mint = mint.to_string();
    format!("{}...", &mint[..8])
}

pub fn valid_slippage_bps(slippage_bps: u16) -> bool {
    slippage_bps <= 10_000
}

pub fn valid_threshold_percent(threshold: f64) -> bool {
    threshold.is_finite() && threshold > 0.0
}
