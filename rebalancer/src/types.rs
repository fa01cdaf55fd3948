use std::{fmt, time::Instant};

use sdk::constants::{
    SOL_DECIMALS, SOL_MINT, SOL_PRECISION, USDC_DECIMALS, USDC_MINT, USDC_PRECISION,
};
use solana_sdk::pubkey::Pubkey;

/// One of the two tracked assets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Asset {
    /// SOL
    Base,
    /// USDC
    Quote,
}

impl Asset {
    pub fn other(self) -> Self {
        match self {
            Asset::Base => Asset::Quote,
            Asset::Quote => Asset::Base,
        }
    }

    pub fn mint(self) -> Pubkey {
        match self {
            Asset::Base => SOL_MINT,
            Asset::Quote => USDC_MINT,
        }
    }

    pub fn decimals(self) -> u8 {
        match self {
            Asset::Base => SOL_DECIMALS,
            Asset::Quote => USDC_DECIMALS,
        }
    }

    /// One whole unit expressed in the smallest unit
    pub fn precision(self) -> u64 {
        match self {
            Asset::Base => SOL_PRECISION,
            Asset::Quote => USDC_PRECISION,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Asset::Base => "SOL",
            Asset::Quote => "USDC",
        }
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapDirection {
    BaseToQuote,
    QuoteToBase,
}

impl SwapDirection {
    /// The swap that exits `holding`
    pub fn exiting(holding: Asset) -> Self {
        match holding {
            Asset::Base => SwapDirection::BaseToQuote,
            Asset::Quote => SwapDirection::QuoteToBase,
        }
    }

    pub fn input(self) -> Asset {
        match self {
            SwapDirection::BaseToQuote => Asset::Base,
            SwapDirection::QuoteToBase => Asset::Quote,
        }
    }

    pub fn output(self) -> Asset {
        self.input().other()
    }
}

impl fmt::Display for SwapDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.input(), self.output())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HoldReason {
    InitialPriceSet,
    ThresholdNotMet { change_pct: f64 },
}

impl fmt::Display for HoldReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HoldReason::InitialPriceSet => f.write_str("initial price set"),
            HoldReason::ThresholdNotMet { change_pct } => write!(
                f,
                "threshold not met (price change {:.2}%)",
                change_pct
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decision {
    Swap {
        direction: SwapDirection,
        change_pct: f64,
    },
    NoSwap(HoldReason),
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Swap {
                direction,
                change_pct,
            } => write!(f, "price moved {:.2}%, swapping {}", change_pct, direction),
            Decision::NoSwap(reason) => write!(f, "no swap: {}", reason),
        }
    }
}

/// Mutable trading state, owned by the interval loop
///
/// `current_asset` and `balance_usd` are overwritten from chain reads every tick,
/// the swap fields only survive in memory
#[derive(Debug, Clone)]
pub struct BotState {
    pub current_asset: Asset,
    pub balance_usd: f64,
    /// Price at the last swap, 0 until the first observation
    pub last_swap_price: f64,
    pub swap_count: u32,
    pub window_start: Instant,
}

impl BotState {
    pub fn new(initial_balance_usd: f64, now: Instant) -> Self {
        Self {
            current_asset: Asset::Base,
            balance_usd: initial_balance_usd.max(0.0),
            last_swap_price: 0.0,
            swap_count: 0,
            window_start: now,
        }
    }

    pub fn apply_holdings(&mut self, usd_value: f64, asset: Asset) {
        self.balance_usd = usd_value.max(0.0);
        self.current_asset = asset;
    }

    /// Apply every mutation of a completed swap at once
    pub(crate) fn record_swap(&mut self, direction: SwapDirection, price: f64, balance_usd: f64) {
        self.current_asset = direction.output();
        self.balance_usd = balance_usd.max(0.0);
        self.last_swap_price = price;
        self.swap_count += 1;
    }
}
