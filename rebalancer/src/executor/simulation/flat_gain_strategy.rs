use sdk::jupiter::QuoteResponse;

use super::SimulationStrategy;
use crate::types::SwapDirection;

pub const DEFAULT_GAIN_PERCENT: f64 = 3.0;

/// Credits a flat gain when exiting BASE, leaves the balance alone when re-entering
#[derive(Debug, Clone, Copy)]
pub struct FlatGainOnExit {
    pub gain_percent: f64,
}

impl Default for FlatGainOnExit {
    fn default() -> Self {
        Self {
            gain_percent: DEFAULT_GAIN_PERCENT,
        }
    }
}

impl SimulationStrategy for FlatGainOnExit {
    fn simulate(&self, balance_usd: f64, direction: SwapDirection, _quote: &QuoteResponse) -> f64 {
        match direction {
            SwapDirection::BaseToQuote => balance_usd * (1.0 + self.gain_percent / 100.0),
            SwapDirection::QuoteToBase => balance_usd,
        }
    }
}
