use sdk::jupiter::QuoteResponse;

use super::SimulationStrategy;
use crate::types::SwapDirection;

#[derive(Debug, Clone, Copy, Default)]
pub struct Neutral;

impl SimulationStrategy for Neutral {
    fn simulate(&self, balance_usd: f64, _direction: SwapDirection, _quote: &QuoteResponse) -> f64 {
        balance_usd
    }
}
