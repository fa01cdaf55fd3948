use serde::Deserialize;
use sdk::jupiter::QuoteResponse;

use crate::types::SwapDirection;

pub use self::{flat_gain_strategy::FlatGainOnExit, neutral_strategy::Neutral};

mod flat_gain_strategy;
mod neutral_strategy;

/// Produces the post-swap balance of a swap that is never sent
pub trait SimulationStrategy: Send + Sync {
    fn simulate(&self, balance_usd: f64, direction: SwapDirection, quote: &QuoteResponse) -> f64;
}

/// Simulation strategies selectable from config
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulationPolicy {
    #[default]
    FlatGainOnExit,
    Neutral,
}

impl SimulationPolicy {
    pub fn strategy(self) -> Box<dyn SimulationStrategy> {
        match self {
            SimulationPolicy::FlatGainOnExit => Box::<FlatGainOnExit>::default(),
            SimulationPolicy::Neutral => Box::new(Neutral),
        }
    }
}
