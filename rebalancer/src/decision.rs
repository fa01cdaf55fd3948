use crate::{
    types::{Asset, BotState, Decision, HoldReason, SwapDirection},
    util::price_change_percent,
};

/// Decides whether the move since the last swap warrants swapping out of the held asset
///
/// Only the minimum threshold gates a swap, there is no upper bound on the move
#[derive(Debug, Clone, Copy)]
pub struct DecisionEngine {
    min_threshold_percent: f64,
}

impl DecisionEngine {
    pub fn new(min_threshold_percent: f64) -> Self {
        Self {
            min_threshold_percent,
        }
    }

    /// The first call only records `current_price` as the reference price
    pub fn evaluate(&self, state: &mut BotState, current_price: f64) -> Decision {
        if state.last_swap_price == 0.0 {
            state.last_swap_price = current_price;
            return Decision::NoSwap(HoldReason::InitialPriceSet);
        }

        let change_pct = price_change_percent(state.last_swap_price, current_price);

        let should_swap = match state.current_asset {
            Asset::Base => change_pct >= self.min_threshold_percent,
            Asset::Quote => change_pct <= -self.min_threshold_percent,
        };

        if should_swap {
            Decision::Swap {
                direction: SwapDirection::exiting(state.current_asset),
                change_pct,
            }
        } else {
            Decision::NoSwap(HoldReason::ThresholdNotMet { change_pct })
        }
    }
}
