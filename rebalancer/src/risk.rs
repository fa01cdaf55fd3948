use std::time::{Duration, Instant};

use log::info;

use crate::{
    error::{BotError, BotResult},
    types::BotState,
};

/// Length of the window `max_swaps_per_day` applies to
pub const SWAP_WINDOW: Duration = Duration::from_secs(24 * 60 * 60);

/// Caps the number of swaps per rolling window
///
/// The counter lives in [`BotState`] and is not persisted, a restart starts a fresh window
#[derive(Debug, Clone, Copy)]
pub struct RiskLimiter {
    max_swaps_per_day: u32,
    window: Duration,
}

impl RiskLimiter {
    pub fn new(max_swaps_per_day: u32) -> Self {
        Self {
            max_swaps_per_day,
            window: SWAP_WINDOW,
        }
    }

    pub fn max_swaps_per_day(&self) -> u32 {
        self.max_swaps_per_day
    }

    /// Start a new window once the current one is at least `SWAP_WINDOW` old
    ///
    /// Returns true if the counter was reset
    pub fn maybe_reset(&self, state: &mut BotState, now: Instant) -> bool {
        if now.saturating_duration_since(state.window_start) >= self.window {
            state.swap_count = 0;
            state.window_start = now;
            info!("Daily swap count reset");
            return true;
        }

        false
    }

    pub fn check(&self, state: &BotState) -> BotResult<()> {
        if state.swap_count >= self.max_swaps_per_day {
            return Err(BotError::DailyLimitReached {
                count: state.swap_count,
                max: self.max_swaps_per_day,
            });
        }

        Ok(())
    }
}
