use std::{sync::Arc, time::Duration};

use log::{error, info, warn};
use sdk::{jupiter::SwapRouter, ChainClient, Wallet};
use solana_sdk::pubkey::Pubkey;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::{
    config::BotConfig,
    decision::DecisionEngine,
    error::BotResult,
    executor::{ExecutionMode, SwapExecutor, SwapReceipt},
    price_feed::PriceFeed,
    reconciler::BalanceReconciler,
    risk::RiskLimiter,
    types::{BotState, Decision, HoldReason},
};

/// What a completed tick did
#[derive(Debug, Clone)]
pub enum TickOutcome {
    Held(HoldReason),
    Swapped(SwapReceipt),
}

/// Drives the price check -> reconcile -> decide -> swap pipeline on a fixed interval
///
/// Ticks never overlap, a pending confirmation delays the next tick
pub struct RebalancerBot<R: SwapRouter, C: ChainClient> {
    name: String,
    interval: Duration,
    state: BotState,
    risk: RiskLimiter,
    price_feed: PriceFeed<R>,
    reconciler: BalanceReconciler<C>,
    decision: DecisionEngine,
    executor: SwapExecutor<R, C>,
}

impl<R: SwapRouter, C: ChainClient> RebalancerBot<R, C> {
    pub fn new(
        config: &BotConfig,
        router: Arc<R>,
        chain: Arc<C>,
        wallet: Wallet,
        owner: Pubkey,
    ) -> Self {
        let risk = RiskLimiter::new(config.max_swaps_per_day);
        let mode = if config.simulate_mode {
            ExecutionMode::Simulate(config.simulation_policy.strategy())
        } else {
            ExecutionMode::Live
        };

        Self {
            name: "rebalancer".to_string(),
            interval: config.tick_interval(),
            state: BotState::new(config.initial_balance_usd, std::time::Instant::now()),
            risk,
            price_feed: PriceFeed::new(router.clone(), config.slippage_bps),
            reconciler: BalanceReconciler::new(chain.clone(), owner),
            decision: DecisionEngine::new(config.swap_threshold_min_percent),
            executor: SwapExecutor::new(
                router,
                chain,
                wallet,
                risk,
                mode,
                config.slippage_bps,
                config.priority_fee(),
            ),
        }
    }

    pub fn state(&self) -> &BotState {
        &self.state
    }

    pub async fn start_interval_loop(&mut self) {
        info!(
            "{}: started, holding {} (${:.2}), checking every {:?}, simulate: {}",
            self.name,
            self.state.current_asset,
            self.state.balance_usd,
            self.interval,
            self.executor.is_simulated()
        );

        let mut ticker = interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            if let Err(e) = self.try_rebalance().await {
                if e.is_indeterminate() {
                    warn!("{}: {e}, check the transaction manually", self.name);
                } else {
                    error!("{}: tick aborted: {e}", self.name);
                }
            }
        }
    }

    /// Run a single tick. Errors end the tick early and leave the swap state untouched.
    pub async fn try_rebalance(&mut self) -> BotResult<TickOutcome> {
        self.risk
            .maybe_reset(&mut self.state, std::time::Instant::now());

        let price = self.price_feed.sample().await?;

        let holdings = self.reconciler.reconcile(price).await?;
        self.state
            .apply_holdings(holdings.usd_value, holdings.asset);

        info!(
            "Current SOL price: ${:.2} | Holding: {} (${:.2}) | Last swap: ${:.2}",
            price, self.state.current_asset, self.state.balance_usd, self.state.last_swap_price
        );

        let decision = self.decision.evaluate(&mut self.state, price);
        info!("Swap decision: {decision}");

        match decision {
            Decision::NoSwap(reason) => Ok(TickOutcome::Held(reason)),
            Decision::Swap { .. } => {
                let receipt = self.executor.execute(&mut self.state, price).await?;
                Ok(TickOutcome::Swapped(receipt))
            }
        }
    }
}

/// Log the effective configuration before the loop starts
pub fn log_startup(config: &BotConfig, wallet: &Wallet, owner: &Pubkey) {
    info!("Starting Solana Trading Bot");
    info!("Initial balance: ${:.2}", config.initial_balance_usd);
    info!("Wallet address: {}", wallet.authority());
    if owner != wallet.authority() {
        warn!(
            "Configured wallet address ({owner}) doesn't match the signer ({}), balances are read from the configured address",
            wallet.authority()
        );
    }
    info!("Price check interval: {}s", config.price_check_interval_seconds);
    info!(
        "Swap thresholds: {:.1}% - {:.1}%",
        config.swap_threshold_min_percent, config.swap_threshold_max_percent
    );
    info!("Max swaps per day: {}", config.max_swaps_per_day);
    info!("Slippage: {} bps", config.slippage_bps);
    info!("Simulate mode: {}", config.simulate_mode);
}
