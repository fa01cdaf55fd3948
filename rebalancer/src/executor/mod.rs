use std::{sync::Arc, time::Duration};

use log::info;
use sdk::{
    jupiter::{QuoteRequest, QuoteResponse, SwapRequest, SwapRouter, TransactionConfig},
    ChainClient, Wallet,
};
use solana_sdk::signature::Signature;
use tokio::time::{timeout_at, Instant};

use crate::{
    confirmation::{ConfirmationMonitor, TransactionOutcome, POLL_INTERVAL},
    error::{BotError, BotResult, SwapStage},
    risk::RiskLimiter,
    types::{Asset, BotState, SwapDirection},
    util::{short_mint, to_raw_amount},
};

use self::simulation::SimulationStrategy;

pub mod simulation;

/// Budget shared by submission and confirmation of a live swap
pub const SUBMIT_AND_CONFIRM_TIMEOUT: Duration = Duration::from_secs(30);

pub enum ExecutionMode {
    /// Quote only, the post-swap balance comes from the strategy
    Simulate(Box<dyn SimulationStrategy>),
    Live,
}

#[derive(Debug, Clone)]
pub struct SwapReceipt {
    pub direction: SwapDirection,
    pub quote: QuoteResponse,
    /// Set for confirmed live swaps
    pub signature: Option<Signature>,
    pub balance_usd: f64,
}

pub struct SwapExecutor<R: SwapRouter, C: ChainClient> {
    router: Arc<R>,
    chain: Arc<C>,
    wallet: Wallet,
    risk: RiskLimiter,
    mode: ExecutionMode,
    monitor: ConfirmationMonitor<C>,
    slippage_bps: u16,
    priority_fee_lamports: Option<u64>,
    submit_timeout: Duration,
}

impl<R: SwapRouter, C: ChainClient> SwapExecutor<R, C> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        router: Arc<R>,
        chain: Arc<C>,
        wallet: Wallet,
        risk: RiskLimiter,
        mode: ExecutionMode,
        slippage_bps: u16,
        priority_fee_lamports: Option<u64>,
    ) -> Self {
        Self {
            monitor: ConfirmationMonitor::new(chain.clone(), POLL_INTERVAL),
            router,
            chain,
            wallet,
            risk,
            mode,
            slippage_bps,
            priority_fee_lamports: priority_fee_lamports.filter(|fee| *fee > 0),
            submit_timeout: SUBMIT_AND_CONFIRM_TIMEOUT,
        }
    }

    /// Override the confirmation timing
    pub fn with_timing(mut self, submit_timeout: Duration, poll_interval: Duration) -> Self {
        self.submit_timeout = submit_timeout;
        self.monitor = ConfirmationMonitor::new(self.chain.clone(), poll_interval);
        self
    }

    pub fn is_simulated(&self) -> bool {
        matches!(self.mode, ExecutionMode::Simulate(_))
    }

    /// Swap the whole position out of the held asset
    ///
    /// `state` is only touched once the swap has succeeded, any failure leaves it as it was
    pub async fn execute(&self, state: &mut BotState, current_price: f64) -> BotResult<SwapReceipt> {
        self.risk.check(state)?;

        let direction = SwapDirection::exiting(state.current_asset);
        let amount = trade_amount(state.balance_usd, current_price, state.current_asset);
        let request = QuoteRequest::exact_in(
            direction.input().mint(),
            direction.output().mint(),
            amount,
            self.slippage_bps,
        );

        let quote = self
            .router
            .quote(&request)
            .await
            .map_err(|e| BotError::swap_failed(SwapStage::Quote, e))?;

        info!(
            "Swap quote received: {} {} -> {} {}",
            quote.in_amount,
            short_mint(&quote.input_mint),
            quote.out_amount,
            short_mint(&quote.output_mint)
        );

        let (balance_usd, signature) = match &self.mode {
            ExecutionMode::Simulate(strategy) => {
                info!("SIMULATED SWAP: {direction}");
                let balance_usd = strategy.simulate(state.balance_usd, direction, &quote);
                (balance_usd, None)
            }
            ExecutionMode::Live => {
                info!("EXECUTING REAL SWAP: {direction}");
                let signature = self.execute_live(quote.clone()).await?;
                info!("Swap executed successfully!");
                (state.balance_usd, Some(signature))
            }
        };

        state.record_swap(direction, current_price, balance_usd);

        info!(
            "New balance: ${:.2} in {}",
            state.balance_usd, state.current_asset
        );
        info!(
            "Swaps today: {}/{}",
            state.swap_count,
            self.risk.max_swaps_per_day()
        );

        Ok(SwapReceipt {
            direction,
            quote,
            signature,
            balance_usd: state.balance_usd,
        })
    }

    async fn execute_live(&self, quote: QuoteResponse) -> BotResult<Signature> {
        let request = SwapRequest {
            user_public_key: *self.wallet.authority(),
            quote_response: quote,
            config: TransactionConfig {
                priority_fee_lamports: self.priority_fee_lamports,
                ..Default::default()
            },
        };

        let swap = self
            .router
            .swap_transaction(&request)
            .await
            .map_err(|e| BotError::swap_failed(SwapStage::Build, e))?;

        let tx = self
            .wallet
            .sign_serialized_tx(&swap.swap_transaction)
            .map_err(|e| BotError::swap_failed(SwapStage::Sign, e))?;

        let deadline = Instant::now() + self.submit_timeout;
        let signature = match timeout_at(deadline, self.chain.send_transaction(&tx)).await {
            Ok(Ok(signature)) => signature,
            Ok(Err(e)) => return Err(BotError::swap_failed(SwapStage::Submit, e)),
            Err(_) => {
                return Err(BotError::swap_failed(
                    SwapStage::Submit,
                    format!("not sent within {:?}", self.submit_timeout),
                ))
            }
        };
        info!("Transaction sent: {signature}");

        match self
            .monitor
            .await_outcome(&signature, swap.last_valid_block_height, deadline)
            .await
        {
            TransactionOutcome::Confirmed => Ok(signature),
            TransactionOutcome::Failed(reason) => {
                Err(BotError::TransactionFailed { signature, reason })
            }
            TransactionOutcome::Expired {
                current_height,
                last_valid_block_height,
            } => Err(BotError::TransactionExpired {
                signature,
                current_height,
                last_valid_block_height,
            }),
            TransactionOutcome::TimedOut => Err(BotError::ConfirmationTimedOut { signature }),
        }
    }
}

/// Size of a full exit from `holding`, in the smallest unit of `holding`
pub fn trade_amount(balance_usd: f64, price: f64, holding: Asset) -> u64 {
    match holding {
        Asset::Base => to_raw_amount(balance_usd / price, holding.precision()),
        Asset::Quote => to_raw_amount(balance_usd, holding.precision()),
    }
}
