use std::{sync::Arc, time::Duration};

use log::{debug, info, warn};
use sdk::ChainClient;
use solana_sdk::{signature::Signature, transaction::TransactionError};
use tokio::time::{sleep, timeout_at, Instant};

pub const POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Terminal state of a submitted transaction
#[derive(Debug, Clone, PartialEq)]
pub enum TransactionOutcome {
    Confirmed,
    /// Landed with an error
    Failed(TransactionError),
    /// The chain moved past the last valid block height, the transaction can no longer land
    Expired {
        current_height: u64,
        last_valid_block_height: u64,
    },
    /// Deadline hit while the fate of the transaction was still unknown
    TimedOut,
}

/// Polls a submitted signature until it reaches a terminal state
pub struct ConfirmationMonitor<C: ChainClient> {
    chain: Arc<C>,
    poll_interval: Duration,
}

impl<C: ChainClient> ConfirmationMonitor<C> {
    pub fn new(chain: Arc<C>, poll_interval: Duration) -> Self {
        Self {
            chain,
            poll_interval,
        }
    }

    pub async fn await_outcome(
        &self,
        signature: &Signature,
        last_valid_block_height: u64,
        deadline: Instant,
    ) -> TransactionOutcome {
        info!("Waiting for transaction confirmation...");

        match timeout_at(deadline, self.poll(signature, last_valid_block_height)).await {
            Ok(outcome) => outcome,
            Err(_) => {
                warn!("Transaction {signature} confirmation timeout");
                TransactionOutcome::TimedOut
            }
        }
    }

    async fn poll(&self, signature: &Signature, last_valid_block_height: u64) -> TransactionOutcome {
        match self.chain.get_block_height().await {
            Ok(height) => debug!(
                "Block height {height}, {} blocks until expiry",
                last_valid_block_height.saturating_sub(height)
            ),
            Err(e) => warn!("Failed to get initial block height: {e}"),
        }

        loop {
            sleep(self.poll_interval).await;
            if let Some(outcome) = self.poll_once(signature, last_valid_block_height).await {
                return outcome;
            }
        }
    }

    /// A chain-reported error or confirmation wins over expiry
    async fn poll_once(
        &self,
        signature: &Signature,
        last_valid_block_height: u64,
    ) -> Option<TransactionOutcome> {
        match self.chain.get_signature_status(signature).await {
            Ok(Some(status)) => {
                if let Some(err) = status.err {
                    return Some(TransactionOutcome::Failed(err));
                }
                if let Some(level) = status.confirmation_status {
                    info!("Transaction confirmed with status: {level:?}");
                    return Some(TransactionOutcome::Confirmed);
                }
            }
            Ok(None) => {}
            Err(e) => {
                warn!("Error checking transaction status: {e}");
                return None;
            }
        }

        match self.chain.get_block_height().await {
            Ok(current_height) if current_height > last_valid_block_height => {
                Some(TransactionOutcome::Expired {
                    current_height,
                    last_valid_block_height,
                })
            }
            Ok(_) => None,
            Err(e) => {
                warn!("Error getting current block height: {e}");
                None
            }
        }
    }
}
