use std::{future::Future, sync::Arc, time::Duration};

use log::debug;
use sdk::{ChainClient, SdkResult};
use solana_sdk::pubkey::Pubkey;
use tokio::time::timeout;

use crate::{
    error::{BotError, BotResult},
    types::Asset,
    util::from_raw_amount,
};

pub const BALANCE_READ_TIMEOUT: Duration = Duration::from_secs(10);

/// On-chain holdings valued at a given price
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Holdings {
    pub base_balance: f64,
    pub quote_balance: f64,
    pub usd_value: f64,
    /// The asset the value is dominantly held in
    pub asset: Asset,
}

impl Holdings {
    pub fn resolve(base_balance: f64, quote_balance: f64, price: f64) -> Self {
        let base_usd = base_balance * price;

        let (usd_value, asset) = if base_usd > quote_balance {
            (base_usd, Asset::Base)
        } else if quote_balance > 0.0 {
            (quote_balance, Asset::Quote)
        } else {
            (base_usd, Asset::Base)
        };

        Self {
            base_balance,
            quote_balance,
            usd_value,
            asset,
        }
    }
}

/// Reads the holder's balances from the chain, the source of truth for the held asset and value
pub struct BalanceReconciler<C: ChainClient> {
    chain: Arc<C>,
    owner: Pubkey,
    read_timeout: Duration,
}

impl<C: ChainClient> BalanceReconciler<C> {
    pub fn new(chain: Arc<C>, owner: Pubkey) -> Self {
        Self {
            chain,
            owner,
            read_timeout: BALANCE_READ_TIMEOUT,
        }
    }

    pub fn owner(&self) -> &Pubkey {
        &self.owner
    }

    pub async fn reconcile(&self, price: f64) -> BotResult<Holdings> {
        let lamports = self
            .read("SOL", self.chain.get_native_balance(&self.owner))
            .await?;

        // a missing token account is an empty balance
        let usdc = self
            .read(
                "USDC",
                self.chain
                    .get_token_balance(&self.owner, &Asset::Quote.mint()),
            )
            .await?
            .unwrap_or(0);

        let holdings = Holdings::resolve(
            from_raw_amount(lamports, Asset::Base.precision()),
            from_raw_amount(usdc, Asset::Quote.precision()),
            price,
        );
        debug!(
            "Balances: {:.6} SOL, {:.2} USDC, holding {}",
            holdings.base_balance, holdings.quote_balance, holdings.asset
        );

        Ok(holdings)
    }

    async fn read<T>(&self, asset: &str, request: impl Future<Output = SdkResult<T>>) -> BotResult<T> {
        match timeout(self.read_timeout, request).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(BotError::BalanceUnavailable(format!(
                "failed to get {asset} balance: {e}"
            ))),
            Err(_) => Err(BotError::BalanceUnavailable(format!(
                "{asset} balance read timed out after {:?}",
                self.read_timeout
            ))),
        }
    }
}
