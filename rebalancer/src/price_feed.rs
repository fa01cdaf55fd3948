use std::sync::Arc;

use sdk::jupiter::{QuoteRequest, SwapRouter};

use crate::{
    error::{BotError, BotResult},
    types::Asset,
    util::from_raw_amount,
};

/// Samples the BASE/QUOTE rate by quoting one whole BASE unit
pub struct PriceFeed<R: SwapRouter> {
    router: Arc<R>,
    slippage_bps: u16,
}

impl<R: SwapRouter> PriceFeed<R> {
    pub fn new(router: Arc<R>, slippage_bps: u16) -> Self {
        Self {
            router,
            slippage_bps,
        }
    }

    /// Current price of BASE in QUOTE. Not retried, a failure skips the tick.
    pub async fn sample(&self) -> BotResult<f64> {
        let request = QuoteRequest::exact_in(
            Asset::Base.mint(),
            Asset::Quote.mint(),
            Asset::Base.precision(),
            self.slippage_bps,
        );

        let quote = self
            .router
            .quote(&request)
            .await
            .map_err(BotError::QuoteUnavailable)?;

        Ok(from_raw_amount(quote.out_amount, Asset::Quote.precision()))
    }
}

#[cfg(test)]
mod tests {
    use sdk::constants::{SOL_MINT, USDC_MINT};

    use super::*;
    use crate::testing::FakeRouter;

    #[tokio::test]
    async fn test_sample_scales_out_amount() {
        let router = Arc::new(FakeRouter::new(195_370_000));
        let feed = PriceFeed::new(router.clone(), 50);

        let price = feed.sample().await.expect("price");
        assert_eq!(price, 195.37);

        let requests = router.quote_requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].input_mint, SOL_MINT);
        assert_eq!(requests[0].output_mint, USDC_MINT);
        assert_eq!(requests[0].amount, 1_000_000_000);
        assert_eq!(requests[0].slippage_bps, 50);
    }

    #[tokio::test]
    async fn test_sample_quote_unavailable() {
        let feed = PriceFeed::new(Arc::new(FakeRouter::unavailable()), 50);

        assert!(matches!(
            feed.sample().await,
            Err(BotError::QuoteUnavailable(_))
        ));
    }
}
