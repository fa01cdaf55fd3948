//! Scripted stand-ins for the router and the chain

use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
};

use async_trait::async_trait;
use sdk::{
    jupiter::{QuoteRequest, QuoteResponse, SwapMode, SwapRequest, SwapResponse, SwapRouter},
    ChainClient, SdkError, SdkResult, SignatureStatus,
};
use solana_sdk::{
    message::{Message, VersionedMessage},
    pubkey::Pubkey,
    signature::Signature,
    system_instruction,
    transaction::VersionedTransaction,
};

pub(crate) fn quote_for(request: &QuoteRequest, out_amount: u64) -> QuoteResponse {
    QuoteResponse {
        input_mint: request.input_mint,
        in_amount: request.amount,
        output_mint: request.output_mint,
        out_amount,
        other_amount_threshold: out_amount - out_amount * request.slippage_bps as u64 / 10_000,
        swap_mode: SwapMode::ExactIn,
        slippage_bps: request.slippage_bps,
        platform_fee: None,
        price_impact_pct: "0".to_string(),
        route_plan: vec![],
        context_slot: 0,
        time_taken: 0.0,
    }
}

/// Serialized transfer from `payer`, standing in for a router-built swap
pub(crate) fn unsigned_tx(payer: &Pubkey) -> Vec<u8> {
    let ix = system_instruction::transfer(payer, &Pubkey::new_unique(), 1);
    let tx = VersionedTransaction {
        signatures: vec![Signature::default()],
        message: VersionedMessage::Legacy(Message::new(&[ix], Some(payer))),
    };
    bincode::serialize(&tx).expect("serialize tx")
}

pub(crate) struct FakeRouter {
    out_amount: Mutex<u64>,
    quote_down: bool,
    swap_response: Mutex<Option<SwapResponse>>,
    pub(crate) quote_requests: Mutex<Vec<QuoteRequest>>,
    pub(crate) swap_requests: Mutex<Vec<SwapRequest>>,
}

impl FakeRouter {
    /// Router quoting `out_amount` for any request
    pub(crate) fn new(out_amount: u64) -> Self {
        Self {
            out_amount: Mutex::new(out_amount),
            quote_down: false,
            swap_response: Mutex::new(None),
            quote_requests: Mutex::new(vec![]),
            swap_requests: Mutex::new(vec![]),
        }
    }

    pub(crate) fn unavailable() -> Self {
        Self {
            quote_down: true,
            ..Self::new(0)
        }
    }

    pub(crate) fn with_swap(self, swap_transaction: Vec<u8>, last_valid_block_height: u64) -> Self {
        *self.swap_response.lock().unwrap() = Some(SwapResponse {
            swap_transaction,
            last_valid_block_height,
        });
        self
    }

    pub(crate) fn set_out_amount(&self, out_amount: u64) {
        *self.out_amount.lock().unwrap() = out_amount;
    }

    pub(crate) fn quote_calls(&self) -> usize {
        self.quote_requests.lock().unwrap().len()
    }

    pub(crate) fn swap_calls(&self) -> usize {
        self.swap_requests.lock().unwrap().len()
    }
}

#[async_trait]
impl SwapRouter for FakeRouter {
    async fn quote(&self, request: &QuoteRequest) -> SdkResult<QuoteResponse> {
        self.quote_requests.lock().unwrap().push(request.clone());
        if self.quote_down {
            return Err(SdkError::Generic("quote service unreachable".to_string()));
        }
        Ok(quote_for(request, *self.out_amount.lock().unwrap()))
    }

    async fn swap_transaction(&self, request: &SwapRequest) -> SdkResult<SwapResponse> {
        self.swap_requests.lock().unwrap().push(request.clone());
        self.swap_response
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| SdkError::Api {
                status: 400,
                body: "no route".to_string(),
            })
    }
}

#[derive(Default)]
pub(crate) struct FakeChain {
    pub(crate) lamports: u64,
    pub(crate) usdc: Option<u64>,
    pub(crate) balance_down: bool,
    pub(crate) send_down: bool,
    /// Heights returned in order, the last one repeats
    pub(crate) block_heights: Mutex<VecDeque<u64>>,
    /// Statuses returned in order, `None` once exhausted
    pub(crate) statuses: Mutex<VecDeque<SdkResult<Option<SignatureStatus>>>>,
    pub(crate) sent: Mutex<Vec<VersionedTransaction>>,
    pub(crate) status_polls: AtomicUsize,
}

impl FakeChain {
    pub(crate) fn with_balances(lamports: u64, usdc: Option<u64>) -> Self {
        Self {
            lamports,
            usdc,
            ..Default::default()
        }
    }

    pub(crate) fn with_heights(self, heights: &[u64]) -> Self {
        *self.block_heights.lock().unwrap() = heights.iter().copied().collect();
        self
    }

    pub(crate) fn push_status(&self, status: SdkResult<Option<SignatureStatus>>) {
        self.statuses.lock().unwrap().push_back(status);
    }

    pub(crate) fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl ChainClient for FakeChain {
    async fn get_native_balance(&self, _owner: &Pubkey) -> SdkResult<u64> {
        if self.balance_down {
            return Err(SdkError::Generic("rpc unavailable".to_string()));
        }
        Ok(self.lamports)
    }

    async fn get_token_balance(&self, _owner: &Pubkey, _mint: &Pubkey) -> SdkResult<Option<u64>> {
        if self.balance_down {
            return Err(SdkError::Generic("rpc unavailable".to_string()));
        }
        Ok(self.usdc)
    }

    async fn get_block_height(&self) -> SdkResult<u64> {
        let mut heights = self.block_heights.lock().unwrap();
        if heights.len() > 1 {
            return Ok(heights.pop_front().unwrap_or_default());
        }
        Ok(heights.front().copied().unwrap_or_default())
    }

    async fn send_transaction(&self, tx: &VersionedTransaction) -> SdkResult<Signature> {
        if self.send_down {
            return Err(SdkError::Generic("blockhash not found".to_string()));
        }
        self.sent.lock().unwrap().push(tx.clone());
        Ok(tx.signatures[0])
    }

    async fn get_signature_status(
        &self,
        _signature: &Signature,
    ) -> SdkResult<Option<SignatureStatus>> {
        self.status_polls.fetch_add(1, Ordering::SeqCst);
        self.statuses.lock().unwrap().pop_front().unwrap_or(Ok(None))
    }
}
