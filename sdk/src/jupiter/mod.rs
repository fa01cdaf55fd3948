use std::str::FromStr;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

use crate::{
    constants::JUPITER_API_URL,
    types::{SdkError, SdkResult},
};

pub use self::{
    serde_helpers::field_as_string,
    swap::{SwapRequest, SwapResponse},
    transaction_config::TransactionConfig,
};

mod serde_helpers;
pub mod swap;
pub mod transaction_config;

#[derive(Serialize, Deserialize, Default, PartialEq, Clone, Debug)]
pub enum SwapMode {
    #[default]
    ExactIn,
    ExactOut,
}

impl FromStr for SwapMode {
    type Err = SdkError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "ExactIn" => Ok(Self::ExactIn),
            "ExactOut" => Ok(Self::ExactOut),
            _ => Err(SdkError::Generic(format!("{} is not a valid SwapMode", s))),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RoutePlanStep {
    pub swap_info: SwapInfo,
    pub percent: u8,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SwapInfo {
    #[serde(with = "field_as_string")]
    pub amm_key: Pubkey,
    pub label: String,
    #[serde(with = "field_as_string")]
    pub input_mint: Pubkey,
    #[serde(with = "field_as_string")]
    pub output_mint: Pubkey,
    /// An estimation of the input amount into the AMM
    #[serde(with = "field_as_string")]
    pub in_amount: u64,
    /// An estimation of the output amount into the AMM
    #[serde(with = "field_as_string")]
    pub out_amount: u64,
    #[serde(with = "field_as_string")]
    pub fee_amount: u64,
    #[serde(with = "field_as_string")]
    pub fee_mint: Pubkey,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlatformFee {
    #[serde(with = "field_as_string")]
    pub amount: u64,
    pub fee_bps: u8,
}

#[derive(Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    #[serde(with = "field_as_string")]
    pub input_mint: Pubkey,
    #[serde(with = "field_as_string")]
    pub output_mint: Pubkey,
    /// Input amount in the smallest unit of `input_mint`
    pub amount: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swap_mode: Option<SwapMode>,
    /// Allowed slippage in basis points
    pub slippage_bps: u16,
    /// Quote only direct routes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub only_direct_routes: Option<bool>,
    /// Find a route given a maximum number of accounts involved,
    /// this might dangerously limit routing ending up giving a bad price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_accounts: Option<usize>,
}

impl QuoteRequest {
    pub fn exact_in(input_mint: Pubkey, output_mint: Pubkey, amount: u64, slippage_bps: u16) -> Self {
        Self {
            input_mint,
            output_mint,
            amount,
            slippage_bps,
            ..Default::default()
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    #[serde(with = "field_as_string")]
    pub input_mint: Pubkey,
    #[serde(with = "field_as_string")]
    pub in_amount: u64,
    #[serde(with = "field_as_string")]
    pub output_mint: Pubkey,
    #[serde(with = "field_as_string")]
    pub out_amount: u64,
    /// Minimum out amount after slippage, not used by build transaction
    #[serde(with = "field_as_string")]
    pub other_amount_threshold: u64,
    pub swap_mode: SwapMode,
    pub slippage_bps: u16,
    #[serde(default)]
    pub platform_fee: Option<PlatformFee>,
    #[serde(default)]
    pub price_impact_pct: String,
    #[serde(default)]
    pub route_plan: Vec<RoutePlanStep>,
    #[serde(default)]
    pub context_slot: u64,
    #[serde(default)]
    pub time_taken: f64,
}

/// External swap-routing service
#[async_trait]
pub trait SwapRouter: Send + Sync {
    /// Quote exchange terms for `request`
    async fn quote(&self, request: &QuoteRequest) -> SdkResult<QuoteResponse>;

    /// Build an unsigned transaction executing a previously fetched quote
    async fn swap_transaction(&self, request: &SwapRequest) -> SdkResult<SwapResponse>;
}

pub struct JupiterClient {
    url: String,
    client: Client,
}

impl JupiterClient {
    pub fn new(url: Option<String>) -> Self {
        let url = match url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => JUPITER_API_URL.to_string(),
        };

        Self {
            url,
            client: Client::new(),
        }
    }

    /// The public endpoint is versioned, self-hosted ones are not
    fn endpoint(&self, path: &str) -> String {
        let api_version_param = if self.url == JUPITER_API_URL {
            "/v6"
        } else {
            ""
        };
        format!("{}{api_version_param}/{path}", self.url)
    }

    async fn read_error(response: reqwest::Response) -> SdkError {
        let status = response.status().as_u16();
        match response.text().await {
            Ok(body) => SdkError::Api { status, body },
            Err(e) => SdkError::Generic(format!("failed to get text: {e}")),
        }
    }
}

#[async_trait]
impl SwapRouter for JupiterClient {
    async fn quote(&self, request: &QuoteRequest) -> SdkResult<QuoteResponse> {
        let query = serde_qs::to_string(request)
            .map_err(|e| SdkError::Generic(format!("failed to serialize: {e}")))?;

        let url = format!("{}?{query}", self.endpoint("quote"));
        debug!("quote request: {url}");

        let response = self
            .client
            .get(url)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::read_error(response).await);
        }

        let body = response.text().await?;
        Ok(serde_json::from_str::<QuoteResponse>(&body)?)
    }

    async fn swap_transaction(&self, request: &SwapRequest) -> SdkResult<SwapResponse> {
        debug!(
            "swap request for {}: {} {} -> {}",
            request.user_public_key,
            request.quote_response.in_amount,
            request.quote_response.input_mint,
            request.quote_response.output_mint
        );
        let response = self
            .client
            .post(self.endpoint("swap"))
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::read_error(response).await);
        }

        let body = response.text().await?;
        Ok(serde_json::from_str::<SwapResponse>(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use base64::Engine;
    use serde_json::json;

    use super::*;
    use crate::constants::{SOL_MINT, USDC_MINT};

    const QUOTE_JSON: &str = r#"{
        "inputMint": "So11111111111111111111111111111111111111112",
        "inAmount": "1000000000",
        "outputMint": "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v",
        "outAmount": "195370000",
        "otherAmountThreshold": "194393150",
        "swapMode": "ExactIn",
        "slippageBps": 50,
        "platformFee": null,
        "priceImpactPct": "0",
        "routePlan": [
            {
                "swapInfo": {
                    "ammKey": "HcoJqG325TTifs6jyWvRJ9ET4pDu12Xrt2EQKZGFmuKX",
                    "label": "Whirlpool",
                    "inputMint": "So11111111111111111111111111111111111111112",
                    "outputMint": "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v",
                    "inAmount": "1000000000",
                    "outAmount": "195370000",
                    "feeAmount": "20000",
                    "feeMint": "So11111111111111111111111111111111111111112"
                },
                "percent": 100
            }
        ],
        "contextSlot": 299283763,
        "timeTaken": 0.0042
    }"#;

    #[test]
    fn test_quote_response_parses_string_amounts() {
        let quote: QuoteResponse = serde_json::from_str(QUOTE_JSON).expect("parse quote");
        assert_eq!(quote.input_mint, SOL_MINT);
        assert_eq!(quote.output_mint, USDC_MINT);
        assert_eq!(quote.in_amount, 1_000_000_000);
        assert_eq!(quote.out_amount, 195_370_000);
        assert_eq!(quote.other_amount_threshold, 194_393_150);
        assert_eq!(quote.swap_mode, SwapMode::ExactIn);
        assert_eq!(quote.route_plan.len(), 1);
        assert_eq!(quote.route_plan[0].swap_info.label, "Whirlpool");
    }

    #[test]
    fn test_quote_response_minimal_fields() {
        let quote: QuoteResponse = serde_json::from_str(
            r#"{
                "inputMint": "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v",
                "inAmount": "250000000",
                "outputMint": "So11111111111111111111111111111111111111112",
                "outAmount": "1279000000",
                "otherAmountThreshold": "1272605000",
                "swapMode": "ExactIn",
                "slippageBps": 50
            }"#,
        )
        .expect("parse quote");
        assert!(quote.route_plan.is_empty());
        assert_eq!(quote.platform_fee, None);
    }

    #[test]
    fn test_quote_response_rejects_non_numeric_amount() {
        let bad = QUOTE_JSON.replacen("\"outAmount\": \"195370000\"", "\"outAmount\": \"abc\"", 1);
        assert!(serde_json::from_str::<QuoteResponse>(&bad).is_err());
    }

    #[test]
    fn test_quote_request_query() {
        let request = QuoteRequest::exact_in(SOL_MINT, USDC_MINT, 1_000_000_000, 50);
        let query = serde_qs::to_string(&request).expect("serialize");
        assert_eq!(
            query,
            "inputMint=So11111111111111111111111111111111111111112\
             &outputMint=EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v\
             &amount=1000000000&slippageBps=50"
        );
    }

    #[test]
    fn test_swap_request_body() {
        let quote: QuoteResponse = serde_json::from_str(QUOTE_JSON).expect("parse quote");
        let user = Pubkey::new_unique();
        let request = SwapRequest {
            user_public_key: user,
            quote_response: quote,
            config: TransactionConfig {
                priority_fee_lamports: Some(10_000),
                ..Default::default()
            },
        };

        let body = serde_json::to_value(&request).expect("serialize");
        assert_eq!(body["userPublicKey"], json!(user.to_string()));
        assert_eq!(body["wrapAndUnwrapSol"], json!(true));
        assert_eq!(body["dynamicComputeUnitLimit"], json!(true));
        assert_eq!(body["priorityFeeLamports"], json!(10_000));
        assert_eq!(body["quoteResponse"]["outAmount"], json!("195370000"));
        assert_eq!(body["quoteResponse"]["routePlan"][0]["percent"], json!(100));

        let without_fee = SwapRequest {
            config: TransactionConfig::default(),
            ..request
        };
        let body = serde_json::to_value(&without_fee).expect("serialize");
        assert!(body.get("priorityFeeLamports").is_none());
    }

    #[test]
    fn test_swap_response_decodes_transaction() {
        let raw = vec![1_u8, 2, 3, 4];
        let encoded = base64::engine::general_purpose::STANDARD.encode(&raw);
        let response: SwapResponse = serde_json::from_value(json!({
            "swapTransaction": encoded,
            "lastValidBlockHeight": 500,
            "prioritizationFeeLamports": 10000
        }))
        .expect("parse swap response");
        assert_eq!(response.swap_transaction, raw);
        assert_eq!(response.last_valid_block_height, 500);

        let bad = serde_json::from_value::<SwapResponse>(json!({
            "swapTransaction": "not base64!",
            "lastValidBlockHeight": 500
        }));
        assert!(bad.is_err());
    }

    #[test]
    fn test_endpoint_versioning() {
        let public = JupiterClient::new(None);
        assert_eq!(public.endpoint("quote"), "https://quote-api.jup.ag/v6/quote");

        let hosted = JupiterClient::new(Some("http://localhost:8080/".to_string()));
        assert_eq!(hosted.endpoint("swap"), "http://localhost:8080/swap");
    }
}
