use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

use super::{field_as_string, transaction_config::TransactionConfig, QuoteResponse};

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SwapRequest {
    #[serde(with = "field_as_string")]
    pub user_public_key: Pubkey,

    pub quote_response: QuoteResponse,

    #[serde(flatten)]
    pub config: TransactionConfig,
}

/// Unsigned swap transaction built by the router
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SwapResponse {
    #[serde(with = "base64_deserialize")]
    pub swap_transaction: Vec<u8>,
    /// Block height after which the transaction can no longer land
    pub last_valid_block_height: u64,
}

mod base64_deserialize {
    use base64::Engine;
    use serde::{de, Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let swap_transaction_string = String::deserialize(deserializer)?;
        base64::engine::general_purpose::STANDARD
            .decode(swap_transaction_string)
            .map_err(|e| de::Error::custom(format!("base64 decoding error: {:?}", e)))
    }
}
