use solana_sdk::signature::Keypair;

use crate::types::{SdkError, SdkResult};

/// Load a keypair from either a base58 encoded secret or a JSON byte array
/// (the format written by `solana-keygen`)
pub fn load_keypair_multi_format(private_key: &str) -> SdkResult<Keypair> {
    let private_key = private_key.trim();
    let bytes = if private_key.starts_with('[') {
        serde_json::from_str::<Vec<u8>>(private_key)
            .map_err(|e| SdkError::InvalidKeypair(format!("invalid byte array: {e}")))?
    } else {
        bs58::decode(private_key)
            .into_vec()
            .map_err(|e| SdkError::InvalidKeypair(format!("invalid base58: {e}")))?
    };

    Keypair::from_bytes(&bytes).map_err(|e| SdkError::InvalidKeypair(e.to_string()))
}
