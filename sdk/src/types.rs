use solana_sdk::transaction::TransactionError;
use solana_transaction_status::TransactionStatus;
use thiserror::Error;

pub use solana_transaction_status::TransactionConfirmationStatus;

pub type SdkResult<T> = Result<T, SdkError>;

/// Status of a submitted signature as reported by the cluster
#[derive(Debug, Clone, PartialEq)]
pub struct SignatureStatus {
    /// Set when the transaction landed but failed
    pub err: Option<TransactionError>,
    pub confirmation_status: Option<TransactionConfirmationStatus>,
}

impl SignatureStatus {
    pub fn is_confirmed(&self) -> bool {
        self.err.is_none() && self.confirmation_status.is_some()
    }
}

impl From<TransactionStatus> for SignatureStatus {
    fn from(status: TransactionStatus) -> Self {
        Self {
            err: status.err,
            confirmation_status: status.confirmation_status,
        }
    }
}

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),
    #[error("{0}")]
    Rpc(#[from] solana_client::client_error::ClientError),
    #[error("Request status not ok: {status}, body: {body}")]
    Api { status: u16, body: String },
    #[error("Could not decode data: {0}")]
    CouldntDecode(#[from] base64::DecodeError),
    #[error("Could not deserialize transaction: {0}")]
    Deserializing(#[from] bincode::Error),
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Signing(#[from] solana_sdk::signer::SignerError),
    #[error("invalid keypair: {0}")]
    InvalidKeypair(String),
    #[error("invalid base58 pubkey: {0}")]
    InvalidPubkey(String),
    #[error("{0}")]
    Generic(String),
}
