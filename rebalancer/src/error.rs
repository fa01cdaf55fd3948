use std::{fmt, path::PathBuf};

use sdk::SdkError;
use solana_sdk::{signature::Signature, transaction::TransactionError};
use thiserror::Error;

pub type BotResult<T> = Result<T, BotError>;

/// Step of a live swap that failed before anything reached the chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapStage {
    Quote,
    Build,
    Sign,
    Submit,
}

impl fmt::Display for SwapStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stage = match self {
            SwapStage::Quote => "quote",
            SwapStage::Build => "build",
            SwapStage::Sign => "sign",
            SwapStage::Submit => "submit",
        };
        f.write_str(stage)
    }
}

/// Errors raised while loading configuration. All of them are fatal.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("private key is not set")]
    MissingPrivateKey,
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(#[source] SdkError),
    #[error("invalid wallet address: {0}")]
    InvalidWalletAddress(String),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum BotError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("quote unavailable: {0}")]
    QuoteUnavailable(#[source] SdkError),
    #[error("balance unavailable: {0}")]
    BalanceUnavailable(String),
    #[error("daily swap limit reached ({count}/{max})")]
    DailyLimitReached { count: u32, max: u32 },
    #[error("swap execution failed at {stage} stage: {cause}")]
    SwapExecutionFailed { stage: SwapStage, cause: String },
    #[error("transaction {signature} failed: {reason}")]
    TransactionFailed {
        signature: Signature,
        reason: TransactionError,
    },
    #[error("transaction {signature} expired (current block: {current_height}, last valid: {last_valid_block_height})")]
    TransactionExpired {
        signature: Signature,
        current_height: u64,
        last_valid_block_height: u64,
    },
    #[error("transaction {signature} not confirmed before deadline, status unknown")]
    ConfirmationTimedOut { signature: Signature },
}

impl BotError {
    pub(crate) fn swap_failed(stage: SwapStage, cause: impl fmt::Display) -> Self {
        Self::SwapExecutionFailed {
            stage,
            cause: cause.to_string(),
        }
    }

    /// A submitted transaction whose fate is unknown and should be checked by hand
    pub fn is_indeterminate(&self) -> bool {
        matches!(self, Self::ConfirmationTimedOut { .. })
    }
}
