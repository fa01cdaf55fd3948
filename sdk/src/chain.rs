use std::{str::FromStr, sync::Arc};

use async_trait::async_trait;
use solana_client::{nonblocking::rpc_client::RpcClient, rpc_request::TokenAccountsFilter};
use solana_sdk::{
    commitment_config::CommitmentConfig, pubkey::Pubkey, signature::Signature,
    transaction::VersionedTransaction,
};

use crate::types::{SdkError, SdkResult, SignatureStatus};

/// The slice of the cluster RPC surface the bot consumes
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Native balance in lamports
    async fn get_native_balance(&self, owner: &Pubkey) -> SdkResult<u64>;

    /// Raw balance of the first token account `owner` holds for `mint`
    ///
    /// Returns `None` when no such account exists
    async fn get_token_balance(&self, owner: &Pubkey, mint: &Pubkey) -> SdkResult<Option<u64>>;

    async fn get_block_height(&self) -> SdkResult<u64>;

    async fn send_transaction(&self, tx: &VersionedTransaction) -> SdkResult<Signature>;

    /// Current status of `signature`, searching transaction history
    async fn get_signature_status(
        &self,
        signature: &Signature,
    ) -> SdkResult<Option<SignatureStatus>>;
}

/// [`ChainClient`] backed by a JSON-RPC node
///
/// Reads are made at `finalized` commitment unless configured otherwise
#[derive(Clone)]
pub struct RpcChainClient {
    rpc_client: Arc<RpcClient>,
    commitment: CommitmentConfig,
}

impl RpcChainClient {
    pub fn new(endpoint: String) -> Self {
        Self::new_with_commitment(endpoint, CommitmentConfig::finalized())
    }

    pub fn new_with_commitment(endpoint: String, commitment: CommitmentConfig) -> Self {
        Self {
            rpc_client: Arc::new(RpcClient::new_with_commitment(endpoint, commitment)),
            commitment,
        }
    }

    /// Return a handle to the inner RPC client
    pub fn inner(&self) -> &RpcClient {
        &self.rpc_client
    }
}

#[async_trait]
impl ChainClient for RpcChainClient {
    async fn get_native_balance(&self, owner: &Pubkey) -> SdkResult<u64> {
        let balance = self
            .rpc_client
            .get_balance_with_commitment(owner, self.commitment)
            .await?;
        Ok(balance.value)
    }

    async fn get_token_balance(&self, owner: &Pubkey, mint: &Pubkey) -> SdkResult<Option<u64>> {
        let accounts = self
            .rpc_client
            .get_token_accounts_by_owner_with_commitment(
                owner,
                TokenAccountsFilter::Mint(*mint),
                self.commitment,
            )
            .await?
            .value;

        let Some(account) = accounts.first() else {
            return Ok(None);
        };

        let token_account = Pubkey::from_str(&account.pubkey)
            .map_err(|_| SdkError::InvalidPubkey(account.pubkey.clone()))?;
        let balance = self
            .rpc_client
            .get_token_account_balance_with_commitment(&token_account, self.commitment)
            .await?
            .value;

        let amount = balance.amount.parse::<u64>().map_err(|e| {
            SdkError::Generic(format!("failed to parse token amount {}: {e}", balance.amount))
        })?;

        Ok(Some(amount))
    }

    async fn get_block_height(&self) -> SdkResult<u64> {
        Ok(self
            .rpc_client
            .get_block_height_with_commitment(self.commitment)
            .await?)
    }

    async fn send_transaction(&self, tx: &VersionedTransaction) -> SdkResult<Signature> {
        Ok(self.rpc_client.send_transaction(tx).await?)
    }

    async fn get_signature_status(
        &self,
        signature: &Signature,
    ) -> SdkResult<Option<SignatureStatus>> {
        let statuses = self
            .rpc_client
            .get_signature_statuses_with_history(&[*signature])
            .await?
            .value;

        Ok(statuses
            .into_iter()
            .next()
            .flatten()
            .map(SignatureStatus::from))
    }
}
