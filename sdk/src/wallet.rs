use std::sync::Arc;

use solana_sdk::{
    pubkey::Pubkey,
    signature::Keypair,
    signer::Signer,
    transaction::VersionedTransaction,
};

use crate::types::SdkResult;

/// Wallet signing transactions for a single authority
///
/// It is cheaply clone-able
#[derive(Clone, Debug)]
pub struct Wallet {
    signer: Arc<Keypair>,
    authority: Pubkey,
}

impl Wallet {
    pub fn new(signer: Keypair) -> Self {
        Self {
            authority: signer.pubkey(),
            signer: Arc::new(signer),
        }
    }

    pub fn authority(&self) -> &Pubkey {
        &self.authority
    }

    pub fn signer(&self) -> &Keypair {
        &self.signer
    }

    /// Deserialize a transaction built by a third party and sign its message
    ///
    /// Fails if the message requires any signer other than this wallet
    pub fn sign_serialized_tx(&self, tx_bytes: &[u8]) -> SdkResult<VersionedTransaction> {
        let tx: VersionedTransaction = bincode::deserialize(tx_bytes)?;
        let signed = VersionedTransaction::try_new(tx.message, &[self.signer.as_ref()])?;
        Ok(signed)
    }
}
