// ABOUTME: Capability trait for submitting transactions to a chain.
// ABOUTME: The deployment sequencer depends only on this seam.

use super::error::ProviderError;
use crate::types::{Address, ArgValue, ComponentName, MethodSignature, TxHash};
use async_trait::async_trait;

/// A submitted, not yet confirmed transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingTx {
    pub hash: TxHash,
}

/// A confirmed, successful transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Receipt {
    pub tx_hash: TxHash,
    /// Set for contract creations.
    pub contract_address: Option<Address>,
    pub block_number: u64,
    pub gas_used: u64,
}

#[async_trait]
pub trait ChainProvider: Send + Sync {
    /// Submit a creation transaction for the compiled component with constructor `args`.
    async fn submit_deployment(
        &self,
        component: &ComponentName,
        args: &[ArgValue],
    ) -> Result<PendingTx, ProviderError>;

    /// Submit a state-changing call to an already deployed contract.
    async fn submit_call(
        &self,
        to: Address,
        method: &MethodSignature,
        args: &[ArgValue],
    ) -> Result<PendingTx, ProviderError>;

    /// Wait until the transaction is mined. Reverted transactions are errors.
    async fn await_confirmation(&self, tx: &PendingTx) -> Result<Receipt, ProviderError>;
}
