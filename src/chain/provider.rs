// ABOUTME: ChainProvider backed by a JSON-RPC endpoint and a local signing key.
// ABOUTME: Tracks the account nonce locally so sequential submissions never collide.

use super::error::ProviderError;
use super::rpc::{RpcClient, parse_quantity};
use super::traits::{ChainProvider, PendingTx, Receipt};
use super::tx::{LegacyTransaction, TxSigner};
use crate::artifacts::ArtifactStore;
use crate::types::{Address, ArgValue, ComponentName, MethodSignature, TxHash, encode_args};
use alloy_core::primitives::U256;
use async_trait::async_trait;
use parking_lot::Mutex;
use serde::Deserialize;
use serde_json::json;
use std::time::{Duration, Instant};
use url::Url;

/// Headroom added on top of eth_estimateGas, in percent.
const GAS_LIMIT_MARGIN: u64 = 20;

fn with_margin(estimate: u64) -> u64 {
    estimate.saturating_add(estimate.saturating_mul(GAS_LIMIT_MARGIN) / 100)
}

#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub rpc_url: Url,
    /// When set, the endpoint must report this chain id.
    pub chain_id: Option<u64>,
    pub private_key: String,
    /// Fixed gas price in wei; queried from the node otherwise.
    pub gas_price: Option<u64>,
    pub confirmation_timeout: Duration,
    pub poll_interval: Duration,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RpcReceipt {
    transaction_hash: TxHash,
    #[serde(default)]
    contract_address: Option<Address>,
    block_number: String,
    gas_used: String,
    #[serde(default)]
    status: Option<String>,
}

pub struct JsonRpcProvider {
    rpc: RpcClient,
    signer: TxSigner,
    chain_id: u64,
    gas_price: Option<u64>,
    artifacts: ArtifactStore,
    nonce: Mutex<Option<u64>>,
    confirmation_timeout: Duration,
    poll_interval: Duration,
}

impl JsonRpcProvider {
    pub async fn connect(
        settings: ProviderSettings,
        artifacts: ArtifactStore,
    ) -> Result<Self, ProviderError> {
        let signer = TxSigner::from_hex(&settings.private_key)?;
        let rpc = RpcClient::new(settings.rpc_url)?;

        let reported: String = rpc.call("eth_chainId", json!([])).await?;
        let actual = parse_quantity("eth_chainId", &reported)?;
        if let Some(expected) = settings.chain_id
            && expected != actual
        {
            return Err(ProviderError::ChainMismatch { expected, actual });
        }

        tracing::debug!(chain_id = actual, deployer = %signer.address(), "connected to chain");

        Ok(Self {
            rpc,
            signer,
            chain_id: actual,
            gas_price: settings.gas_price,
            artifacts,
            nonce: Mutex::new(None),
            confirmation_timeout: settings.confirmation_timeout,
            poll_interval: settings.poll_interval,
        })
    }

    pub fn deployer(&self) -> Address {
        self.signer.address()
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    async fn next_nonce(&self) -> Result<u64, ProviderError> {
        let cached = *self.nonce.lock();
        if let Some(nonce) = cached {
            return Ok(nonce);
        }
        let count: String = self
            .rpc
            .call(
                "eth_getTransactionCount",
                json!([self.signer.address(), "pending"]),
            )
            .await?;
        parse_quantity("eth_getTransactionCount", &count)
    }

    async fn gas_price(&self) -> Result<u128, ProviderError> {
        if let Some(price) = self.gas_price {
            return Ok(u128::from(price));
        }
        let price: String = self.rpc.call("eth_gasPrice", json!([])).await?;
        parse_quantity("eth_gasPrice", &price).map(u128::from)
    }

    async fn estimate_gas(&self, to: Option<Address>, data: &[u8]) -> Result<u64, ProviderError> {
        let mut request = json!({
            "from": self.signer.address(),
            "data": format!("0x{}", hex::encode(data)),
        });
        if let Some(to) = to {
            request["to"] = json!(to);
        }
        let estimate: String = self.rpc.call("eth_estimateGas", json!([request])).await?;
        let estimate = parse_quantity("eth_estimateGas", &estimate)?;
        Ok(with_margin(estimate))
    }

    async fn send(&self, to: Option<Address>, data: Vec<u8>) -> Result<PendingTx, ProviderError> {
        let gas_price = self.gas_price().await?;
        let gas_limit = self.estimate_gas(to, &data).await?;
        let nonce = self.next_nonce().await?;

        let tx = LegacyTransaction {
            nonce,
            gas_price,
            gas_limit,
            to,
            value: U256::ZERO,
            data,
            chain_id: self.chain_id,
        };
        let (raw, expected_hash) = self.signer.sign(&tx)?;

        let sent: Result<TxHash, ProviderError> = self
            .rpc
            .call(
                "eth_sendRawTransaction",
                json!([format!("0x{}", hex::encode(raw))]),
            )
            .await;

        match sent {
            Ok(hash) => {
                *self.nonce.lock() = Some(nonce + 1);
                if hash != expected_hash {
                    tracing::warn!(%hash, %expected_hash, "node reported an unexpected transaction hash");
                }
                tracing::debug!(%hash, nonce, gas_limit, "transaction submitted");
                Ok(PendingTx { hash })
            }
            Err(e) => {
                // re-query on the next submission
                *self.nonce.lock() = None;
                Err(e)
            }
        }
    }
}

#[async_trait]
impl ChainProvider for JsonRpcProvider {
    async fn submit_deployment(
        &self,
        component: &ComponentName,
        args: &[ArgValue],
    ) -> Result<PendingTx, ProviderError> {
        let mut data = self.artifacts.creation_code(component, args)?;
        data.extend(encode_args(args));
        self.send(None, data).await
    }

    async fn submit_call(
        &self,
        to: Address,
        method: &MethodSignature,
        args: &[ArgValue],
    ) -> Result<PendingTx, ProviderError> {
        self.send(Some(to), method.encode_call(args)).await
    }

    async fn await_confirmation(&self, tx: &PendingTx) -> Result<Receipt, ProviderError> {
        let started = Instant::now();
        loop {
            let receipt: Option<RpcReceipt> = self
                .rpc
                .call("eth_getTransactionReceipt", json!([tx.hash]))
                .await?;

            if let Some(receipt) = receipt {
                if receipt.status.as_deref() == Some("0x0") {
                    return Err(ProviderError::Reverted { tx_hash: tx.hash });
                }
                return Ok(Receipt {
                    tx_hash: receipt.transaction_hash,
                    contract_address: receipt.contract_address,
                    block_number: parse_quantity("eth_getTransactionReceipt", &receipt.block_number)?,
                    gas_used: parse_quantity("eth_getTransactionReceipt", &receipt.gas_used)?,
                });
            }

            if started.elapsed() >= self.confirmation_timeout {
                return Err(ProviderError::ConfirmationTimeout {
                    tx_hash: tx.hash,
                    waited: started.elapsed(),
                });
            }

            tracing::trace!(hash = %tx.hash, "waiting for receipt");
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}
