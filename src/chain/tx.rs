// ABOUTME: EIP-155 legacy transactions and secp256k1 signing.
// ABOUTME: Produces raw signed bytes ready for eth_sendRawTransaction.

use super::error::ProviderError;
use crate::types::{Address, TxHash};
use alloy_core::primitives::{U256, keccak256};
use alloy_core::rlp::{EMPTY_STRING_CODE, Encodable, Header};
use k256::ecdsa::SigningKey;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyTransaction {
    pub nonce: u64,
    pub gas_price: u128,
    pub gas_limit: u64,
    /// `None` creates a contract.
    pub to: Option<Address>,
    pub value: U256,
    pub data: Vec<u8>,
    pub chain_id: u64,
}

impl LegacyTransaction {
    fn encode_fields(&self, out: &mut Vec<u8>) {
        self.nonce.encode(out);
        self.gas_price.encode(out);
        self.gas_limit.encode(out);
        match &self.to {
            Some(to) => to.encode(out),
            None => out.push(EMPTY_STRING_CODE),
        }
        self.value.encode(out);
        self.data.as_slice().encode(out);
    }

    fn encode_list(payload: Vec<u8>) -> Vec<u8> {
        let mut out = Vec::with_capacity(payload.len() + 3);
        Header {
            list: true,
            payload_length: payload.len(),
        }
        .encode(&mut out);
        out.extend(payload);
        out
    }

    /// RLP of the fields plus `chain_id, 0, 0`.
    pub fn signing_payload(&self) -> Vec<u8> {
        let mut payload = Vec::new();
        self.encode_fields(&mut payload);
        self.chain_id.encode(&mut payload);
        0u8.encode(&mut payload);
        0u8.encode(&mut payload);
        Self::encode_list(payload)
    }

    pub fn signing_hash(&self) -> TxHash {
        keccak256(self.signing_payload())
    }

    fn encode_signed(&self, v: u64, r: U256, s: U256) -> Vec<u8> {
        let mut payload = Vec::new();
        self.encode_fields(&mut payload);
        v.encode(&mut payload);
        r.encode(&mut payload);
        s.encode(&mut payload);
        Self::encode_list(payload)
    }
}

pub struct TxSigner {
    key: SigningKey,
    address: Address,
}

impl TxSigner {
    /// Accepts a 32-byte hex key with or without `0x`.
    pub fn from_hex(private_key: &str) -> Result<Self, ProviderError> {
        let text = private_key.trim();
        let text = text.strip_prefix("0x").unwrap_or(text);
        let bytes = hex::decode(text).map_err(|e| ProviderError::InvalidKey {
            message: e.to_string(),
        })?;
        if bytes.len() != 32 {
            return Err(ProviderError::InvalidKey {
                message: format!("expected 32 bytes, got {}", bytes.len()),
            });
        }
        let key = SigningKey::from_slice(&bytes).map_err(|e| ProviderError::InvalidKey {
            message: e.to_string(),
        })?;

        let point = key.verifying_key().to_encoded_point(false);
        let address = Address::from_raw_public_key(&point.as_bytes()[1..]);

        Ok(Self { key, address })
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Signed raw transaction and its hash.
    pub fn sign(&self, tx: &LegacyTransaction) -> Result<(Vec<u8>, TxHash), ProviderError> {
        let hash = tx.signing_hash();
        let (signature, recovery_id) = self
            .key
            .sign_prehash_recoverable(hash.as_slice())
            .map_err(|e| ProviderError::Signing {
                message: e.to_string(),
            })?;

        let bytes = signature.to_bytes();
        let r = U256::from_be_slice(&bytes[..32]);
        let s = U256::from_be_slice(&bytes[32..]);
        let v = u64::from(recovery_id.to_byte()) + tx.chain_id * 2 + 35;

        let raw = tx.encode_signed(v, r, s);
        let tx_hash = keccak256(&raw);
        Ok((raw, tx_hash))
    }
}

impl std::fmt::Debug for TxSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TxSigner")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}
