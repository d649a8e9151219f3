// ABOUTME: Literal argument values passed to constructors and initialization calls.
// ABOUTME: Converts resolved values into ABI-encoded parameter data.

use alloy_core::dyn_abi::DynSolValue;
use alloy_core::primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A fully resolved argument, exactly as submitted on-chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum ArgValue {
    Address(Address),
    Uint(U256),
    Bool(bool),
    String(String),
}

impl ArgValue {
    /// Interpret a textual literal from configuration.
    ///
    /// `0x`-prefixed 20-byte hex becomes an address, decimal digits become an
    /// unsigned integer, anything else is kept as a string.
    pub fn parse_literal(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.len() == 42
            && trimmed.starts_with("0x")
            && let Ok(address) = Address::from_str(trimmed)
        {
            return ArgValue::Address(address);
        }
        if !trimmed.is_empty()
            && trimmed.chars().all(|c| c.is_ascii_digit())
            && let Ok(value) = U256::from_str_radix(trimmed, 10)
        {
            return ArgValue::Uint(value);
        }
        ArgValue::String(text.to_string())
    }

    /// Whether this value can be passed where the Solidity type `param` is expected.
    ///
    /// Integers must also fit the declared width, so `uint8` rejects 256.
    pub fn fits(&self, param: &str) -> bool {
        match self {
            ArgValue::Address(_) => param == "address",
            ArgValue::Uint(value) => uint_width(param).is_some_and(|bits| value.bit_len() <= bits),
            ArgValue::Bool(_) => param == "bool",
            ArgValue::String(_) => param == "string",
        }
    }

    pub fn to_sol_value(&self) -> DynSolValue {
        match self {
            ArgValue::Address(address) => DynSolValue::Address(*address),
            ArgValue::Uint(value) => DynSolValue::Uint(*value, 256),
            ArgValue::Bool(value) => DynSolValue::Bool(*value),
            ArgValue::String(value) => DynSolValue::String(value.clone()),
        }
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::Address(address) => write!(f, "{address}"),
            ArgValue::Uint(value) => write!(f, "{value}"),
            ArgValue::Bool(value) => write!(f, "{value}"),
            ArgValue::String(value) => write!(f, "{value:?}"),
        }
    }
}

impl From<Address> for ArgValue {
    fn from(address: Address) -> Self {
        ArgValue::Address(address)
    }
}

/// Bit width of `uint<N>`; bare `uint` is `uint256`.
fn uint_width(param: &str) -> Option<usize> {
    let bits = param.strip_prefix("uint")?;
    if bits.is_empty() {
        return Some(256);
    }
    let bits: usize = bits.parse().ok()?;
    (bits % 8 == 0 && (8..=256).contains(&bits)).then_some(bits)
}

/// An argument that can be checked against a Solidity parameter type before it is encoded.
pub trait AbiArgument: fmt::Display {
    fn fits(&self, param: &str) -> bool;
}

impl AbiArgument for ArgValue {
    fn fits(&self, param: &str) -> bool {
        ArgValue::fits(self, param)
    }
}

/// ABI-encode arguments as a parameter list (no selector, no length prefix).
pub fn encode_args(args: &[ArgValue]) -> Vec<u8> {
    if args.is_empty() {
        return Vec::new();
    }
    DynSolValue::Tuple(args.iter().map(ArgValue::to_sol_value).collect()).abi_encode_params()
}
