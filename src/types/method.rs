// ABOUTME: Solidity function signature used for the initialization call.
// ABOUTME: Validates the `name(type,...)` form and derives the 4-byte selector.

use alloy_core::primitives::keccak256;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

use super::arg_value::{ArgValue, encode_args};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MethodSignatureError {
    #[error("method signature must look like `name(type,...)`: {0}")]
    Malformed(String),

    #[error("invalid method name: {0}")]
    InvalidName(String),

    #[error("tuple parameters are not supported: {0}")]
    TupleParameter(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSignature {
    name: String,
    params: Vec<String>,
}

impl MethodSignature {
    pub fn parse(text: &str) -> Result<Self, MethodSignatureError> {
        let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();

        let (name, rest) = compact
            .split_once('(')
            .ok_or_else(|| MethodSignatureError::Malformed(text.to_string()))?;
        let inner = rest
            .strip_suffix(')')
            .ok_or_else(|| MethodSignatureError::Malformed(text.to_string()))?;

        if name.is_empty()
            || name.starts_with(|c: char| c.is_ascii_digit())
            || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(MethodSignatureError::InvalidName(name.to_string()));
        }

        if inner.contains('(') || inner.contains(')') {
            return Err(MethodSignatureError::TupleParameter(text.to_string()));
        }

        let params = if inner.is_empty() {
            Vec::new()
        } else {
            inner.split(',').map(str::to_string).collect::<Vec<_>>()
        };

        if params.iter().any(String::is_empty) {
            return Err(MethodSignatureError::Malformed(text.to_string()));
        }

        Ok(Self {
            name: name.to_string(),
            params,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }

    pub fn selector(&self) -> [u8; 4] {
        let hash = keccak256(self.to_string().as_bytes());
        [hash[0], hash[1], hash[2], hash[3]]
    }

    /// Selector followed by the ABI-encoded arguments.
    pub fn encode_call(&self, args: &[ArgValue]) -> Vec<u8> {
        let mut data = self.selector().to_vec();
        data.extend(encode_args(args));
        data
    }
}

impl fmt::Display for MethodSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.params.join(","))
    }
}

impl Serialize for MethodSignature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MethodSignature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        MethodSignature::parse(&text).map_err(serde::de::Error::custom)
    }
}
