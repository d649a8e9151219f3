// ABOUTME: Validated component name matching a compiled contract name.
// ABOUTME: Ensures names are valid Solidity identifiers so artifacts can be located.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ComponentNameError {
    #[error("component name cannot be empty")]
    Empty,

    #[error("component name exceeds maximum length of 128 characters")]
    TooLong,

    #[error("component name cannot start with a digit")]
    StartsWithDigit,

    #[error("invalid character in component name: '{0}'")]
    InvalidChar(char),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentName(String);

impl ComponentName {
    pub fn new(value: &str) -> Result<Self, ComponentNameError> {
        if value.is_empty() {
            return Err(ComponentNameError::Empty);
        }

        if value.len() > 128 {
            return Err(ComponentNameError::TooLong);
        }

        if value.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(ComponentNameError::StartsWithDigit);
        }

        for c in value.chars() {
            if !c.is_ascii_alphanumeric() && c != '_' && c != '$' {
                return Err(ComponentNameError::InvalidChar(c));
            }
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComponentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for ComponentName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ComponentName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        ComponentName::new(&value).map_err(serde::de::Error::custom)
    }
}
