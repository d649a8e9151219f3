// ABOUTME: Setting values that are either literal or read from the environment.
// ABOUTME: Used for RPC endpoints, signing keys, and explorer API keys.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum EnvValue {
    Literal(String),
    FromEnv {
        #[serde(rename = "env")]
        var: String,
        #[serde(default)]
        default: Option<String>,
    },
}

impl EnvValue {
    pub fn from_env(var: &str) -> Self {
        EnvValue::FromEnv {
            var: var.to_string(),
            default: None,
        }
    }

    pub fn resolve(&self) -> Result<String> {
        match self {
            EnvValue::Literal(s) => Ok(s.clone()),
            EnvValue::FromEnv { var, default } => match std::env::var(var) {
                Ok(val) if !val.trim().is_empty() => Ok(val),
                _ => default
                    .clone()
                    .ok_or_else(|| Error::MissingEnvVar(var.clone())),
            },
        }
    }
}

/// Displays the source of the value, never a resolved secret.
impl fmt::Display for EnvValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvValue::Literal(_) => write!(f, "<literal>"),
            EnvValue::FromEnv { var, .. } => write!(f, "${var}"),
        }
    }
}
