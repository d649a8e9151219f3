// ABOUTME: Library root for vendeploy - exposes public types for testing.
// ABOUTME: The main binary is in main.rs.

pub mod artifacts;
pub mod chain;
pub mod config;
pub mod deploy;
pub mod diagnostics;
pub mod error;
pub mod output;
pub mod plan;
pub mod types;
pub mod verify;
