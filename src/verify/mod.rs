// ABOUTME: Source verification against an external explorer.
// ABOUTME: Best effort; outcomes are reported, never fatal to a deployment.

mod etherscan;
mod report;
mod traits;

pub use etherscan::EtherscanVerifier;
pub use report::{VerificationEntry, VerificationReport, VerificationStatus, verify_all};
pub use traits::{SourceVerifier, VerificationError, VerificationRequest, VerifyOutcome};
