// ABOUTME: Chain access: the provider capability and its JSON-RPC implementation.
// ABOUTME: Signing, transaction encoding, and receipt polling live here.

mod error;
mod provider;
mod rpc;
mod traits;
mod tx;

pub use error::{ProviderError, ProviderErrorKind};
pub use provider::{JsonRpcProvider, ProviderSettings};
pub use traits::{ChainProvider, PendingTx, Receipt};
pub use tx::{LegacyTransaction, TxSigner};
