// ABOUTME: Validated domain types shared by planning, deployment, and verification.
// ABOUTME: Component names, literal argument values, and method signatures.

mod arg_value;
mod component_name;
mod method;

pub use alloy_core::primitives::{Address, TxHash};
pub use arg_value::{AbiArgument, ArgValue, encode_args};
pub use component_name::{ComponentName, ComponentNameError};
pub use method::{MethodSignature, MethodSignatureError};
