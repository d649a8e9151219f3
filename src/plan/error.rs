// ABOUTME: Static configuration errors found while building or resolving a plan.
// ABOUTME: All of these are raised before anything is submitted to the network.

use crate::types::{ComponentName, MethodSignatureError};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PlanError {
    #[error("component {0} is listed more than once")]
    DuplicateComponent(ComponentName),

    #[error("component {0} references its own address")]
    SelfReference(ComponentName),

    #[error("component {component} references {dependency}, which is not deployed before it")]
    ForwardReference {
        component: ComponentName,
        dependency: ComponentName,
    },

    #[error("{context} references unknown component {dependency}")]
    UnknownComponent {
        context: String,
        dependency: ComponentName,
    },

    #[error("unknown named address '{0}' (define it under `addresses` or `admin`)")]
    UnknownAddress(String),

    #[error("initialization target {0} is not part of the plan")]
    UnknownInitTarget(ComponentName),

    #[error("invalid initialization method: {0}")]
    InvalidMethod(#[from] MethodSignatureError),

    #[error("{method} takes {expected} argument(s) but {actual} were given")]
    InitArgCount {
        method: String,
        expected: usize,
        actual: usize,
    },

    #[error("argument {index} of {method} must be {expected}, got {found}")]
    InitArgType {
        method: String,
        index: usize,
        expected: String,
        found: String,
    },

    #[error("address of {0} is not available yet")]
    Unresolved(ComponentName),
}
