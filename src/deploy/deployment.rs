// ABOUTME: Generic deployment struct parameterized by state.
// ABOUTME: Confirmed components and the initialization receipt are only reachable in later states.

use crate::plan::DeploymentPlan;
use crate::types::{Address, ArgValue, ComponentName, MethodSignature, TxHash};
use crate::verify::{VerificationReport, VerificationRequest};
use serde::{Deserialize, Serialize};

use super::state::{DeployedAll, Done, Initialized, Planned};

/// A component confirmed on chain, with the arguments it was actually constructed with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployedComponent {
    pub name: ComponentName,
    pub address: Address,
    pub constructor_args: Vec<ArgValue>,
    pub tx_hash: TxHash,
}

impl DeployedComponent {
    pub fn verification_request(&self) -> VerificationRequest {
        VerificationRequest {
            component: self.name.clone(),
            address: self.address,
            constructor_args: self.constructor_args.clone(),
        }
    }
}

/// The confirmed wire-up call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitializationReceipt {
    pub target: ComponentName,
    pub address: Address,
    pub method: MethodSignature,
    pub args: Vec<ArgValue>,
    pub tx_hash: TxHash,
}

/// A deployment run, parameterized by its current state.
///
/// Transitions consume the deployment, so a run cannot initialize before every
/// component is confirmed, nor verify before initialization.
#[derive(Debug)]
pub struct Deployment<S> {
    pub(crate) plan: DeploymentPlan,
    pub(crate) state: S,
}

impl Deployment<Planned> {
    pub fn new(plan: DeploymentPlan) -> Self {
        Deployment {
            plan,
            state: Planned,
        }
    }
}

impl<S> Deployment<S> {
    pub fn plan(&self) -> &DeploymentPlan {
        &self.plan
    }
}

pub(crate) fn find_address(components: &[DeployedComponent], name: &ComponentName) -> Option<Address> {
    components
        .iter()
        .find(|c| &c.name == name)
        .map(|c| c.address)
}

impl Deployment<DeployedAll> {
    pub fn components(&self) -> &[DeployedComponent] {
        &self.state.components
    }
}

impl Deployment<Initialized> {
    pub fn components(&self) -> &[DeployedComponent] {
        &self.state.components
    }

    pub fn initialization(&self) -> Option<&InitializationReceipt> {
        self.state.initialization.as_ref()
    }

    /// One request per component, in deployment order.
    pub fn verification_requests(&self) -> Vec<VerificationRequest> {
        self.state
            .components
            .iter()
            .map(DeployedComponent::verification_request)
            .collect()
    }
}

impl Deployment<Done> {
    pub fn components(&self) -> &[DeployedComponent] {
        &self.state.components
    }

    pub fn initialization(&self) -> Option<&InitializationReceipt> {
        self.state.initialization.as_ref()
    }

    pub fn report(&self) -> &VerificationReport {
        &self.state.report
    }

    pub fn address_of(&self, name: &ComponentName) -> Option<Address> {
        find_address(&self.state.components, name)
    }
}
