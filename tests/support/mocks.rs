// ABOUTME: In-memory ChainProvider, SourceVerifier, and Progress implementations.
// ABOUTME: Record every interaction so tests can assert on ordering and arguments.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use vendeploy::chain::{ChainProvider, PendingTx, ProviderError, Receipt};
use vendeploy::deploy::{DeployedComponent, Progress, RunPhase, deployed_line};
use vendeploy::types::{Address, ArgValue, ComponentName, MethodSignature, TxHash};
use vendeploy::verify::{
    SourceVerifier, VerificationEntry, VerificationError, VerificationRequest, VerifyOutcome,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainEvent {
    Deploy {
        component: String,
        args: Vec<ArgValue>,
    },
    Call {
        to: Address,
        method: String,
        args: Vec<ArgValue>,
    },
    Confirm {
        label: String,
    },
}

/// Where the mock chain should fail.
#[derive(Debug, Clone, Default)]
pub struct Failures {
    /// Reject the creation transaction of this component.
    pub submit: Option<String>,
    /// Revert the creation transaction of this component.
    pub confirm: Option<String>,
    /// Revert the initialization call.
    pub call: bool,
    /// Confirm creations without a contract address.
    pub missing_address: bool,
}

#[derive(Default)]
struct ChainState {
    events: Vec<ChainEvent>,
    /// tx hash -> (label, created address)
    pending: HashMap<TxHash, (String, Option<Address>)>,
    deployments: u8,
    txs: u8,
}

#[derive(Default)]
pub struct MockProvider {
    state: Mutex<ChainState>,
    failures: Failures,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(failures: Failures) -> Self {
        Self {
            state: Mutex::default(),
            failures,
        }
    }

    /// Address the n-th (0-based) deployment receives.
    pub fn address_for(index: u8) -> Address {
        Address::repeat_byte(0x10 + index)
    }

    pub fn events(&self) -> Vec<ChainEvent> {
        self.state.lock().events.clone()
    }

    /// Components whose creation was submitted, in order.
    pub fn deployed_names(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ChainEvent::Deploy { component, .. } => Some(component),
                _ => None,
            })
            .collect()
    }

    pub fn calls(&self) -> Vec<(Address, String, Vec<ArgValue>)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ChainEvent::Call { to, method, args } => Some((to, method, args)),
                _ => None,
            })
            .collect()
    }

    fn next_hash(state: &mut ChainState) -> TxHash {
        state.txs += 1;
        TxHash::with_last_byte(state.txs)
    }
}

#[async_trait]
impl ChainProvider for MockProvider {
    async fn submit_deployment(
        &self,
        component: &ComponentName,
        args: &[ArgValue],
    ) -> Result<PendingTx, ProviderError> {
        let mut state = self.state.lock();
        state.events.push(ChainEvent::Deploy {
            component: component.to_string(),
            args: args.to_vec(),
        });

        if self.failures.submit.as_deref() == Some(component.as_str()) {
            return Err(ProviderError::InsufficientFunds {
                message: "insufficient funds for gas * price + value".to_string(),
            });
        }

        let address = Self::address_for(state.deployments);
        state.deployments += 1;
        let hash = Self::next_hash(&mut state);
        state
            .pending
            .insert(hash, (component.to_string(), Some(address)));
        Ok(PendingTx { hash })
    }

    async fn submit_call(
        &self,
        to: Address,
        method: &MethodSignature,
        args: &[ArgValue],
    ) -> Result<PendingTx, ProviderError> {
        let mut state = self.state.lock();
        state.events.push(ChainEvent::Call {
            to,
            method: method.to_string(),
            args: args.to_vec(),
        });
        let hash = Self::next_hash(&mut state);
        state.pending.insert(hash, (method.to_string(), None));
        Ok(PendingTx { hash })
    }

    async fn await_confirmation(&self, tx: &PendingTx) -> Result<Receipt, ProviderError> {
        let mut state = self.state.lock();
        let (label, address) = state
            .pending
            .remove(&tx.hash)
            .expect("confirmation requested for unknown transaction");
        state.events.push(ChainEvent::Confirm {
            label: label.clone(),
        });

        let reverted = match address {
            Some(_) => self.failures.confirm.as_deref() == Some(label.as_str()),
            None => self.failures.call,
        };
        if reverted {
            return Err(ProviderError::Reverted { tx_hash: tx.hash });
        }

        Ok(Receipt {
            tx_hash: tx.hash,
            contract_address: if self.failures.missing_address {
                None
            } else {
                address
            },
            block_number: u64::from(state.txs),
            gas_used: 21_000,
        })
    }
}

/// Verifier returning scripted outcomes per component (default: Verified).
#[derive(Default)]
pub struct MockVerifier {
    outcomes: HashMap<String, Result<VerifyOutcome, VerificationError>>,
    requests: Mutex<Vec<VerificationRequest>>,
}

impl MockVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_outcome(
        mut self,
        component: &str,
        outcome: Result<VerifyOutcome, VerificationError>,
    ) -> Self {
        self.outcomes.insert(component.to_string(), outcome);
        self
    }

    pub fn requests(&self) -> Vec<VerificationRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl SourceVerifier for MockVerifier {
    async fn verify(
        &self,
        request: &VerificationRequest,
    ) -> Result<VerifyOutcome, VerificationError> {
        self.requests.lock().push(request.clone());
        self.outcomes
            .get(request.component.as_str())
            .cloned()
            .unwrap_or(Ok(VerifyOutcome::Verified))
    }
}

/// Progress sink that keeps everything it is told.
#[derive(Default)]
pub struct RecordingProgress {
    phases: Mutex<Vec<RunPhase>>,
    lines: Mutex<Vec<String>>,
    verifications: Mutex<Vec<VerificationEntry>>,
}

impl RecordingProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phases(&self) -> Vec<RunPhase> {
        self.phases.lock().clone()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    pub fn verifications(&self) -> Vec<VerificationEntry> {
        self.verifications.lock().clone()
    }

    pub fn last_phase(&self) -> Option<RunPhase> {
        self.phases.lock().last().cloned()
    }
}

impl Progress for RecordingProgress {
    fn phase(&self, phase: &RunPhase) {
        self.phases.lock().push(phase.clone());
    }

    fn deployed(&self, component: &DeployedComponent) {
        self.lines.lock().push(deployed_line(component));
    }

    fn verification(&self, entry: &VerificationEntry) {
        self.verifications.lock().push(entry.clone());
    }
}
