// ABOUTME: State transition methods for the deployment run.
// ABOUTME: Each method consumes self and returns the next state on success.

use crate::chain::{ChainProvider, ProviderError};
use crate::plan::{PlanError, resolve_args};
use crate::verify::{SourceVerifier, VerificationReport, verify_all};

use super::Deployment;
use super::deployment::{DeployedComponent, InitializationReceipt, find_address};
use super::error::DeployError;
use super::phase::{Progress, RunPhase};
use super::state::{DeployedAll, Done, Initialized, Planned};

// =============================================================================
// Planned -> DeployedAll
// =============================================================================

impl Deployment<Planned> {
    /// Deploy every component in plan order, one confirmed transaction at a time.
    ///
    /// Constructor references are resolved against components confirmed earlier in
    /// this run. The first failure stops the run; later components are never submitted.
    ///
    /// # Errors
    ///
    /// Returns `DeployError::Submission` or `DeployError::Confirmation` when the
    /// provider rejects or fails to confirm a creation transaction.
    pub async fn deploy_all<P>(
        self,
        provider: &P,
        progress: &dyn Progress,
    ) -> Result<Deployment<DeployedAll>, DeployError>
    where
        P: ChainProvider + ?Sized,
    {
        let total = self.plan.len();
        let mut deployed: Vec<DeployedComponent> = Vec::with_capacity(total);

        for (index, spec) in self.plan.components().iter().enumerate() {
            progress.phase(&RunPhase::Deploying {
                index,
                total,
                component: spec.name.clone(),
            });

            let args = resolve_args(&spec.args, |name| find_address(&deployed, name))?;

            let pending = provider
                .submit_deployment(&spec.name, &args)
                .await
                .map_err(|source| DeployError::Submission {
                    component: spec.name.clone(),
                    source,
                })?;
            tracing::debug!(component = %spec.name, hash = %pending.hash, "creation submitted");

            let receipt = provider.await_confirmation(&pending).await.map_err(|source| {
                DeployError::Confirmation {
                    component: spec.name.clone(),
                    source,
                }
            })?;

            let address =
                receipt
                    .contract_address
                    .ok_or_else(|| DeployError::MissingContractAddress {
                        component: spec.name.clone(),
                        tx_hash: receipt.tx_hash,
                    })?;

            let component = DeployedComponent {
                name: spec.name.clone(),
                address,
                constructor_args: args,
                tx_hash: receipt.tx_hash,
            };
            tracing::info!(
                component = %component.name,
                %address,
                block = receipt.block_number,
                gas_used = receipt.gas_used,
                "component deployed"
            );
            progress.deployed(&component);
            deployed.push(component);
        }

        progress.phase(&RunPhase::DeployedAll);

        Ok(Deployment {
            plan: self.plan,
            state: DeployedAll {
                components: deployed,
            },
        })
    }
}

// =============================================================================
// DeployedAll -> Initialized
// =============================================================================

impl Deployment<DeployedAll> {
    /// Issue the single wire-up call, if the plan has one.
    ///
    /// # Errors
    ///
    /// Returns `DeployError::Initialization` if the call is rejected or reverts.
    pub async fn initialize<P>(
        self,
        provider: &P,
        progress: &dyn Progress,
    ) -> Result<Deployment<Initialized>, DeployError>
    where
        P: ChainProvider + ?Sized,
    {
        let components = self.state.components;

        let initialization = match self.plan.initialize() {
            None => {
                tracing::debug!("no initialization call configured");
                None
            }
            Some(call) => {
                progress.phase(&RunPhase::Initializing {
                    target: call.target.clone(),
                    method: call.method.to_string(),
                });

                let address = find_address(&components, &call.target)
                    .ok_or_else(|| PlanError::Unresolved(call.target.clone()))?;
                let args = resolve_args(&call.args, |name| find_address(&components, name))?;

                let failed = |source: ProviderError| DeployError::Initialization {
                    target: call.target.clone(),
                    source,
                };
                let pending = provider
                    .submit_call(address, &call.method, &args)
                    .await
                    .map_err(failed)?;
                let receipt = provider
                    .await_confirmation(&pending)
                    .await
                    .map_err(failed)?;

                tracing::info!(component = %call.target, method = %call.method, hash = %receipt.tx_hash, "initialized");

                Some(InitializationReceipt {
                    target: call.target.clone(),
                    address,
                    method: call.method.clone(),
                    args,
                    tx_hash: receipt.tx_hash,
                })
            }
        };

        progress.phase(&RunPhase::Initialized);

        Ok(Deployment {
            plan: self.plan,
            state: Initialized {
                components,
                initialization,
            },
        })
    }
}

// =============================================================================
// Initialized -> Done
// =============================================================================

impl Deployment<Initialized> {
    /// Submit every deployed component for source verification.
    ///
    /// Never fails: each outcome is recorded in the report, and the run is done either way.
    pub async fn verify<V>(self, verifier: &V, progress: &dyn Progress) -> Deployment<Done>
    where
        V: SourceVerifier + ?Sized,
    {
        let requests = self.verification_requests();
        let total = requests.len();
        for (index, request) in requests.iter().enumerate() {
            progress.phase(&RunPhase::Verifying {
                index,
                total,
                component: request.component.clone(),
            });
        }

        let report = verify_all(verifier, &requests).await;
        for entry in &report.entries {
            progress.verification(entry);
        }

        self.finish(report, progress)
    }

    pub fn skip_verification(self, progress: &dyn Progress) -> Deployment<Done> {
        tracing::debug!("verification skipped");
        self.finish(VerificationReport::skipped(), progress)
    }

    fn finish(self, report: VerificationReport, progress: &dyn Progress) -> Deployment<Done> {
        progress.phase(&RunPhase::Done);
        Deployment {
            plan: self.plan,
            state: Done {
                components: self.state.components,
                initialization: self.state.initialization,
                report,
            },
        }
    }
}
