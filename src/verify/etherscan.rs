// ABOUTME: SourceVerifier for Etherscan-compatible explorer APIs (ftmscan, etherscan, ...).
// ABOUTME: Submits standard-JSON compiler input and polls until the explorer decides.

use super::traits::{SourceVerifier, VerificationError, VerificationRequest, VerifyOutcome};
use crate::artifacts::ArtifactStore;
use crate::config::ExplorerSettings;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::time::{Duration, Instant};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const STANDARD_JSON: &str = "solidity-standard-json-input";

#[derive(Debug, Deserialize)]
struct ApiResponse {
    status: String,
    #[serde(default)]
    message: String,
    result: Value,
}

impl ApiResponse {
    fn ok(&self) -> bool {
        self.status == "1"
    }

    fn result_text(&self) -> String {
        match &self.result {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        }
    }
}

/// Explorer verdict on a submitted verification.
#[derive(Debug, Clone, PartialEq, Eq)]
enum CheckStatus {
    Pending,
    Done(VerifyOutcome),
    Failed(String),
}

enum Submission {
    Queued(String),
    Finished(VerifyOutcome),
}

fn is_already_verified(text: &str) -> bool {
    text.to_lowercase().contains("already verified")
}

fn interpret_check(text: &str) -> CheckStatus {
    let lower = text.to_lowercase();
    if lower.contains("pending") || lower.contains("in queue") {
        CheckStatus::Pending
    } else if is_already_verified(text) {
        CheckStatus::Done(VerifyOutcome::AlreadyVerified)
    } else if lower.starts_with("pass") {
        CheckStatus::Done(VerifyOutcome::Verified)
    } else {
        CheckStatus::Failed(text.to_string())
    }
}

pub struct EtherscanVerifier {
    http: reqwest::Client,
    settings: ExplorerSettings,
    artifacts: ArtifactStore,
}

impl EtherscanVerifier {
    pub fn new(settings: ExplorerSettings, artifacts: ArtifactStore) -> Result<Self, VerificationError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| VerificationError::Transport(e.to_string()))?;
        Ok(Self {
            http,
            settings,
            artifacts,
        })
    }

    fn common_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("apikey", self.settings.api_key.clone()),
            ("module", "contract".to_string()),
        ];
        if let Some(chain_id) = self.settings.chain_id {
            params.push(("chainid", chain_id.to_string()));
        }
        params
    }

    async fn get(&self, params: &[(&'static str, String)]) -> Result<ApiResponse, VerificationError> {
        self.http
            .get(self.settings.api_url.clone())
            .query(&self.common_params())
            .query(params)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| VerificationError::Transport(e.to_string()))?
            .json()
            .await
            .map_err(|e| VerificationError::Api(format!("unexpected response: {e}")))
    }

    async fn is_verified(&self, request: &VerificationRequest) -> Result<bool, VerificationError> {
        let response = self
            .get(&[
                ("action", "getsourcecode".to_string()),
                ("address", request.address.to_string()),
            ])
            .await?;

        if !response.ok() {
            return Err(VerificationError::Api(format!(
                "{}: {}",
                response.message,
                response.result_text()
            )));
        }

        Ok(response
            .result
            .as_array()
            .and_then(|entries| entries.first())
            .and_then(|entry| entry.get("SourceCode"))
            .and_then(Value::as_str)
            .is_some_and(|source| !source.is_empty()))
    }

    async fn submit(&self, request: &VerificationRequest) -> Result<Submission, VerificationError> {
        let artifact = self
            .artifacts
            .load(&request.component)
            .map_err(|e| VerificationError::Source(e.to_string()))?;
        let build_info = self
            .artifacts
            .build_info(&request.component)
            .map_err(|e| VerificationError::Source(e.to_string()))?;
        let source = serde_json::to_string(&build_info.input)
            .map_err(|e| VerificationError::Source(e.to_string()))?;

        let mut form = self.common_params();
        form.extend([
            ("action", "verifysourcecode".to_string()),
            ("contractaddress", request.address.to_string()),
            ("sourceCode", source),
            ("codeformat", STANDARD_JSON.to_string()),
            ("contractname", artifact.fully_qualified_name()),
            ("compilerversion", format!("v{}", build_info.solc_long_version)),
            // field name is misspelled in the explorer API
            ("constructorArguements", request.encoded_args_hex()),
        ]);

        let response: ApiResponse = self
            .http
            .post(self.settings.api_url.clone())
            .form(&form)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| VerificationError::Transport(e.to_string()))?
            .json()
            .await
            .map_err(|e| VerificationError::Api(format!("unexpected response: {e}")))?;

        let text = response.result_text();
        if response.ok() {
            Ok(Submission::Queued(text))
        } else if is_already_verified(&text) {
            Ok(Submission::Finished(VerifyOutcome::AlreadyVerified))
        } else {
            Err(VerificationError::Rejected(text))
        }
    }

    async fn poll(&self, guid: &str) -> Result<VerifyOutcome, VerificationError> {
        let started = Instant::now();
        loop {
            tokio::time::sleep(self.settings.poll_interval).await;

            let response = self
                .get(&[
                    ("action", "checkverifystatus".to_string()),
                    ("guid", guid.to_string()),
                ])
                .await?;

            match interpret_check(&response.result_text()) {
                CheckStatus::Done(outcome) => return Ok(outcome),
                CheckStatus::Failed(reason) => return Err(VerificationError::Rejected(reason)),
                CheckStatus::Pending => {
                    tracing::debug!(guid, "verification pending");
                }
            }

            if started.elapsed() >= self.settings.timeout {
                return Err(VerificationError::Timeout {
                    guid: guid.to_string(),
                    waited_secs: started.elapsed().as_secs(),
                });
            }
        }
    }
}

#[async_trait]
impl SourceVerifier for EtherscanVerifier {
    async fn verify(&self, request: &VerificationRequest) -> Result<VerifyOutcome, VerificationError> {
        if self.is_verified(request).await? {
            return Ok(VerifyOutcome::AlreadyVerified);
        }

        tracing::debug!(component = %request.component, address = %request.address, "submitting sources");
        match self.submit(request).await? {
            Submission::Queued(guid) => self.poll(&guid).await,
            Submission::Finished(outcome) => Ok(outcome),
        }
    }
}
