//! Etherscan-compatible explorer API client.
//!
//! # Responsibilities
//! - Submit single-file Solidity sources for verification
//! - Poll the verification verdict with bounded backoff
//!
//! Requests target the Etherscan V2 layout: one endpoint for every chain,
//! with the chain picked by the `chainid` query parameter.
//!
//! The API always answers HTTP 200 with `{status, message, result}`;
//! `status == "1"` means success and `result` carries the payload or the
//! error text.

use alloy::primitives::Address;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

use crate::resilience::PollSchedule;
use crate::verify::VerifyError;

/// Everything the explorer needs to rebuild a contract.
#[derive(Debug, Clone)]
pub struct VerificationRequest {
    pub address: Address,
    pub contract_name: String,
    pub source: String,
    pub compiler_version: String,
    pub optimizer_enabled: bool,
    pub optimizer_runs: u32,
}

/// Result of a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Accepted for processing; poll with the GUID.
    Queued(String),
    /// The explorer already has this contract's source.
    AlreadyVerified,
}

/// Verdict for a queued submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationStatus {
    Pending,
    Verified,
    AlreadyVerified,
    Failed(String),
}

impl VerificationStatus {
    fn from_result(text: &str) -> Self {
        let lower = text.to_ascii_lowercase();
        if lower.contains("pending") || lower.contains("in queue") {
            VerificationStatus::Pending
        } else if lower.contains("already verified") {
            VerificationStatus::AlreadyVerified
        } else if lower.starts_with("pass") {
            VerificationStatus::Verified
        } else {
            VerificationStatus::Failed(text.to_string())
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    status: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    result: Value,
}

impl ApiResponse {
    fn result_text(&self) -> String {
        match &self.result {
            Value::String(s) => s.clone(),
            Value::Null => self.message.clone(),
            other => other.to_string(),
        }
    }

    fn is_ok(&self) -> bool {
        self.status == "1"
    }
}

/// Client for one explorer API endpoint.
#[derive(Clone)]
pub struct ExplorerClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
    chain_id: u64,
    poll: PollSchedule,
}

impl ExplorerClient {
    /// Create a client for one chain. Requests are bounded by `timeout`.
    pub fn new(api_url: &str, api_key: &str, chain_id: u64, timeout: Duration) -> Result<Self, VerifyError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| VerifyError::Http(e.to_string()))?;

        Ok(Self {
            http,
            api_url: api_url.to_string(),
            api_key: api_key.to_string(),
            chain_id,
            poll: PollSchedule::new(Duration::from_secs(3), Duration::from_secs(15), 20),
        })
    }

    /// Replace the default polling schedule.
    pub fn with_poll_schedule(mut self, poll: PollSchedule) -> Self {
        self.poll = poll;
        self
    }

    /// Submit a contract for verification.
    pub async fn submit(&self, request: &VerificationRequest) -> Result<Submission, VerifyError> {
        let address = request.address.to_string();
        let runs = request.optimizer_runs.to_string();
        let optimization_used = if request.optimizer_enabled { "1" } else { "0" };

        let form = [
            ("apikey", self.api_key.as_str()),
            ("module", "contract"),
            ("action", "verifysourcecode"),
            ("contractaddress", address.as_str()),
            ("sourceCode", request.source.as_str()),
            ("codeformat", "solidity-single-file"),
            ("contractname", request.contract_name.as_str()),
            ("compilerversion", request.compiler_version.as_str()),
            ("optimizationUsed", optimization_used),
            ("runs", runs.as_str()),
        ];

        let response = self
            .http
            .post(&self.api_url)
            .query(&self.chain_query())
            .form(&form)
            .send()
            .await
            .map_err(|e| VerifyError::Http(e.to_string()))?;
        let body = parse_response(response).await?;
        let text = body.result_text();

        if body.is_ok() {
            tracing::info!(contract = %request.contract_name, guid = %text, "Verification submitted");
            return Ok(Submission::Queued(text));
        }
        if text.to_ascii_lowercase().contains("already verified") {
            return Ok(Submission::AlreadyVerified);
        }
        Err(VerifyError::Rejected {
            contract: request.contract_name.clone(),
            reason: text,
        })
    }

    /// Ask for the verdict of a submission.
    pub async fn check_status(&self, guid: &str) -> Result<VerificationStatus, VerifyError> {
        let query = [
            ("apikey", self.api_key.as_str()),
            ("module", "contract"),
            ("action", "checkverifystatus"),
            ("guid", guid),
        ];

        let response = self
            .http
            .get(&self.api_url)
            .query(&self.chain_query())
            .query(&query)
            .send()
            .await
            .map_err(|e| VerifyError::Http(e.to_string()))?;
        let body = parse_response(response).await?;

        // Pending answers come back with status "0" as well.
        Ok(VerificationStatus::from_result(&body.result_text()))
    }

    fn chain_query(&self) -> [(&'static str, String); 1] {
        [("chainid", self.chain_id.to_string())]
    }

    /// Poll until the submission has a final verdict.
    pub async fn wait_for(&self, contract: &str, guid: &str) -> Result<VerificationStatus, VerifyError> {
        let mut schedule = self.poll.clone();

        loop {
            let Some(delay) = schedule.next_delay() else {
                return Err(VerifyError::StillPending {
                    contract: contract.to_string(),
                    attempts: schedule.attempts(),
                });
            };
            tokio::time::sleep(delay).await;

            match self.check_status(guid).await? {
                VerificationStatus::Pending => {
                    tracing::debug!(contract = %contract, attempt = schedule.attempts(), "Verification pending");
                }
                VerificationStatus::Failed(reason) => {
                    return Err(VerifyError::Rejected {
                        contract: contract.to_string(),
                        reason,
                    })
                }
                verdict => return Ok(verdict),
            }
        }
    }
}

impl std::fmt::Debug for ExplorerClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExplorerClient")
            .field("api_url", &self.api_url)
            .field("chain_id", &self.chain_id)
            .finish()
    }
}

async fn parse_response(response: reqwest::Response) -> Result<ApiResponse, VerifyError> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| VerifyError::Http(e.to_string()))?;

    if !status.is_success() {
        return Err(VerifyError::Http(format!("explorer returned status {}: {}", status, text)));
    }

    serde_json::from_str(&text)
        .map_err(|e| VerifyError::Http(format!("unexpected explorer response ({}): {}", e, text)))
}
