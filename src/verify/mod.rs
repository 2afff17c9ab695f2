//! Explorer source verification.
//!
//! # Data Flow
//! ```text
//! deployment-<network>.json + ResolvedNetwork
//!     → explorer lookup + API key from the environment
//!     → flattened sources (contracts/<Name>.sol)
//!     → explorer.rs submit → wait_for (per contract, sequential)
//! ```

pub mod explorer;

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::config::{ContractConfig, DeployConfig, Env, ResolvedNetwork};
use crate::deploy::record::DeploymentRecord;

pub use explorer::{ExplorerClient, Submission, VerificationRequest, VerificationStatus};

/// Errors raised during verification.
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("network '{0}' has no explorer configured")]
    NoExplorer(String),

    #[error("explorer '{0}' is not configured")]
    UnknownExplorer(String),

    #[error("explorer API key not set (expected in {0})")]
    MissingApiKey(String),

    #[error("record is for chain {record} but network '{network}' is chain {expected}")]
    ChainMismatch { network: String, expected: u64, record: u64 },

    #[error("cannot read source {path}: {source}")]
    Source {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("explorer request failed: {0}")]
    Http(String),

    #[error("explorer rejected {contract}: {reason}")]
    Rejected { contract: String, reason: String },

    #[error("{contract} still pending after {attempts} status checks")]
    StillPending { contract: String, attempts: u32 },
}

/// Outcome for one contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationReport {
    pub contract: String,
    pub address: alloy::primitives::Address,
    pub status: VerificationStatus,
}

/// Build the explorer client a network verifies against.
pub fn explorer_for(
    config: &DeployConfig,
    network: &ResolvedNetwork,
    env: &Env,
) -> Result<ExplorerClient, VerifyError> {
    let name = network
        .explorer
        .as_ref()
        .ok_or_else(|| VerifyError::NoExplorer(network.name.clone()))?;
    let explorer = config
        .explorers
        .get(name)
        .ok_or_else(|| VerifyError::UnknownExplorer(name.clone()))?;
    let api_key = env
        .get(&explorer.api_key_env)
        .ok_or_else(|| VerifyError::MissingApiKey(explorer.api_key_env.clone()))?;

    ExplorerClient::new(
        &explorer.api_url,
        api_key,
        network.chain_id,
        Duration::from_secs(config.deploy.rpc_timeout_secs),
    )
}

/// Verify both contracts of a deployment record, NFT first.
pub async fn verify_deployment(
    config: &DeployConfig,
    network: &ResolvedNetwork,
    record: &DeploymentRecord,
    client: &ExplorerClient,
) -> Result<Vec<VerificationReport>, VerifyError> {
    if record.chain_id != network.chain_id {
        return Err(VerifyError::ChainMismatch {
            network: network.name.clone(),
            expected: network.chain_id,
            record: record.chain_id,
        });
    }

    let targets = [
        (&config.contracts.nft, record.nft_contract),
        (&config.contracts.auction, record.auction_contract),
    ];

    let mut reports = Vec::with_capacity(targets.len());
    for (contract, address) in targets {
        let status = verify_contract(config, contract, address, client).await?;
        tracing::info!(contract = %contract.name, address = %address, status = ?status, "Verification finished");
        reports.push(VerificationReport {
            contract: contract.name.clone(),
            address,
            status,
        });
    }
    Ok(reports)
}

async fn verify_contract(
    config: &DeployConfig,
    contract: &ContractConfig,
    address: alloy::primitives::Address,
    client: &ExplorerClient,
) -> Result<VerificationStatus, VerifyError> {
    let path = contract.source_path();
    let source = std::fs::read_to_string(&path).map_err(|source| VerifyError::Source {
        path: path.clone(),
        source,
    })?;

    let request = VerificationRequest {
        address,
        contract_name: contract.name.clone(),
        source,
        compiler_version: config.solidity.long_version.clone(),
        optimizer_enabled: config.solidity.optimizer_enabled,
        optimizer_runs: config.solidity.optimizer_runs,
    };

    match client.submit(&request).await? {
        Submission::AlreadyVerified => Ok(VerificationStatus::AlreadyVerified),
        Submission::Queued(guid) => client.wait_for(&contract.name, &guid).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explorer_requires_key() {
        let config = DeployConfig::default();
        let network = config.resolve_network("sepolia", &Env::default()).unwrap();

        let err = explorer_for(&config, &network, &Env::default()).unwrap_err();
        assert!(matches!(err, VerifyError::MissingApiKey(var) if var == "ETHERSCAN_API_KEY"));

        let env: Env = [("ETHERSCAN_API_KEY", "key")].into_iter().collect();
        let client = explorer_for(&config, &network, &env).unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("https://api.etherscan.io/v2/api"));
        assert!(debug.contains("11155111"));
    }

    #[test]
    fn test_local_network_has_no_explorer() {
        let config = DeployConfig::default();
        let network = config.resolve_network("hardhat", &Env::default()).unwrap();
        let err = explorer_for(&config, &network, &Env::default()).unwrap_err();
        assert!(matches!(err, VerifyError::NoExplorer(_)));
    }
}
