//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check referential integrity (default network exists, networks reference
//!   existing explorers)
//! - Validate value ranges (chain IDs and timeouts > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: DeployConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;

use crate::config::schema::DeployConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no networks configured")]
    NoNetworks,

    #[error("default network '{0}' is not configured")]
    UnknownDefaultNetwork(String),

    #[error("network '{0}' has chain_id 0")]
    ZeroChainId(String),

    #[error("network '{0}' has an empty url")]
    EmptyUrl(String),

    #[error("network '{network}' references unknown explorer '{explorer}'")]
    UnknownExplorer { network: String, explorer: String },

    #[error("explorer '{0}' has an empty api_url")]
    EmptyExplorerUrl(String),

    #[error("optimizer is enabled with 0 runs")]
    ZeroOptimizerRuns,

    #[error("contract name for '{0}' is empty")]
    EmptyContractName(&'static str),

    #[error("nft and auction contracts share the name '{0}'")]
    DuplicateContractName(String),

    #[error("deploy.{0} must be greater than 0")]
    ZeroTimeout(&'static str),
}

/// Validate a parsed configuration, collecting every error.
pub fn validate_config(config: &DeployConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.networks.is_empty() {
        errors.push(ValidationError::NoNetworks);
    } else if !config.networks.contains_key(&config.default_network) {
        errors.push(ValidationError::UnknownDefaultNetwork(
            config.default_network.clone(),
        ));
    }

    for (name, network) in &config.networks {
        if network.chain_id == 0 {
            errors.push(ValidationError::ZeroChainId(name.clone()));
        }
        if network.url.trim().is_empty() {
            errors.push(ValidationError::EmptyUrl(name.clone()));
        }
        if let Some(explorer) = &network.explorer {
            if !config.explorers.contains_key(explorer) {
                errors.push(ValidationError::UnknownExplorer {
                    network: name.clone(),
                    explorer: explorer.clone(),
                });
            }
        }
    }

    for (name, explorer) in &config.explorers {
        if explorer.api_url.trim().is_empty() {
            errors.push(ValidationError::EmptyExplorerUrl(name.clone()));
        }
    }

    if config.solidity.optimizer_enabled && config.solidity.optimizer_runs == 0 {
        errors.push(ValidationError::ZeroOptimizerRuns);
    }

    let nft = config.contracts.nft.name.trim();
    let auction = config.contracts.auction.name.trim();
    if nft.is_empty() {
        errors.push(ValidationError::EmptyContractName("nft"));
    }
    if auction.is_empty() {
        errors.push(ValidationError::EmptyContractName("auction"));
    }
    if !nft.is_empty() && nft == auction {
        errors.push(ValidationError::DuplicateContractName(nft.to_string()));
    }

    if config.deploy.rpc_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("rpc_timeout_secs"));
    }
    if config.deploy.receipt_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("receipt_timeout_secs"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&DeployConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = DeployConfig::default();
        config.default_network = "mainnet".into();
        config.networks.get_mut("sepolia").unwrap().chain_id = 0;
        config.networks.get_mut("hardhat").unwrap().explorer = Some("nowhere".into());
        config.deploy.rpc_timeout_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ValidationError::UnknownDefaultNetwork("mainnet".into())));
        assert!(errors.contains(&ValidationError::ZeroChainId("sepolia".into())));
        assert!(errors.contains(&ValidationError::UnknownExplorer {
            network: "hardhat".into(),
            explorer: "nowhere".into(),
        }));
        assert!(errors.contains(&ValidationError::ZeroTimeout("rpc_timeout_secs")));
    }

    #[test]
    fn test_no_networks() {
        let mut config = DeployConfig::default();
        config.networks.clear();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::NoNetworks]);
    }

    #[test]
    fn test_duplicate_contract_names() {
        let mut config = DeployConfig::default();
        config.contracts.auction.name = "SimpleNFT".into();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::DuplicateContractName("SimpleNFT".into())]
        );
    }

    #[test]
    fn test_optimizer_disabled_allows_zero_runs() {
        let mut config = DeployConfig::default();
        config.solidity.optimizer_runs = 0;
        assert_eq!(
            validate_config(&config).unwrap_err(),
            vec![ValidationError::ZeroOptimizerRuns]
        );

        config.solidity.optimizer_enabled = false;
        assert!(validate_config(&config).is_ok());
    }
}
