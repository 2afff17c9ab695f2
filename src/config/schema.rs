//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the deployer.
//! All types derive Serde traits for deserialization from config files, and
//! the defaults reproduce the stock network table so the tool runs without a
//! config file at all.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Root configuration for the deployer.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DeployConfig {
    /// Network used when `--network` is not given.
    pub default_network: String,

    /// Root of the compiler output tree.
    pub artifacts_dir: PathBuf,

    /// Directory the deployment record is written to.
    pub output_dir: PathBuf,

    /// Compiler settings, reported to explorers during verification.
    pub solidity: SolidityConfig,

    /// Named network targets.
    pub networks: BTreeMap<String, NetworkConfig>,

    /// Named block explorers (Etherscan-compatible APIs).
    pub explorers: BTreeMap<String, ExplorerConfig>,

    /// The two contracts this tool deploys.
    pub contracts: ContractsConfig,

    /// Deployment run settings.
    pub deploy: DeploySettings,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            default_network: "hardhat".to_string(),
            artifacts_dir: PathBuf::from("artifacts"),
            output_dir: PathBuf::from("."),
            solidity: SolidityConfig::default(),
            networks: default_networks(),
            explorers: default_explorers(),
            contracts: ContractsConfig::default(),
            deploy: DeploySettings::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Solidity compiler settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SolidityConfig {
    /// Language version (e.g., "0.8.20").
    pub version: String,

    /// Full compiler build string expected by explorers
    /// (e.g., "v0.8.20+commit.a1b79de6").
    pub long_version: String,

    /// Whether the optimizer was enabled.
    pub optimizer_enabled: bool,

    /// Optimizer pass count.
    pub optimizer_runs: u32,
}

impl Default for SolidityConfig {
    fn default() -> Self {
        Self {
            version: "0.8.20".to_string(),
            long_version: "v0.8.20+commit.a1b79de6".to_string(),
            optimizer_enabled: true,
            optimizer_runs: 200,
        }
    }
}

/// Where a network's signing account comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountSource {
    /// Derived from the `PRIVATE_KEY` environment variable.
    PrivateKeyEnv,
    /// Managed by the node itself (`eth_accounts` / `eth_sendTransaction`).
    Node,
}

/// A named network target.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NetworkConfig {
    /// JSON-RPC endpoint. `${VAR}` placeholders are filled from the environment.
    pub url: String,

    /// Expected chain ID.
    pub chain_id: u64,

    /// Signing account source.
    #[serde(default = "default_account_source")]
    pub accounts: AccountSource,

    /// Fixed gas price in wei. When unset the node's estimate is used.
    #[serde(default)]
    pub gas_price: Option<u128>,

    /// Explorer used to verify contracts deployed here.
    #[serde(default)]
    pub explorer: Option<String>,
}

fn default_account_source() -> AccountSource {
    AccountSource::PrivateKeyEnv
}

/// Etherscan-compatible explorer endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExplorerConfig {
    /// API endpoint. Etherscan V2 serves every chain from one URL and picks
    /// the chain from the `chainid` parameter.
    pub api_url: String,

    /// Human-facing site, used to print contract links.
    #[serde(default)]
    pub browser_url: String,

    /// Environment variable holding the API key.
    pub api_key_env: String,
}

/// Contracts deployed by a run.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ContractsConfig {
    /// The NFT collection (receives the sample mint).
    pub nft: ContractConfig,

    /// The auction house.
    pub auction: ContractConfig,
}

impl Default for ContractsConfig {
    fn default() -> Self {
        Self {
            nft: ContractConfig::named("SimpleNFT"),
            auction: ContractConfig::named("NFTAuction"),
        }
    }
}

/// A single contract's artifact and source locations.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ContractConfig {
    /// Contract name as declared in Solidity.
    pub name: String,

    /// Artifact path. Defaults to `<artifacts_dir>/contracts/<name>.sol/<name>.json`.
    #[serde(default)]
    pub artifact: Option<PathBuf>,

    /// Flattened source path. Defaults to `contracts/<name>.sol`.
    #[serde(default)]
    pub source: Option<PathBuf>,
}

impl ContractConfig {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            artifact: None,
            source: None,
        }
    }

    /// Resolve the artifact path relative to the artifacts directory.
    pub fn artifact_path(&self, artifacts_dir: &std::path::Path) -> PathBuf {
        match &self.artifact {
            Some(path) => path.clone(),
            None => artifacts_dir
                .join("contracts")
                .join(format!("{}.sol", self.name))
                .join(format!("{}.json", self.name)),
        }
    }

    /// Resolve the source path used for verification.
    pub fn source_path(&self) -> PathBuf {
        match &self.source {
            Some(path) => path.clone(),
            None => PathBuf::from("contracts").join(format!("{}.sol", self.name)),
        }
    }
}

/// Deployment run settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DeploySettings {
    /// Number of sample tokens minted to the deployer. Zero skips the mint.
    pub mint_count: u64,

    /// Per-call RPC timeout in seconds.
    pub rpc_timeout_secs: u64,

    /// Maximum time to wait for a transaction receipt in seconds.
    pub receipt_timeout_secs: u64,

    /// Block confirmations required before a receipt is accepted.
    pub confirmations: u64,
}

impl Default for DeploySettings {
    fn default() -> Self {
        Self {
            mint_count: 3,
            rpc_timeout_secs: 30,
            receipt_timeout_secs: 300,
            confirmations: 1,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

fn default_networks() -> BTreeMap<String, NetworkConfig> {
    let mut networks = BTreeMap::new();
    networks.insert(
        "bnbTestnet".to_string(),
        NetworkConfig {
            url: "https://data-seed-prebsc-1-s1.binance.org:8545".to_string(),
            chain_id: 97,
            accounts: AccountSource::PrivateKeyEnv,
            gas_price: Some(20_000_000_000), // 20 gwei
            explorer: Some("bscTestnet".to_string()),
        },
    );
    networks.insert(
        "sepolia".to_string(),
        NetworkConfig {
            url: "https://sepolia.infura.io/v3/${INFURA_KEY}".to_string(),
            chain_id: 11_155_111,
            accounts: AccountSource::PrivateKeyEnv,
            gas_price: None,
            explorer: Some("sepolia".to_string()),
        },
    );
    networks.insert(
        "hardhat".to_string(),
        NetworkConfig {
            url: "http://127.0.0.1:8545".to_string(),
            chain_id: 1337,
            accounts: AccountSource::Node,
            gas_price: None,
            explorer: None,
        },
    );
    networks
}

/// Unified Etherscan V2 endpoint, shared by BscScan and Etherscan chains.
pub const ETHERSCAN_V2_API: &str = "https://api.etherscan.io/v2/api";

fn default_explorers() -> BTreeMap<String, ExplorerConfig> {
    let mut explorers = BTreeMap::new();
    explorers.insert(
        "bscTestnet".to_string(),
        ExplorerConfig {
            api_url: ETHERSCAN_V2_API.to_string(),
            browser_url: "https://testnet.bscscan.com".to_string(),
            api_key_env: "BSCSCAN_API_KEY".to_string(),
        },
    );
    explorers.insert(
        "sepolia".to_string(),
        ExplorerConfig {
            api_url: ETHERSCAN_V2_API.to_string(),
            browser_url: "https://sepolia.etherscan.io".to_string(),
            api_key_env: "ETHERSCAN_API_KEY".to_string(),
        },
    );
    explorers
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_default_networks() {
        let config = DeployConfig::default();
        assert_eq!(config.networks.len(), 3);
        assert_eq!(config.networks["bnbTestnet"].chain_id, 97);
        assert_eq!(config.networks["bnbTestnet"].gas_price, Some(20_000_000_000));
        assert_eq!(config.networks["sepolia"].chain_id, 11_155_111);
        assert_eq!(config.networks["hardhat"].accounts, AccountSource::Node);
        assert_eq!(config.default_network, "hardhat");
    }

    #[test]
    fn test_default_explorers_use_v2_api() {
        let config = DeployConfig::default();
        assert_eq!(config.explorers.len(), 2);
        assert!(config.explorers.values().all(|e| e.api_url == ETHERSCAN_V2_API));
        assert_eq!(config.explorers["bscTestnet"].browser_url, "https://testnet.bscscan.com");
    }

    #[test]
    fn test_default_compiler_settings() {
        let config = SolidityConfig::default();
        assert_eq!(config.version, "0.8.20");
        assert!(config.optimizer_enabled);
        assert_eq!(config.optimizer_runs, 200);
    }

    #[test]
    fn test_contract_paths() {
        let contract = ContractConfig::named("SimpleNFT");
        assert_eq!(
            contract.artifact_path(Path::new("artifacts")),
            PathBuf::from("artifacts/contracts/SimpleNFT.sol/SimpleNFT.json")
        );
        assert_eq!(contract.source_path(), PathBuf::from("contracts/SimpleNFT.sol"));

        let custom = ContractConfig {
            name: "SimpleNFT".into(),
            artifact: Some(PathBuf::from("out/SimpleNFT.sol/SimpleNFT.json")),
            source: None,
        };
        assert_eq!(
            custom.artifact_path(Path::new("artifacts")),
            PathBuf::from("out/SimpleNFT.sol/SimpleNFT.json")
        );
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: DeployConfig = toml::from_str(
            r#"
            default_network = "local"

            [networks.local]
            url = "http://localhost:8545"
            chain_id = 31337
            accounts = "node"

            [deploy]
            mint_count = 5
            "#,
        )
        .unwrap();

        // A table given in the file replaces the default table entirely.
        assert_eq!(config.networks.len(), 1);
        assert_eq!(config.networks["local"].accounts, AccountSource::Node);
        assert_eq!(config.deploy.mint_count, 5);
        assert_eq!(config.deploy.rpc_timeout_secs, 30);
        assert_eq!(config.contracts.nft.name, "SimpleNFT");
    }
}
