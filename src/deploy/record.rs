//! The deployment record written at the end of a successful run.

use alloy::primitives::Address;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while building, writing or reading a record.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("{0} contract address is the zero address")]
    ZeroAddress(&'static str),

    #[error("nft and auction contracts share the address {0}")]
    DuplicateAddress(Address),

    #[error("cannot write deployment record {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot read deployment record {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed deployment record {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Summary of one deployment run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentRecord {
    /// Network name the run targeted.
    pub network: String,
    /// Chain ID the contracts live on.
    pub chain_id: u64,
    /// NFT collection address.
    pub nft_contract: Address,
    /// Auction house address.
    pub auction_contract: Address,
    /// Signer that deployed both contracts.
    pub deployer: Address,
    /// ISO-8601 UTC, millisecond precision.
    pub timestamp: String,
}

impl DeploymentRecord {
    /// Build a record stamped with the current time.
    pub fn new(
        network: &str,
        chain_id: u64,
        nft_contract: Address,
        auction_contract: Address,
        deployer: Address,
    ) -> Result<Self, RecordError> {
        Self::at(network, chain_id, nft_contract, auction_contract, deployer, Utc::now())
    }

    /// Build a record with an explicit timestamp.
    pub fn at(
        network: &str,
        chain_id: u64,
        nft_contract: Address,
        auction_contract: Address,
        deployer: Address,
        when: DateTime<Utc>,
    ) -> Result<Self, RecordError> {
        if nft_contract == Address::ZERO {
            return Err(RecordError::ZeroAddress("nft"));
        }
        if auction_contract == Address::ZERO {
            return Err(RecordError::ZeroAddress("auction"));
        }
        if nft_contract == auction_contract {
            return Err(RecordError::DuplicateAddress(nft_contract));
        }

        Ok(Self {
            network: network.to_string(),
            chain_id,
            nft_contract,
            auction_contract,
            deployer,
            timestamp: when.to_rfc3339_opts(SecondsFormat::Millis, true),
        })
    }

    /// File name for a network's record.
    pub fn file_name_for(network: &str) -> String {
        format!("deployment-{}.json", network)
    }

    /// File name for this record.
    pub fn file_name(&self) -> String {
        Self::file_name_for(&self.network)
    }

    /// Write the record as pretty JSON into `dir` and return its path.
    ///
    /// The file is written beside its final name and renamed into place, so
    /// a reader never sees a partial record.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, RecordError> {
        let path = dir.join(self.file_name());
        let tmp = dir.join(format!(".{}.tmp", self.file_name()));
        let write_err = |source| RecordError::Write {
            path: path.clone(),
            source,
        };

        std::fs::create_dir_all(dir).map_err(write_err)?;

        let mut json = serde_json::to_string_pretty(self).map_err(|source| RecordError::Json {
            path: path.clone(),
            source,
        })?;
        json.push('\n');

        std::fs::write(&tmp, json).map_err(write_err)?;
        std::fs::rename(&tmp, &path).map_err(write_err)?;

        tracing::info!(path = %path.display(), "Deployment record written");
        Ok(path)
    }

    /// Read a record back.
    pub fn read_from(path: &Path) -> Result<Self, RecordError> {
        let content = std::fs::read_to_string(path).map_err(|source| RecordError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| RecordError::Json {
            path: path.to_path_buf(),
            source,
        })
    }
}
