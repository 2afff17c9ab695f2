//! Crate-level error: every failure a command can end with.

use thiserror::Error;

use crate::blockchain::BlockchainError;
use crate::config::ConfigError;
use crate::contracts::ArtifactError;
use crate::deploy::record::RecordError;
use crate::verify::VerifyError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("environment: {0}")]
    Env(#[from] dotenvy::Error),

    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("artifact: {0}")]
    Artifact(#[from] ArtifactError),

    #[error(transparent)]
    Blockchain(#[from] BlockchainError),

    #[error("deployment record: {0}")]
    Record(#[from] RecordError),

    #[error("verification: {0}")]
    Verify(#[from] VerifyError),

    #[error("{contract} artifact has no `{function}` function")]
    MissingFunction { contract: String, function: &'static str },
}

pub type Result<T> = std::result::Result<T, Error>;
