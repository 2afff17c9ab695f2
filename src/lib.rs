//! NFT contract deployer library.

pub mod blockchain;
pub mod commands;
pub mod config;
pub mod contracts;
pub mod deploy;
pub mod error;
pub mod observability;
pub mod resilience;
pub mod verify;

pub use config::schema::DeployConfig;
pub use deploy::DeploymentRecord;
pub use error::{Error, Result};
