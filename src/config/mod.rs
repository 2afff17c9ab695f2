//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! .env file + process environment
//!     → env.rs (immutable snapshot, ${VAR} interpolation)
//!
//! deploy.toml (optional, built-in defaults otherwise)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → DeployConfig (validated, immutable)
//!
//! DeployConfig + Env + network name
//!     → network.rs (URL, chain ID, signing accounts)
//!     → ResolvedNetwork
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - A missing private key is not a config error; key-dependent networks
//!   just resolve with no accounts

pub mod env;
pub mod loader;
pub mod network;
pub mod schema;
pub mod validation;

pub use env::Env;
pub use loader::{load_config, load_or_default, ConfigError};
pub use network::ResolvedNetwork;
pub use schema::{AccountSource, ContractConfig, DeployConfig, ExplorerConfig, NetworkConfig};
