//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! ResolvedNetwork (URL, chain ID, local keys)
//!     → wallet.rs (key loading, signer selection)
//!     → client.rs (RPC connection with timeouts, chain ID check)
//!     → transaction.rs (build, broadcast, wait for receipt)
//! ```
//!
//! # Security Constraints
//! - Private keys ONLY from environment variables
//! - Never log private keys or provider API keys
//! - All RPC calls and receipt waits have timeouts

pub mod client;
pub mod transaction;
pub mod types;
pub mod wallet;

pub use client::BlockchainClient;
pub use transaction::TxSender;
pub use types::{BlockchainError, BlockchainResult, RpcTimeouts, TxOutcome};
pub use wallet::{Signer, Wallet};
