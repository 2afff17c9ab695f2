//! Chain-specific types and error definitions.

use alloy::primitives::Address;
use std::time::Duration;
use thiserror::Error;

use crate::config::schema::DeploySettings;

/// Errors that can occur during blockchain operations.
#[derive(Debug, Error)]
pub enum BlockchainError {
    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// No receipt arrived in time.
    #[error("Transaction {tx_hash} not confirmed after {secs} seconds")]
    ConfirmationTimeout { tx_hash: String, secs: u64 },

    /// Transaction was reverted on-chain.
    #[error("Transaction reverted: {0}")]
    Reverted(String),

    /// Invalid private key format or derivation error.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// The network has no account to sign with.
    #[error("No signer available for network '{0}' (is PRIVATE_KEY set?)")]
    NoSigner(String),

    /// A contract-creation receipt without a contract address.
    #[error("Deployment of {0} returned no contract address")]
    MissingContractAddress(String),

    /// Chain configuration mismatch.
    #[error("Chain ID mismatch: expected {expected}, got {actual}")]
    ChainMismatch { expected: u64, actual: u64 },
}

/// Result type for blockchain operations.
pub type BlockchainResult<T> = Result<T, BlockchainError>;

/// Timeouts applied to RPC traffic.
#[derive(Debug, Clone, Copy)]
pub struct RpcTimeouts {
    /// Bound on each individual RPC call.
    pub request: Duration,
    /// Bound on waiting for a transaction receipt.
    pub receipt: Duration,
    /// Confirmations required before a receipt is returned.
    pub confirmations: u64,
}

impl From<&DeploySettings> for RpcTimeouts {
    fn from(settings: &DeploySettings) -> Self {
        Self {
            request: Duration::from_secs(settings.rpc_timeout_secs),
            receipt: Duration::from_secs(settings.receipt_timeout_secs),
            confirmations: settings.confirmations.max(1),
        }
    }
}

/// Outcome of a mined transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxOutcome {
    pub tx_hash: String,
    pub block_number: Option<u64>,
    pub gas_used: u64,
    /// Set for contract-creation transactions.
    pub contract_address: Option<Address>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeouts_from_settings() {
        let mut settings = DeploySettings::default();
        settings.confirmations = 0;
        let timeouts = RpcTimeouts::from(&settings);
        assert_eq!(timeouts.request, Duration::from_secs(30));
        assert_eq!(timeouts.receipt, Duration::from_secs(300));
        // A receipt always needs at least its own block.
        assert_eq!(timeouts.confirmations, 1);
    }

    #[test]
    fn test_error_display() {
        let err = BlockchainError::Timeout(10);
        assert_eq!(err.to_string(), "RPC timeout after 10 seconds");

        let err = BlockchainError::NoSigner("sepolia".into());
        assert!(err.to_string().contains("PRIVATE_KEY"));

        let err = BlockchainError::ChainMismatch {
            expected: 97,
            actual: 56,
        };
        assert!(err.to_string().contains("97"));
    }
}
