//! Blockchain RPC client with timeout and error handling.
//!
//! # Responsibilities
//! - Connect to the selected network's JSON-RPC endpoint
//! - Verify the node serves the expected chain
//! - Hand out the run's signer
//! - Query chain state (chain ID, block number, balances)

use alloy::primitives::{Address, U256};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::transports::TransportResult;
use std::future::IntoFuture;
use std::sync::Arc;
use tokio::time::timeout;

use crate::blockchain::types::{BlockchainError, BlockchainResult, RpcTimeouts};
use crate::blockchain::wallet::Signer;
use crate::config::{AccountSource, ResolvedNetwork};

/// RPC client bound to one network for the duration of a run.
#[derive(Clone)]
pub struct BlockchainClient {
    /// Provider, with a wallet filler when the network has a local key.
    provider: Arc<dyn Provider + Send + Sync>,
    /// The network this client talks to.
    network: ResolvedNetwork,
    /// Per-call and receipt timeouts.
    timeouts: RpcTimeouts,
}

impl BlockchainClient {
    /// Connect to a resolved network and check its chain ID.
    ///
    /// Fails with [`BlockchainError::ChainMismatch`] when the endpoint serves
    /// a different chain than configured.
    pub async fn connect(network: ResolvedNetwork, timeouts: RpcTimeouts) -> BlockchainResult<Self> {
        let url = network.url.clone();
        let provider: Arc<dyn Provider + Send + Sync> = match network.accounts.first() {
            Some(wallet) => Arc::new(
                ProviderBuilder::new()
                    .wallet(wallet.ethereum_wallet())
                    .connect_http(url),
            ),
            None => Arc::new(ProviderBuilder::new().connect_http(url)),
        };

        let client = Self {
            provider,
            network,
            timeouts,
        };

        client.verify_chain_id().await?;

        tracing::info!(
            network = %client.network.name,
            rpc_url = %client.network.display_url(),
            chain_id = client.network.chain_id,
            "Blockchain client initialized"
        );

        Ok(client)
    }

    /// Verify the connected chain ID matches configuration.
    pub async fn verify_chain_id(&self) -> BlockchainResult<()> {
        let chain_id = self.get_chain_id().await?;
        if chain_id != self.network.chain_id {
            return Err(BlockchainError::ChainMismatch {
                expected: self.network.chain_id,
                actual: chain_id,
            });
        }
        Ok(())
    }

    /// Pick the account that signs this run's transactions.
    ///
    /// Local keys come first. Node-managed networks use the node's first
    /// unlocked account. Anything else has no signer.
    pub async fn request_signer(&self) -> BlockchainResult<Signer> {
        if let Some(wallet) = self.network.accounts.first() {
            return Ok(Signer::Local(wallet.clone()));
        }

        if self.network.account_source == AccountSource::Node {
            let accounts = self.rpc(self.provider.get_accounts()).await?;
            if let Some(address) = accounts.first() {
                tracing::debug!(address = %address, "Using node-managed account");
                return Ok(Signer::Node(*address));
            }
        }

        Err(BlockchainError::NoSigner(self.network.name.clone()))
    }

    /// Get the chain ID from the RPC.
    pub async fn get_chain_id(&self) -> BlockchainResult<u64> {
        self.rpc(self.provider.get_chain_id()).await
    }

    /// Get the latest block number.
    pub async fn get_block_number(&self) -> BlockchainResult<u64> {
        self.rpc(self.provider.get_block_number()).await
    }

    /// Get the balance of an address.
    pub async fn get_balance(&self, address: Address) -> BlockchainResult<U256> {
        self.rpc(self.provider.get_balance(address)).await
    }

    /// Run one RPC call under the per-call timeout.
    async fn rpc<T, F>(&self, call: F) -> BlockchainResult<T>
    where
        F: IntoFuture<Output = TransportResult<T>>,
    {
        match timeout(self.timeouts.request, call).await {
            Ok(Ok(result)) => Ok(result),
            Ok(Err(e)) => {
                tracing::warn!(network = %self.network.name, error = %e, "RPC error");
                Err(BlockchainError::Rpc(e.to_string()))
            }
            Err(_) => {
                tracing::warn!(network = %self.network.name, "RPC timeout");
                Err(BlockchainError::Timeout(self.timeouts.request.as_secs()))
            }
        }
    }

    /// Provider used by the transaction sender.
    pub(crate) fn provider(&self) -> &(dyn Provider + Send + Sync) {
        self.provider.as_ref()
    }

    /// Get the network this client is bound to.
    pub fn network(&self) -> &ResolvedNetwork {
        &self.network
    }

    /// Get the configured timeouts.
    pub fn timeouts(&self) -> RpcTimeouts {
        self.timeouts
    }
}

impl std::fmt::Debug for BlockchainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockchainClient")
            .field("network", &self.network.name)
            .field("rpc_url", &self.network.display_url())
            .field("chain_id", &self.network.chain_id)
            .field("timeout_secs", &self.timeouts.request.as_secs())
            .finish()
    }
}
