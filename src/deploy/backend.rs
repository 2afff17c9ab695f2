//! The seam between the deployment procedure and the chain.

use alloy::primitives::{Address, Bytes, U256};
use std::future::Future;

use crate::blockchain::{BlockchainError, BlockchainResult, TxSender};
use crate::contracts::nft::batch_mint_calldata;

/// Chain operations a deployment run needs, in the order it needs them.
pub trait ChainBackend {
    /// Address of the signer.
    fn deployer(&self) -> Address;

    /// Native balance of the signer, in wei.
    fn balance(&self) -> impl Future<Output = BlockchainResult<U256>>;

    /// Create a contract and return its address.
    fn deploy_contract(
        &self,
        name: &str,
        bytecode: Bytes,
    ) -> impl Future<Output = BlockchainResult<Address>>;

    /// Mint `quantity` tokens from `nft` to `to`.
    fn batch_mint(
        &self,
        nft: Address,
        to: Address,
        quantity: u64,
    ) -> impl Future<Output = BlockchainResult<()>>;
}

/// Backend that talks to a JSON-RPC node.
pub struct RpcBackend {
    sender: TxSender,
}

impl RpcBackend {
    pub fn new(sender: TxSender) -> Self {
        Self { sender }
    }
}

impl ChainBackend for RpcBackend {
    fn deployer(&self) -> Address {
        self.sender.signer().address()
    }

    fn balance(&self) -> impl Future<Output = BlockchainResult<U256>> {
        self.sender.client().get_balance(self.deployer())
    }

    fn deploy_contract(
        &self,
        name: &str,
        bytecode: Bytes,
    ) -> impl Future<Output = BlockchainResult<Address>> {
        let name = name.to_string();
        async move {
            let outcome = self.sender.deploy(&name, bytecode).await?;
            outcome
                .contract_address
                .ok_or(BlockchainError::MissingContractAddress(name))
        }
    }

    fn batch_mint(
        &self,
        nft: Address,
        to: Address,
        quantity: u64,
    ) -> impl Future<Output = BlockchainResult<()>> {
        async move {
            self.sender
                .call("batchMint", nft, batch_mint_calldata(to, quantity))
                .await
                .map(|_| ())
        }
    }
}
