//! Transaction building, broadcasting, and receipt monitoring.
//!
//! # Responsibilities
//! - Build requests from the signer (fixed gas price when configured)
//! - Broadcast through the client's provider
//! - Wait for the receipt under a timeout
//! - Turn failed receipts into errors
//!
//! Nothing here retries: a failed broadcast or a revert ends the run.

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes};
use alloy::rpc::types::{TransactionReceipt, TransactionRequest};
use tokio::time::timeout;

use crate::blockchain::client::BlockchainClient;
use crate::blockchain::types::{BlockchainError, BlockchainResult, TxOutcome};
use crate::blockchain::wallet::Signer;

/// Sends transactions on behalf of one signer.
pub struct TxSender {
    client: BlockchainClient,
    signer: Signer,
}

impl TxSender {
    /// Create a new sender.
    pub fn new(client: BlockchainClient, signer: Signer) -> Self {
        Self { client, signer }
    }

    /// Base request carrying the sender and the network's gas price policy.
    fn request(&self) -> TransactionRequest {
        let tx = TransactionRequest::default().with_from(self.signer.address());
        match self.client.network().gas_price {
            Some(gas_price) => tx.with_gas_price(gas_price),
            None => tx,
        }
    }

    /// Deploy creation bytecode and return the outcome with its address.
    pub async fn deploy(&self, label: &str, bytecode: Bytes) -> BlockchainResult<TxOutcome> {
        let tx = self.request().with_deploy_code(bytecode);
        let outcome = self.send(label, tx).await?;
        if outcome.contract_address.is_none() {
            return Err(BlockchainError::MissingContractAddress(label.to_string()));
        }
        Ok(outcome)
    }

    /// Call a contract with pre-encoded calldata.
    pub async fn call(&self, label: &str, to: Address, calldata: Bytes) -> BlockchainResult<TxOutcome> {
        let tx = self.request().with_to(to).with_input(calldata);
        self.send(label, tx).await
    }

    /// Broadcast a request and wait for its receipt.
    async fn send(&self, label: &str, tx: TransactionRequest) -> BlockchainResult<TxOutcome> {
        let timeouts = self.client.timeouts();

        let pending = match timeout(timeouts.request, self.client.provider().send_transaction(tx)).await {
            Ok(Ok(pending)) => pending,
            Ok(Err(e)) => return Err(BlockchainError::Rpc(format!("{} broadcast failed: {}", label, e))),
            Err(_) => return Err(BlockchainError::Timeout(timeouts.request.as_secs())),
        };

        let tx_hash = pending.tx_hash().to_string();
        tracing::info!(tx = %label, tx_hash = %tx_hash, "Transaction broadcast");

        let receipt = pending.with_required_confirmations(timeouts.confirmations).get_receipt();
        let receipt = match timeout(timeouts.receipt, receipt).await {
            Ok(Ok(receipt)) => receipt,
            Ok(Err(e)) => return Err(BlockchainError::Rpc(format!("{} receipt failed: {}", label, e))),
            Err(_) => {
                return Err(BlockchainError::ConfirmationTimeout {
                    tx_hash,
                    secs: timeouts.receipt.as_secs(),
                })
            }
        };

        let outcome = outcome_from_receipt(&receipt);
        if !receipt.status() {
            return Err(BlockchainError::Reverted(format!("{} ({})", label, outcome.tx_hash)));
        }

        tracing::debug!(
            tx = %label,
            block_number = ?outcome.block_number,
            gas_used = outcome.gas_used,
            "Transaction confirmed"
        );

        Ok(outcome)
    }

    /// Get the signer.
    pub fn signer(&self) -> &Signer {
        &self.signer
    }

    /// Get the client.
    pub fn client(&self) -> &BlockchainClient {
        &self.client
    }
}

fn outcome_from_receipt(receipt: &TransactionReceipt) -> TxOutcome {
    TxOutcome {
        tx_hash: receipt.transaction_hash.to_string(),
        block_number: receipt.block_number,
        gas_used: receipt.gas_used,
        contract_address: receipt.contract_address,
    }
}
