//! Calls into the NFT collection.

use alloy::primitives::{Address, Bytes, U256};
use alloy::sol;
use alloy::sol_types::SolCall;

sol! {
    /// The slice of the collection's interface the deployer uses.
    interface ISimpleNFT {
        function batchMint(address to, uint256 quantity) external;
    }
}

/// Name of the mint function the NFT artifact must expose.
pub const BATCH_MINT: &str = "batchMint";

/// ABI-encoded `batchMint(to, quantity)`.
pub fn batch_mint_calldata(to: Address, quantity: u64) -> Bytes {
    ISimpleNFT::batchMintCall {
        to,
        quantity: U256::from(quantity),
    }
    .abi_encode()
    .into()
}
