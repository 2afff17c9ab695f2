//! Blockchain client behaviour against a mock JSON-RPC node.

use alloy::primitives::{address, U256};
use nft_deploy::blockchain::{BlockchainClient, BlockchainError, RpcTimeouts, Signer};
use nft_deploy::config::{AccountSource, DeployConfig, Env, NetworkConfig};
use serde_json::json;
use std::time::Duration;

mod common;

fn timeouts() -> RpcTimeouts {
    RpcTimeouts {
        request: Duration::from_secs(5),
        receipt: Duration::from_secs(5),
        confirmations: 1,
    }
}

fn local_network(url: String, chain_id: u64, accounts: AccountSource) -> DeployConfig {
    let mut config = DeployConfig::default();
    config.networks.insert(
        "local".into(),
        NetworkConfig {
            url,
            chain_id,
            accounts,
            gas_price: None,
            explorer: None,
        },
    );
    config
}

#[tokio::test]
async fn test_connect_verifies_chain_id() {
    let addr = common::start_mock_server(|req| match common::rpc_method(&req).as_str() {
        "eth_chainId" => common::rpc_result(&req, json!("0x539")),
        "eth_accounts" => common::rpc_result(
            &req,
            json!(["0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"]),
        ),
        "eth_getBalance" => common::rpc_result(&req, json!("0xde0b6b3a7640000")),
        "eth_blockNumber" => common::rpc_result(&req, json!("0x10")),
        _ => (400, "{}".into()),
    })
    .await;

    let config = local_network(format!("http://{}", addr), 1337, AccountSource::Node);
    let network = config.resolve_network("local", &Env::default()).unwrap();

    let client = BlockchainClient::connect(network, timeouts()).await.unwrap();
    assert_eq!(client.get_block_number().await.unwrap(), 16);

    let signer = client.request_signer().await.unwrap();
    let expected = address!("f39fd6e51aad88f6f4ce6ab8827279cfffb92266");
    assert!(matches!(signer, Signer::Node(a) if a == expected));

    let balance = client.get_balance(expected).await.unwrap();
    assert_eq!(balance, U256::from(1_000_000_000_000_000_000u64));
}

#[tokio::test]
async fn test_connect_rejects_wrong_chain() {
    // BSC testnet answers where a local node was expected.
    let addr = common::start_mock_server(|req| common::rpc_result(&req, json!("0x61"))).await;

    let config = local_network(format!("http://{}", addr), 1337, AccountSource::Node);
    let network = config.resolve_network("local", &Env::default()).unwrap();

    let err = BlockchainClient::connect(network, timeouts()).await.unwrap_err();
    assert!(matches!(
        err,
        BlockchainError::ChainMismatch {
            expected: 1337,
            actual: 97
        }
    ));
}

#[tokio::test]
async fn test_node_without_accounts_has_no_signer() {
    let addr = common::start_mock_server(|req| match common::rpc_method(&req).as_str() {
        "eth_chainId" => common::rpc_result(&req, json!("0x539")),
        _ => common::rpc_result(&req, json!([])),
    })
    .await;

    let config = local_network(format!("http://{}", addr), 1337, AccountSource::Node);
    let network = config.resolve_network("local", &Env::default()).unwrap();

    let client = BlockchainClient::connect(network, timeouts()).await.unwrap();
    let err = client.request_signer().await.unwrap_err();
    assert!(matches!(err, BlockchainError::NoSigner(name) if name == "local"));
}

#[tokio::test]
async fn test_local_key_is_preferred() {
    let addr = common::start_mock_server(|req| common::rpc_result(&req, json!("0x539"))).await;

    let config = local_network(format!("http://{}", addr), 1337, AccountSource::PrivateKeyEnv);
    let env: Env = [(
        "PRIVATE_KEY",
        "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
    )]
    .into_iter()
    .collect();
    let network = config.resolve_network("local", &env).unwrap();

    let client = BlockchainClient::connect(network, timeouts()).await.unwrap();
    let signer = client.request_signer().await.unwrap();
    assert!(signer.is_local());
    assert_eq!(
        signer.address(),
        address!("f39fd6e51aad88f6f4ce6ab8827279cfffb92266")
    );
}

#[tokio::test]
async fn test_rpc_error_surfaces() {
    let addr = common::start_mock_server(|req| {
        let parsed: serde_json::Value = serde_json::from_str(&req.body).unwrap_or_default();
        let body = json!({
            "jsonrpc": "2.0",
            "id": parsed["id"].clone(),
            "error": {"code": -32000, "message": "node is syncing"}
        });
        (200, body.to_string())
    })
    .await;

    let config = local_network(format!("http://{}", addr), 1337, AccountSource::Node);
    let network = config.resolve_network("local", &Env::default()).unwrap();

    let err = BlockchainClient::connect(network, timeouts()).await.unwrap_err();
    assert!(matches!(err, BlockchainError::Rpc(msg) if msg.contains("syncing")));
}
