//! Command implementations behind the CLI.
//!
//! Each command is one linear procedure; errors bubble up unchanged and the
//! binary turns them into exit status 1.

use std::path::PathBuf;

use crate::blockchain::{BlockchainClient, BlockchainError, RpcTimeouts, TxSender};
use crate::config::{AccountSource, DeployConfig, Env};
use crate::deploy::{self, summary, DeploymentOutcome, DeploymentPlan, DeploymentRecord, RpcBackend};
use crate::error::Result;
use crate::verify::{self, VerificationReport};

/// Options for `deploy`.
#[derive(Debug, Clone, Default)]
pub struct DeployOptions {
    pub network: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub mint_count: Option<u64>,
}

/// Options for `verify`.
#[derive(Debug, Clone, Default)]
pub struct VerifyOptions {
    pub network: Option<String>,
    pub record: Option<PathBuf>,
}

/// Deploy both contracts, mint, and write the record.
pub async fn deploy(config: &DeployConfig, env: &Env, options: DeployOptions) -> Result<DeploymentOutcome> {
    let name = config.network_name(options.network.as_deref()).to_string();
    let network = config.resolve_network(&name, env)?;
    tracing::info!(
        network = %network.name,
        chain_id = network.chain_id,
        rpc_url = %network.display_url(),
        "Network selected"
    );

    // Key-dependent networks without a key cannot sign; no need to dial out.
    if network.account_source == AccountSource::PrivateKeyEnv && network.accounts.is_empty() {
        return Err(BlockchainError::NoSigner(network.name).into());
    }

    let plan = DeploymentPlan::prepare(
        config,
        &network.name,
        network.chain_id,
        options.mint_count,
        options.output_dir,
    )?;

    let client = BlockchainClient::connect(network, RpcTimeouts::from(&config.deploy)).await?;
    let signer = client.request_signer().await?;
    tracing::info!(deployer = %signer.address(), local = signer.is_local(), "Deploying contracts with account");

    let backend = RpcBackend::new(TxSender::new(client.clone(), signer));
    let outcome = deploy::run(&plan, &backend).await?;

    let explorer = client
        .network()
        .explorer
        .as_ref()
        .and_then(|name| config.explorers.get(name));
    print!(
        "{}",
        summary::render(&outcome, &plan.nft.name, &plan.auction.name, explorer)
    );

    Ok(outcome)
}

/// Verify a previous deployment's contracts on the network's explorer.
pub async fn verify(config: &DeployConfig, env: &Env, options: VerifyOptions) -> Result<Vec<VerificationReport>> {
    let name = config.network_name(options.network.as_deref()).to_string();
    let network = config.resolve_network(&name, env)?;

    let record_path = options
        .record
        .unwrap_or_else(|| config.output_dir.join(DeploymentRecord::file_name_for(&name)));
    let record = DeploymentRecord::read_from(&record_path)?;
    tracing::info!(record = %record_path.display(), network = %name, "Verifying deployment");

    let client = verify::explorer_for(config, &network, env)?;
    let reports = verify::verify_deployment(config, &network, &record, &client).await?;

    for report in &reports {
        println!("{} {}: {:?}", report.contract, report.address, report.status);
    }
    Ok(reports)
}

/// One row of the `networks` listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkSummary {
    pub name: String,
    pub chain_id: u64,
    pub signer: &'static str,
    pub accounts: usize,
    pub gas_price: Option<u128>,
    pub explorer: Option<String>,
    pub is_default: bool,
}

/// Describe every configured network as seen with the current environment.
pub fn networks(config: &DeployConfig, env: &Env) -> Result<Vec<NetworkSummary>> {
    let mut rows = Vec::with_capacity(config.networks.len());
    for name in config.networks.keys() {
        let network = config.resolve_network(name, env)?;
        rows.push(NetworkSummary {
            name: network.name.clone(),
            chain_id: network.chain_id,
            signer: match network.account_source {
                AccountSource::PrivateKeyEnv => "private key",
                AccountSource::Node => "node",
            },
            accounts: network.accounts.len(),
            gas_price: network.gas_price,
            explorer: network.explorer.clone(),
            is_default: *name == config.default_network,
        });
    }
    Ok(rows)
}

/// Render the `networks` listing.
pub fn render_networks(rows: &[NetworkSummary]) -> String {
    let mut out = format!(
        "{:<2}{:<14}{:>10}  {:<12}{:>9}  {:<12}{}\n",
        "", "NETWORK", "CHAIN ID", "SIGNER", "ACCOUNTS", "GAS PRICE", "EXPLORER"
    );
    for row in rows {
        let accounts = match (row.signer, row.accounts) {
            ("node", _) => "-".to_string(),
            (_, n) => n.to_string(),
        };
        let gas_price = row
            .gas_price
            .map(|wei| format!("{} gwei", wei / 1_000_000_000))
            .unwrap_or_else(|| "auto".to_string());
        out.push_str(&format!(
            "{:<2}{:<14}{:>10}  {:<12}{:>9}  {:<12}{}\n",
            if row.is_default { "*" } else { "" },
            row.name,
            row.chain_id,
            row.signer,
            accounts,
            gas_price,
            row.explorer.as_deref().unwrap_or("-"),
        ));
    }
    out
}
