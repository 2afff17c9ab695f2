//! The deployment procedure.
//!
//! Strictly sequential: each step is awaited before the next starts and the
//! first failure ends the run. The record is only written once every
//! on-chain step has succeeded.

use alloy::primitives::utils::format_ether;
use alloy::primitives::U256;
use std::path::PathBuf;

use crate::config::DeployConfig;
use crate::contracts::nft::BATCH_MINT;
use crate::contracts::ContractArtifact;
use crate::deploy::backend::ChainBackend;
use crate::deploy::record::DeploymentRecord;
use crate::error::{Error, Result};

/// Everything a run needs that does not come from the chain.
#[derive(Debug, Clone)]
pub struct DeploymentPlan {
    pub network: String,
    pub chain_id: u64,
    pub nft: ContractArtifact,
    pub auction: ContractArtifact,
    pub mint_count: u64,
    pub output_dir: PathBuf,
}

impl DeploymentPlan {
    /// Load both artifacts and check the NFT can be minted from.
    ///
    /// Runs before any network traffic so a missing artifact fails fast.
    pub fn prepare(
        config: &DeployConfig,
        network: &str,
        chain_id: u64,
        mint_override: Option<u64>,
        output_override: Option<PathBuf>,
    ) -> Result<Self> {
        let nft_cfg = &config.contracts.nft;
        let auction_cfg = &config.contracts.auction;

        let nft = ContractArtifact::load(&nft_cfg.name, &nft_cfg.artifact_path(&config.artifacts_dir))?;
        let auction = ContractArtifact::load(
            &auction_cfg.name,
            &auction_cfg.artifact_path(&config.artifacts_dir),
        )?;

        let mint_count = mint_override.unwrap_or(config.deploy.mint_count);
        if mint_count > 0 && !nft.has_function(BATCH_MINT) {
            return Err(Error::MissingFunction {
                contract: nft.name.clone(),
                function: BATCH_MINT,
            });
        }

        Ok(Self {
            network: network.to_string(),
            chain_id,
            nft,
            auction,
            mint_count,
            output_dir: output_override.unwrap_or_else(|| config.output_dir.clone()),
        })
    }
}

/// What a successful run leaves behind.
#[derive(Debug, Clone)]
pub struct DeploymentOutcome {
    pub record: DeploymentRecord,
    pub record_path: PathBuf,
    pub starting_balance: U256,
    pub minted: u64,
}

/// Execute a plan against a backend.
pub async fn run<B: ChainBackend>(plan: &DeploymentPlan, backend: &B) -> Result<DeploymentOutcome> {
    let deployer = backend.deployer();
    tracing::info!(network = %plan.network, deployer = %deployer, "Starting deployment");

    let starting_balance = backend.balance().await?;
    tracing::info!(
        deployer = %deployer,
        balance_wei = %starting_balance,
        balance = %format_ether(starting_balance),
        "Deployer balance"
    );

    tracing::info!(contract = %plan.nft.name, "Deploying contract");
    let nft_address = backend
        .deploy_contract(&plan.nft.name, plan.nft.bytecode.clone())
        .await?;
    tracing::info!(contract = %plan.nft.name, address = %nft_address, "Contract deployed");

    tracing::info!(contract = %plan.auction.name, "Deploying contract");
    let auction_address = backend
        .deploy_contract(&plan.auction.name, plan.auction.bytecode.clone())
        .await?;
    tracing::info!(contract = %plan.auction.name, address = %auction_address, "Contract deployed");

    if plan.mint_count > 0 {
        tracing::info!(quantity = plan.mint_count, to = %deployer, "Minting test tokens");
        backend
            .batch_mint(nft_address, deployer, plan.mint_count)
            .await?;
        tracing::info!(quantity = plan.mint_count, "Minted test tokens to deployer");
    } else {
        tracing::info!("Mint count is 0, skipping test mint");
    }

    let record = DeploymentRecord::new(
        &plan.network,
        plan.chain_id,
        nft_address,
        auction_address,
        deployer,
    )?;
    let record_path = record.write_to(&plan.output_dir)?;

    Ok(DeploymentOutcome {
        record,
        record_path,
        starting_balance,
        minted: plan.mint_count,
    })
}
