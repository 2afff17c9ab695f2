//! Human-readable transcript printed after a run.
//!
//! Not a stable interface: scripts should read the JSON record instead.

use alloy::primitives::utils::format_ether;
use std::fmt;

use crate::config::ExplorerConfig;
use crate::deploy::runner::DeploymentOutcome;

const RULE_WIDTH: usize = 60;

/// Render the deployment summary and next steps.
pub fn render(
    outcome: &DeploymentOutcome,
    nft_name: &str,
    auction_name: &str,
    explorer: Option<&ExplorerConfig>,
) -> String {
    Summary {
        outcome,
        nft_name,
        auction_name,
        explorer,
    }
    .to_string()
}

struct Summary<'a> {
    outcome: &'a DeploymentOutcome,
    nft_name: &'a str,
    auction_name: &'a str,
    explorer: Option<&'a ExplorerConfig>,
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let record = &self.outcome.record;
        let rule = "=".repeat(RULE_WIDTH);

        writeln!(f, "{}", rule)?;
        writeln!(f, "DEPLOYMENT SUMMARY")?;
        writeln!(f, "{}", rule)?;
        writeln!(f, "{} Contract: {}", self.nft_name, record.nft_contract)?;
        writeln!(f, "{} Contract: {}", self.auction_name, record.auction_contract)?;
        writeln!(f, "Network: {}", record.network)?;
        writeln!(f, "Chain ID: {}", record.chain_id)?;
        writeln!(f, "Deployer: {}", record.deployer)?;
        writeln!(f, "Starting balance: {}", format_ether(self.outcome.starting_balance))?;
        writeln!(f, "Test tokens minted: {}", self.outcome.minted)?;
        writeln!(f, "{}", rule)?;

        writeln!(f)?;
        writeln!(f, "Next steps:")?;
        writeln!(f, "1. Point clients at the deployed contracts:")?;
        writeln!(f, "   auctionContractAddress = '{}'", record.auction_contract)?;
        writeln!(f, "   nftContractAddress = '{}'", record.nft_contract)?;

        writeln!(f)?;
        match self.explorer {
            Some(explorer) => {
                writeln!(f, "2. To verify contracts on the explorer:")?;
                writeln!(f, "   nft-deploy verify --network {}", record.network)?;
                if !explorer.browser_url.is_empty() {
                    let base = explorer.browser_url.trim_end_matches('/');
                    writeln!(f, "   {}/address/{}", base, record.auction_contract)?;
                    writeln!(f, "   {}/address/{}", base, record.nft_contract)?;
                }
            }
            None => {
                writeln!(
                    f,
                    "2. Network '{}' has no explorer configured; skip verification.",
                    record.network
                )?;
            }
        }

        writeln!(f)?;
        writeln!(f, "Deployment info saved to {}", self.outcome.record_path.display())
    }
}
