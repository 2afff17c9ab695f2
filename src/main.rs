//! nft-deploy
//!
//! Deploys an NFT collection and an auction house to an EVM network, mints
//! sample tokens to the deployer, and records the result.
//!
//! # Flow
//!
//! ```text
//!   .env + environment ──┐
//!                        ▼
//!   deploy.toml ──▶ DeployConfig ──▶ ResolvedNetwork ──▶ signer
//!                                                          │
//!                                                          ▼
//!   artifacts/ ──▶ DeploymentPlan ──▶ deploy nft ──▶ deploy auction ──▶ batchMint
//!                                                                         │
//!                                                                         ▼
//!                                               deployment-<network>.json + summary
//! ```
//!
//! Any failure is logged and the process exits with status 1.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use nft_deploy::commands::{self, DeployOptions, VerifyOptions};
use nft_deploy::config::{load_or_default, loader::DEFAULT_CONFIG_FILE, Env};
use nft_deploy::observability::logging;

#[derive(Parser)]
#[command(name = "nft-deploy")]
#[command(about = "Deploy the NFT and auction contracts and record the result", long_about = None)]
struct Cli {
    /// Config file. Built-in networks are used when the default file is absent.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Environment file to load instead of searching for `.env`.
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Deploy both contracts, mint test tokens, write deployment-<network>.json
    Deploy {
        /// Network to deploy to (defaults to `default_network`).
        #[arg(short, long)]
        network: Option<String>,

        /// Directory for the deployment record.
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Number of test tokens to mint (0 skips the mint).
        #[arg(short, long)]
        mint: Option<u64>,
    },
    /// Submit a deployment's contracts for explorer verification
    Verify {
        /// Network the record belongs to.
        #[arg(short, long)]
        network: Option<String>,

        /// Record file (defaults to deployment-<network>.json in the output dir).
        #[arg(short, long)]
        record: Option<PathBuf>,
    },
    /// List configured networks
    Networks,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // --help and --version land here too.
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Deployment tool failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> nft_deploy::Result<()> {
    let explicit = cli.config.is_some();
    let config_path = cli.config.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

    let bootstrap = logging::subscriber(cli.log_level.as_deref().unwrap_or(logging::BOOTSTRAP_LEVEL));
    let (env, config) = tracing::subscriber::with_default(bootstrap, || -> nft_deploy::Result<_> {
        let env = Env::load(cli.env_file.as_deref())?;
        let config = load_or_default(&config_path, explicit)?;
        Ok((env, config))
    })?;

    let level = cli.log_level.as_deref().unwrap_or(&config.observability.log_level);
    logging::init(level);
    tracing::debug!(
        config = %config_path.display(),
        networks = config.networks.len(),
        default_network = %config.default_network,
        "Configuration ready"
    );

    match cli.command {
        Commands::Deploy { network, out_dir, mint } => {
            commands::deploy(
                &config,
                &env,
                DeployOptions {
                    network,
                    output_dir: out_dir,
                    mint_count: mint,
                },
            )
            .await?;
        }
        Commands::Verify { network, record } => {
            commands::verify(&config, &env, VerifyOptions { network, record }).await?;
        }
        Commands::Networks => {
            let rows = commands::networks(&config, &env)?;
            print!("{}", commands::render_networks(&rows));
        }
    }

    Ok(())
}
