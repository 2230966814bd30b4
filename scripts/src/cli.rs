//! Definitions of CLI arguments and commands for deploy scripts

use clap::{Args, Parser, Subcommand};
use tracing::info;

use crate::{
    artifacts::ArtifactDirectory,
    commands::{run_deploy_contracts, verify_deployment},
    constants::{DEFAULT_ARTIFACTS_DIR, DEFAULT_OUTPUT_FILE, DEFAULT_RPC},
    deploy::RpcDeployer,
    errors::ScriptError,
    tx::{
        client::{create_read_provider, create_rpc_provider, require_signer},
        reader::RpcReader,
    },
};

/// Scripts for deploying the MNEE mock token & the RetentionRelay contract
#[derive(Parser)]
#[command(version)]
pub struct Cli {
    /// Private key of the deployer, only needed to deploy
    #[arg(short, long, env = "PRIVATE_KEY", hide_env_values = true)]
    pub priv_key: Option<String>,

    /// Network RPC URL
    #[arg(short, long, env = "RPC_URL", default_value = DEFAULT_RPC)]
    pub rpc_url: String,

    /// Directory holding the compiled contract artifacts
    #[arg(short, long, default_value = DEFAULT_ARTIFACTS_DIR)]
    pub artifacts: String,

    /// File where the deployed addresses are recorded
    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
    pub output: String,

    /// The command to run
    #[command(subcommand)]
    pub command: Command,
}

/// The possible CLI commands
#[derive(Subcommand)]
pub enum Command {
    /// Deploy the token, then the relay bound to it
    DeployContracts(DeployContractsArgs),
    /// Check the recorded contracts are live & the relay is bound to the token
    VerifyDeployment,
}

impl Command {
    /// Run the command
    pub async fn run(
        self,
        rpc_url: &str,
        priv_key: Option<&str>,
        artifacts_dir: &str,
        output_file: &str,
    ) -> Result<(), ScriptError> {
        match self {
            Command::DeployContracts(args) => {
                // Build our RPC client with signer
                let signer = require_signer(priv_key)?;
                let deployer_address = signer.address();
                let client = create_rpc_provider(signer, rpc_url).await?;

                info!("Deploying contracts from {}...", deployer_address);
                let artifacts = ArtifactDirectory::new(artifacts_dir);
                let deployer = RpcDeployer::new(client, deployer_address);
                run_deploy_contracts(args, &artifacts, &deployer, output_file).await?;

                Ok(())
            }
            Command::VerifyDeployment => {
                info!("Verifying deployment recorded in {}...", output_file);
                let reader = RpcReader::new(create_read_provider(rpc_url).await?);
                verify_deployment(output_file, &reader).await
            }
        }
    }
}

/// Deploy contracts
#[derive(Args)]
pub struct DeployContractsArgs {
    /// Address of the merchant, printed with the deployed addresses
    #[arg(short, long)]
    pub merchant: Option<String>,

    /// Only print the addresses, don't record them
    #[arg(long)]
    pub no_output_file: bool,
}
