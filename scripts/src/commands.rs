use alloy::{
    primitives::{Address, Bytes},
    sol_types::SolConstructor,
};
use tracing::info;

use crate::{
    artifacts::ArtifactSource,
    cli::DeployContractsArgs,
    constants::{RELAY_CONTRACT_NAME, RELAY_OUTPUT_KEY, TOKEN_CONTRACT_NAME, TOKEN_OUTPUT_KEY},
    deploy::{ContractDeployer, Deployment},
    errors::ScriptError,
    output_writer::{read_deployed_address, write_deployment},
    report::{address_block, deployed_line, DEPLOYMENT_STARTED},
    tx::{abi::RetentionRelay, reader::DeploymentReader},
};

/// The two contracts deployed by a full run
#[derive(Debug, Clone, PartialEq)]
pub struct DeployedAddresses {
    /// The mock MNEE token
    pub token: Deployment,
    /// The relay, bound to `token`
    pub relay: Deployment,
}

/// Deploy the mock token, then the relay bound to it
///
/// Each step waits for the previous one to be confirmed. A failure stops the run right away:
/// nothing is retried, and a token already deployed stays on chain.
pub async fn deploy_contracts(
    artifacts: &dyn ArtifactSource,
    deployer: &dyn ContractDeployer,
) -> Result<DeployedAddresses, ScriptError> {
    println!("{DEPLOYMENT_STARTED}");

    // Deploy the mock token, without constructor args
    let token_artifact = artifacts.load(TOKEN_CONTRACT_NAME)?;
    let token = deployer.deploy(&token_artifact, Bytes::new()).await?;
    println!("{}", deployed_line("MNEE Mock Token", token.address));

    // Deploy the relay, bound to the token
    let relay_artifact = artifacts.load(RELAY_CONTRACT_NAME)?;
    let relay = deployer
        .deploy(&relay_artifact, relay_constructor_args(token.address))
        .await?;
    println!("{}", deployed_line(RELAY_CONTRACT_NAME, relay.address));

    Ok(DeployedAddresses { token, relay })
}

/// Abi encoded constructor args of the relay
pub fn relay_constructor_args(token: Address) -> Bytes {
    Bytes::from(RetentionRelay::constructorCall { token }.abi_encode())
}

/// Deploy the contracts, print the addresses to copy & record them
pub async fn run_deploy_contracts(
    args: DeployContractsArgs,
    artifacts: &dyn ArtifactSource,
    deployer: &dyn ContractDeployer,
    output_file: &str,
) -> Result<DeployedAddresses, ScriptError> {
    // Parse the merchant before sending anything
    let merchant = args
        .merchant
        .as_deref()
        .map(|merchant| {
            merchant
                .parse::<Address>()
                .map_err(|e| ScriptError::InvalidAddress(format!("{merchant}: {e}")))
        })
        .transpose()?;

    let deployed = deploy_contracts(artifacts, deployer).await?;

    println!(
        "{}",
        address_block(deployed.token.address, deployed.relay.address, merchant)
    );

    if !args.no_output_file {
        write_deployment(output_file, TOKEN_OUTPUT_KEY, &deployed.token)?;
        write_deployment(output_file, RELAY_OUTPUT_KEY, &deployed.relay)?;
        info!("Addresses recorded in {}", output_file);
    }

    Ok(deployed)
}

/// Check the recorded contracts are live & bound together
pub async fn verify_deployment(
    output_file: &str,
    reader: &dyn DeploymentReader,
) -> Result<(), ScriptError> {
    // Fetch contract addresses from json
    let token = read_deployed_address(output_file, TOKEN_OUTPUT_KEY)?;
    let relay = read_deployed_address(output_file, RELAY_OUTPUT_KEY)?;

    for (name, address) in [(TOKEN_CONTRACT_NAME, token), (RELAY_CONTRACT_NAME, relay)] {
        if !reader.has_code(address).await? {
            return Err(ScriptError::Verification(format!(
                "no code for {name} at {address}"
            )));
        }
    }

    let (symbol, total_supply) = reader.token_summary(token).await?;
    info!("Token {} at {}, total supply {}", symbol, token, total_supply);

    let relay_token = reader.relay_token(relay).await?;
    check_relay_token(relay_token, token)?;
    info!("Relay at {} is bound to the token", relay);

    Ok(())
}

/// The relay must store the token it was deployed with
fn check_relay_token(relay_token: Address, token: Address) -> Result<(), ScriptError> {
    if relay_token != token {
        return Err(ScriptError::Verification(format!(
            "relay is bound to {relay_token}, expected token {token}"
        )));
    }

    Ok(())
}
