use alloy::{
    network::TransactionBuilder,
    primitives::{keccak256, Address, Bytes, TxHash},
    providers::Provider,
    rpc::types::eth::TransactionRequest,
};
use async_trait::async_trait;
use ethers::{prelude::U256, utils::rlp};
#[cfg(test)]
use mockall::automock;
use tracing::{info, warn};

use crate::{artifacts::ContractArtifact, errors::ScriptError, tx::client::RpcProvider};

/// A contract confirmed on chain
#[derive(Debug, Clone, PartialEq)]
pub struct Deployment {
    /// The deployed contract name
    pub name: String,
    /// Address of the deployed contract
    pub address: Address,
    /// Hash of the creation transaction
    pub tx_hash: TxHash,
    /// Block including the creation transaction
    pub block_number: Option<u64>,
}

/// Deploys compiled contracts, waiting for their confirmation
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ContractDeployer: Send + Sync {
    /// Deploy `artifact` with the given abi encoded constructor arguments
    async fn deploy(
        &self,
        artifact: &ContractArtifact,
        constructor_args: Bytes,
    ) -> Result<Deployment, ScriptError>;
}

/// Deployer sending the creation transactions through our rpc client
pub struct RpcDeployer {
    /// The signing client
    client: RpcProvider,
    /// Address of the deployer, sender of the creation transactions
    deployer: Address,
}

impl RpcDeployer {
    /// Build a new deployer sending from `deployer`
    pub fn new(client: RpcProvider, deployer: Address) -> Self {
        Self { client, deployer }
    }
}

#[async_trait]
impl ContractDeployer for RpcDeployer {
    async fn deploy(
        &self,
        artifact: &ContractArtifact,
        constructor_args: Bytes,
    ) -> Result<Deployment, ScriptError> {
        // Predict the contract address
        let expected_address = predict_contract_address(self.deployer, self.client.clone()).await?;
        info!("Expecting {} at {}", artifact.name, expected_address);

        // Build the creation tx
        let tx_request = TransactionRequest::default()
            .with_from(self.deployer)
            .with_deploy_code(creation_code(artifact, &constructor_args));

        // Send it
        let pending_tx = self
            .client
            .send_transaction(tx_request)
            .await
            .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;
        info!(
            "Pending {} deployment transaction... {}",
            artifact.name,
            pending_tx.tx_hash()
        );

        // Wait for the transaction to be included.
        let receipt = pending_tx
            .get_receipt()
            .await
            .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;

        deployment_from_receipt(
            &artifact.name,
            DeploymentReceipt {
                status: receipt.status(),
                contract_address: receipt.contract_address,
                tx_hash: receipt.transaction_hash,
                block_number: receipt.block_number,
            },
            expected_address,
        )
    }
}

/// The parts of a creation tx receipt we care about
#[derive(Debug, Clone)]
pub struct DeploymentReceipt {
    /// Whether the creation succeeded
    pub status: bool,
    /// Address of the created contract
    pub contract_address: Option<Address>,
    /// Hash of the creation transaction
    pub tx_hash: TxHash,
    /// Block including the creation transaction
    pub block_number: Option<u64>,
}

/// Check the receipt of the creation of `name`
///
/// The receipt address wins over `expected_address`, a mismatch is only logged.
pub fn deployment_from_receipt(
    name: &str,
    receipt: DeploymentReceipt,
    expected_address: Address,
) -> Result<Deployment, ScriptError> {
    if !receipt.status {
        return Err(ScriptError::ContractDeployment(format!(
            "{} creation reverted in tx {}",
            name, receipt.tx_hash
        )));
    }

    let address = receipt.contract_address.ok_or_else(|| {
        ScriptError::ContractDeployment(format!(
            "no contract address in receipt of tx {}",
            receipt.tx_hash
        ))
    })?;
    if address != expected_address {
        warn!("{} deployed at {}, expected {}", name, address, expected_address);
    }
    info!("{} deployment done on block: {:?}", name, receipt.block_number);

    Ok(Deployment {
        name: name.to_string(),
        address,
        tx_hash: receipt.tx_hash,
        block_number: receipt.block_number,
    })
}

/// Creation calldata: the bytecode followed by the encoded constructor arguments
pub fn creation_code(artifact: &ContractArtifact, constructor_args: &Bytes) -> Bytes {
    let mut code = Vec::with_capacity(artifact.bytecode.len() + constructor_args.len());
    code.extend_from_slice(&artifact.bytecode);
    code.extend_from_slice(constructor_args);
    Bytes::from(code)
}

/// Predict the address of the next contract deployed by `deployer`
async fn predict_contract_address(
    deployer: Address,
    client: RpcProvider,
) -> Result<Address, ScriptError> {
    // Get the deployer nonce
    let deployer_nonce = client
        .get_transaction_count(deployer)
        .await
        .map_err(|e| ScriptError::NonceFetching(e.to_string()))?;

    Ok(contract_address_for(deployer, deployer_nonce))
}

/// Address of the contract created by `deployer` at `nonce`: `keccak256(rlp([deployer, nonce]))[12..]`
pub fn contract_address_for(deployer: Address, nonce: u64) -> Address {
    // Ethers RLP
    let mut stream = rlp::RlpStream::new();
    stream.begin_list(2);
    stream.append(&deployer.to_vec());
    stream.append(&U256::from(nonce));
    let hash = keccak256(stream.out());

    Address::from_slice(&hash[12..])
}
