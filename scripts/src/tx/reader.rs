use alloy::{
    primitives::{Address, U256},
    providers::Provider,
};
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::{
    errors::ScriptError,
    tx::{
        abi::{IMockToken, RetentionRelay},
        client::ReadProvider,
    },
};

/// Read access to the deployed contracts
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DeploymentReader: Send + Sync {
    /// Check that some code lives at `contract_address`
    async fn has_code(&self, contract_address: Address) -> Result<bool, ScriptError>;

    /// Get the token address stored by the relay contract
    async fn relay_token(&self, relay_address: Address) -> Result<Address, ScriptError>;

    /// Get the symbol & total supply of the token
    async fn token_summary(&self, token_address: Address)
        -> Result<(String, U256), ScriptError>;
}

/// Reader performing the calls through a read only rpc client
pub struct RpcReader {
    /// The rpc client
    client: ReadProvider,
}

impl RpcReader {
    /// Build a new reader on top of `client`
    pub fn new(client: ReadProvider) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DeploymentReader for RpcReader {
    async fn has_code(&self, contract_address: Address) -> Result<bool, ScriptError> {
        let code = self
            .client
            .get_code_at(contract_address)
            .await
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;

        Ok(!code.is_empty())
    }

    async fn relay_token(&self, relay_address: Address) -> Result<Address, ScriptError> {
        // Build our contract
        let contract = RetentionRelay::new(relay_address, self.client.clone());

        // Read the smart contract
        let token = contract
            .token()
            .call()
            .await
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;

        Ok(token._0)
    }

    async fn token_summary(
        &self,
        token_address: Address,
    ) -> Result<(String, U256), ScriptError> {
        let contract = IMockToken::new(token_address, self.client.clone());

        let symbol = contract
            .symbol()
            .call()
            .await
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;
        let total_supply = contract
            .totalSupply()
            .call()
            .await
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;

        Ok((symbol._0, total_supply._0))
    }
}
