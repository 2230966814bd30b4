use alloy::{
    hex,
    network::{Ethereum, EthereumWallet},
    primitives::B256,
    providers::{
        fillers::{ChainIdFiller, FillProvider, GasFiller, JoinFill, NonceFiller, WalletFiller},
        Identity, Provider, ProviderBuilder, ReqwestProvider,
    },
    signers::local::PrivateKeySigner,
};
use reqwest::{Client, Url};
use tracing::info;

use crate::errors::ScriptError;

/// Re-export from alloy recommend filter
type RecommendFiller =
    JoinFill<JoinFill<JoinFill<Identity, GasFiller>, NonceFiller>, ChainIdFiller>;

/// An alloy provider that uses a `PrivateKeySigner` to generate signatures
/// & interfaces with the RPC endpoint over HTTP
pub type RpcProvider = FillProvider<
    JoinFill<RecommendFiller, WalletFiller<EthereumWallet>>,
    ReqwestProvider,
    alloy::transports::http::Http<Client>,
    Ethereum,
>;

/// A plain HTTP provider, enough for read calls
pub type ReadProvider = ReqwestProvider;

/// Build the deployer signer from its hex encoded private key (with or without `0x`)
pub fn parse_signer(priv_key: &str) -> Result<PrivateKeySigner, ScriptError> {
    let key_bytes = hex::decode(priv_key.trim().trim_start_matches("0x"))
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
    if key_bytes.len() != 32 {
        return Err(ScriptError::ClientInitialization(format!(
            "private key must be 32 bytes, got {}",
            key_bytes.len()
        )));
    }

    PrivateKeySigner::from_bytes(&B256::from_slice(&key_bytes))
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))
}

/// Build the deployer signer, failing when no private key was given
pub fn require_signer(priv_key: Option<&str>) -> Result<PrivateKeySigner, ScriptError> {
    let priv_key = priv_key.ok_or_else(|| {
        ScriptError::ClientInitialization(String::from(
            "no private key, set PRIVATE_KEY or pass --priv-key",
        ))
    })?;

    parse_signer(priv_key)
}

/// Sets up the client used to deploy & read the contracts, signing with `signer`
pub async fn create_rpc_provider(
    signer: PrivateKeySigner,
    rpc_url: &str,
) -> Result<RpcProvider, ScriptError> {
    let url = rpc_url
        .parse::<Url>()
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;

    let wallet = EthereumWallet::from(signer);

    // Create our provider with the rpc client + signer
    let provider = ProviderBuilder::new()
        .with_recommended_fillers()
        .wallet(wallet)
        .on_http(url);

    // Fetch chain id, also checks that the node is reachable
    let chain_id = provider
        .get_chain_id()
        .await
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;

    info!("Build client on chain ID: {}", chain_id);

    Ok(provider)
}

/// Sets up a client without signer, used to read the deployed contracts
pub async fn create_read_provider(rpc_url: &str) -> Result<ReadProvider, ScriptError> {
    let url = rpc_url
        .parse::<Url>()
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;

    let provider = ProviderBuilder::new().on_http(url);

    let chain_id = provider
        .get_chain_id()
        .await
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;

    info!("Build read client on chain ID: {}", chain_id);

    Ok(provider)
}

#[cfg(test)]
mod tests {
    use alloy::primitives::address;

    use super::*;

    /// First account of the hardhat / anvil development mnemonic
    const DEV_PRIVATE_KEY: &str =
        "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn parse_signer_from_hex() {
        let signer = parse_signer(DEV_PRIVATE_KEY).unwrap();

        assert_eq!(
            signer.address(),
            address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266")
        );
    }

    #[test]
    fn parse_signer_with_prefix() {
        let signer = parse_signer(&format!("0x{DEV_PRIVATE_KEY}")).unwrap();

        assert_eq!(
            signer.address(),
            address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266")
        );
    }

    #[test]
    fn missing_private_key_is_a_client_error() {
        assert!(matches!(
            require_signer(None),
            Err(ScriptError::ClientInitialization(_))
        ));
    }

    #[test]
    fn require_signer_with_key() {
        let signer = require_signer(Some(DEV_PRIVATE_KEY)).unwrap();

        assert_eq!(
            signer.address(),
            address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266")
        );
    }

    #[test]
    fn reject_short_private_key() {
        assert!(matches!(
            parse_signer("0xdeadbeef"),
            Err(ScriptError::ClientInitialization(_))
        ));
    }

    #[test]
    fn reject_non_hex_private_key() {
        assert!(matches!(
            parse_signer("not a key"),
            Err(ScriptError::ClientInitialization(_))
        ));
    }
}
