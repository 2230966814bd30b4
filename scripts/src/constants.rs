//! Constants used in the deploy scripts

/// Default RPC endpoint, a local development node
pub const DEFAULT_RPC: &str = "http://127.0.0.1:8545";

/// Default directory holding the compiled contract artifacts
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts/contracts";

/// Default file where the deployed addresses are recorded
pub const DEFAULT_OUTPUT_FILE: &str = "deployed.json";

/// Name of the mock MNEE ERC20 token contract
pub const TOKEN_CONTRACT_NAME: &str = "MNEE_Mock_Token";

/// Name of the relay contract, constructed with the token address
pub const RELAY_CONTRACT_NAME: &str = "RetentionRelay";

/// Key of the token contract inside the output file
pub const TOKEN_OUTPUT_KEY: &str = "token";

/// Key of the relay contract inside the output file
pub const RELAY_OUTPUT_KEY: &str = "relay";

/// Printed in place of the merchant address when none is given
pub const MERCHANT_PLACEHOLDER: &str = "YOUR_SECOND_METAMASK_ADDRESS_HERE";
