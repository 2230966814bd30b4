//! Definitions of errors that can occur during the execution of the deployment scripts

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// Errors that can occur during the execution of the deployment scripts
#[derive(Debug)]
pub enum ScriptError {
    /// Error when reading or writing the output file
    JsonOutputError(String),
    /// Error when creating the client
    ClientInitialization(String),
    /// Error when looking up a compiled contract
    ArtifactLoading(String),
    /// Error when fetching the nonce to deploy a contract
    NonceFetching(String),
    /// Error deploying a contract
    ContractDeployment(String),
    /// Error calling a contract method
    ContractInteraction(String),
    /// Error parsing a user supplied address
    InvalidAddress(String),
    /// The deployed contracts don't match the recorded deployment
    Verification(String),
}

impl Display for ScriptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::JsonOutputError(s) => write!(f, "error writing json output: {}", s),
            ScriptError::ClientInitialization(s) => write!(f, "error during client init: {}", s),
            ScriptError::ArtifactLoading(s) => write!(f, "error loading contract artifact: {}", s),
            ScriptError::NonceFetching(s) => {
                write!(f, "error during nonce fetching for client signing: {}", s)
            }
            ScriptError::ContractDeployment(s) => write!(f, "error deploying contract: {}", s),
            ScriptError::ContractInteraction(s) => {
                write!(f, "error interacting with contract: {}", s)
            }
            ScriptError::InvalidAddress(s) => write!(f, "invalid address: {}", s),
            ScriptError::Verification(s) => write!(f, "deployment verification failed: {}", s),
        }
    }
}

impl Error for ScriptError {}
