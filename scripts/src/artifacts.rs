//! Lookup of compiled contracts by name, from a Hardhat (or Foundry) artifacts tree

use std::{
    fs,
    path::{Path, PathBuf},
};

use alloy::{hex, primitives::Bytes};
use json::JsonValue;
#[cfg(test)]
use mockall::automock;
use tracing::info;

use crate::errors::ScriptError;

/// A compiled contract, ready to be deployed
#[derive(Debug, Clone, PartialEq)]
pub struct ContractArtifact {
    /// The contract name, as declared in solidity
    pub name: String,
    /// The creation bytecode, without constructor arguments
    pub bytecode: Bytes,
}

/// Source of compiled contracts
#[cfg_attr(test, automock)]
pub trait ArtifactSource: Send + Sync {
    /// Get the compiled contract named `name`
    fn load(&self, name: &str) -> Result<ContractArtifact, ScriptError>;
}

/// Artifacts read from a directory laid out by the contract compiler
pub struct ArtifactDirectory {
    /// Root of the artifacts tree
    root: PathBuf,
}

impl ArtifactDirectory {
    /// Build a new artifact directory rooted at `root`
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// The paths where the artifact of `name` may live, in lookup order
    fn candidate_paths(&self, name: &str) -> [PathBuf; 2] {
        [
            // Hardhat: <root>/<Name>.sol/<Name>.json
            self.root
                .join(format!("{name}.sol"))
                .join(format!("{name}.json")),
            // Flat layout: <root>/<Name>.json
            self.root.join(format!("{name}.json")),
        ]
    }
}

impl ArtifactSource for ArtifactDirectory {
    fn load(&self, name: &str) -> Result<ContractArtifact, ScriptError> {
        let path = self
            .candidate_paths(name)
            .into_iter()
            .find(|path| path.is_file())
            .ok_or_else(|| {
                ScriptError::ArtifactLoading(format!(
                    "no artifact for {name} under {}",
                    self.root.display()
                ))
            })?;

        info!("Loading {} from {}", name, path.display());
        let artifact = parse_artifact_file(name, &path)?;
        info!("{} bytecode is {} bytes long", name, artifact.bytecode.len());

        Ok(artifact)
    }
}

/// Read & parse the artifact file at `path`
fn parse_artifact_file(name: &str, path: &Path) -> Result<ContractArtifact, ScriptError> {
    let contents =
        fs::read_to_string(path).map_err(|e| ScriptError::ArtifactLoading(e.to_string()))?;
    parse_artifact(name, &contents)
}

/// Parse the artifact json of the contract `name`
pub fn parse_artifact(name: &str, contents: &str) -> Result<ContractArtifact, ScriptError> {
    let parsed_json =
        json::parse(contents).map_err(|e| ScriptError::ArtifactLoading(e.to_string()))?;

    let raw_bytecode = extract_bytecode(&parsed_json).ok_or_else(|| {
        ScriptError::ArtifactLoading(format!("artifact of {name} has no bytecode"))
    })?;

    let bytecode = hex::decode(raw_bytecode.strip_prefix("0x").unwrap_or(raw_bytecode))
        .map_err(|e| ScriptError::ArtifactLoading(format!("bytecode of {name}: {e}")))?;

    // Interfaces and abstract contracts compile to an empty bytecode
    if bytecode.is_empty() {
        return Err(ScriptError::ArtifactLoading(format!(
            "{name} has an empty bytecode, is it abstract?"
        )));
    }

    Ok(ContractArtifact {
        name: name.to_string(),
        bytecode: Bytes::from(bytecode),
    })
}

/// Hardhat stores the bytecode as a string, Foundry under `bytecode.object`
fn extract_bytecode(parsed_json: &JsonValue) -> Option<&str> {
    parsed_json["bytecode"]
        .as_str()
        .or_else(|| parsed_json["bytecode"]["object"].as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    const HARDHAT_ARTIFACT: &str = r#"{
        "_format": "hh-sol-artifact-1",
        "contractName": "RetentionRelay",
        "abi": [],
        "bytecode": "0x6080604052",
        "deployedBytecode": "0x6080"
    }"#;

    #[test]
    fn parse_hardhat_artifact() {
        let artifact = parse_artifact("RetentionRelay", HARDHAT_ARTIFACT).unwrap();

        assert_eq!(artifact.name, "RetentionRelay");
        assert_eq!(artifact.bytecode.to_vec(), vec![0x60, 0x80, 0x60, 0x40, 0x52]);
    }

    #[test]
    fn parse_foundry_artifact() {
        let contents = r#"{ "abi": [], "bytecode": { "object": "0x60806040" } }"#;

        let artifact = parse_artifact("MNEE_Mock_Token", contents).unwrap();

        assert_eq!(artifact.bytecode.len(), 4);
    }

    #[test]
    fn parse_artifact_without_hex_prefix() {
        let contents = r#"{ "bytecode": "6080" }"#;

        let artifact = parse_artifact("MNEE_Mock_Token", contents).unwrap();

        assert_eq!(artifact.bytecode.to_vec(), vec![0x60, 0x80]);
    }

    #[test]
    fn reject_empty_bytecode() {
        let contents = r#"{ "contractName": "IRelay", "bytecode": "0x" }"#;

        let result = parse_artifact("IRelay", contents);

        assert!(matches!(result, Err(ScriptError::ArtifactLoading(_))));
    }

    #[test]
    fn reject_missing_bytecode() {
        let result = parse_artifact("RetentionRelay", r#"{ "abi": [] }"#);

        assert!(matches!(result, Err(ScriptError::ArtifactLoading(_))));
    }

    #[test]
    fn reject_invalid_hex_bytecode() {
        let result = parse_artifact("RetentionRelay", r#"{ "bytecode": "0xzz" }"#);

        assert!(matches!(result, Err(ScriptError::ArtifactLoading(_))));
    }

    #[test]
    fn load_from_hardhat_layout() {
        let dir = tempfile::tempdir().unwrap();
        let contract_dir = dir.path().join("RetentionRelay.sol");
        fs::create_dir_all(&contract_dir).unwrap();
        fs::write(contract_dir.join("RetentionRelay.json"), HARDHAT_ARTIFACT).unwrap();

        let artifacts = ArtifactDirectory::new(dir.path());
        let artifact = artifacts.load("RetentionRelay").unwrap();

        assert_eq!(artifact.bytecode.len(), 5);
    }

    #[test]
    fn load_from_flat_layout() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("MNEE_Mock_Token.json"),
            r#"{ "bytecode": "0x6001" }"#,
        )
        .unwrap();

        let artifacts = ArtifactDirectory::new(dir.path());
        let artifact = artifacts.load("MNEE_Mock_Token").unwrap();

        assert_eq!(artifact.name, "MNEE_Mock_Token");
    }

    #[test]
    fn load_unknown_contract_fails() {
        let dir = tempfile::tempdir().unwrap();

        let artifacts = ArtifactDirectory::new(dir.path());

        assert!(matches!(
            artifacts.load("RetentionRelay"),
            Err(ScriptError::ArtifactLoading(_))
        ));
    }
}
