use std::{fmt::LowerHex, fs, fs::File, io::Read, path::PathBuf};

use alloy::primitives::Address;
use json::JsonValue;

use crate::{deploy::Deployment, errors::ScriptError};

/// Location of a value inside the output file
pub enum OutputKeys {
    /// Address of a deployed contract
    Deployment { key: &'static str },
    /// Hash of a transaction sent to a contract
    Tx { key: &'static str, tx_key: String },
}

/// Read a recorded value
pub fn read_output_file(file_path: &str, key: OutputKeys) -> Result<String, ScriptError> {
    if !PathBuf::from(file_path).exists() {
        return Err(ScriptError::JsonOutputError(String::from(
            "Deployed addresses file not found",
        )));
    }

    // Parse it's json content into objects
    let parsed_json = get_json_from_file(file_path)?;
    let (final_key, path) = match key {
        OutputKeys::Deployment { key } => (parsed_json[key]["deploy"].clone(), key.to_string()),
        OutputKeys::Tx { key, tx_key } => (
            parsed_json[key]["txs"][tx_key.as_str()].clone(),
            format!("{key}.txs.{tx_key}"),
        ),
    };

    final_key
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| ScriptError::JsonOutputError(format!("no value recorded for {path}")))
}

/// Read the recorded address of the deployed contract `key`
pub fn read_deployed_address(file_path: &str, key: &'static str) -> Result<Address, ScriptError> {
    read_output_file(file_path, OutputKeys::Deployment { key })?
        .parse::<Address>()
        .map_err(|e| ScriptError::InvalidAddress(e.to_string()))
}

/// Writes the given value at `key`
pub fn write_output_file<T: LowerHex>(
    file_path: &str,
    key: OutputKeys,
    value: T,
) -> Result<(), ScriptError> {
    // If the file doesn't exist, create it
    if !PathBuf::from(file_path).exists() {
        fs::write(file_path, "{}").map_err(|e| ScriptError::JsonOutputError(e.to_string()))?;
    }

    // Parse it's json content into objects
    let mut parsed_json = get_json_from_file(file_path)?;

    // Update the right key
    match key {
        OutputKeys::Deployment { key } => {
            parsed_json[key]["deploy"] = JsonValue::String(format!("{value:#x}"))
        }
        OutputKeys::Tx { key, tx_key } => {
            parsed_json[key]["txs"][tx_key.as_str()] = JsonValue::String(format!("{value:#x}"))
        }
    };

    // Write the updated json back to the file
    fs::write(file_path, json::stringify_pretty(parsed_json, 4))
        .map_err(|e| ScriptError::JsonOutputError(e.to_string()))?;

    Ok(())
}

/// Record the address & creation tx of a deployment under `key`
pub fn write_deployment(
    file_path: &str,
    key: &'static str,
    deployment: &Deployment,
) -> Result<(), ScriptError> {
    write_output_file(file_path, OutputKeys::Deployment { key }, deployment.address)?;
    write_output_file(
        file_path,
        OutputKeys::Tx {
            key,
            tx_key: String::from("deploy"),
        },
        deployment.tx_hash,
    )
}

/// Parses the JSON file at the given path
fn get_json_from_file(file_path: &str) -> Result<JsonValue, ScriptError> {
    let mut file_contents = String::new();
    File::open(file_path)
        .map_err(|e| ScriptError::JsonOutputError(e.to_string()))?
        .read_to_string(&mut file_contents)
        .map_err(|e| ScriptError::JsonOutputError(e.to_string()))?;

    json::parse(&file_contents).map_err(|e| ScriptError::JsonOutputError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use alloy::primitives::{address, b256};

    use super::*;

    fn relay_deployment() -> Deployment {
        Deployment {
            name: "RetentionRelay".to_string(),
            address: address!("e7f1725E7734CE288F8367e1Bb143E90bb3F0512"),
            tx_hash: b256!("00000000000000000000000000000000000000000000000000000000000000aa"),
            block_number: Some(2),
        }
    }

    #[test]
    fn write_then_read_deployment() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("deployed.json");
        let file_path = file_path.to_str().unwrap();

        write_deployment(file_path, "relay", &relay_deployment()).unwrap();

        assert_eq!(
            read_deployed_address(file_path, "relay").unwrap(),
            relay_deployment().address
        );
        assert_eq!(
            read_output_file(
                file_path,
                OutputKeys::Tx {
                    key: "relay",
                    tx_key: String::from("deploy")
                }
            )
            .unwrap(),
            "0x00000000000000000000000000000000000000000000000000000000000000aa"
        );
    }

    #[test]
    fn addresses_are_written_lowercase() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("deployed.json");
        let file_path = file_path.to_str().unwrap();

        write_deployment(file_path, "relay", &relay_deployment()).unwrap();

        assert_eq!(
            read_output_file(file_path, OutputKeys::Deployment { key: "relay" }).unwrap(),
            "0xe7f1725e7734ce288f8367e1bb143e90bb3f0512"
        );
    }

    #[test]
    fn writing_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("deployed.json");
        fs::write(&file_path, r#"{ "merchant": { "deploy": "0x01" } }"#).unwrap();
        let file_path = file_path.to_str().unwrap();

        write_deployment(file_path, "relay", &relay_deployment()).unwrap();

        assert_eq!(
            read_output_file(file_path, OutputKeys::Deployment { key: "merchant" }).unwrap(),
            "0x01"
        );
    }

    #[test]
    fn read_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("deployed.json");

        assert!(matches!(
            read_deployed_address(file_path.to_str().unwrap(), "token"),
            Err(ScriptError::JsonOutputError(_))
        ));
    }

    #[test]
    fn read_missing_key_fails() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("deployed.json");
        let file_path = file_path.to_str().unwrap();

        write_deployment(file_path, "relay", &relay_deployment()).unwrap();

        assert!(matches!(
            read_deployed_address(file_path, "token"),
            Err(ScriptError::JsonOutputError(_))
        ));
    }
}
