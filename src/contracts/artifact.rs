//! Compiled contract artifacts.
//!
//! Reads the JSON the compiler toolchain leaves behind. Both layouts in common
//! use are accepted: Hardhat (`"bytecode": "0x..."`) and Foundry
//! (`"bytecode": { "object": "0x..." }`).

use alloy::primitives::Bytes;
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading an artifact.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("cannot read artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed artifact {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("artifact {path} has invalid bytecode: {reason}")]
    InvalidBytecode { path: PathBuf, reason: String },

    #[error("{0} has no creation bytecode (abstract contract or interface?)")]
    EmptyBytecode(String),

    #[error("{contract} needs library linking ({libraries}), which is not supported")]
    UnlinkedLibraries { contract: String, libraries: String },

    #[error("{contract} constructor takes {count} argument(s); only argument-free constructors can be deployed")]
    ConstructorArguments { contract: String, count: usize },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawBytecode {
    Hex(String),
    Object { object: String },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArtifact {
    #[serde(default)]
    contract_name: Option<String>,
    #[serde(default)]
    abi: Vec<Value>,
    bytecode: RawBytecode,
    #[serde(default)]
    link_references: Option<Value>,
}

/// A deployable contract: its name, ABI and creation bytecode.
#[derive(Debug, Clone)]
pub struct ContractArtifact {
    pub name: String,
    pub abi: Vec<Value>,
    pub bytecode: Bytes,
}

impl ContractArtifact {
    /// Load an artifact and check that it can be deployed without arguments
    /// or linking.
    pub fn load(name: &str, path: &Path) -> Result<Self, ArtifactError> {
        let content = std::fs::read_to_string(path).map_err(|source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let artifact = Self::parse(name, path, &content)?;

        tracing::debug!(
            contract = %artifact.name,
            path = %path.display(),
            bytecode_len = artifact.bytecode.len(),
            "Artifact loaded"
        );
        Ok(artifact)
    }

    /// Parse artifact JSON. `path` is only used in error messages.
    pub fn parse(name: &str, path: &Path, content: &str) -> Result<Self, ArtifactError> {
        let raw: RawArtifact = serde_json::from_str(content).map_err(|source| ArtifactError::Json {
            path: path.to_path_buf(),
            source,
        })?;

        let name = raw.contract_name.unwrap_or_else(|| name.to_string());

        let hex = match raw.bytecode {
            RawBytecode::Hex(hex) => hex,
            RawBytecode::Object { object } => object,
        };
        let hex = hex.trim();

        // Unresolved library placeholders look like `__$<hash>$__`.
        if hex.contains("__") {
            return Err(ArtifactError::UnlinkedLibraries {
                contract: name,
                libraries: linked_library_names(raw.link_references.as_ref()),
            });
        }
        if let Some(libraries) = raw.link_references.as_ref().filter(|refs| has_link_references(refs)) {
            return Err(ArtifactError::UnlinkedLibraries {
                contract: name,
                libraries: linked_library_names(Some(libraries)),
            });
        }

        let bytecode: Bytes = hex.parse().map_err(|e| ArtifactError::InvalidBytecode {
            path: path.to_path_buf(),
            reason: format!("{}", e),
        })?;
        if bytecode.is_empty() {
            return Err(ArtifactError::EmptyBytecode(name));
        }

        let constructor_inputs = raw
            .abi
            .iter()
            .find(|item| item.get("type").and_then(Value::as_str) == Some("constructor"))
            .and_then(|ctor| ctor.get("inputs"))
            .and_then(Value::as_array)
            .map_or(0, Vec::len);
        if constructor_inputs > 0 {
            return Err(ArtifactError::ConstructorArguments {
                contract: name,
                count: constructor_inputs,
            });
        }

        Ok(Self {
            name,
            abi: raw.abi,
            bytecode,
        })
    }

    /// Whether the ABI declares a function with the given name.
    pub fn has_function(&self, function: &str) -> bool {
        self.abi.iter().any(|item| {
            item.get("type").and_then(Value::as_str) == Some("function")
                && item.get("name").and_then(Value::as_str) == Some(function)
        })
    }
}

fn has_link_references(refs: &Value) -> bool {
    refs.as_object().is_some_and(|files| !files.is_empty())
}

fn linked_library_names(refs: Option<&Value>) -> String {
    let names: Vec<String> = refs
        .and_then(Value::as_object)
        .map(|files| {
            files
                .values()
                .filter_map(Value::as_object)
                .flat_map(|libs| libs.keys().cloned())
                .collect()
        })
        .unwrap_or_default();

    if names.is_empty() {
        "unknown".to_string()
    } else {
        names.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path() -> &'static Path {
        Path::new("artifacts/contracts/SimpleNFT.sol/SimpleNFT.json")
    }

    #[test]
    fn test_hardhat_layout() {
        let json = r#"{
            "_format": "hh-sol-artifact-1",
            "contractName": "SimpleNFT",
            "sourceName": "contracts/SimpleNFT.sol",
            "abi": [
                {"type": "constructor", "inputs": [], "stateMutability": "nonpayable"},
                {"type": "function", "name": "batchMint", "inputs": [
                    {"name": "to", "type": "address"},
                    {"name": "quantity", "type": "uint256"}
                ], "outputs": [], "stateMutability": "nonpayable"}
            ],
            "bytecode": "0x6080604052",
            "deployedBytecode": "0x6080",
            "linkReferences": {},
            "deployedLinkReferences": {}
        }"#;

        let artifact = ContractArtifact::parse("SimpleNFT", path(), json).unwrap();
        assert_eq!(artifact.name, "SimpleNFT");
        assert_eq!(artifact.bytecode.as_ref(), &[0x60, 0x80, 0x60, 0x40, 0x52]);
        assert!(artifact.has_function("batchMint"));
        assert!(!artifact.has_function("mint"));
    }

    #[test]
    fn test_foundry_layout() {
        let json = r#"{
            "abi": [],
            "bytecode": {"object": "0x60806040", "linkReferences": {}},
            "deployedBytecode": {"object": "0x6080"}
        }"#;

        let artifact = ContractArtifact::parse("NFTAuction", path(), json).unwrap();
        assert_eq!(artifact.name, "NFTAuction");
        assert_eq!(artifact.bytecode.len(), 4);
    }

    #[test]
    fn test_empty_bytecode_rejected() {
        let json = r#"{"contractName": "IERC721", "abi": [], "bytecode": "0x"}"#;
        let err = ContractArtifact::parse("IERC721", path(), json).unwrap_err();
        assert!(matches!(err, ArtifactError::EmptyBytecode(name) if name == "IERC721"));
    }

    #[test]
    fn test_constructor_arguments_rejected() {
        let json = r#"{
            "abi": [{"type": "constructor", "inputs": [{"name": "owner", "type": "address"}]}],
            "bytecode": "0x6080"
        }"#;
        let err = ContractArtifact::parse("Owned", path(), json).unwrap_err();
        assert!(matches!(err, ArtifactError::ConstructorArguments { count: 1, .. }));
    }

    #[test]
    fn test_link_references_rejected() {
        let json = r#"{
            "abi": [],
            "bytecode": "0x6080",
            "linkReferences": {"contracts/Lib.sol": {"Strings": [{"start": 10, "length": 20}]}}
        }"#;
        let err = ContractArtifact::parse("UsesLib", path(), json).unwrap_err();
        assert!(err.to_string().contains("Strings"));
    }

    #[test]
    fn test_invalid_hex_rejected() {
        let json = r#"{"abi": [], "bytecode": "0xzz"}"#;
        let err = ContractArtifact::parse("Broken", path(), json).unwrap_err();
        assert!(matches!(err, ArtifactError::InvalidBytecode { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = ContractArtifact::load("Missing", Path::new("/nonexistent/Missing.json")).unwrap_err();
        assert!(matches!(err, ArtifactError::Io { .. }));
    }
}
