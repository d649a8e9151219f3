// ABOUTME: Reads compiled contract artifacts from a hardhat-style artifacts tree.
// ABOUTME: Provides creation bytecode and the compiler input needed for verification.

use crate::types::{AbiArgument, ComponentName};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

const BUILD_INFO_DIR: &str = "build-info";
const DEBUG_SUFFIX: &str = ".dbg.json";

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("no artifact for {name} under {root}")]
    NotFound { name: ComponentName, root: PathBuf },

    #[error("several artifacts named {name}: {}", display_paths(.paths))]
    Ambiguous {
        name: ComponentName,
        paths: Vec<PathBuf>,
    },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("artifact for {0} has no deployable bytecode (abstract contract or interface?)")]
    EmptyBytecode(ComponentName),

    #[error("artifact for {name} has invalid bytecode: {reason}")]
    InvalidBytecode { name: ComponentName, reason: String },

    #[error("constructor of {name} takes {expected} argument(s) but {actual} were given")]
    ConstructorMismatch {
        name: ComponentName,
        expected: usize,
        actual: usize,
    },

    #[error("constructor argument {index} of {name} must be {expected}, got {found}")]
    ConstructorArgType {
        name: ComponentName,
        index: usize,
        expected: String,
        found: String,
    },

    #[error("no build info recorded for {0}; recompile the project")]
    MissingBuildInfo(ComponentName),
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractArtifact {
    pub contract_name: String,
    pub source_name: String,
    #[serde(default)]
    pub abi: serde_json::Value,
    pub bytecode: String,
}

impl ContractArtifact {
    /// Decoded creation bytecode, rejecting abstract contracts and unlinked libraries.
    pub fn bytecode(&self, name: &ComponentName) -> Result<Vec<u8>, ArtifactError> {
        let invalid = |reason: String| ArtifactError::InvalidBytecode {
            name: name.clone(),
            reason,
        };
        let text = self.bytecode.trim();
        let text = text.strip_prefix("0x").unwrap_or(text);
        if text.contains("__") {
            return Err(invalid("unlinked library placeholder".to_string()));
        }
        let code = hex::decode(text).map_err(|e| invalid(e.to_string()))?;
        if code.is_empty() {
            return Err(ArtifactError::EmptyBytecode(name.clone()));
        }
        Ok(code)
    }

    /// Check arity and per-argument types against the constructor in the ABI.
    pub fn check_constructor<A: AbiArgument>(
        &self,
        name: &ComponentName,
        args: &[A],
    ) -> Result<(), ArtifactError> {
        let inputs = self.constructor_inputs();
        if inputs.len() != args.len() {
            return Err(ArtifactError::ConstructorMismatch {
                name: name.clone(),
                expected: inputs.len(),
                actual: args.len(),
            });
        }
        for (index, (arg, param)) in args.iter().zip(&inputs).enumerate() {
            if !arg.fits(param) {
                return Err(ArtifactError::ConstructorArgType {
                    name: name.clone(),
                    index,
                    expected: param.clone(),
                    found: arg.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Solidity types of the constructor parameters, in order.
    pub fn constructor_inputs(&self) -> Vec<String> {
        self.abi
            .as_array()
            .and_then(|items| {
                items
                    .iter()
                    .find(|item| item.get("type").and_then(|t| t.as_str()) == Some("constructor"))
            })
            .and_then(|ctor| ctor.get("inputs"))
            .and_then(|inputs| inputs.as_array())
            .map(|inputs| {
                inputs
                    .iter()
                    .filter_map(|input| input.get("type").and_then(|t| t.as_str()))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// `path/to/Source.sol:Name`, the form explorers expect.
    pub fn fully_qualified_name(&self) -> String {
        format!("{}:{}", self.source_name, self.contract_name)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildInfo {
    pub solc_long_version: String,
    /// Standard JSON compiler input.
    pub input: serde_json::Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DebugFile {
    build_info: String,
}

#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Find `<Name>.json` anywhere below the root, ignoring build info and debug files.
    pub fn locate(&self, name: &ComponentName) -> Result<PathBuf, ArtifactError> {
        let file_name = format!("{name}.json");
        let mut found = Vec::new();
        self.search(&self.root, &file_name, &mut found)?;

        match found.len() {
            0 => Err(ArtifactError::NotFound {
                name: name.clone(),
                root: self.root.clone(),
            }),
            1 => Ok(found.remove(0)),
            _ => {
                found.sort();
                Err(ArtifactError::Ambiguous {
                    name: name.clone(),
                    paths: found,
                })
            }
        }
    }

    fn search(&self, dir: &Path, file_name: &str, found: &mut Vec<PathBuf>) -> Result<(), ArtifactError> {
        let entries = std::fs::read_dir(dir).map_err(|source| ArtifactError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        for entry in entries {
            let entry = entry.map_err(|source| ArtifactError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = entry.path();
            if path.is_dir() {
                if entry.file_name() != BUILD_INFO_DIR {
                    self.search(&path, file_name, found)?;
                }
            } else if entry.file_name().to_str() == Some(file_name) {
                found.push(path);
            }
        }
        Ok(())
    }

    pub fn load(&self, name: &ComponentName) -> Result<ContractArtifact, ArtifactError> {
        let path = self.locate(name)?;
        read_json(&path)
    }

    /// Creation bytecode for a component once `args` are known to match its constructor.
    ///
    /// Accepts plan arguments (before deployment) as well as resolved values.
    pub fn creation_code<A: AbiArgument>(
        &self,
        name: &ComponentName,
        args: &[A],
    ) -> Result<Vec<u8>, ArtifactError> {
        let artifact = self.load(name)?;
        artifact.check_constructor(name, args)?;
        artifact.bytecode(name)
    }

    /// Compiler input and version for a component, via its `.dbg.json` pointer.
    pub fn build_info(&self, name: &ComponentName) -> Result<BuildInfo, ArtifactError> {
        let artifact_path = self.locate(name)?;
        let debug_path = artifact_path.with_file_name(format!("{name}{DEBUG_SUFFIX}"));
        if !debug_path.exists() {
            return Err(ArtifactError::MissingBuildInfo(name.clone()));
        }

        let debug: DebugFile = read_json(&debug_path)?;
        let base = debug_path.parent().unwrap_or(&self.root);
        let build_info_path = base.join(debug.build_info);
        if !build_info_path.exists() {
            return Err(ArtifactError::MissingBuildInfo(name.clone()));
        }
        read_json(&build_info_path)
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let content = std::fs::read_to_string(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
