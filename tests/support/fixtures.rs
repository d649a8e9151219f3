// ABOUTME: Shared configuration and artifact fixtures for integration tests.
// ABOUTME: The four-component DAO layout with one wire-up call.

use std::fs;
use std::path::Path;
use std::str::FromStr;
use vendeploy::config::Config;
use vendeploy::plan::DeploymentPlan;
use vendeploy::types::{Address, ComponentName};

pub const ADMIN: &str = "0x5DE9d9C1dC9b407a9873E2F428c54b74c325b82b";
pub const ROUTER: &str = "0xF491e7B69E4244ad4002BC14e878a34207E38c29";
pub const ORACLE: &str = "0xf4766552D15AE4d256Ad41B6cf2933482B0680dc";

/// A = Vendao, B = VenAccessControl(A, admin), C = VenAccessTicket(B), D = VenTreasury(B);
/// Vendao.initialize(C, B, router, oracle).
pub const DAO_CONFIG: &str = r#"
project: vendao
networks:
  testnet:
    rpc_url: http://127.0.0.1:8545
    chain_id: 4002
    private_key: "0x4646464646464646464646464646464646464646464646464646464646464646"
    explorer:
      api_url: https://api-testnet.ftmscan.com/api
      api_key: test-key
admin: "0x5DE9d9C1dC9b407a9873E2F428c54b74c325b82b"
addresses:
  router: "0xF491e7B69E4244ad4002BC14e878a34207E38c29"
  oracle: "0xf4766552D15AE4d256Ad41B6cf2933482B0680dc"
components:
  - name: Vendao
  - name: VenAccessControl
    args:
      - component: Vendao
      - address: admin
  - name: VenAccessTicket
    args:
      - component: VenAccessControl
  - name: VenTreasury
    args:
      - component: VenAccessControl
initialize:
  method: initialize(address,address,address,address)
  args:
    - component: VenAccessTicket
    - component: VenAccessControl
    - address: router
    - address: oracle
"#;

pub fn name(s: &str) -> ComponentName {
    ComponentName::new(s).unwrap()
}

pub fn address(s: &str) -> Address {
    Address::from_str(s).unwrap()
}

/// The DAO config pointed at local node and explorer endpoints, with fast polling.
pub fn dao_config_for(rpc_url: &str, explorer_url: &str) -> String {
    let mut yaml = DAO_CONFIG
        .replace("http://127.0.0.1:8545", rpc_url)
        .replace("https://api-testnet.ftmscan.com/api", explorer_url)
        .replace(
            "api_key: test-key",
            "api_key: test-key\n      poll_interval: 10ms\n      timeout: 2s",
        );
    yaml.push_str("confirmation:\n  timeout: 5s\n  poll_interval: 10ms\n");
    yaml
}

pub fn dao_config() -> Config {
    Config::from_yaml(DAO_CONFIG).unwrap()
}

pub fn dao_plan() -> DeploymentPlan {
    DeploymentPlan::from_config(&dao_config()).unwrap()
}

/// Write a minimal hardhat artifact whose constructor takes `inputs` addresses.
pub fn write_artifact(root: &Path, contract: &str, inputs: usize) {
    let dir = root.join(format!("contracts/{contract}.sol"));
    fs::create_dir_all(&dir).unwrap();
    let inputs: Vec<_> = (0..inputs)
        .map(|i| serde_json::json!({"name": format!("arg{i}"), "type": "address"}))
        .collect();
    let artifact = serde_json::json!({
        "_format": "hh-sol-artifact-1",
        "contractName": contract,
        "sourceName": format!("contracts/{contract}.sol"),
        "abi": [{"type": "constructor", "inputs": inputs}],
        "bytecode": "0x6080604052",
    });
    fs::write(dir.join(format!("{contract}.json")), artifact.to_string()).unwrap();
}

/// Write the `.dbg.json` pointer and build info that source verification reads.
pub fn write_build_info(root: &Path, contract: &str) {
    let dir = root.join(format!("contracts/{contract}.sol"));
    fs::create_dir_all(&dir).unwrap();
    let debug = serde_json::json!({
        "_format": "hh-sol-dbg-1",
        "buildInfo": format!("../../build-info/{contract}.json"),
    });
    fs::write(dir.join(format!("{contract}.dbg.json")), debug.to_string()).unwrap();

    let build_info_dir = root.join("build-info");
    fs::create_dir_all(&build_info_dir).unwrap();
    let mut sources = serde_json::Map::new();
    sources.insert(
        format!("contracts/{contract}.sol"),
        serde_json::json!({"content": format!("contract {contract} {{}}")}),
    );
    let build_info = serde_json::json!({
        "solcLongVersion": "0.8.9+commit.e5eed63a",
        "input": {"language": "Solidity", "sources": sources},
    });
    fs::write(build_info_dir.join(format!("{contract}.json")), build_info.to_string()).unwrap();
}

/// Write a config file plus artifacts for every DAO component into `dir`.
pub fn write_dao_project(dir: &Path) {
    fs::write(dir.join("vendeploy.yml"), DAO_CONFIG).unwrap();
    let artifacts = dir.join("artifacts");
    write_artifact(&artifacts, "Vendao", 0);
    write_artifact(&artifacts, "VenAccessControl", 2);
    write_artifact(&artifacts, "VenAccessTicket", 1);
    write_artifact(&artifacts, "VenTreasury", 1);
}
