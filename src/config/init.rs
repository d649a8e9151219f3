// ABOUTME: Config scaffolding for new projects.
// ABOUTME: Creates a vendeploy.yml template wired for the Fantom network.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

use super::CONFIG_FILENAME;

/// Write the template config into `dir`, returning its path.
pub fn init_config(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() && !force {
        return Err(Error::AlreadyExists(config_path));
    }

    std::fs::write(&config_path, TEMPLATE)?;
    tracing::info!(path = %config_path.display(), "wrote config template");

    Ok(config_path)
}

pub(crate) const TEMPLATE: &str = r#"project: vendao
default_network: fantom

networks:
  fantom:
    rpc_url: { env: FANTOM_RPC_URL }
    chain_id: 250
    private_key: { env: PRIVATE_KEY }
    explorer:
      api_url: https://api.ftmscan.com/api
      api_key: { env: API_KEY }
  forking:
    rpc_url: { env: FANTOM_RPC_URL }
    private_key: { env: PRIVATE_KEY }

# Hardhat artifacts directory, relative to this file
artifacts: artifacts

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
  target: Vendao
  method: initialize(address,address,address,address)
  args:
    - component: VenAccessTicket
    - component: VenAccessControl
    - address: router
    - address: oracle

confirmation:
  timeout: 5m
  poll_interval: 2s
"#;
