// ABOUTME: Component and initialization entries as written in the config file.
// ABOUTME: Arguments are symbolic here; the plan turns them into literals and references.

use crate::types::ComponentName;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ComponentConfig {
    pub name: ComponentName,

    #[serde(default)]
    pub args: Vec<ArgEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InitializeConfig {
    /// Defaults to the first component in the list.
    #[serde(default)]
    pub target: Option<ComponentName>,

    pub method: String,

    #[serde(default)]
    pub args: Vec<ArgEntry>,
}

/// One constructor or call argument.
///
/// ```yaml
/// args:
///   - component: Vendao      # address of an earlier component
///   - address: admin         # named address from `admin` / `addresses`
///   - address: "0x5DE9..."   # literal address
///   - 1000000000000000000000 # unsigned integer, up to u128::MAX unquoted
///   - "2000000000000000000000000000000000000000" # quote anything wider
///   - true
///   - "VenDAO Access Ticket"
/// ```
///
/// Deserialized by hand in `deserialize.rs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgEntry {
    Component { component: ComponentName },
    Address { address: String },
    Bool(bool),
    Number(u128),
    Text(String),
}
