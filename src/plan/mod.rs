// ABOUTME: Deployment plan: ordered component specs plus the wire-up call.
// ABOUTME: Validates dependency order up front and resolves references to addresses.

mod error;

pub use error::PlanError;

use crate::config::{ArgEntry, Config};
use crate::types::{AbiArgument, Address, ArgValue, ComponentName, MethodSignature};
use nonempty::NonEmpty;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

/// A constructor or call argument before deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanArg {
    Literal(ArgValue),
    Component(ComponentName),
}

impl PlanArg {
    /// Turn a config entry into a plan argument, substituting named static addresses.
    pub fn from_entry(entry: &ArgEntry, named: &BTreeMap<String, Address>) -> Result<Self, PlanError> {
        Ok(match entry {
            ArgEntry::Component { component } => PlanArg::Component(component.clone()),
            ArgEntry::Address { address } => {
                if let Some(value) = named.get(address) {
                    PlanArg::Literal(ArgValue::Address(*value))
                } else if let Ok(value) = Address::from_str(address.trim()) {
                    PlanArg::Literal(ArgValue::Address(value))
                } else {
                    return Err(PlanError::UnknownAddress(address.clone()));
                }
            }
            ArgEntry::Bool(value) => PlanArg::Literal(ArgValue::Bool(*value)),
            ArgEntry::Number(value) => PlanArg::Literal(ArgValue::Uint(alloy_core::primitives::U256::from(*value))),
            ArgEntry::Text(text) => PlanArg::Literal(ArgValue::parse_literal(text)),
        })
    }

    fn reference(&self) -> Option<&ComponentName> {
        match self {
            PlanArg::Component(name) => Some(name),
            PlanArg::Literal(_) => None,
        }
    }
}

/// A reference is only ever an address.
impl AbiArgument for PlanArg {
    fn fits(&self, param: &str) -> bool {
        match self {
            PlanArg::Literal(value) => value.fits(param),
            PlanArg::Component(_) => param == "address",
        }
    }
}

impl fmt::Display for PlanArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanArg::Literal(value) => write!(f, "{value}"),
            PlanArg::Component(name) => write!(f, "&{name}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentSpec {
    pub name: ComponentName,
    pub args: Vec<PlanArg>,
}

impl ComponentSpec {
    pub fn new(name: ComponentName, args: Vec<PlanArg>) -> Self {
        Self { name, args }
    }
}

/// The single post-deployment call that links components with circular dependencies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitializationCall {
    pub target: ComponentName,
    pub method: MethodSignature,
    pub args: Vec<PlanArg>,
}

#[derive(Debug, Clone)]
pub struct DeploymentPlan {
    components: NonEmpty<ComponentSpec>,
    initialize: Option<InitializationCall>,
}

impl DeploymentPlan {
    /// Build a plan, rejecting anything that could not be resolved at deploy time.
    pub fn new(
        components: NonEmpty<ComponentSpec>,
        initialize: Option<InitializationCall>,
    ) -> Result<Self, PlanError> {
        let mut seen: HashSet<&ComponentName> = HashSet::new();
        let all: HashSet<&ComponentName> = components.iter().map(|c| &c.name).collect();

        for spec in components.iter() {
            for dependency in spec.args.iter().filter_map(PlanArg::reference) {
                if dependency == &spec.name {
                    return Err(PlanError::SelfReference(spec.name.clone()));
                }
                if !seen.contains(dependency) {
                    if all.contains(dependency) {
                        return Err(PlanError::ForwardReference {
                            component: spec.name.clone(),
                            dependency: dependency.clone(),
                        });
                    }
                    return Err(PlanError::UnknownComponent {
                        context: format!("component {}", spec.name),
                        dependency: dependency.clone(),
                    });
                }
            }
            if !seen.insert(&spec.name) {
                return Err(PlanError::DuplicateComponent(spec.name.clone()));
            }
        }

        if let Some(call) = &initialize {
            validate_initialization(call, &all)?;
        }

        Ok(Self {
            components,
            initialize,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, PlanError> {
        let named = config.named_addresses();

        let to_spec = |entry: &crate::config::ComponentConfig| {
            let args = entry
                .args
                .iter()
                .map(|arg| PlanArg::from_entry(arg, &named))
                .collect::<Result<Vec<_>, _>>()?;
            Ok::<_, PlanError>(ComponentSpec::new(entry.name.clone(), args))
        };
        let mut components = NonEmpty::new(to_spec(config.components.first())?);
        for entry in config.components.tail() {
            components.push(to_spec(entry)?);
        }

        let initialize = config
            .initialize
            .as_ref()
            .map(|init| {
                let args = init
                    .args
                    .iter()
                    .map(|arg| PlanArg::from_entry(arg, &named))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok::<_, PlanError>(InitializationCall {
                    target: init
                        .target
                        .clone()
                        .unwrap_or_else(|| components.first().name.clone()),
                    method: MethodSignature::parse(&init.method)?,
                    args,
                })
            })
            .transpose()?;

        Self::new(components, initialize)
    }

    pub fn components(&self) -> &NonEmpty<ComponentSpec> {
        &self.components
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Always false; a plan holds at least one component.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The first component; the default initialization target.
    pub fn root(&self) -> &ComponentSpec {
        self.components.first()
    }

    pub fn initialize(&self) -> Option<&InitializationCall> {
        self.initialize.as_ref()
    }
}

fn validate_initialization(
    call: &InitializationCall,
    components: &HashSet<&ComponentName>,
) -> Result<(), PlanError> {
    if !components.contains(&call.target) {
        return Err(PlanError::UnknownInitTarget(call.target.clone()));
    }

    let params = call.method.params();
    if params.len() != call.args.len() {
        return Err(PlanError::InitArgCount {
            method: call.method.to_string(),
            expected: params.len(),
            actual: call.args.len(),
        });
    }

    for (index, (arg, param)) in call.args.iter().zip(params).enumerate() {
        match arg {
            PlanArg::Component(dependency) => {
                if !components.contains(dependency) {
                    return Err(PlanError::UnknownComponent {
                        context: format!("initialization of {}", call.target),
                        dependency: dependency.clone(),
                    });
                }
                if param != "address" {
                    return Err(PlanError::InitArgType {
                        method: call.method.to_string(),
                        index,
                        expected: param.clone(),
                        found: format!("address of {dependency}"),
                    });
                }
            }
            PlanArg::Literal(value) if !value.fits(param) => {
                return Err(PlanError::InitArgType {
                    method: call.method.to_string(),
                    index,
                    expected: param.clone(),
                    found: value.to_string(),
                });
            }
            PlanArg::Literal(_) => {}
        }
    }

    Ok(())
}

/// Substitute component references with confirmed addresses.
pub fn resolve_args<F>(args: &[PlanArg], lookup: F) -> Result<Vec<ArgValue>, PlanError>
where
    F: Fn(&ComponentName) -> Option<Address>,
{
    args.iter()
        .map(|arg| match arg {
            PlanArg::Literal(value) => Ok(value.clone()),
            PlanArg::Component(name) => lookup(name)
                .map(ArgValue::Address)
                .ok_or_else(|| PlanError::Unresolved(name.clone())),
        })
        .collect()
}
