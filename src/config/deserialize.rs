// ABOUTME: Custom serde deserializers for config types.
// ABOUTME: Enforces a non-empty component list and reads argument entries with readable errors.

use nonempty::NonEmpty;
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;

use super::{ArgEntry, ComponentConfig};

pub fn deserialize_components<'de, D>(deserializer: D) -> Result<NonEmpty<ComponentConfig>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let values: Vec<ComponentConfig> = Vec::deserialize(deserializer)?;
    NonEmpty::from_vec(values)
        .ok_or_else(|| serde::de::Error::custom("at least one component is required"))
}

impl<'de> Deserialize<'de> for ArgEntry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ArgEntryVisitor)
    }
}

struct ArgEntryVisitor;

impl<'de> Visitor<'de> for ArgEntryVisitor {
    type Value = ArgEntry;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an unsigned integer, bool, string, or a `component:` / `address:` entry")
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<ArgEntry, E> {
        Ok(ArgEntry::Bool(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<ArgEntry, E> {
        Ok(ArgEntry::Number(value.into()))
    }

    fn visit_u128<E: de::Error>(self, value: u128) -> Result<ArgEntry, E> {
        Ok(ArgEntry::Number(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<ArgEntry, E> {
        u128::try_from(value)
            .map(ArgEntry::Number)
            .map_err(|_| E::custom(format!("negative argument {value} is not supported")))
    }

    fn visit_i128<E: de::Error>(self, value: i128) -> Result<ArgEntry, E> {
        u128::try_from(value)
            .map(ArgEntry::Number)
            .map_err(|_| E::custom(format!("negative argument {value} is not supported")))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<ArgEntry, E> {
        Err(E::custom(format!(
            "numeric argument {value} is not an integer that fits in 128 bits; \
             write wider integers as quoted decimal strings"
        )))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<ArgEntry, E> {
        Ok(ArgEntry::Text(value.to_string()))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<ArgEntry, E> {
        Ok(ArgEntry::Text(value))
    }

    fn visit_map<A>(self, mut map: A) -> Result<ArgEntry, A::Error>
    where
        A: MapAccess<'de>,
    {
        const FIELDS: &[&str] = &["component", "address"];

        let key: String = map
            .next_key()?
            .ok_or_else(|| de::Error::custom("empty argument entry, expected `component:` or `address:`"))?;
        let entry = match key.as_str() {
            "component" => ArgEntry::Component {
                component: map.next_value()?,
            },
            "address" => ArgEntry::Address {
                address: map.next_value()?,
            },
            other => return Err(de::Error::unknown_field(other, FIELDS)),
        };
        if map.next_key::<String>()?.is_some() {
            return Err(de::Error::custom(
                "an argument entry takes exactly one of `component:` or `address:`",
            ));
        }
        Ok(entry)
    }
}
