//! Shared plumbing for every response record.
//!
//! Records are plain serde structs with one extra flattened [`Discarded`]
//! field. Serde hands that field every key the record did not claim, and
//! [`Discarded`] drops each one with a warning instead of failing.

use std::fmt;
use std::marker::PhantomData;

use chrono::{DateTime, Utc};
use serde::de::{DeserializeOwned, IgnoredAny, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use tracing::warn;

use crate::error::Error;

/// A strict response record.
pub trait Model: DeserializeOwned {
    /// Record name used in warnings and errors.
    const NAME: &'static str;

    /// Every key the record understands: field names plus their aliases.
    const ACCEPTED_KEYS: &'static [&'static str];

    fn accepts(key: &str) -> bool {
        Self::ACCEPTED_KEYS.contains(&key)
    }
}

pub(crate) fn warn_unknown_attribute(model: &'static str, key: &str) {
    warn!(
        target: "tempest_core::unknown_attribute",
        model,
        key,
        "{model} contains unknown attribute: `{key}`, which was discarded. \
         This warning may be safely ignored. Please consider upgrading."
    );
}

/// Catch-all for keys a record does not declare.
///
/// Deserializing it warns once per key; serializing it writes nothing.
pub struct Discarded<M>(PhantomData<fn() -> M>);

impl<M> Default for Discarded<M> {
    fn default() -> Self {
        Discarded(PhantomData)
    }
}

impl<M> Clone for Discarded<M> {
    fn clone(&self) -> Self {
        Self::default()
    }
}

impl<M> PartialEq for Discarded<M> {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl<M> fmt::Debug for Discarded<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Discarded")
    }
}

impl<'de, M: Model> Deserialize<'de> for Discarded<M> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DiscardVisitor<M>(PhantomData<fn() -> M>);

        impl<'de, M: Model> Visitor<'de> for DiscardVisitor<M> {
            type Value = Discarded<M>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "the remaining attributes of {}", M::NAME)
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                while let Some(key) = map.next_key::<String>()? {
                    map.next_value::<IgnoredAny>()?;
                    if !M::accepts(&key) {
                        warn_unknown_attribute(M::NAME, &key);
                    }
                }
                Ok(Discarded::default())
            }
        }

        deserializer.deserialize_map(DiscardVisitor(PhantomData))
    }
}

impl<M> Serialize for Discarded<M> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_map(Some(0))?.end()
    }
}

/// Build a record from response content.
pub(crate) fn model_instance<M: Model>(content: Option<Value>) -> Result<M, Error> {
    let content = content.ok_or(Error::EmptyContent { model: M::NAME })?;
    serde_json::from_value(content).map_err(|source| Error::Deserialize {
        model: M::NAME,
        source,
    })
}

/// A JSON number kept in the representation it arrived in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    Int(i64),
    Float(f64),
}

impl Numeric {
    pub fn as_f64(self) -> f64 {
        match self {
            Numeric::Int(v) => v as f64,
            Numeric::Float(v) => v,
        }
    }

    /// The integer value, if this number has no fractional part.
    pub fn as_i64(self) -> Option<i64> {
        match self {
            Numeric::Int(v) => Some(v),
            Numeric::Float(v) if v.fract() == 0.0 && v.is_finite() => Some(v as i64),
            Numeric::Float(_) => None,
        }
    }
}

impl From<i64> for Numeric {
    fn from(value: i64) -> Self {
        Numeric::Int(value)
    }
}

impl From<f64> for Numeric {
    fn from(value: f64) -> Self {
        Numeric::Float(value)
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Numeric::Int(v) => write!(f, "{v}"),
            Numeric::Float(v) => write!(f, "{v}"),
        }
    }
}

/// Epoch seconds to a UTC timestamp; fractional seconds are truncated.
pub(crate) fn unix_to_utc(ts: Numeric) -> Option<DateTime<Utc>> {
    let secs = match ts {
        Numeric::Int(v) => v,
        Numeric::Float(v) if v.is_finite() => v.trunc() as i64,
        Numeric::Float(_) => return None,
    };
    DateTime::from_timestamp(secs, 0)
}

/// One cell of a statistics or observation table; `null` cells are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Number(Numeric),
    Text(String),
}

impl StatValue {
    pub fn as_number(&self) -> Option<Numeric> {
        match self {
            StatValue::Number(n) => Some(*n),
            StatValue::Text(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            StatValue::Text(s) => Some(s),
            StatValue::Number(_) => None,
        }
    }
}

/// A table of optional cells, as used by statistics and observation rows.
pub type Table = Vec<Vec<Option<StatValue>>>;

pub(crate) fn trimmed<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.map(|s| s.trim().to_string()))
}

/// Like [`trimmed`], but blank strings become `None`.
pub(crate) fn non_empty_trimmed<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(trimmed(deserializer)?.filter(|s| !s.is_empty()))
}

pub(crate) fn trimmed_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Vec<String>>::deserialize(deserializer)?;
    Ok(value.map(|items| items.into_iter().map(|s| s.trim().to_string()).collect()))
}
