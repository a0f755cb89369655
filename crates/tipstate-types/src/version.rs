use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Schema version tag of a deployed tipping contract (`v1` through `v9`).
///
/// Tags are never inferred from state content; callers supply them
/// explicitly, either per call or through a [`VersionMapping`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VersionTag(u8);

impl VersionTag {
    pub const V1: VersionTag = VersionTag(1);
    pub const V2: VersionTag = VersionTag(2);
    pub const V3: VersionTag = VersionTag(3);
    pub const V4: VersionTag = VersionTag(4);

    /// Parse a `v[1-9]` tag.
    pub fn parse(s: &str) -> Result<Self> {
        match s.as_bytes() {
            [b'v', digit @ b'1'..=b'9'] => Ok(VersionTag(digit - b'0')),
            _ => Err(Error::InputShape(format!("malformed version tag: {:?}", s))),
        }
    }

    pub fn number(self) -> u8 {
        self.0
    }
}

impl fmt::Display for VersionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl FromStr for VersionTag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for VersionTag {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for VersionTag {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        VersionTag::parse(&s).map_err(de::Error::custom)
    }
}

/// Caller-supplied mapping from deployed contract address to the schema
/// version that instance speaks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VersionMapping {
    entries: HashMap<String, VersionTag>,
}

impl VersionMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, contract_id: impl Into<String>, tag: VersionTag) -> Self {
        self.insert(contract_id, tag);
        self
    }

    pub fn insert(&mut self, contract_id: impl Into<String>, tag: VersionTag) {
        self.entries.insert(contract_id.into(), tag);
    }

    pub fn get(&self, contract_id: &str) -> Option<VersionTag> {
        self.entries.get(contract_id).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build from (address, tag) string pairs, rejecting malformed tags.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let mut mapping = VersionMapping::new();
        for (contract_id, tag) in pairs {
            mapping.insert(contract_id, VersionTag::parse(tag.as_ref())?);
        }
        Ok(mapping)
    }
}

impl Serialize for VersionMapping {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (contract_id, tag) in &self.entries {
            map.serialize_entry(contract_id, tag)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for VersionMapping {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct MappingVisitor;

        impl<'de> Visitor<'de> for MappingVisitor {
            type Value = VersionMapping;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of contract address to version tag")
            }

            fn visit_map<M>(self, mut map: M) -> std::result::Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut mapping = VersionMapping::new();
                while let Some((contract_id, tag)) = map.next_entry::<String, VersionTag>()? {
                    mapping.insert(contract_id, tag);
                }
                Ok(mapping)
            }
        }

        deserializer.deserialize_map(MappingVisitor)
    }
}
