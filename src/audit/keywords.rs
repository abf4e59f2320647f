//! Ordered keyword density map
//!
//! Entries are kept in rank order. Serialized as a JSON object whose keys
//! appear in that same order.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Word → percentage of qualifying tokens, most frequent first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeywordDensity {
    entries: Vec<(String, f64)>,
}

impl KeywordDensity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a density map from entries already in rank order
    pub fn from_entries(entries: Vec<(String, f64)>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Percentage for a word, if it ranked
    pub fn get(&self, word: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(w, _)| w == word)
            .map(|(_, pct)| *pct)
    }

    /// Iterates entries in rank order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(w, pct)| (w.as_str(), *pct))
    }

    /// Ranked words, most frequent first
    pub fn words(&self) -> Vec<&str> {
        self.entries.iter().map(|(w, _)| w.as_str()).collect()
    }
}

impl Serialize for KeywordDensity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (word, pct) in &self.entries {
            map.serialize_entry(word, pct)?;
        }
        map.end()
    }
}

struct KeywordDensityVisitor;

impl<'de> Visitor<'de> for KeywordDensityVisitor {
    type Value = KeywordDensity;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of word to percentage")
    }

    fn visit_map<M: MapAccess<'de>>(self, mut access: M) -> Result<Self::Value, M::Error> {
        let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((word, pct)) = access.next_entry::<String, f64>()? {
            entries.push((word, pct));
        }
        Ok(KeywordDensity { entries })
    }
}

impl<'de> Deserialize<'de> for KeywordDensity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(KeywordDensityVisitor)
    }
}
