//! Level-1 base stats for one unit.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

/// Flat mapping of stat key → level-1 value.
///
/// Built from the unit's root record, which mixes numeric stats with unrelated
/// fields. Only numeric entries are kept.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "Map<String, Value>", into = "BTreeMap<String, f64>")]
pub struct StatTable {
    stats: BTreeMap<String, f64>,
}

impl StatTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a stat (builder pattern).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: f64) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: f64) {
        self.stats.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.stats.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.stats.iter().map(|(key, value)| (key.as_str(), *value))
    }
}

impl From<Map<String, Value>> for StatTable {
    fn from(record: Map<String, Value>) -> Self {
        let stats = record
            .into_iter()
            .filter_map(|(key, value)| value.as_f64().map(|number| (key, number)))
            .collect();
        Self { stats }
    }
}

impl From<StatTable> for BTreeMap<String, f64> {
    fn from(table: StatTable) -> Self {
        table.stats
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for StatTable {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self {
            stats: iter.into_iter().map(|(key, value)| (key.into(), value)).collect(),
        }
    }
}
