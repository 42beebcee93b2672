//! Case-insensitive variable table shared by the renderers.
//!
//! Upstream casing is unreliable (a template may say `AoE` where the data says
//! `AOE`), so every key is lower-cased once on insert and every lookup lower-cases
//! its query. Keys that only collide after folding are reported, not merged quietly.

use std::collections::BTreeMap;

use crate::formula::DataValue;
use crate::level::LevelArray;

/// Merged raw data values and calculation results, keyed by lower-cased name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VariableTable {
    values: BTreeMap<String, LevelArray>,
    /// Name as first seen for each folded key, for collision reports.
    spelled: BTreeMap<String, String>,
}

impl VariableTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts raw data values then calculation results. Calculations win on
    /// identical keys because they are inserted last.
    pub fn build(raw: &[DataValue], calculations: &BTreeMap<String, LevelArray>) -> Self {
        let mut table = Self::from_data_values(raw);
        table.extend(calculations.iter().map(|(name, values)| (name.as_str(), *values)));
        table
    }

    /// Table of raw data values only. Entries without a usable values array are
    /// skipped with a warning.
    pub fn from_data_values(raw: &[DataValue]) -> Self {
        let mut table = Self::new();
        for value in raw {
            let Some(values) = value.values.as_deref() else {
                tracing::warn!("data value '{}' has no values, skipping", value.name);
                continue;
            };
            match LevelArray::try_from(values) {
                Ok(array) => table.insert(&value.name, array),
                Err(err) => {
                    tracing::warn!("data value '{}' skipped: {}", value.name, err);
                }
            }
        }
        table
    }

    /// Inserts under the lower-cased name, replacing any previous value.
    pub fn insert(&mut self, name: &str, values: LevelArray) {
        let key = name.to_lowercase();
        match self.spelled.get(&key) {
            Some(previous) if previous != name => {
                tracing::warn!(
                    "variable '{}' collides with '{}' after case folding, keeping the later one",
                    name,
                    previous
                );
            }
            Some(_) => {}
            None => {
                self.spelled.insert(key.clone(), name.to_owned());
            }
        }
        self.values.insert(key, values);
    }

    /// Case-insensitive lookup.
    pub fn get(&self, name: &str) -> Option<&LevelArray> {
        self.values.get(&name.to_lowercase())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Entries in key order. Keys are lower-cased.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &LevelArray)> {
        self.values.iter().map(|(key, values)| (key.as_str(), values))
    }

    /// Plain mapping, for persisting next to the rendered HTML.
    pub fn to_map(&self) -> BTreeMap<String, LevelArray> {
        self.values.clone()
    }
}

impl<'a> Extend<(&'a str, LevelArray)> for VariableTable {
    fn extend<I: IntoIterator<Item = (&'a str, LevelArray)>>(&mut self, iter: I) {
        for (name, values) in iter {
            self.insert(name, values);
        }
    }
}

impl serde::Serialize for VariableTable {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_map(self.values.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn levels(value: f64) -> Vec<f64> {
        vec![value; 7]
    }

    #[test]
    fn keys_are_lower_cased_once() {
        let table = VariableTable::from_data_values(&[DataValue::new("AOEDamage", levels(5.0))]);

        assert_eq!(table.iter().map(|(key, _)| key).collect::<Vec<_>>(), vec!["aoedamage"]);
        assert!(table.contains("AoEDamage"));
        assert!(table.contains("aoedamage"));
        assert!(!table.contains("AoE"));
    }

    #[test]
    fn skips_values_without_array() {
        let raw = vec![
            DataValue {
                name: "Ghost".into(),
                values: None,
            },
            DataValue::new("Short", vec![1.0, 2.0]),
            DataValue::new("Damage", levels(10.0)),
        ];
        let table = VariableTable::from_data_values(&raw);

        assert_eq!(table.len(), 1);
        assert!(table.get("ghost").is_none());
        assert!(table.get("short").is_none());
    }

    #[test]
    fn calculation_wins_over_raw_value() {
        let raw = vec![DataValue::new("Damage", levels(10.0))];
        let mut calculations = BTreeMap::new();
        calculations.insert("Damage".to_owned(), LevelArray::splat(99.0));

        let table = VariableTable::build(&raw, &calculations);
        assert_eq!(table.get("damage"), Some(&LevelArray::splat(99.0)));
    }

    #[test]
    fn folded_collision_keeps_later_value() {
        let raw = vec![
            DataValue::new("AoE", levels(1.0)),
            DataValue::new("AOE", levels(2.0)),
        ];
        let table = VariableTable::from_data_values(&raw);

        assert_eq!(table.len(), 1);
        assert_eq!(table.get("aoe"), Some(&LevelArray::splat(2.0)));
    }

    #[test]
    fn serializes_as_plain_object() {
        let table = VariableTable::from_data_values(&[DataValue::new("Mana", levels(0.0))]);
        let json = serde_json::to_value(&table).expect("table serializes");
        assert_eq!(json, serde_json::json!({ "mana": [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0] }));
    }
}
