//! Trait list loader.

use std::path::Path;

use tooltip_core::TraitDocument;

use crate::loaders::{LoadResult, read_json};

/// Loader for the trait export.
pub struct TraitLoader;

impl TraitLoader {
    /// Load every trait from a JSON file.
    pub fn load(path: &Path) -> LoadResult<Vec<TraitDocument>> {
        read_json(path)
    }

    /// Load the traits of `set_id`, without single-unit traits.
    pub fn load_set(path: &Path, set_id: &str) -> LoadResult<Vec<TraitDocument>> {
        Ok(Self::filter_set(Self::load(path)?, set_id))
    }

    pub fn filter_set(traits: Vec<TraitDocument>, set_id: &str) -> Vec<TraitDocument> {
        let total = traits.len();
        let filtered: Vec<TraitDocument> = traits
            .into_iter()
            .filter(|document| document.in_set(set_id) && !document.is_unique())
            .collect();

        tracing::debug!(
            "kept {} of {} traits for set {}",
            filtered.len(),
            total,
            set_id
        );
        filtered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keeps_set_traits_without_unique_tiers() {
        let traits: Vec<TraitDocument> = serde_json::from_value(json!([
            {
                "trait_id": "TFT11_Bruiser",
                "set": "TFTSet11",
                "tooltip_text": "",
                "conditional_trait_sets": [{ "min_units": 2, "style_name": "kBronze" }]
            },
            {
                "trait_id": "TFT11_Exalted",
                "set": "TFTSet11",
                "tooltip_text": "",
                "conditional_trait_sets": [{ "min_units": 1, "style_name": "kUnique" }]
            },
            {
                "trait_id": "TFT10_Bruiser",
                "set": "TFTSet10",
                "tooltip_text": ""
            }
        ]))
        .expect("traits parse");

        let kept = TraitLoader::filter_set(traits, "TFTSet11");
        let ids: Vec<&str> = kept.iter().map(|t| t.trait_id.as_str()).collect();
        assert_eq!(ids, vec!["TFT11_Bruiser"]);
    }
}
