//! Display strings for annotation labels.
//!
//! Translations belong to the host. The annotator only knows the two keys
//! below and asks a [`Localizer`] for their text.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::band::OutcomeBand;
use crate::error::TnoResult;

/// Key of the opportunity label.
pub const KEY_OPPORTUNITY: &str = "TNO.Opportunity";
/// Key of the threat label.
pub const KEY_THREAT: &str = "TNO.Threat";

/// Resolves a localization key to display text.
pub trait Localizer {
    /// Text for `key`. Implementations return the key itself when unknown.
    fn localize(&self, key: &str) -> String;
}

/// Localization key for a band's label.
pub fn label_key(band: OutcomeBand) -> Option<&'static str> {
    match band {
        OutcomeBand::Opportunity => Some(KEY_OPPORTUNITY),
        OutcomeBand::Threat => Some(KEY_THREAT),
        OutcomeBand::None => None,
    }
}

/// A flat key-to-text translation table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    entries: BTreeMap<String, String>,
}

impl Catalog {
    /// The built-in English strings.
    pub fn english() -> Self {
        let mut catalog = Self::default();
        catalog.insert(KEY_OPPORTUNITY, "OPPORTUNITY");
        catalog.insert(KEY_THREAT, "THREAT");
        catalog
    }

    /// Parse a catalog from a JSON object of key/text pairs.
    pub fn from_json(json: &str) -> TnoResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Add or replace an entry.
    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.entries.insert(key.into(), text.into());
    }

    /// Overlay another catalog on top of this one.
    pub fn merged(mut self, other: Catalog) -> Self {
        self.entries.extend(other.entries);
        self
    }
}

impl Localizer for Catalog {
    fn localize(&self, key: &str) -> String {
        self.entries
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_labels() {
        let en = Catalog::english();
        assert_eq!(en.localize(KEY_OPPORTUNITY), "OPPORTUNITY");
        assert_eq!(en.localize(KEY_THREAT), "THREAT");
    }

    #[test]
    fn unknown_key_falls_back_to_key() {
        assert_eq!(Catalog::default().localize(KEY_THREAT), "TNO.Threat");
    }

    #[test]
    fn json_overlay() {
        let de = Catalog::from_json(r#"{ "TNO.Threat": "BEDROHUNG" }"#).unwrap();
        let merged = Catalog::english().merged(de);
        assert_eq!(merged.localize(KEY_THREAT), "BEDROHUNG");
        assert_eq!(merged.localize(KEY_OPPORTUNITY), "OPPORTUNITY");
    }

    #[test]
    fn label_keys() {
        assert_eq!(label_key(OutcomeBand::Threat), Some(KEY_THREAT));
        assert_eq!(label_key(OutcomeBand::None), None);
    }
}
