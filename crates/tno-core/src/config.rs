//! Configuration for the annotator.

use serde::{Deserialize, Serialize};

use crate::band::OutcomeBand;
use crate::error::{TnoError, TnoResult};

/// Characters that would break out of a `class="..."` attribute.
const MARKUP_CHARS: [char; 5] = ['"', '\'', '<', '>', '&'];

/// Where the annotator keeps its marker and how it styles its output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotatorConfig {
    /// Flag scope the processed marker lives under.
    pub namespace: String,
    /// Flag key of the processed marker.
    pub processed_key: String,
    /// Class of the element the annotation is inserted into.
    pub container_class: String,
    /// Class shared by every annotation block.
    pub block_class: String,
    /// Style class for opportunity blocks.
    pub opportunity_class: String,
    /// Style class for threat blocks.
    pub threat_class: String,
}

impl Default for AnnotatorConfig {
    fn default() -> Self {
        Self {
            namespace: "threat-and-opportunity".to_string(),
            processed_key: "processed".to_string(),
            container_class: "dice-roll".to_string(),
            block_class: "tno-annotation".to_string(),
            opportunity_class: "tno-opportunity".to_string(),
            threat_class: "tno-threat".to_string(),
        }
    }
}

impl AnnotatorConfig {
    /// Load a config from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> TnoResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the flag namespace.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Set the container class annotations are inserted into.
    pub fn with_container_class(mut self, class: impl Into<String>) -> Self {
        self.container_class = class.into();
        self
    }

    /// Style class for a band, or `None` for [`OutcomeBand::None`].
    pub fn style_class(&self, band: OutcomeBand) -> Option<&str> {
        match band {
            OutcomeBand::Opportunity => Some(&self.opportunity_class),
            OutcomeBand::Threat => Some(&self.threat_class),
            OutcomeBand::None => None,
        }
    }

    /// Reject configs with empty fields, whitespace, or class names that
    /// would break the rendered markup.
    pub fn validate(&self) -> TnoResult<()> {
        let fields = [
            ("namespace", &self.namespace),
            ("processed_key", &self.processed_key),
            ("container_class", &self.container_class),
            ("block_class", &self.block_class),
            ("opportunity_class", &self.opportunity_class),
            ("threat_class", &self.threat_class),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(TnoError::InvalidConfig(format!("{name} is empty")));
            }
            if value.chars().any(char::is_whitespace) {
                return Err(TnoError::InvalidConfig(format!(
                    "{name} contains whitespace: '{value}'"
                )));
            }
        }
        let classes = [
            ("container_class", &self.container_class),
            ("block_class", &self.block_class),
            ("opportunity_class", &self.opportunity_class),
            ("threat_class", &self.threat_class),
        ];
        for (name, value) in classes {
            if let Some(c) = value.chars().find(|c| MARKUP_CHARS.contains(c)) {
                return Err(TnoError::InvalidConfig(format!(
                    "{name} contains markup character '{c}': '{value}'"
                )));
            }
        }
        if self.opportunity_class == self.threat_class {
            return Err(TnoError::InvalidConfig(
                "opportunity_class and threat_class must differ".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = AnnotatorConfig::default();
        assert_eq!(cfg.namespace, "threat-and-opportunity");
        assert_eq!(cfg.processed_key, "processed");
        assert_eq!(cfg.container_class, "dice-roll");
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn builder_methods() {
        let cfg = AnnotatorConfig::default()
            .with_namespace("my-module")
            .with_container_class("message-content");
        assert_eq!(cfg.namespace, "my-module");
        assert_eq!(cfg.container_class, "message-content");
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = AnnotatorConfig::from_json(r#"{ "threat_class": "red" }"#).unwrap();
        assert_eq!(cfg.threat_class, "red");
        assert_eq!(cfg.opportunity_class, "tno-opportunity");
    }

    #[test]
    fn rejects_empty_and_clashing_fields() {
        let err = AnnotatorConfig::from_json(r#"{ "namespace": "" }"#).unwrap_err();
        assert!(matches!(err, TnoError::InvalidConfig(_)));
        let err = AnnotatorConfig::from_json(r#"{ "threat_class": "tno-opportunity" }"#)
            .unwrap_err();
        assert!(err.to_string().contains("must differ"));
        let err = AnnotatorConfig::from_json(r#"{ "block_class": "a b" }"#).unwrap_err();
        assert!(err.to_string().contains("whitespace"));
    }

    #[test]
    fn rejects_markup_in_class_names() {
        for json in [
            r#"{ "block_class": "tno\"x" }"#,
            r#"{ "threat_class": "<b>" }"#,
            r#"{ "opportunity_class": "a&b" }"#,
            r#"{ "container_class": "x'y" }"#,
        ] {
            let err = AnnotatorConfig::from_json(json).unwrap_err();
            assert!(err.to_string().contains("markup character"), "{json}: {err}");
        }
    }

    #[test]
    fn style_class_per_band() {
        let cfg = AnnotatorConfig::default();
        assert_eq!(cfg.style_class(OutcomeBand::Threat), Some("tno-threat"));
        assert_eq!(
            cfg.style_class(OutcomeBand::Opportunity),
            Some("tno-opportunity")
        );
        assert_eq!(cfg.style_class(OutcomeBand::None), None);
    }
}
