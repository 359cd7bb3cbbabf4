use std::collections::HashMap;

use crate::domain::meal_analysis::entities::{Detection, NormalizedDetection};

/// Detector label to nutrition table key.
pub const DEFAULT_LABEL_ALIASES: &[(&str, &str)] = &[
    ("rice", "white_rice"),
    ("idli", "idli"),
    ("dosa", "dosa"),
    ("sambar", "sambar"),
    ("dal", "dal"),
];

/// Maps the detector's label vocabulary onto canonical food names.
///
/// Labels without an alias are kept verbatim: excluding unknown foods is the
/// job of the nutrition lookup, not of this step.
#[derive(Debug, Clone)]
pub struct LabelNormalizer {
    aliases: HashMap<String, String>,
}

impl Default for LabelNormalizer {
    fn default() -> Self {
        Self::new(
            DEFAULT_LABEL_ALIASES
                .iter()
                .map(|(label, name)| (label.to_string(), name.to_string()))
                .collect(),
        )
    }
}

impl LabelNormalizer {
    pub fn new(aliases: HashMap<String, String>) -> Self {
        Self { aliases }
    }

    /// Adds `overrides` on top of the current aliases, replacing clashing labels.
    pub fn with_overrides(mut self, overrides: HashMap<String, String>) -> Self {
        self.aliases.extend(overrides);
        self
    }

    pub fn canonical_name<'a>(&'a self, label: &'a str) -> &'a str {
        self.aliases.get(label).map(String::as_str).unwrap_or(label)
    }

    pub fn normalize(&self, detections: &[Detection]) -> Vec<NormalizedDetection> {
        detections
            .iter()
            .map(|detection| NormalizedDetection {
                canonical_name: self.canonical_name(&detection.label).to_string(),
                confidence: detection.confidence,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maps_known_labels() {
        let normalizer = LabelNormalizer::default();
        assert_eq!(normalizer.canonical_name("rice"), "white_rice");
        assert_eq!(normalizer.canonical_name("dal"), "dal");
    }

    #[test]
    fn test_unknown_labels_pass_through() {
        let normalizer = LabelNormalizer::default();
        let out = normalizer.normalize(&[Detection::new("pizza", 0.7)]);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].canonical_name, "pizza");
        assert_eq!(out[0].confidence, 0.7);
    }

    #[test]
    fn test_preserves_length_and_order() {
        let normalizer = LabelNormalizer::default();
        let detections = vec![
            Detection::new("dal", 0.5),
            Detection::new("rice", 0.9),
            Detection::new("rice", 0.4),
            Detection::new("burger", 0.6),
        ];

        let names: Vec<_> = normalizer
            .normalize(&detections)
            .into_iter()
            .map(|d| d.canonical_name)
            .collect();

        assert_eq!(names, vec!["dal", "white_rice", "white_rice", "burger"]);
    }

    #[test]
    fn test_overrides_replace_defaults() {
        let normalizer = LabelNormalizer::default().with_overrides(HashMap::from([
            ("rice".to_string(), "brown_rice".to_string()),
            ("roti".to_string(), "chapati".to_string()),
        ]));

        assert_eq!(normalizer.canonical_name("rice"), "brown_rice");
        assert_eq!(normalizer.canonical_name("roti"), "chapati");
        assert_eq!(normalizer.canonical_name("dosa"), "dosa");
    }
}
