//! The page dataset: source-of-truth content in the default language.

use crate::i18n::{Precedence, TranslationNode};
use serde_json::Value;

/// Section keys a dataset may carry, in page order.
pub const SECTIONS: &[&str] = &[
    "breadcrumb",
    "hero",
    "quickFacts",
    "media",
    "executiveSummary",
    "casualties",
    "timeline",
    "warCrimes",
    "internationalLaw",
    "testimonies",
    "personalities",
    "historicalImpact",
    "sources",
    "cta",
    "metadata",
];

/// Older datasets spell some sections differently.
const LEGACY_ALIASES: &[(&str, &str)] = &[("internationalLaw", "international_law")];

/// Immutable wrapper around the parsed dataset JSON.
///
/// Paths use the same dot notation as translation keys; array items are
/// addressed by their zero-based index.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    root: Value,
}

impl Dataset {
    /// Wrap a parsed document, moving legacy section names to their
    /// current spelling when the current one is absent.
    pub fn new(mut root: Value) -> Self {
        if let Value::Object(map) = &mut root {
            for (current, legacy) in LEGACY_ALIASES {
                if !map.contains_key(*current) {
                    if let Some(section) = map.remove(*legacy) {
                        map.insert((*current).to_string(), section);
                    }
                }
            }
        }
        Self { root }
    }

    /// Apply the same legacy section renames to a translation dictionary.
    ///
    /// When both spellings are present the current one wins key by key.
    pub fn alias_legacy_sections(dictionary: &mut TranslationNode) {
        let TranslationNode::Branch(children) = dictionary else {
            return;
        };
        for (current, legacy) in LEGACY_ALIASES {
            let Some(section) = children.remove(*legacy) else {
                continue;
            };
            match children.get_mut(*current) {
                Some(existing) => existing.merge(section, Precedence::PreserveExisting),
                None => {
                    children.insert((*current).to_string(), section);
                }
            }
        }
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Walk `path` through objects (by key) and arrays (by index).
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        if path.is_empty() {
            return Some(&self.root);
        }
        path.split('.').try_fold(&self.root, |value, segment| match value {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
    }

    /// Display text of a scalar at `path`. Strings as-is, numbers and
    /// booleans in their JSON form; containers and null give `None`.
    pub fn text(&self, path: &str) -> Option<String> {
        match self.lookup(path)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Number of items in the array at `path`, 0 when absent.
    pub fn len(&self, path: &str) -> usize {
        match self.lookup(path) {
            Some(Value::Array(items)) => items.len(),
            _ => 0,
        }
    }

    /// Keys of the object at `path`, in document order.
    pub fn keys(&self, path: &str) -> Vec<String> {
        match self.lookup(path) {
            Some(Value::Object(map)) => map.keys().cloned().collect(),
            _ => Vec::new(),
        }
    }

    pub fn has_section(&self, section: &str) -> bool {
        matches!(self.lookup(section), Some(value) if !value.is_null())
    }

    /// File stem the page translation file is named after.
    pub fn translation_file_for(dataset_file: &str) -> String {
        let stem = dataset_file.strip_suffix(".json").unwrap_or(dataset_file);
        format!("{}-translations.json", stem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Dataset {
        Dataset::new(json!({
            "hero": {"title": "Lydda", "metaCards": [{"label": "Date", "value": "July 1948"}]},
            "casualties": {"deaths": 426, "breakdown": [
                {"label": "Men"}, {"label": "Women"}, {"label": "Children"}
            ]},
            "international_law": {"title": "Law"}
        }))
    }

    #[test]
    fn test_lookup_by_index() {
        let dataset = sample();
        assert_eq!(dataset.text("casualties.breakdown.2.label").as_deref(), Some("Children"));
        assert_eq!(dataset.text("casualties.breakdown.3.label"), None);
        assert_eq!(dataset.text("casualties.breakdown.x.label"), None);
    }

    #[test]
    fn test_text_of_number() {
        assert_eq!(sample().text("casualties.deaths").as_deref(), Some("426"));
    }

    #[test]
    fn test_text_of_container_is_none() {
        assert_eq!(sample().text("hero"), None);
    }

    #[test]
    fn test_len_and_keys() {
        let dataset = sample();
        assert_eq!(dataset.len("casualties.breakdown"), 3);
        assert_eq!(dataset.len("timeline.events"), 0);
        assert_eq!(dataset.keys("hero"), vec!["title", "metaCards"]);
    }

    #[test]
    fn test_legacy_section_name_is_normalised() {
        let dataset = sample();
        assert!(dataset.has_section("internationalLaw"));
        assert!(!dataset.has_section("international_law"));
        assert_eq!(dataset.text("internationalLaw.title").as_deref(), Some("Law"));
    }

    #[test]
    fn test_translation_file_name() {
        assert_eq!(
            Dataset::translation_file_for("lydda-death-march-1948.json"),
            "lydda-death-march-1948-translations.json"
        );
        assert_eq!(Dataset::translation_file_for("data/page"), "data/page-translations.json");
    }

    #[test]
    fn test_alias_legacy_sections_in_dictionary() {
        let mut dict = TranslationNode::from_json(&json!({
            "international_law": {"sections": {"0": {"heading": "جنيف"}}}
        }))
        .unwrap();

        Dataset::alias_legacy_sections(&mut dict);

        assert_eq!(dict.resolve("internationalLaw.sections.0.heading"), Some("جنيف"));
        assert_eq!(dict.child("international_law"), None);
    }

    #[test]
    fn test_alias_legacy_sections_current_spelling_wins() {
        let mut dict = TranslationNode::from_json(&json!({
            "internationalLaw": {"title": "القانون الدولي"},
            "international_law": {"title": "قانون", "sections": {"0": {"heading": "جنيف"}}}
        }))
        .unwrap();

        Dataset::alias_legacy_sections(&mut dict);

        assert_eq!(dict.resolve("internationalLaw.title"), Some("القانون الدولي"));
        assert_eq!(dict.resolve("internationalLaw.sections.0.heading"), Some("جنيف"));
    }
}
