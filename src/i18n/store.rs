//! Merged per-language dictionaries and point lookups.

use crate::i18n::{Language, Precedence, TranslationNode};
use std::collections::{HashMap, HashSet};

/// Holds one merged dictionary per language.
///
/// Missing languages and missing keys are normal: `resolve` answers `None`
/// and callers fall back to the dataset's own text.
#[derive(Debug, Clone, Default)]
pub struct TranslationStore {
    dictionaries: HashMap<Language, TranslationNode>,
    common_loaded: HashSet<Language>,
}

impl TranslationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a dot-path for a language.
    pub fn resolve(&self, path: &str, language: Language) -> Option<&str> {
        self.dictionaries.get(&language)?.resolve(path)
    }

    /// Merge `incoming` into the stored dictionary for `language`.
    pub fn merge(&mut self, language: Language, incoming: TranslationNode, precedence: Precedence) {
        self.dictionaries
            .entry(language)
            .or_default()
            .merge(incoming, precedence);
    }

    pub fn dictionary(&self, language: Language) -> Option<&TranslationNode> {
        self.dictionaries.get(&language)
    }

    /// True when any dictionary content is present for the language.
    pub fn has_language(&self, language: Language) -> bool {
        self.dictionaries
            .get(&language)
            .map(|dict| !dict.is_empty())
            .unwrap_or(false)
    }

    /// Languages with a non-empty dictionary, sorted by code.
    pub fn languages(&self) -> Vec<Language> {
        let mut languages: Vec<Language> = self
            .dictionaries
            .iter()
            .filter(|(_, dict)| !dict.is_empty())
            .map(|(lang, _)| *lang)
            .collect();
        languages.sort();
        languages
    }

    /// Record that the shared UI dictionary for `language` has been merged.
    pub fn mark_common_loaded(&mut self, language: Language) {
        self.common_loaded.insert(language);
    }

    pub fn has_common(&self, language: Language) -> bool {
        self.common_loaded.contains(&language)
    }

    /// Merge a common dictionary fetched after the initial load. Keys the
    /// page already translated are kept.
    pub fn merge_common(&mut self, language: Language, common: TranslationNode) {
        self.merge(language, common, Precedence::PreserveExisting);
        self.mark_common_loaded(language);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn node(value: serde_json::Value) -> TranslationNode {
        TranslationNode::from_json(&value).unwrap()
    }

    #[test]
    fn test_resolve_unknown_language_is_none() {
        let store = TranslationStore::new();
        assert_eq!(store.resolve("hero.title", Language::ARABIC), None);
        assert!(!store.has_language(Language::ARABIC));
    }

    #[test]
    fn test_resolve_is_scoped_per_language() {
        let mut store = TranslationStore::new();
        store.merge(
            Language::ARABIC,
            node(json!({"casualties": {"breakdown": {"2": {"label": "أطفال"}}}})),
            Precedence::Overwrite,
        );

        assert_eq!(
            store.resolve("casualties.breakdown.2.label", Language::ARABIC),
            Some("أطفال")
        );
        assert_eq!(store.resolve("casualties.breakdown.2.label", Language::ENGLISH), None);
    }

    #[test]
    fn test_merge_preserve_existing_page_value() {
        let mut store = TranslationStore::new();
        store.merge(
            Language::GERMAN,
            node(json!({"common": {"share": "Teilen (Seite)"}})),
            Precedence::Overwrite,
        );
        store.merge(
            Language::GERMAN,
            node(json!({"common": {"share": "Teilen", "home": "Startseite"}})),
            Precedence::PreserveExisting,
        );

        assert_eq!(store.resolve("common.share", Language::GERMAN), Some("Teilen (Seite)"));
        assert_eq!(store.resolve("common.home", Language::GERMAN), Some("Startseite"));
    }

    #[test]
    fn test_languages_skips_empty_dictionaries() {
        let mut store = TranslationStore::new();
        store.merge(Language::ARABIC, TranslationNode::empty(), Precedence::Overwrite);
        store.merge(Language::GERMAN, node(json!({"a": "b"})), Precedence::Overwrite);
        assert_eq!(store.languages(), vec![Language::GERMAN]);
    }

    #[test]
    fn test_common_loaded_tracking() {
        let mut store = TranslationStore::new();
        assert!(!store.has_common(Language::GERMAN));
        store.mark_common_loaded(Language::GERMAN);
        assert!(store.has_common(Language::GERMAN));
    }

    #[test]
    fn test_merge_common_keeps_page_keys_and_marks_loaded() {
        let mut store = TranslationStore::new();
        store.merge(
            Language::ARABIC,
            node(json!({"common": {"share": "شارك هذه الصفحة"}})),
            Precedence::Overwrite,
        );

        store.merge_common(
            Language::ARABIC,
            node(json!({"common": {"share": "شارك", "language": "اللغة"}})),
        );

        assert!(store.has_common(Language::ARABIC));
        assert_eq!(store.resolve("common.share", Language::ARABIC), Some("شارك هذه الصفحة"));
        assert_eq!(store.resolve("common.language", Language::ARABIC), Some("اللغة"));
    }
}
