//! Per-field translation with fallback to the dataset's own text.

use crate::dataset::Dataset;
use crate::i18n::{Language, TranslationMetrics, TranslationStore};
use crate::page::format::format_integer;
use serde_json::Value;

/// Produces display strings for one render pass.
///
/// Every field is looked up on its own: a translation is used when present
/// and non-empty, otherwise the dataset value at the same path. A section can
/// therefore mix translated and untranslated fields.
pub struct Localizer<'a> {
    dataset: &'a Dataset,
    store: &'a TranslationStore,
    language: Language,
    metrics: Option<&'a TranslationMetrics>,
}

impl<'a> Localizer<'a> {
    pub fn new(dataset: &'a Dataset, store: &'a TranslationStore, language: Language) -> Self {
        Self {
            dataset,
            store,
            language,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: &'a TranslationMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    fn translation(&self, path: &str) -> Option<&'a str> {
        self.store
            .resolve(path, self.language)
            .filter(|text| !text.trim().is_empty())
    }

    /// Translated text for `path`, else the dataset literal.
    pub fn text(&self, path: &str) -> Option<String> {
        if let Some(translated) = self.translation(path) {
            return Some(translated.to_string());
        }

        let literal = self.dataset.text(path)?;
        if !self.language.is_default() {
            if let Some(metrics) = self.metrics {
                metrics.record_fallback();
            }
        }
        Some(literal)
    }

    /// Like `text`, but numeric dataset values are grouped for the locale.
    pub fn number(&self, path: &str) -> Option<String> {
        if let Some(translated) = self.translation(path) {
            return Some(translated.to_string());
        }

        match self.dataset.lookup(path)? {
            Value::Number(n) => match n.as_i64() {
                Some(i) => Some(format_integer(i, self.language)),
                None => Some(n.to_string()),
            },
            _ => self.text(path),
        }
    }

    /// Untranslated dataset value (URLs, icons, CSS types).
    pub fn literal(&self, path: &str) -> Option<String> {
        self.dataset.text(path)
    }

    /// Shared UI label from the common dictionary, else `default`.
    pub fn ui(&self, key: &str, default: &str) -> String {
        self.translation(key).unwrap_or(default).to_string()
    }

    /// Section heading: the section's own `title`, then the common
    /// `common.sections.<section>` label, then `default`.
    pub fn heading(&self, section: &str, default: &str) -> String {
        self.text(&format!("{}.title", section))
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| self.ui(&format!("common.sections.{}", section), default))
    }
}
