//! Translation alignment validation.
//!
//! List items are translated by index, so a translation file must mirror the
//! dataset's array order. Reordering or shortening the dataset silently
//! misaligns translated text. This module reports such drift; it never
//! repairs it.

use crate::dataset::Dataset;
use crate::i18n::TranslationNode;
use serde::Serialize;
use serde_json::Value;

/// Top-level keys that hold shared UI strings rather than dataset content.
const CHROME_ROOTS: &[&str] = &["common", "nav", "footer", "languages"];

/// Validation report containing errors and warnings about a translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Keys pointing at dataset locations that do not exist
    pub errors: Vec<String>,

    /// Keys that are suspicious but harmless
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for page translation dictionaries.
pub struct TranslationValidator;

impl TranslationValidator {
    /// Check every translated leaf of one language against the dataset.
    ///
    /// - error: the key's section exists but the path does not (typically an
    ///   index past the end of a list)
    /// - warning: the key's section is not in the dataset at all
    /// - warning: the dataset holds a list or object where a string is
    ///   translated
    pub fn validate(dataset: &Dataset, translations: &TranslationNode) -> ValidationReport {
        let mut report = ValidationReport::new();

        for path in translations.leaf_paths() {
            let section = path.split('.').next().unwrap_or_default();
            if CHROME_ROOTS.contains(&section) {
                continue;
            }

            if !dataset.has_section(section) {
                report
                    .warnings
                    .push(format!("'{}': section '{}' not in dataset", path, section));
                continue;
            }

            match dataset.lookup(&path) {
                None => report
                    .errors
                    .push(format!("'{}': no matching dataset field", path)),
                Some(Value::Array(_)) | Some(Value::Object(_)) => report
                    .warnings
                    .push(format!("'{}': dataset field is not a single value", path)),
                Some(_) => {}
            }
        }

        report
    }
}
