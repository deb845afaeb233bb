//! Language type: validated language representation.

use crate::error::SiteError;
use crate::i18n::{Direction, LanguageConfig, LanguageRegistry};
use std::fmt;

/// A validated language.
///
/// Only supported, enabled languages can be constructed, so every
/// `Language` has a registry entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Language {
    code: &'static str,
}

impl Language {
    pub const ENGLISH: Language = Language { code: "en" };
    pub const ARABIC: Language = Language { code: "ar" };
    pub const GERMAN: Language = Language { code: "de" };

    /// Create a Language from a language code string.
    ///
    /// Unknown codes give `SiteError::UnsupportedLanguage`, known but
    /// disabled ones `SiteError::DisabledLanguage`.
    pub fn from_code(code: &str) -> Result<Language, SiteError> {
        match LanguageRegistry::get().get_by_code(code) {
            Some(config) if config.enabled => Ok(Language { code: config.code }),
            Some(_) => Err(SiteError::DisabledLanguage(code.to_string())),
            None => Err(SiteError::UnsupportedLanguage(code.to_string())),
        }
    }

    /// The language datasets are authored in.
    pub fn default_language() -> Language {
        Language {
            code: LanguageRegistry::get().default_language().code,
        }
    }

    /// Every enabled language, default first.
    pub fn all_enabled() -> Vec<Language> {
        LanguageRegistry::get()
            .list_enabled()
            .into_iter()
            .map(|config| Language { code: config.code })
            .collect()
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Get the full language configuration from the registry.
    ///
    /// # Panics
    /// Panics if the code is missing from the registry, which cannot happen
    /// for a `Language` built through `from_code` or the constants.
    pub fn config(&self) -> &'static LanguageConfig {
        LanguageRegistry::get()
            .get_by_code(self.code)
            .expect("Language code should always be valid")
    }

    pub fn name(&self) -> &'static str {
        self.config().name
    }

    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    pub fn direction(&self) -> Direction {
        self.config().direction
    }

    pub fn locale(&self) -> &'static str {
        self.config().locale
    }

    pub fn is_default(&self) -> bool {
        self.config().is_default
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}
