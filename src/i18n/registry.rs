//! Language registry: Single source of truth for all supported languages.
//!
//! The set of languages a page can be shown in is fixed. It is initialised
//! once with `OnceLock` and is immutable afterwards.

use serde::Serialize;
use std::sync::OnceLock;

/// Text direction of a language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Ltr,
    Rtl,
}

impl Direction {
    /// Value of the HTML `dir` attribute
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }
}

/// Configuration for a supported language.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// ISO 639-1 language code (e.g., "en", "ar")
    pub code: &'static str,

    /// English name of the language
    pub name: &'static str,

    /// Native name of the language, shown in the language switcher
    pub native_name: &'static str,

    /// Whether this is the default language the datasets are written in
    /// (only one should be true)
    pub is_default: bool,

    /// Whether this language is enabled for use
    pub enabled: bool,

    pub direction: Direction,

    /// BCP 47 locale used for number and date formatting
    pub locale: &'static str,
}

/// Global language registry singleton.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Get a language configuration by its code.
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// All enabled languages, in registry order (default first).
    pub fn list_enabled(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().filter(|lang| lang.enabled).collect()
    }

    /// Get all languages (including disabled ones).
    pub fn list_all(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().collect()
    }

    /// The default language configuration.
    ///
    /// # Panics
    /// Panics if the registry does not define exactly one default language
    /// (a configuration error in `default_languages`).
    pub fn default_language(&self) -> &LanguageConfig {
        let defaults: Vec<_> = self
            .languages
            .iter()
            .filter(|lang| lang.is_default)
            .collect();

        match defaults.len() {
            0 => panic!("No default language found in registry"),
            1 => defaults[0],
            _ => panic!("Multiple default languages found in registry"),
        }
    }

    /// Check if a language code is supported and enabled.
    pub fn is_enabled(&self, code: &str) -> bool {
        self.get_by_code(code)
            .map(|lang| lang.enabled)
            .unwrap_or(false)
    }
}

/// Languages the site is published in.
fn default_languages() -> Vec<LanguageConfig> {
    vec![
        LanguageConfig {
            code: "en",
            name: "English",
            native_name: "English",
            is_default: true,
            enabled: true,
            direction: Direction::Ltr,
            locale: "en-US",
        },
        LanguageConfig {
            code: "ar",
            name: "Arabic",
            native_name: "العربية",
            is_default: false,
            enabled: true,
            direction: Direction::Rtl,
            locale: "ar",
        },
        LanguageConfig {
            code: "fr",
            name: "French",
            native_name: "Français",
            is_default: false,
            enabled: true,
            direction: Direction::Ltr,
            locale: "fr-FR",
        },
        LanguageConfig {
            code: "es",
            name: "Spanish",
            native_name: "Español",
            is_default: false,
            enabled: true,
            direction: Direction::Ltr,
            locale: "es-ES",
        },
        LanguageConfig {
            code: "de",
            name: "German",
            native_name: "Deutsch",
            is_default: false,
            enabled: true,
            direction: Direction::Ltr,
            locale: "de-DE",
        },
    ]
}
