//! Internationalization (i18n) module for multi-language pages.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for all supported languages and their metadata
//! - `language`: Validated `Language` type with direction and locale
//! - `dictionary`: Recursive translation tree, path resolution and deep merge
//! - `store`: Merged dictionaries for every language
//! - `loader`: Fetch-and-merge sequence for dataset, page and common files
//! - `detection`: Browser and system language preference
//! - `validator`: Alignment checks between translations and the dataset
//! - `metrics`: Fetch, fallback and render counters
//!
//! # Example
//!
//! ```rust,ignore
//! use crisis_docs::i18n::{Language, TranslationStore};
//!
//! let arabic = Language::from_code("ar")?;
//! let label = store
//!     .resolve("casualties.breakdown.2.label", arabic)
//!     .unwrap_or("Children");
//! ```

mod detection;
mod dictionary;
mod language;
mod loader;
mod metrics;
mod registry;
mod store;
mod validator;

pub use detection::{detect_system_locale, match_supported, parse_accept_language};
pub use dictionary::{Precedence, TranslationNode};
pub use language::Language;
pub use loader::{
    normalize_page_translations, root_prefix, PageBundle, TranslationLoader,
    DEFAULT_COMMON_TIMEOUT,
};
pub use metrics::{MetricsReport, TranslationMetrics};
pub use registry::{Direction, LanguageConfig, LanguageRegistry};
pub use store::TranslationStore;
pub use validator::{TranslationValidator, ValidationReport};
