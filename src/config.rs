use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;

use crate::i18n::{detect_system_locale, DEFAULT_COMMON_TIMEOUT};

#[derive(Debug, Clone)]
pub struct Config {
    // Site
    pub site_base_url: String,
    pub page_path: String,
    pub dataset_file: String,

    // Output
    pub output_dir: PathBuf,
    pub preference_file: PathBuf,

    // Loading
    pub common_timeout: Duration,

    // Language selection
    pub browser_languages: String,
    pub site_language: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // Site
            site_base_url: std::env::var("SITE_BASE_URL").context("SITE_BASE_URL not set")?,
            page_path: std::env::var("PAGE_PATH").context("PAGE_PATH not set")?,
            dataset_file: std::env::var("DATASET_FILE").context("DATASET_FILE not set")?,

            // Output
            output_dir: std::env::var("OUTPUT_DIR")
                .unwrap_or_else(|_| "dist".to_string())
                .into(),
            preference_file: std::env::var("PREFERENCE_FILE")
                .unwrap_or_else(|_| ".crisis-docs/preferences.json".to_string())
                .into(),

            // Loading
            common_timeout: std::env::var("COMMON_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_COMMON_TIMEOUT),

            // Language selection
            browser_languages: std::env::var("BROWSER_LANGUAGES")
                .ok()
                .or_else(detect_system_locale)
                .unwrap_or_default(),
            site_language: std::env::var("SITE_LANGUAGE")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
        })
    }

    /// File name for the rendered page in `language`, e.g. `lydda.ar.html`.
    pub fn output_path(&self, language_code: &str) -> PathBuf {
        let stem = std::path::Path::new(&self.dataset_file)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("page");
        self.output_dir.join(format!("{}.{}.html", stem, language_code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 9] = [
        "SITE_BASE_URL",
        "PAGE_PATH",
        "DATASET_FILE",
        "OUTPUT_DIR",
        "PREFERENCE_FILE",
        "COMMON_TIMEOUT_MS",
        "BROWSER_LANGUAGES",
        "SITE_LANGUAGE",
        "LANG",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
        std::env::remove_var("LC_ALL");
        std::env::remove_var("LC_MESSAGES");
    }

    fn set_required() {
        std::env::set_var("SITE_BASE_URL", "https://archive.example.org");
        std::env::set_var("PAGE_PATH", "/massacres/lydda.html");
        std::env::set_var("DATASET_FILE", "lydda.json");
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        set_required();

        let config = Config::from_env().unwrap();

        assert_eq!(config.site_base_url, "https://archive.example.org");
        assert_eq!(config.output_dir, PathBuf::from("dist"));
        assert_eq!(config.preference_file, PathBuf::from(".crisis-docs/preferences.json"));
        assert_eq!(config.common_timeout, Duration::from_millis(2000));
        assert_eq!(config.browser_languages, "");
        assert_eq!(config.site_language, None);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        set_required();
        std::env::set_var("OUTPUT_DIR", "/tmp/out");
        std::env::set_var("COMMON_TIMEOUT_MS", "500");
        std::env::set_var("BROWSER_LANGUAGES", "ar,en;q=0.5");
        std::env::set_var("SITE_LANGUAGE", " de ");

        let config = Config::from_env().unwrap();

        assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.common_timeout, Duration::from_millis(500));
        assert_eq!(config.browser_languages, "ar,en;q=0.5");
        assert_eq!(config.site_language.as_deref(), Some("de"));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_browser_languages_fall_back_to_locale() {
        clear_env();
        set_required();
        std::env::set_var("LANG", "fr_FR.UTF-8");

        let config = Config::from_env().unwrap();
        assert_eq!(config.browser_languages, "fr-FR");
        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_timeout_uses_default() {
        clear_env();
        set_required();
        std::env::set_var("COMMON_TIMEOUT_MS", "soon");

        let config = Config::from_env().unwrap();
        assert_eq!(config.common_timeout, DEFAULT_COMMON_TIMEOUT);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_missing_required_var() {
        clear_env();
        std::env::set_var("SITE_BASE_URL", "https://archive.example.org");

        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("PAGE_PATH not set"));
        clear_env();
    }

    #[test]
    fn test_output_path_uses_dataset_stem() {
        let config = Config {
            site_base_url: String::new(),
            page_path: String::new(),
            dataset_file: "data/lydda.json".to_string(),
            output_dir: PathBuf::from("dist"),
            preference_file: PathBuf::new(),
            common_timeout: DEFAULT_COMMON_TIMEOUT,
            browser_languages: String::new(),
            site_language: None,
        };
        assert_eq!(config.output_path("ar"), PathBuf::from("dist/lydda.ar.html"));
    }
}
