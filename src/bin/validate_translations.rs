//! Check a page's translation file against its dataset.
//!
//! Usage:
//!   cargo run --bin validate-translations
//!
//! Required environment variables:
//! - SITE_BASE_URL
//! - PAGE_PATH
//! - DATASET_FILE
//!
//! Prints one JSON report per language and exits non-zero when any
//! translation path does not exist in the dataset.

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::info;

use crisis_docs::config::Config;
use crisis_docs::fetch::SiteClient;
use crisis_docs::i18n::{Language, TranslationLoader, TranslationMetrics, TranslationValidator};
use crisis_docs::retry::RetryConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("crisis_docs=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;
    let client = SiteClient::new(&config.site_base_url, &config.page_path)
        .context("Invalid site URL")?;
    let loader = TranslationLoader::new(
        client,
        &config.dataset_file,
        Arc::new(TranslationMetrics::new()),
    )
    .with_retry(RetryConfig::single_attempt());

    let dataset = loader
        .fetch_dataset()
        .await
        .with_context(|| format!("Failed to load {}", config.dataset_file))?;

    let requested = match &config.site_language {
        Some(code) => Language::from_code(code)?,
        None => Language::default_language(),
    };
    let dictionaries = loader.fetch_page_translations(requested).await;
    if dictionaries.is_empty() {
        info!("No page translations found for {}", config.dataset_file);
    }

    let mut languages: Vec<_> = dictionaries.keys().copied().collect();
    languages.sort();

    let mut reports = Map::new();
    let mut error_count = 0;
    for language in languages {
        let Some(dict) = dictionaries.get(&language) else {
            continue;
        };
        let report = TranslationValidator::validate(&dataset, dict);
        error_count += report.errors.len();
        reports.insert(language.code().to_string(), serde_json::to_value(&report)?);
    }

    println!("{}", serde_json::to_string_pretty(&Value::Object(reports))?);

    if error_count > 0 {
        anyhow::bail!("{} misaligned translation path(s)", error_count);
    }
    Ok(())
}
