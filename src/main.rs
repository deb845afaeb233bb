use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, warn};

use crisis_docs::config::Config;
use crisis_docs::controller::LanguageController;
use crisis_docs::fetch::SiteClient;
use crisis_docs::i18n::{TranslationLoader, TranslationMetrics};
use crisis_docs::page::{Document, PageRenderer};
use crisis_docs::preference::FilePreferences;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("crisis_docs=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;
    info!(
        "Rendering {} for {}{}",
        config.dataset_file, config.site_base_url, config.page_path
    );

    let client = SiteClient::new(&config.site_base_url, &config.page_path)
        .context("Invalid site URL")?;
    let metrics = Arc::new(TranslationMetrics::new());
    let loader = TranslationLoader::new(client, &config.dataset_file, metrics.clone())
        .with_common_timeout(config.common_timeout);
    let renderer = PageRenderer::new(metrics.clone());
    let preferences = FilePreferences::open(&config.preference_file);

    let mut controller = LanguageController::new(loader, renderer, preferences);
    if !config.browser_languages.is_empty() {
        controller = controller.with_browser_languages(&config.browser_languages);
    }

    let mut active = match controller.initialize().await {
        Ok(language) => language,
        Err(e) => {
            error!("Page failed to load: {}", e);
            let path = config.output_path("error");
            write_page(&path, &Document::error_page(&e.to_string()))?;
            anyhow::bail!("could not load {}: {}", config.dataset_file, e);
        }
    };

    if let Some(code) = &config.site_language {
        match controller.set_language(code).await {
            Ok(_) => {
                if let Some(language) = controller.active_language() {
                    active = language;
                }
            }
            Err(e) => warn!("Keeping {}: {}", active, e),
        }
    }

    let path = config.output_path(active.code());
    write_page(&path, controller.renderer().document())?;

    let report = metrics.report();
    info!(
        "Wrote {} ({} dictionary fetches, {} failed, {} fallback lookups)",
        path.display(),
        report.dictionary_fetches,
        report.fetch_failures,
        report.fallback_lookups
    );
    Ok(())
}

fn write_page(path: &Path, document: &Document) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, document.to_html())
        .with_context(|| format!("Failed to write {}", path.display()))
}
