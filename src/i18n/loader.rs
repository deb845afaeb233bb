//! Fetch-and-merge sequence for a page's data and dictionaries.
//!
//! Only the dataset is required. Every translation file is optional: a
//! failure is logged and replaced by an empty dictionary so the page still
//! renders with its default-language text.

use crate::dataset::Dataset;
use crate::error::{FetchError, SiteError};
use crate::fetch::SiteClient;
use crate::i18n::{
    Language, Precedence, TranslationMetrics, TranslationNode, TranslationStore,
    TranslationValidator,
};
use crate::retry::{with_retry_if, RetryConfig};
use futures::stream::{FuturesUnordered, StreamExt};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{timeout_at, Instant};
use tracing::{debug, info, warn};

/// How long to wait for common dictionaries before rendering without them.
pub const DEFAULT_COMMON_TIMEOUT: Duration = Duration::from_millis(2000);

/// Directory (relative to the site root) holding common dictionaries.
const COMMON_DIR: &str = "translations";

/// Everything a page needs before its first render.
#[derive(Debug, Clone)]
pub struct PageBundle {
    pub dataset: Dataset,
    pub store: TranslationStore,
}

pub struct TranslationLoader {
    client: SiteClient,
    dataset_file: String,
    common_timeout: Duration,
    retry: RetryConfig,
    metrics: Arc<TranslationMetrics>,
}

impl TranslationLoader {
    pub fn new(client: SiteClient, dataset_file: &str, metrics: Arc<TranslationMetrics>) -> Self {
        Self {
            client,
            dataset_file: dataset_file.to_string(),
            common_timeout: DEFAULT_COMMON_TIMEOUT,
            retry: RetryConfig::dataset(),
            metrics,
        }
    }

    pub fn with_common_timeout(mut self, timeout: Duration) -> Self {
        self.common_timeout = timeout;
        self
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn dataset_file(&self) -> &str {
        &self.dataset_file
    }

    pub fn metrics(&self) -> &Arc<TranslationMetrics> {
        &self.metrics
    }

    /// Run the full load sequence.
    ///
    /// 1. dataset (required)
    /// 2. page-specific translations (optional)
    /// 3. common dictionaries for every enabled language, concurrently,
    ///    bounded by the common timeout
    /// 4. common merged into page-specific, existing keys win
    /// 5. result published into a fresh store
    pub async fn load_page(&self, requested: Language) -> Result<PageBundle, SiteError> {
        let dataset = self.fetch_dataset().await?;

        let mut merged = self.fetch_page_translations(requested).await;
        for (language, dict) in &merged {
            let report = TranslationValidator::validate(&dataset, dict);
            for error in &report.errors {
                warn!("Translation misaligned [{}]: {}", language, error);
            }
            for warning in &report.warnings {
                debug!("Translation warning [{}]: {}", language, warning);
            }
        }

        let commons = self.fetch_all_common().await;
        let mut store = TranslationStore::new();
        for (language, common) in commons {
            merged
                .entry(language)
                .or_default()
                .merge(common, Precedence::PreserveExisting);
            store.mark_common_loaded(language);
        }

        for (language, dict) in merged {
            store.merge(language, dict, Precedence::Overwrite);
        }

        info!(
            "Loaded page {} with translations for {:?}",
            self.dataset_file,
            store.languages()
        );

        Ok(PageBundle { dataset, store })
    }

    /// Fetch the dataset, retrying transient failures.
    pub async fn fetch_dataset(&self) -> Result<Dataset, SiteError> {
        let value = with_retry_if(
            &self.retry,
            &format!("Dataset {}", self.dataset_file),
            || self.client.get_json(&self.dataset_file),
            FetchError::is_retryable,
        )
        .await
        .map_err(SiteError::DatasetFetch)?;

        if !value.is_object() {
            let url = self
                .client
                .resolve(&self.dataset_file)
                .map(|u| u.to_string())
                .unwrap_or_else(|_| self.dataset_file.clone());
            return Err(SiteError::DatasetFetch(FetchError::Malformed {
                url,
                source: <serde_json::Error as serde::de::Error>::custom(
                    "dataset must be a JSON object",
                ),
            }));
        }

        Ok(Dataset::new(value))
    }

    /// Page-specific dictionaries keyed by language. Never fails.
    pub async fn fetch_page_translations(&self, requested: Language) -> HashMap<Language, TranslationNode> {
        let file = Dataset::translation_file_for(&self.dataset_file);
        self.metrics.record_fetch();

        match self.client.get_json(&file).await {
            Ok(value) => match normalize_page_translations(&value, requested) {
                Some(dictionaries) => dictionaries,
                None => {
                    self.metrics.record_fetch_failure();
                    warn!("Page translations {} are not a JSON object, ignoring", file);
                    HashMap::new()
                }
            },
            Err(e) => {
                self.metrics.record_fetch_failure();
                warn!("No page translations ({}), using dataset text", e);
                HashMap::new()
            }
        }
    }

    /// Common dictionaries for every enabled language.
    ///
    /// All fetches run concurrently. Whatever has not settled by the deadline
    /// is dropped and the page proceeds with the subset that arrived.
    async fn fetch_all_common(&self) -> Vec<(Language, TranslationNode)> {
        let deadline = Instant::now() + self.common_timeout;
        let mut pending: FuturesUnordered<_> = Language::all_enabled()
            .into_iter()
            .map(|language| async move { (language, self.load_common(language).await) })
            .collect();

        let mut loaded = Vec::new();
        loop {
            match timeout_at(deadline, pending.next()).await {
                Ok(Some((language, Some(dict)))) => loaded.push((language, dict)),
                Ok(Some((_, None))) => {}
                Ok(None) => break,
                Err(_) => {
                    warn!(
                        "Common translations timed out after {:?}, {} language(s) skipped",
                        self.common_timeout,
                        pending.len()
                    );
                    break;
                }
            }
        }

        loaded
    }

    /// Fetch one language's common dictionary. `None` on any failure.
    pub async fn load_common(&self, language: Language) -> Option<TranslationNode> {
        let file = common_path(self.client.page_path(), language);
        self.metrics.record_fetch();

        match self.client.get_json(&file).await {
            Ok(value @ Value::Object(_)) => TranslationNode::from_json(&value),
            Ok(_) => {
                self.metrics.record_fetch_failure();
                warn!("Common translations {} are not a JSON object, skipping", file);
                None
            }
            Err(e) => {
                self.metrics.record_fetch_failure();
                warn!("Common translations for {} unavailable: {}", language, e);
                None
            }
        }
    }
}

/// Relative prefix from a page to the site root.
///
/// Counts the non-empty segments of `page_path`. Zero or one segment
/// (`/`, `/page.html`) needs `./`; `n` segments need `../` repeated `n` times.
pub fn root_prefix(page_path: &str) -> String {
    let depth = page_path.split('/').filter(|s| !s.is_empty()).count();
    if depth <= 1 {
        "./".to_string()
    } else {
        "../".repeat(depth)
    }
}

fn common_path(page_path: &str, language: Language) -> String {
    format!("{}{}/{}.json", root_prefix(page_path), COMMON_DIR, language.code())
}

/// Normalise both page-file shapes into per-language dictionaries.
///
/// A file whose top-level keys are all enabled language codes mapping to
/// objects is already nested. Anything else that is an object is a flat
/// single-language file for `requested`. Non-objects give `None`.
/// Legacy section names are renamed the way the dataset's are.
pub fn normalize_page_translations(
    value: &Value,
    requested: Language,
) -> Option<HashMap<Language, TranslationNode>> {
    let map = value.as_object()?;

    let nested = !map.is_empty()
        && map
            .iter()
            .all(|(key, inner)| inner.is_object() && Language::from_code(key).is_ok());

    let mut dictionaries = HashMap::new();
    if nested {
        for (key, inner) in map {
            if let (Ok(language), Some(dict)) = (Language::from_code(key), TranslationNode::from_json(inner)) {
                dictionaries.insert(language, dict);
            }
        }
    } else if let Some(dict) = TranslationNode::from_json(value) {
        dictionaries.insert(requested, dict);
    }

    for dict in dictionaries.values_mut() {
        Dataset::alias_legacy_sections(dict);
    }

    Some(dictionaries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    // ==================== root_prefix Tests ====================

    #[test]
    fn test_root_prefix_depth_two() {
        assert_eq!(root_prefix("/section/page.html"), "../../");
    }

    #[test]
    fn test_root_prefix_root_page() {
        assert_eq!(root_prefix("/page.html"), "./");
        assert_eq!(root_prefix("/"), "./");
        assert_eq!(root_prefix(""), "./");
    }

    #[test]
    fn test_root_prefix_deeper_page() {
        assert_eq!(root_prefix("/Pages/Historical_Massacres/lydda.html"), "../../../");
    }

    #[test]
    fn test_common_path() {
        assert_eq!(
            common_path("/section/page.html", Language::ARABIC),
            "../../translations/ar.json"
        );
        assert_eq!(common_path("/page.html", Language::ENGLISH), "./translations/en.json");
    }

    // ==================== normalize Tests ====================

    #[test]
    fn test_normalize_nested_shape() {
        let value = json!({"ar": {"hero": {"title": "اللد"}}, "de": {"hero": {"title": "Lydda"}}});
        let dicts = normalize_page_translations(&value, Language::ENGLISH).unwrap();

        assert_eq!(dicts.len(), 2);
        assert_eq!(dicts[&Language::ARABIC].resolve("hero.title"), Some("اللد"));
    }

    #[test]
    fn test_normalize_flat_shape_goes_to_requested() {
        let value = json!({"hero": {"title": "Lydda"}});
        let dicts = normalize_page_translations(&value, Language::GERMAN).unwrap();

        assert_eq!(dicts.len(), 1);
        assert_eq!(dicts[&Language::GERMAN].resolve("hero.title"), Some("Lydda"));
    }

    #[test]
    fn test_normalize_mixed_keys_is_flat() {
        let value = json!({"ar": {"hero": {"title": "اللد"}}, "hero": {"title": "Lydda"}});
        let dicts = normalize_page_translations(&value, Language::ENGLISH).unwrap();

        assert_eq!(dicts.len(), 1);
        assert_eq!(dicts[&Language::ENGLISH].resolve("ar.hero.title"), Some("اللد"));
    }

    #[test]
    fn test_normalize_renames_legacy_sections() {
        let value = json!({"ar": {"international_law": {"sections": {"0": {"heading": "جنيف"}}}}});
        let dicts = normalize_page_translations(&value, Language::ENGLISH).unwrap();

        assert_eq!(
            dicts[&Language::ARABIC].resolve("internationalLaw.sections.0.heading"),
            Some("جنيف")
        );
    }

    #[test]
    fn test_normalize_non_object_is_none() {
        assert!(normalize_page_translations(&json!(["a"]), Language::ENGLISH).is_none());
    }

    // ==================== load Tests ====================

    async fn mount_json(server: &MockServer, route: &str, body: Value) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }

    fn loader(server: &MockServer, page: &str) -> TranslationLoader {
        let client = SiteClient::new(&server.uri(), page).unwrap();
        TranslationLoader::new(client, "lydda.json", Arc::new(TranslationMetrics::new()))
            .with_retry(RetryConfig::single_attempt())
    }

    #[tokio::test]
    async fn test_load_page_merges_common_without_overwriting() {
        let server = MockServer::start().await;
        mount_json(&server, "/pages/lydda.json", json!({"hero": {"title": "Lydda"}})).await;
        mount_json(
            &server,
            "/pages/lydda-translations.json",
            json!({"de": {"hero": {"title": "Lydda (de)"}, "common": {"share": "Seite teilen"}}}),
        )
        .await;
        mount_json(
            &server,
            "/translations/de.json",
            json!({"common": {"share": "Teilen", "home": "Startseite"}}),
        )
        .await;

        let bundle = loader(&server, "/pages/lydda.html")
            .load_page(Language::ENGLISH)
            .await
            .expect("dataset is available");

        let store = &bundle.store;
        assert_eq!(store.resolve("hero.title", Language::GERMAN), Some("Lydda (de)"));
        assert_eq!(store.resolve("common.share", Language::GERMAN), Some("Seite teilen"));
        assert_eq!(store.resolve("common.home", Language::GERMAN), Some("Startseite"));
        assert!(store.has_common(Language::GERMAN));
        assert!(!store.has_common(Language::ARABIC));
    }

    #[tokio::test]
    async fn test_load_page_survives_missing_translations() {
        let server = MockServer::start().await;
        mount_json(&server, "/lydda.json", json!({"hero": {"title": "Lydda"}})).await;

        let metrics = Arc::new(TranslationMetrics::new());
        let client = SiteClient::new(&server.uri(), "/lydda.html").unwrap();
        let loader = TranslationLoader::new(client, "lydda.json", metrics.clone());

        let bundle = loader.load_page(Language::ENGLISH).await.expect("page loads");

        assert_eq!(bundle.dataset.text("hero.title").as_deref(), Some("Lydda"));
        assert!(bundle.store.languages().is_empty());
        // page file + one common file per enabled language, all failing
        let expected = 1 + Language::all_enabled().len();
        assert_eq!(metrics.dictionary_fetches(), expected);
        assert_eq!(metrics.fetch_failures(), expected);
    }

    #[tokio::test]
    async fn test_load_page_malformed_page_translations() {
        let server = MockServer::start().await;
        mount_json(&server, "/lydda.json", json!({"hero": {"title": "Lydda"}})).await;
        Mock::given(method("GET"))
            .and(path("/lydda-translations.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{ not json"))
            .mount(&server)
            .await;

        let bundle = loader(&server, "/lydda.html")
            .load_page(Language::ENGLISH)
            .await
            .expect("malformed translations never abort the page");
        assert!(bundle.store.languages().is_empty());
    }

    #[tokio::test]
    async fn test_load_page_dataset_failure_is_fatal() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/lydda.json"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let result = loader(&server, "/lydda.html").load_page(Language::ENGLISH).await;
        assert!(matches!(result, Err(SiteError::DatasetFetch(_))));
    }

    #[tokio::test]
    async fn test_load_page_dataset_must_be_object() {
        let server = MockServer::start().await;
        mount_json(&server, "/lydda.json", json!([1, 2, 3])).await;

        let result = loader(&server, "/lydda.html").load_page(Language::ENGLISH).await;
        assert!(matches!(
            result,
            Err(SiteError::DatasetFetch(FetchError::Malformed { .. }))
        ));
    }

    #[tokio::test]
    async fn test_slow_common_dictionary_is_skipped_after_timeout() {
        let server = MockServer::start().await;
        mount_json(&server, "/lydda.json", json!({"hero": {"title": "Lydda"}})).await;
        mount_json(&server, "/translations/ar.json", json!({"common": {"share": "شارك"}})).await;
        Mock::given(method("GET"))
            .and(path("/translations/fr.json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"common": {"share": "Partager"}}))
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let bundle = loader(&server, "/lydda.html")
            .with_common_timeout(Duration::from_millis(300))
            .load_page(Language::ENGLISH)
            .await
            .unwrap();

        assert_eq!(bundle.store.resolve("common.share", Language::ARABIC), Some("شارك"));
        assert_eq!(bundle.store.resolve("common.share", Language::from_code("fr").unwrap()), None);
    }

    #[tokio::test]
    async fn test_load_common_single_language() {
        let server = MockServer::start().await;
        mount_json(&server, "/translations/de.json", json!({"common": {"home": "Startseite"}})).await;

        let dict = loader(&server, "/section/page.html")
            .load_common(Language::GERMAN)
            .await
            .expect("dictionary present");
        assert_eq!(dict.resolve("common.home"), Some("Startseite"));
    }
}
