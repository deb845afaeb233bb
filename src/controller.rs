//! Active-language state machine.
//!
//! The controller is the only place the active language changes. It owns the
//! translation store and a single [`ContentRenderer`] hook, which it invokes
//! once per successful change. Change notifications go out on a broadcast
//! channel for observers; nothing rendering-related listens to them.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::dataset::Dataset;
use crate::error::SiteError;
use crate::i18n::{
    detect_system_locale, match_supported, parse_accept_language, Direction, Language,
    TranslationLoader, TranslationMetrics, TranslationStore,
};
use crate::page::{ContentRenderer, RenderContext};
use crate::preference::{PreferenceStore, PREFERRED_LANGUAGE_KEY};

const EVENT_CAPACITY: usize = 16;

/// Emitted after every successful language switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LanguageChanged {
    pub code: &'static str,
    pub direction: Direction,
}

struct ReadyState {
    active: Language,
    dataset: Dataset,
    store: TranslationStore,
}

enum ControllerState {
    Uninitialized,
    Ready(ReadyState),
}

pub struct LanguageController<R: ContentRenderer, P: PreferenceStore> {
    loader: TranslationLoader,
    renderer: R,
    preferences: P,
    browser_languages: Vec<String>,
    state: ControllerState,
    events: broadcast::Sender<LanguageChanged>,
}

impl<R: ContentRenderer, P: PreferenceStore> LanguageController<R, P> {
    /// Browser languages default to the process locale.
    pub fn new(loader: TranslationLoader, renderer: R, preferences: P) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            loader,
            renderer,
            preferences,
            browser_languages: detect_system_locale().into_iter().collect(),
            state: ControllerState::Uninitialized,
            events,
        }
    }

    /// Use an `Accept-Language` style list instead of the process locale.
    pub fn with_browser_languages(mut self, accept_language: &str) -> Self {
        self.browser_languages = parse_accept_language(accept_language);
        self
    }

    /// Stored preference, then the first supported browser language, then
    /// the registry default.
    pub fn initial_language(&self) -> Language {
        if let Some(stored) = self.preferences.get(PREFERRED_LANGUAGE_KEY) {
            match Language::from_code(&stored) {
                Ok(language) => return language,
                Err(e) => warn!("Ignoring stored language preference: {}", e),
            }
        }

        match_supported(&self.browser_languages).unwrap_or_else(Language::default_language)
    }

    /// Load the page and render it once. No change notification is sent.
    pub async fn initialize(&mut self) -> Result<Language, SiteError> {
        let active = self.initial_language();
        info!("Initializing page in {}", active);

        let bundle = self.loader.load_page(active).await?;
        self.state = ControllerState::Ready(ReadyState {
            active,
            dataset: bundle.dataset,
            store: bundle.store,
        });
        self.render();

        Ok(active)
    }

    /// Switch the active language.
    ///
    /// Returns `Ok(false)` when `code` is already active. Unknown or disabled
    /// codes leave the current language in place.
    pub async fn set_language(&mut self, code: &str) -> Result<bool, SiteError> {
        let current = match &self.state {
            ControllerState::Uninitialized => return Err(SiteError::NotReady),
            ControllerState::Ready(ready) => ready.active,
        };

        if current.code() == code {
            debug!("Language {} already active", code);
            return Ok(false);
        }

        let language = Language::from_code(code)?;

        let needs_common = match &self.state {
            ControllerState::Ready(ready) => !ready.store.has_common(language),
            ControllerState::Uninitialized => false,
        };
        let common = if needs_common {
            self.loader.load_common(language).await
        } else {
            None
        };

        if let ControllerState::Ready(ready) = &mut self.state {
            if let Some(common) = common {
                ready.store.merge_common(language, common);
            }
            ready.active = language;
        }

        if let Err(e) = self.preferences.set(PREFERRED_LANGUAGE_KEY, language.code()) {
            warn!("Failed to persist language preference: {:#}", e);
        }

        self.render();

        // No receivers is fine.
        let _ = self.events.send(LanguageChanged {
            code: language.code(),
            direction: language.direction(),
        });

        info!("Language changed from {} to {}", current, language);
        Ok(true)
    }

    fn render(&mut self) {
        if let ControllerState::Ready(ready) = &self.state {
            self.renderer.render(&RenderContext {
                dataset: &ready.dataset,
                store: &ready.store,
                language: ready.active,
            });
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<LanguageChanged> {
        self.events.subscribe()
    }

    pub fn active_language(&self) -> Option<Language> {
        match &self.state {
            ControllerState::Ready(ready) => Some(ready.active),
            ControllerState::Uninitialized => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, ControllerState::Ready(_))
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    pub fn preferences(&self) -> &P {
        &self.preferences
    }

    pub fn store(&self) -> Option<&TranslationStore> {
        match &self.state {
            ControllerState::Ready(ready) => Some(&ready.store),
            ControllerState::Uninitialized => None,
        }
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        match &self.state {
            ControllerState::Ready(ready) => Some(&ready.dataset),
            ControllerState::Uninitialized => None,
        }
    }

    pub fn metrics(&self) -> &Arc<TranslationMetrics> {
        self.loader.metrics()
    }
}
