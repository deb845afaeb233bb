//! Render passes over the page document.

use std::sync::Arc;

use tracing::debug;

use crate::dataset::{Dataset, SECTIONS};
use crate::i18n::{Language, TranslationMetrics, TranslationStore};
use crate::page::chrome::apply_common_translations;
use crate::page::document::{Document, PAGE_META_CONTAINER};
use crate::page::localizer::Localizer;
use crate::page::sections::{page_meta, render_section};

/// Everything a content renderer needs for one pass.
pub struct RenderContext<'a> {
    pub dataset: &'a Dataset,
    pub store: &'a TranslationStore,
    pub language: Language,
}

/// The single hook the language controller invokes after every change.
///
/// Implementations must not call back into the controller.
pub trait ContentRenderer: Send {
    fn render(&mut self, ctx: &RenderContext<'_>);
}

/// Renders dataset sections and the shared chrome into a [`Document`].
pub struct PageRenderer {
    document: Document,
    metrics: Arc<TranslationMetrics>,
}

impl PageRenderer {
    pub fn new(metrics: Arc<TranslationMetrics>) -> Self {
        Self::with_document(Document::new(), metrics)
    }

    pub fn with_document(document: Document, metrics: Arc<TranslationMetrics>) -> Self {
        Self { document, metrics }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }
}

impl ContentRenderer for PageRenderer {
    fn render(&mut self, ctx: &RenderContext<'_>) {
        self.metrics.record_render_pass();

        let localizer =
            Localizer::new(ctx.dataset, ctx.store, ctx.language).with_metrics(&self.metrics);

        self.document.set_language_attributes(ctx.language);

        let title = localizer
            .text("metadata.pageTitle")
            .or_else(|| localizer.text("hero.title"))
            .unwrap_or_default();
        self.document.set_title(&title);
        self.document
            .set_description(&localizer.text("metadata.description").unwrap_or_default());

        let mut rendered = 0;
        for section in SECTIONS.iter().filter(|s| **s != "metadata") {
            let html = render_section(section, &localizer).unwrap_or_default();
            if !html.is_empty() {
                rendered += 1;
            }
            self.document.replace_container(section, html);
        }
        self.document
            .replace_container(PAGE_META_CONTAINER, page_meta(&localizer).unwrap_or_default());

        let chrome = apply_common_translations(&mut self.document, ctx.store, ctx.language);

        debug!(
            language = %ctx.language,
            sections = rendered,
            chrome,
            "Rendered page"
        );
    }
}
