//! Generic updater for the shared page shell.
//!
//! This is a plain function. The page renderer calls it once at the end of
//! each render pass; it never triggers a render itself.

use crate::i18n::{Language, TranslationStore};
use crate::page::markup::{escape_html, extract_no_translate, splice_no_translate};
use crate::page::Document;

/// Translate every `data-i18n` element of the document.
///
/// Elements without a translation go back to their default markup.
/// No-translate fragments from the default markup are kept verbatim.
/// Returns how many elements were translated.
pub fn apply_common_translations(
    document: &mut Document,
    store: &TranslationStore,
    language: Language,
) -> usize {
    let mut translated = 0;

    for element in document.chrome_mut() {
        match store
            .resolve(&element.key, language)
            .filter(|text| !text.trim().is_empty())
        {
            Some(text) => {
                let fragments = extract_no_translate(&element.default_markup);
                element.markup = splice_no_translate(&escape_html(text), &fragments);
                translated += 1;
            }
            None => element.markup = element.default_markup.clone(),
        }
    }

    translated
}
