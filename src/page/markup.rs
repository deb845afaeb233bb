//! HTML escaping and no-translate fragment handling.

use regex::Regex;
use std::sync::OnceLock;

static NO_TRANSLATE_REGEX: OnceLock<Regex> = OnceLock::new();
static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

/// Escape text for use in element content or a quoted attribute.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// `<span>` fragments marked `class="notranslate"` or `translate="no"`, in
/// document order, verbatim.
pub fn extract_no_translate(markup: &str) -> Vec<String> {
    let regex = NO_TRANSLATE_REGEX.get_or_init(|| {
        Regex::new(
            r#"(?s)<span\b[^>]*(?:class="[^"]*\bnotranslate\b[^"]*"|translate="no")[^>]*>.*?</span>"#,
        )
        .expect("Invalid no-translate regex")
    });

    regex
        .find_iter(markup)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Put preserved fragments back into escaped translated text.
///
/// `{0}`, `{1}`, ... mark where each fragment goes. Fragments without a
/// placeholder are appended after a space, in order. Placeholders without a
/// fragment are left as typed.
pub fn splice_no_translate(translated_html: &str, fragments: &[String]) -> String {
    if fragments.is_empty() {
        return translated_html.to_string();
    }

    let regex = PLACEHOLDER_REGEX
        .get_or_init(|| Regex::new(r"\{(\d+)\}").expect("Invalid placeholder regex"));

    let mut used = vec![false; fragments.len()];
    let spliced = regex
        .replace_all(translated_html, |caps: &regex::Captures<'_>| {
            let index: Option<usize> = caps[1].parse().ok();
            match index.and_then(|i| fragments.get(i).map(|f| (i, f))) {
                Some((i, fragment)) => {
                    used[i] = true;
                    fragment.clone()
                }
                None => caps[0].to_string(),
            }
        })
        .into_owned();

    fragments
        .iter()
        .zip(used)
        .filter(|(_, was_used)| !was_used)
        .fold(spliced, |mut out, (fragment, _)| {
            out.push(' ');
            out.push_str(fragment);
            out
        })
}
