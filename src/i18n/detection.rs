//! Browser and system language detection.

use crate::i18n::Language;
use std::env;

/// Parse an `Accept-Language` style list into tags, highest quality first.
///
/// `"ar-EG,ar;q=0.9,en;q=0.8"` gives `["ar-EG", "ar", "en"]`. Entries with
/// `q=0` or an unparseable weight are dropped; ties keep their original order.
pub fn parse_accept_language(header: &str) -> Vec<String> {
    let mut weighted: Vec<(f32, usize, String)> = header
        .split(',')
        .enumerate()
        .filter_map(|(position, entry)| {
            let mut parts = entry.split(';');
            let tag = parts.next()?.trim();
            if tag.is_empty() || tag == "*" {
                return None;
            }

            let quality = match parts.find_map(|p| p.trim().strip_prefix("q=")) {
                Some(q) => q.trim().parse::<f32>().ok()?,
                None => 1.0,
            };
            if quality <= 0.0 {
                return None;
            }

            Some((quality, position, tag.to_string()))
        })
        .collect();

    weighted.sort_by(|a, b| b.0.total_cmp(&a.0).then(a.1.cmp(&b.1)));
    weighted.into_iter().map(|(_, _, tag)| tag).collect()
}

/// Read the process locale from `LC_ALL`, `LC_MESSAGES` then `LANG`.
///
/// `"de_DE.UTF-8"` becomes `"de-DE"`. `C` and `POSIX` are ignored.
pub fn detect_system_locale() -> Option<String> {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .iter()
        .filter_map(|var| env::var(var).ok())
        .find_map(|value| normalize_locale(&value))
}

fn normalize_locale(value: &str) -> Option<String> {
    let trimmed = value.trim();
    let locale = trimmed.split(['.', '@']).next()?.replace('_', "-");
    if locale.is_empty() || locale == "C" || locale == "POSIX" {
        return None;
    }
    Some(locale)
}

/// First tag whose primary subtag is an enabled language.
pub fn match_supported<S: AsRef<str>>(tags: &[S]) -> Option<Language> {
    tags.iter().find_map(|tag| {
        let primary = tag.as_ref().split('-').next()?.trim().to_ascii_lowercase();
        Language::from_code(&primary).ok()
    })
}
