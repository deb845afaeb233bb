//! Locale-dependent number and date display.

use crate::i18n::Language;
use chrono::NaiveDate;

const ARABIC_INDIC_DIGITS: [char; 10] = ['٠', '١', '٢', '٣', '٤', '٥', '٦', '٧', '٨', '٩'];

fn group_separator(language: Language) -> &'static str {
    match language.locale() {
        "de-DE" | "es-ES" => ".",
        "fr-FR" => "\u{202F}",
        "ar" => "٬",
        _ => ",",
    }
}

/// Digits needed above the lowest group before any separator is shown.
fn minimum_grouping_digits(language: Language) -> usize {
    match language.locale() {
        "es-ES" => 2,
        _ => 1,
    }
}

fn uses_arabic_digits(language: Language) -> bool {
    language.locale() == "ar"
}

fn localize_digits(text: &str, language: Language) -> String {
    if !uses_arabic_digits(language) {
        return text.to_string();
    }
    text.chars()
        .map(|c| match c.to_digit(10) {
            Some(d) => ARABIC_INDIC_DIGITS[d as usize],
            None => c,
        })
        .collect()
}

/// Group an integer in threes with the language's separator.
pub fn format_integer(value: i64, language: Language) -> String {
    let digits = value.unsigned_abs().to_string();
    let separator = if digits.len() < 3 + minimum_grouping_digits(language) {
        ""
    } else {
        group_separator(language)
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 * separator.len());
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push_str(separator);
        }
        grouped.push(c);
    }

    let signed = if value < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    };
    localize_digits(&signed, language)
}

/// Render an ISO `YYYY-MM-DD` date for the language; other input is
/// returned unchanged.
pub fn format_date(iso: &str, language: Language) -> String {
    let Ok(date) = NaiveDate::parse_from_str(iso.trim(), "%Y-%m-%d") else {
        return iso.to_string();
    };

    let pattern = match language.locale() {
        "en-US" => "%B %-d, %Y",
        "de-DE" => "%d.%m.%Y",
        _ => "%d/%m/%Y",
    };
    localize_digits(&date.format(pattern).to_string(), language)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn french() -> Language {
        Language::from_code("fr").unwrap()
    }

    #[test]
    fn test_format_integer_english() {
        assert_eq!(format_integer(1234567, Language::ENGLISH), "1,234,567");
        assert_eq!(format_integer(999, Language::ENGLISH), "999");
        assert_eq!(format_integer(0, Language::ENGLISH), "0");
        assert_eq!(format_integer(-4200, Language::ENGLISH), "-4,200");
    }

    #[test]
    fn test_format_integer_german_and_french() {
        assert_eq!(format_integer(60000, Language::GERMAN), "60.000");
        assert_eq!(format_integer(60000, french()), "60\u{202F}000");
    }

    #[test]
    fn test_format_integer_spanish_skips_four_digits() {
        let spanish = Language::from_code("es").unwrap();
        assert_eq!(format_integer(1948, spanish), "1948");
        assert_eq!(format_integer(-4200, spanish), "-4200");
        assert_eq!(format_integer(60000, spanish), "60.000");
        assert_eq!(format_integer(1234567, spanish), "1.234.567");
        assert_eq!(format_integer(1948, Language::GERMAN), "1.948");
    }

    #[test]
    fn test_format_integer_arabic_digits() {
        assert_eq!(format_integer(1948, Language::ARABIC), "١٬٩٤٨");
    }

    #[test]
    fn test_format_date_per_locale() {
        assert_eq!(format_date("2024-01-15", Language::ENGLISH), "January 15, 2024");
        assert_eq!(format_date("2024-01-15", Language::GERMAN), "15.01.2024");
        assert_eq!(format_date("2024-01-15", french()), "15/01/2024");
        assert_eq!(format_date("2024-01-15", Language::ARABIC), "١٥/٠١/٢٠٢٤");
    }

    #[test]
    fn test_format_date_passes_through_unparseable() {
        assert_eq!(format_date("July 1948", Language::GERMAN), "July 1948");
    }
}
