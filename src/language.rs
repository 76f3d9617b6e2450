//! Spoken language names and their speech locale tags

/// Locale used when a spoken language name is not recognized
pub const FALLBACK_LOCALE: &str = "en-US";

/// Spoken language name to locale tag
const LANGUAGES: &[(&str, &str)] = &[
    ("english", "en-US"),
    ("hindi", "hi-IN"),
    ("spanish", "es-ES"),
    ("french", "fr-FR"),
    ("german", "de-DE"),
    ("chinese", "zh-CN"),
    ("japanese", "ja-JP"),
    ("russian", "ru-RU"),
];

/// Map a spoken language name ("Spanish", " french ") to a locale tag
///
/// Unrecognized names map to [`FALLBACK_LOCALE`].
#[must_use]
pub fn locale_for(name: &str) -> &'static str {
    let name = name.trim().to_lowercase();
    LANGUAGES
        .iter()
        .find(|(language, _)| *language == name)
        .map_or(FALLBACK_LOCALE, |(_, locale)| locale)
}

/// The bare language subtag of a locale ("es-ES" -> "es")
#[must_use]
pub fn language_code(locale: &str) -> &str {
    locale.split('-').next().unwrap_or(locale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_languages() {
        assert_eq!(locale_for("spanish"), "es-ES");
        assert_eq!(locale_for("Japanese"), "ja-JP");
        assert_eq!(locale_for("  hindi "), "hi-IN");
    }

    #[test]
    fn test_unknown_language_falls_back() {
        assert_eq!(locale_for("klingon"), "en-US");
        assert_eq!(locale_for(""), "en-US");
    }

    #[test]
    fn test_language_code() {
        assert_eq!(language_code("es-ES"), "es");
        assert_eq!(language_code("zh-CN"), "zh");
        assert_eq!(language_code("fr"), "fr");
    }
}
