//! Locale negotiation for paths without a locale prefix.

use crate::domain::types::Locale;

/// Path prefixes served without a locale segment.
const UNPREFIXED_ROOTS: [&str; 2] = ["/assets", "/api"];

/// Pick the locale for a visitor.
///
/// Sources are tried in order: explicit `lang` query parameter, the stored
/// locale cookie, the primary tag of the first `Accept-Language` entry, and
/// finally `default`. Unsupported values fall through to the next source.
pub fn negotiate_locale(
    query_lang: Option<&str>,
    cookie: Option<&str>,
    accept_language: Option<&str>,
    default: Locale,
) -> Locale {
    query_lang
        .and_then(Locale::parse)
        .or_else(|| cookie.and_then(Locale::parse))
        .or_else(|| accept_language.and_then(primary_language))
        .unwrap_or(default)
}

/// `"en-US,en;q=0.9"` -> `en`.
fn primary_language(header: &str) -> Option<Locale> {
    let first = header.split(',').next()?;
    let tag = first.split(';').next()?;
    let primary = tag.split('-').next()?;
    Locale::parse(&primary.trim().to_ascii_lowercase())
}

/// Locale of the leading path segment, if any.
pub fn path_locale(path: &str) -> Option<Locale> {
    let segment = path.strip_prefix('/')?.split('/').next()?;
    Locale::ALL.into_iter().find(|locale| locale.as_str() == segment)
}

/// Whether a request path should be redirected to a locale-prefixed one.
///
/// Paths that already carry a locale, static assets, the JSON API and any
/// path whose last segment has a file extension are left alone.
pub fn needs_locale_redirect(path: &str) -> bool {
    if path_locale(path).is_some() {
        return false;
    }
    if UNPREFIXED_ROOTS
        .iter()
        .any(|root| path == *root || path.starts_with(&format!("{root}/")))
    {
        return false;
    }
    let last_segment = path.rsplit('/').next().unwrap_or_default();
    !last_segment.contains('.')
}

/// `/{locale}{path}` with the original query string kept.
pub fn redirect_target(locale: Locale, path: &str, query_string: &str) -> String {
    let path = if path == "/" { "" } else { path };
    let mut target = format!("/{}{}", locale.as_str(), path);
    if !query_string.is_empty() {
        target.push('?');
        target.push_str(query_string);
    }
    target
}

/// Swap the locale segment of a localized path, keeping the rest.
///
/// Paths without a locale segment point at the new locale's home page.
pub fn switch_locale_path(path: &str, locale: Locale) -> String {
    match path_locale(path) {
        Some(current) => {
            let rest = &path[current.as_str().len() + 1..];
            format!("/{}{}", locale.as_str(), rest)
        }
        None => format!("/{}", locale.as_str()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_parameter_wins() {
        let locale = negotiate_locale(Some("en"), Some("th"), Some("th-TH"), Locale::Th);
        assert_eq!(locale, Locale::En);
    }

    #[test]
    fn cookie_beats_header() {
        let locale = negotiate_locale(None, Some("en"), Some("th-TH,th;q=0.9"), Locale::Th);
        assert_eq!(locale, Locale::En);
    }

    #[test]
    fn header_primary_tag_is_used() {
        let locale = negotiate_locale(None, None, Some("en-US,en;q=0.9,th;q=0.8"), Locale::Th);
        assert_eq!(locale, Locale::En);
    }

    #[test]
    fn only_the_first_header_entry_counts() {
        let locale = negotiate_locale(None, None, Some("fr-FR,en;q=0.9"), Locale::Th);
        assert_eq!(locale, Locale::Th);
    }

    #[test]
    fn unsupported_values_fall_through() {
        let locale = negotiate_locale(Some("de"), Some("fr"), Some("th"), Locale::En);
        assert_eq!(locale, Locale::Th);
        assert_eq!(negotiate_locale(None, None, None, Locale::En), Locale::En);
    }

    #[test]
    fn query_and_cookie_codes_match_exactly() {
        let locale = negotiate_locale(Some("EN"), Some("En"), None, Locale::Th);
        assert_eq!(locale, Locale::Th);
        assert_eq!(Locale::parse(" en"), None);
        assert_eq!(Locale::parse("en"), Some(Locale::En));
    }

    #[test]
    fn header_tags_ignore_case() {
        let locale = negotiate_locale(None, None, Some("EN-us,th;q=0.5"), Locale::Th);
        assert_eq!(locale, Locale::En);
    }

    #[test]
    fn redirect_rules() {
        assert!(needs_locale_redirect("/"));
        assert!(needs_locale_redirect("/companies"));
        assert!(needs_locale_redirect("/english/page"));
        assert!(!needs_locale_redirect("/en"));
        assert!(!needs_locale_redirect("/th/companies"));
        assert!(!needs_locale_redirect("/assets/style.css"));
        assert!(!needs_locale_redirect("/api/v1/companies"));
        assert!(!needs_locale_redirect("/favicon.ico"));
        assert!(!needs_locale_redirect("/sitemap.xml"));
    }

    #[test]
    fn redirect_target_keeps_path_and_query() {
        assert_eq!(redirect_target(Locale::Th, "/", ""), "/th");
        assert_eq!(
            redirect_target(Locale::En, "/companies", "query=bank&page=2"),
            "/en/companies?query=bank&page=2"
        );
    }

    #[test]
    fn switch_locale_keeps_the_rest_of_the_path() {
        assert_eq!(switch_locale_path("/th/companies/abc", Locale::En), "/en/companies/abc");
        assert_eq!(switch_locale_path("/en", Locale::Th), "/th");
        assert_eq!(switch_locale_path("/unknown", Locale::En), "/en");
    }
}
