//! Per-visitor preferences: chosen locale, recent searches, helpful votes.
//!
//! Everything goes through [`PreferenceStore`]. The site uses [`CookieStore`]
//! so nothing is kept server-side; tests use [`MemoryStore`].

use std::collections::{BTreeSet, HashMap};

use crate::domain::types::{Locale, ReviewId};
use crate::search::{RECENT_SEARCHES_KEY, RecentSearches};

/// Key holding the locale picked with the language switcher.
pub const LOCALE_KEY: &str = "NEXT_LOCALE";
/// Key holding the ids of reviews the visitor marked as helpful.
pub const HELPFUL_VOTES_KEY: &str = "finscope_helpful_votes";

/// Key/value storage for visitor preferences.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
    fn remove(&mut self, key: &str);
}

/// Store backed by a plain map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }
}

/// Locale previously chosen by the visitor, if it is still supported.
pub fn stored_locale(store: &impl PreferenceStore) -> Option<Locale> {
    store.get(LOCALE_KEY).as_deref().and_then(Locale::parse)
}

pub fn store_locale(store: &mut impl PreferenceStore, locale: Locale) {
    store.set(LOCALE_KEY, locale.as_str().to_string());
}

pub fn load_recent_searches(store: &impl PreferenceStore) -> RecentSearches {
    RecentSearches::from_stored(store.get(RECENT_SEARCHES_KEY).as_deref())
}

/// Persist the list; an empty list removes the key.
pub fn save_recent_searches(store: &mut impl PreferenceStore, recent: &RecentSearches) {
    if recent.is_empty() {
        store.remove(RECENT_SEARCHES_KEY);
    } else {
        store.set(RECENT_SEARCHES_KEY, recent.to_stored());
    }
}

/// Reviews this visitor found helpful.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HelpfulVotes(BTreeSet<String>);

impl HelpfulVotes {
    pub fn load(store: &impl PreferenceStore) -> Self {
        let ids = store
            .get(HELPFUL_VOTES_KEY)
            .and_then(|raw| serde_json::from_str::<BTreeSet<String>>(&raw).ok())
            .unwrap_or_default();
        Self(ids)
    }

    pub fn save(&self, store: &mut impl PreferenceStore) {
        match serde_json::to_string(&self.0) {
            Ok(raw) => store.set(HELPFUL_VOTES_KEY, raw),
            Err(e) => log::warn!("Failed to encode helpful votes: {e}"),
        }
    }

    pub fn contains(&self, id: &ReviewId) -> bool {
        self.0.contains(id.as_str())
    }

    /// Record a vote. Returns `false` when the visitor already voted.
    pub fn vote(&mut self, id: &ReviewId) -> bool {
        self.0.insert(id.as_str().to_string())
    }
}

#[cfg(feature = "server")]
pub use cookie::CookieStore;

#[cfg(feature = "server")]
mod cookie {
    use std::collections::HashMap;

    use actix_web::cookie::{Cookie, time::Duration};
    use actix_web::{HttpRequest, HttpResponseBuilder};

    use super::{HELPFUL_VOTES_KEY, LOCALE_KEY, PreferenceStore};
    use crate::search::RECENT_SEARCHES_KEY;

    const KNOWN_KEYS: [&str; 3] = [LOCALE_KEY, RECENT_SEARCHES_KEY, HELPFUL_VOTES_KEY];
    const MAX_AGE_DAYS: i64 = 365;

    /// Preferences read from request cookies.
    ///
    /// Writes are buffered and sent back with [`CookieStore::apply`]. Values are
    /// percent-encoded so JSON and Thai text survive the cookie header.
    #[derive(Debug, Clone, Default)]
    pub struct CookieStore {
        values: HashMap<String, String>,
        changed: Vec<String>,
    }

    impl CookieStore {
        pub fn from_request(req: &HttpRequest) -> Self {
            let mut values = HashMap::new();
            for key in KNOWN_KEYS {
                let Some(cookie) = req.cookie(key) else {
                    continue;
                };
                match urlencoding::decode(cookie.value()) {
                    Ok(value) => {
                        values.insert(key.to_string(), value.into_owned());
                    }
                    Err(e) => log::warn!("Ignoring unreadable {key} cookie: {e}"),
                }
            }
            Self {
                values,
                changed: Vec::new(),
            }
        }

        /// Attach a `Set-Cookie` header for every key written or removed.
        pub fn apply(&self, response: &mut HttpResponseBuilder) {
            for key in &self.changed {
                let cookie = match self.values.get(key) {
                    Some(value) => Cookie::build(key.clone(), urlencoding::encode(value).into_owned())
                        .path("/")
                        .max_age(Duration::days(MAX_AGE_DAYS))
                        .finish(),
                    None => {
                        let mut cookie = Cookie::build(key.clone(), "").path("/").finish();
                        cookie.make_removal();
                        cookie
                    }
                };
                response.cookie(cookie);
            }
        }

        fn mark_changed(&mut self, key: &str) {
            if !self.changed.iter().any(|changed| changed == key) {
                self.changed.push(key.to_string());
            }
        }
    }

    impl PreferenceStore for CookieStore {
        fn get(&self, key: &str) -> Option<String> {
            self.values.get(key).cloned()
        }

        fn set(&mut self, key: &str, value: String) {
            self.values.insert(key.to_string(), value);
            self.mark_changed(key);
        }

        fn remove(&mut self, key: &str) {
            self.values.remove(key);
            self.mark_changed(key);
        }
    }

    #[cfg(test)]
    mod tests {
        use actix_web::HttpResponse;
        use actix_web::cookie::Cookie;
        use actix_web::test::TestRequest;

        use super::*;

        #[test]
        fn reads_and_decodes_known_cookies() {
            let req = TestRequest::default()
                .cookie(Cookie::new(LOCALE_KEY, "en"))
                .cookie(Cookie::new(
                    RECENT_SEARCHES_KEY,
                    urlencoding::encode(r#"["บัญชี","broker"]"#).into_owned(),
                ))
                .cookie(Cookie::new("unrelated", "x"))
                .to_http_request();
            let store = CookieStore::from_request(&req);

            assert_eq!(store.get(LOCALE_KEY).as_deref(), Some("en"));
            assert_eq!(
                store.get(RECENT_SEARCHES_KEY).as_deref(),
                Some(r#"["บัญชี","broker"]"#)
            );
            assert_eq!(store.get("unrelated"), None);
        }

        #[test]
        fn writes_only_changed_keys() {
            let req = TestRequest::default()
                .cookie(Cookie::new(LOCALE_KEY, "th"))
                .cookie(Cookie::new(RECENT_SEARCHES_KEY, "%5B%5D"))
                .to_http_request();
            let mut store = CookieStore::from_request(&req);
            store.set(LOCALE_KEY, "en".to_string());
            store.remove(RECENT_SEARCHES_KEY);

            let mut builder = HttpResponse::Ok();
            store.apply(&mut builder);
            let response = builder.finish();
            let cookies: Vec<_> = response.cookies().collect();

            assert_eq!(cookies.len(), 2);
            let locale = cookies.iter().find(|c| c.name() == LOCALE_KEY).unwrap();
            assert_eq!(locale.value(), "en");
            let recent = cookies
                .iter()
                .find(|c| c.name() == RECENT_SEARCHES_KEY)
                .unwrap();
            assert_eq!(recent.value(), "");
        }
    }
}
