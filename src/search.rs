//! Quick-search matching, highlighting and the recent-search list.

use serde::{Deserialize, Serialize};

use crate::domain::company::Company;
use crate::domain::types::{Category, Locale};

/// Maximum number of quick-search suggestions.
pub const MAX_SUGGESTIONS: usize = 5;
/// Characters kept on each side of a description match.
pub const SNIPPET_RADIUS: usize = 30;
/// Maximum number of remembered searches.
pub const MAX_RECENT_SEARCHES: usize = 5;
/// Preference key the recent searches are stored under.
pub const RECENT_SEARCHES_KEY: &str = "finscope_recent_searches";

/// Which company field produced a suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchSource {
    Name,
    Category,
    Description,
}

/// A quick-search hit.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion<'a> {
    pub company: &'a Company,
    pub matched_snippet: String,
    pub match_source: MatchSource,
}

/// Lowercase one character while keeping a one-to-one character mapping, so
/// match positions in the folded text are valid in the original.
fn fold(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

fn folded_chars(text: &str) -> Vec<char> {
    text.chars().map(fold).collect()
}

/// Character offsets of every non-overlapping case-insensitive occurrence.
fn find_all(haystack: &[char], needle: &[char]) -> Vec<usize> {
    let mut found = Vec::new();
    if needle.is_empty() || needle.len() > haystack.len() {
        return found;
    }
    let mut start = 0;
    while start + needle.len() <= haystack.len() {
        if haystack[start..start + needle.len()] == *needle {
            found.push(start);
            start += needle.len();
        } else {
            start += 1;
        }
    }
    found
}

fn contains_folded(text: &str, needle: &[char]) -> bool {
    !find_all(&folded_chars(text), needle).is_empty()
}

/// Cut a window of [`SNIPPET_RADIUS`] characters around the first match,
/// marking truncated sides with `...`.
pub fn snippet(text: &str, query: &str) -> Option<String> {
    let needle = folded_chars(query);
    let chars: Vec<char> = text.chars().collect();
    let index = *find_all(&folded_chars(text), &needle).first()?;

    let start = index.saturating_sub(SNIPPET_RADIUS);
    let end = (index + needle.len() + SNIPPET_RADIUS).min(chars.len());
    let mut out = String::new();
    if start > 0 {
        out.push_str("...");
    }
    out.extend(&chars[start..end]);
    if end < chars.len() {
        out.push_str("...");
    }
    Some(out)
}

/// Match companies against a quick-search query.
///
/// The first matching field wins in the order name, category, description.
/// Descriptions match in either language while the snippet is cut from the
/// description in `locale`.
pub fn suggest<'a>(companies: &'a [Company], query: &str, locale: Locale) -> Vec<Suggestion<'a>> {
    let query = query.trim();
    if query.is_empty() {
        return Vec::new();
    }
    let needle = folded_chars(query);

    companies
        .iter()
        .filter_map(|company| {
            let (match_source, matched_snippet) = if contains_folded(company.name.as_str(), &needle) {
                (MatchSource::Name, company.name.as_str().to_string())
            } else if contains_folded(company.category.as_str(), &needle) {
                (MatchSource::Category, company.category.as_str().to_string())
            } else if contains_folded(&company.description.en, &needle)
                || contains_folded(&company.description.th, &needle)
            {
                let snippet = snippet(company.description.get(locale), query).unwrap_or_default();
                (MatchSource::Description, snippet)
            } else {
                return None;
            };
            Some(Suggestion {
                company,
                matched_snippet,
                match_source,
            })
        })
        .take(MAX_SUGGESTIONS)
        .collect()
}

/// A run of text, marked when it matched the query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub text: String,
    pub marked: bool,
}

/// Split `text` into plain and marked segments for every occurrence of `query`.
pub fn highlight(text: &str, query: &str) -> Vec<Segment> {
    let plain = |text: String| Segment {
        text,
        marked: false,
    };
    if query.trim().is_empty() {
        return vec![plain(text.to_string())];
    }

    let needle = folded_chars(query);
    let chars: Vec<char> = text.chars().collect();
    let mut segments = Vec::new();
    let mut cursor = 0;
    for start in find_all(&folded_chars(text), &needle) {
        if start > cursor {
            segments.push(plain(chars[cursor..start].iter().collect()));
        }
        let end = start + needle.len();
        segments.push(Segment {
            text: chars[start..end].iter().collect(),
            marked: true,
        });
        cursor = end;
    }
    if cursor < chars.len() || segments.is_empty() {
        segments.push(plain(chars[cursor..].iter().collect()));
    }
    segments
}

/// What a search page query refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum SearchContext {
    Category(Category),
    Company(String),
    General(String),
}

impl SearchContext {
    /// Classify a query; `None` for an empty query.
    pub fn classify(query: &str, companies: &[Company]) -> Option<Self> {
        if query.is_empty() {
            return None;
        }
        if let Some(category) = Category::from_slug(query) {
            return Some(SearchContext::Category(category));
        }
        let lower = query.to_lowercase();
        if let Some(company) = companies
            .iter()
            .find(|company| company.name.as_str().to_lowercase() == lower)
        {
            return Some(SearchContext::Company(company.name.as_str().to_string()));
        }
        Some(SearchContext::General(query.to_string()))
    }
}

/// Most-recent-first list of distinct searches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecentSearches(Vec<String>);

impl RecentSearches {
    /// Decode a stored value. Anything unreadable yields an empty list.
    pub fn from_stored(raw: Option<&str>) -> Self {
        raw.and_then(|raw| serde_json::from_str::<Vec<String>>(raw).ok())
            .map(|entries| {
                let mut recent = Self::default();
                for entry in entries.iter().rev() {
                    recent.add(entry);
                }
                recent
            })
            .unwrap_or_default()
    }

    pub fn to_stored(&self) -> String {
        serde_json::to_string(&self.0).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn entries(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Put a search in front, dropping case-insensitive duplicates.
    /// Blank input is ignored.
    pub fn add(&mut self, search: &str) {
        let search = search.trim();
        if search.is_empty() {
            return;
        }
        let lower = search.to_lowercase();
        self.0.retain(|existing| existing.to_lowercase() != lower);
        self.0.insert(0, search.to_string());
        self.0.truncate(MAX_RECENT_SEARCHES);
    }

    /// Remove entries equal to `search`.
    pub fn remove(&mut self, search: &str) {
        self.0.retain(|existing| existing != search);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}
