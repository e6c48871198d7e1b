use serde::Serialize;

use crate::search::{MatchSource, Segment, Suggestion, highlight};

/// A quick-search hit as sent to the search modal.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionDto {
    pub id: String,
    pub name: String,
    pub logo: String,
    pub category: String,
    pub average_score: f64,
    pub match_source: MatchSource,
    pub matched_snippet: String,
    /// `matched_snippet` split for highlighting.
    pub segments: Vec<Segment>,
}

impl SuggestionDto {
    pub fn new(hit: Suggestion<'_>, query: &str) -> Self {
        let company = hit.company;
        Self {
            id: company.id.as_str().to_string(),
            name: company.name.as_str().to_string(),
            logo: company.logo.as_str().to_string(),
            category: company.category.as_str().to_string(),
            average_score: company.average_score.get(),
            match_source: hit.match_source,
            segments: highlight(&hit.matched_snippet, query),
            matched_snippet: hit.matched_snippet,
        }
    }
}
