use serde::{Deserialize, Serialize};

use crate::domain::types::{
    AverageScore, Category, CompanyId, CompanyName, LocalizedText, LogoUrl, ReviewCount,
    WebsiteUrl,
};

/// A financial company listed in the directory.
///
/// Companies are immutable once loaded from the fixture; the directory never
/// writes them back.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: CompanyId,
    pub name: CompanyName,
    pub logo: LogoUrl,
    pub category: Category,
    pub average_score: AverageScore,
    pub review_count: ReviewCount,
    pub description: LocalizedText,
    pub website: WebsiteUrl,
}

impl Company {
    /// Case-insensitive substring match on name and both descriptions.
    ///
    /// `needle_lower` must already be lower-cased.
    pub fn matches_lowercase(&self, needle_lower: &str) -> bool {
        self.name.to_lowercase().contains(needle_lower)
            || self.description.contains_lowercase(needle_lower)
    }
}
