use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    CompanyId, HelpfulCount, LocalizedText, Rating, ReviewId, ReviewTitle, ReviewerInitials,
    ReviewerName,
};

/// Response a company posted under a review.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompanyReply {
    pub content: LocalizedText,
    pub date: NaiveDate,
}

/// A customer review of a single company.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    /// Foreign key by value; the company is not required to exist.
    pub company_id: CompanyId,
    pub reviewer_name: ReviewerName,
    pub reviewer_initials: ReviewerInitials,
    pub rating: Rating,
    pub title: ReviewTitle,
    pub content: LocalizedText,
    pub date: NaiveDate,
    pub verified: bool,
    pub helpful: HelpfulCount,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_reply: Option<CompanyReply>,
}

/// Orderings offered on the company page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReviewSort {
    #[default]
    Newest,
    Highest,
    Lowest,
    MostHelpful,
}

impl ReviewSort {
    pub const ALL: [ReviewSort; 4] = [
        ReviewSort::Newest,
        ReviewSort::Highest,
        ReviewSort::Lowest,
        ReviewSort::MostHelpful,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Highest => "highest",
            Self::Lowest => "lowest",
            Self::MostHelpful => "mostHelpful",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|sort| sort.as_str() == value.trim())
    }

    /// Stable sort; ties keep fixture order.
    pub fn sort(self, reviews: &mut [Review]) {
        match self {
            Self::Newest => reviews.sort_by(|a, b| b.date.cmp(&a.date)),
            Self::Highest => reviews.sort_by(|a, b| b.rating.cmp(&a.rating)),
            Self::Lowest => reviews.sort_by(|a, b| a.rating.cmp(&b.rating)),
            Self::MostHelpful => reviews.sort_by(|a, b| b.helpful.cmp(&a.helpful)),
        }
    }
}
