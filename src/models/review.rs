use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::review::{CompanyReply as DomainCompanyReply, Review as DomainReview};
use crate::domain::types::{
    CompanyId, HelpfulCount, LocalizedText, Rating, ReviewId, ReviewTitle, ReviewerInitials,
    ReviewerName, TypeConstraintError,
};

/// Raw company reply as stored in `reviews.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyReplyRecord {
    pub content: LocalizedText,
    pub date: String,
}

/// Raw row of `reviews.json` as authored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRecord {
    pub id: String,
    pub company_id: String,
    pub reviewer_name: String,
    pub reviewer_initials: String,
    pub rating: i64,
    pub title: String,
    pub content: LocalizedText,
    pub date: String,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub helpful: i64,
    #[serde(default)]
    pub company_reply: Option<CompanyReplyRecord>,
}

/// Accepts plain `YYYY-MM-DD` dates and full RFC 3339 timestamps.
fn parse_date(value: &str) -> Result<NaiveDate, TypeConstraintError> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(value).map(|dt| dt.date_naive()))
        .map_err(|_| TypeConstraintError::InvalidValue(format!("date: {value}")))
}

impl TryFrom<CompanyReplyRecord> for DomainCompanyReply {
    type Error = TypeConstraintError;

    fn try_from(record: CompanyReplyRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            content: record.content,
            date: parse_date(&record.date)?,
        })
    }
}

impl TryFrom<ReviewRecord> for DomainReview {
    type Error = TypeConstraintError;

    fn try_from(record: ReviewRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ReviewId::new(record.id)?,
            company_id: CompanyId::new(record.company_id)?,
            reviewer_name: ReviewerName::new(record.reviewer_name)?,
            reviewer_initials: ReviewerInitials::new(record.reviewer_initials)?,
            rating: Rating::new(record.rating)?,
            title: ReviewTitle::new(record.title)?,
            content: record.content,
            date: parse_date(&record.date)?,
            verified: record.verified,
            helpful: HelpfulCount::new(record.helpful)?,
            company_reply: record.company_reply.map(TryInto::try_into).transpose()?,
        })
    }
}
