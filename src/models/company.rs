use serde::{Deserialize, Serialize};

use crate::domain::company::Company as DomainCompany;
use crate::domain::types::{
    AverageScore, Category, CompanyId, CompanyName, LocalizedText, LogoUrl, ReviewCount,
    TypeConstraintError, WebsiteUrl,
};

/// Raw row of `companies.json` as authored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRecord {
    pub id: String,
    pub name: String,
    pub logo: String,
    pub category: String,
    pub average_score: f64,
    pub review_count: i64,
    pub description: LocalizedText,
    pub website: String,
}

impl TryFrom<CompanyRecord> for DomainCompany {
    type Error = TypeConstraintError;

    fn try_from(record: CompanyRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CompanyId::new(record.id)?,
            name: CompanyName::new(record.name)?,
            logo: LogoUrl::new(record.logo)?,
            category: Category::try_from(record.category)?,
            average_score: AverageScore::new(record.average_score)?,
            review_count: ReviewCount::new(record.review_count)?,
            description: record.description,
            website: WebsiteUrl::new(record.website)?,
        })
    }
}
