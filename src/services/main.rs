use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::company::Company;
use crate::domain::review::ReviewSort;
use crate::domain::types::{Category, Locale};
use crate::i18n::ReviewsText;
use crate::listing::top_rated_in;
use crate::preferences::HelpfulVotes;
use crate::repository::{CompanyReader, ReviewListQuery, ReviewReader};
use crate::services::reviews::ReviewView;

use super::{ServiceError, ServiceResult};

/// Companies shown per category section on the home page.
pub const SECTION_SIZE: usize = 4;
/// Reviews shown in the latest-reviews strip.
pub const LATEST_REVIEWS: usize = 3;

/// Best rated companies of one category.
#[derive(Debug, Clone, Serialize)]
pub struct CategorySection {
    pub category: Category,
    pub slug: &'static str,
    pub companies: Vec<Company>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LatestReview {
    pub company_name: String,
    pub review: ReviewView,
}

#[derive(Debug, Clone, Serialize)]
pub struct HomePage {
    pub company_count: usize,
    pub sections: Vec<CategorySection>,
    pub latest_reviews: Vec<LatestReview>,
}

impl HomePage {
    pub fn is_empty(&self) -> bool {
        self.company_count == 0
    }
}

/// Core business logic for the home page.
///
/// Builds one section per category that has companies, plus the newest
/// reviews of companies present in the catalog.
pub fn show_home<R>(
    locale: Locale,
    today: NaiveDate,
    t: &ReviewsText,
    repo: &R,
) -> ServiceResult<HomePage>
where
    R: CompanyReader + ReviewReader,
{
    let companies = match repo.list_companies() {
        Ok(companies) => companies,
        Err(e) => {
            log::error!("Failed to list companies: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let sections = Category::ALL
        .into_iter()
        .map(|category| CategorySection {
            category,
            slug: category.slug(),
            companies: top_rated_in(&companies, category, SECTION_SIZE)
                .into_iter()
                .cloned()
                .collect(),
        })
        .filter(|section| !section.companies.is_empty())
        .collect();

    let mut reviews = match repo.list_reviews(ReviewListQuery::default()) {
        Ok(reviews) => reviews,
        Err(e) => {
            log::error!("Failed to list reviews: {e}");
            return Err(ServiceError::Internal);
        }
    };
    ReviewSort::Newest.sort(&mut reviews);

    let votes = HelpfulVotes::default();
    let latest_reviews = reviews
        .iter()
        .filter_map(|review| {
            let company = companies.iter().find(|c| c.id == review.company_id)?;
            Some(LatestReview {
                company_name: company.name.as_str().to_string(),
                review: ReviewView::new(review, &votes, locale, today, t),
            })
        })
        .take(LATEST_REVIEWS)
        .collect();

    Ok(HomePage {
        company_count: companies.len(),
        sections,
        latest_reviews,
    })
}
