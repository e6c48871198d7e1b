use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::company::Company;
use crate::domain::types::{CompanyId, Locale};
use crate::forms::listing::ListingParams;
use crate::forms::reviews::ReviewParams;
use crate::i18n::ReviewsText;
use crate::listing::ListingState;
use crate::pagination::Paginated;
use crate::preferences::HelpfulVotes;
use crate::repository::{CompanyReader, ReviewReader};
use crate::services::reviews::{ReviewView, list_company_reviews};

use super::{ServiceError, ServiceResult};

/// One page of the company directory.
#[derive(Debug, Clone, Serialize)]
pub struct CompanyListPage {
    pub companies: Paginated<Company>,
    pub total_count: usize,
    pub filtered_count: usize,
    /// One-based position of the first displayed company.
    pub first_shown: usize,
    /// One-based position of the last displayed company.
    pub last_shown: usize,
    pub has_active_filters: bool,
}

impl CompanyListPage {
    /// Run the listing pipeline over `companies` and keep the visible page.
    pub fn build(companies: &[Company], state: &ListingState) -> Self {
        let listing = state.apply(companies);
        let shown = listing.displayed.len();
        let (first_shown, last_shown) = match shown {
            0 => (0, 0),
            _ => (listing.start_index + 1, listing.start_index + shown),
        };
        Self {
            companies: Paginated::new(
                listing.displayed.into_iter().cloned().collect(),
                listing.current_page,
                listing.total_pages,
            ),
            total_count: listing.total_count,
            filtered_count: listing.filtered_count,
            first_shown,
            last_shown,
            has_active_filters: state.has_active_filters(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.filtered_count == 0
    }
}

/// Listing state seeded from the page's query string.
pub fn listing_state(params: &ListingParams, items_per_page: usize) -> ListingState {
    ListingState::new(items_per_page)
        .with_search_term(params.query.clone())
        .with_categories(params.categories.iter().copied())
        .with_sort(params.sort)
        .with_page(params.page)
}

/// Core business logic for the company directory page.
pub fn show_companies<R>(
    params: &ListingParams,
    items_per_page: usize,
    repo: &R,
) -> ServiceResult<CompanyListPage>
where
    R: CompanyReader,
{
    let companies = match repo.list_companies() {
        Ok(companies) => companies,
        Err(e) => {
            log::error!("Failed to list companies: {e}");
            return Err(ServiceError::Internal);
        }
    };

    Ok(CompanyListPage::build(
        &companies,
        &listing_state(params, items_per_page),
    ))
}

/// A company with its reviews prepared for display.
#[derive(Debug, Clone, Serialize)]
pub struct CompanyDetail {
    pub company: Company,
    pub reviews: Vec<ReviewView>,
}

/// Core business logic for the company page.
///
/// Unknown or malformed ids yield `ServiceError::NotFound`.
pub fn show_company<R>(
    company_id: &str,
    params: &ReviewParams,
    votes: &HelpfulVotes,
    locale: Locale,
    today: NaiveDate,
    t: &ReviewsText,
    repo: &R,
) -> ServiceResult<CompanyDetail>
where
    R: CompanyReader + ReviewReader,
{
    let company_id = match CompanyId::new(company_id) {
        Ok(company_id) => company_id,
        Err(_) => return Err(ServiceError::NotFound),
    };

    let company = match repo.get_company_by_id(&company_id) {
        Ok(Some(company)) => company,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get company: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let reviews = list_company_reviews(&company.id, params, repo)?
        .iter()
        .map(|review| ReviewView::new(review, votes, locale, today, t))
        .collect();

    Ok(CompanyDetail { company, reviews })
}
