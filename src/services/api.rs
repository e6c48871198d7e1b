use serde::Deserialize;

use crate::domain::company::Company;
use crate::domain::review::{Review, ReviewSort};
use crate::domain::types::{Category, CompanyId, Rating};
use crate::forms::reviews::ReviewParams;
use crate::listing::{SearchFilter, SortOption, filter_by_categories, sort_companies};
use crate::repository::{CompanyReader, ReviewReader};
use crate::services::reviews::list_company_reviews;

use super::{ServiceError, ServiceResult};

/// Fields the API query parameter searches in.
const SEARCH_KEYS: [&str; 4] = ["name", "category", "descriptionEn", "descriptionTh"];

/// Query parameters accepted by the `api_v1_companies` endpoint.
#[derive(Deserialize, Debug, Default)]
pub struct ApiV1CompaniesQueryParams {
    pub query: Option<String>,
    pub category: Option<String>,
    pub sort: Option<String>,
}

/// Core business logic for the `/api/v1/companies` endpoint.
///
/// Returns the whole filtered catalog; unknown categories or sort orders are
/// a `NotFound` so API callers notice typos.
pub fn api_v1_companies<R>(params: ApiV1CompaniesQueryParams, repo: &R) -> ServiceResult<Vec<Company>>
where
    R: CompanyReader,
{
    let category = match params.category.as_deref().map(Category::from_slug) {
        None => None,
        Some(Some(category)) => Some(category),
        Some(None) => return Err(ServiceError::NotFound),
    };
    let sort = match params.sort.as_deref().map(SortOption::parse) {
        None => SortOption::default(),
        Some(Some(sort)) => sort,
        Some(None) => return Err(ServiceError::NotFound),
    };

    let companies = match repo.list_companies() {
        Ok(companies) => companies,
        Err(e) => {
            log::error!("Failed to list companies: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let filter = SearchFilter::new(SEARCH_KEYS).with_search_term(params.query.unwrap_or_default());
    let searched = filter.apply(&companies).items;
    let mut matching = filter_by_categories(&searched, category.as_slice());
    sort_companies(&mut matching, sort);

    Ok(matching.into_iter().cloned().collect())
}

/// Query parameters accepted by the `api_v1_company_reviews` endpoint.
#[derive(Deserialize, Debug, Default)]
pub struct ApiV1ReviewsQueryParams {
    pub sort: Option<String>,
    pub rating: Option<i64>,
}

/// Core business logic for the `/api/v1/companies/{id}/reviews` endpoint.
pub fn api_v1_company_reviews<R>(
    company_id: &str,
    params: ApiV1ReviewsQueryParams,
    repo: &R,
) -> ServiceResult<Vec<Review>>
where
    R: CompanyReader + ReviewReader,
{
    let company_id = match CompanyId::new(company_id) {
        Ok(company_id) => company_id,
        Err(_) => return Err(ServiceError::NotFound),
    };

    match repo.get_company_by_id(&company_id) {
        Ok(Some(_)) => {}
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get company: {e}");
            return Err(ServiceError::Internal);
        }
    }

    let rating = match params.rating.map(Rating::new).transpose() {
        Ok(rating) => rating,
        Err(_) => return Err(ServiceError::NotFound),
    };
    let review_params = ReviewParams {
        sort: params
            .sort
            .as_deref()
            .and_then(ReviewSort::parse)
            .unwrap_or_default(),
        rating,
        retry: false,
    };

    list_company_reviews(&company_id, &review_params, repo)
}
