use serde::Serialize;

use crate::domain::types::Locale;
use crate::dto::search::SuggestionDto;
use crate::forms::listing::ListingParams;
use crate::preferences::{PreferenceStore, load_recent_searches, save_recent_searches};
use crate::repository::CompanyReader;
use crate::search::{RecentSearches, SearchContext, suggest};
use crate::services::companies::{CompanyListPage, listing_state};

use super::{ServiceError, ServiceResult};

#[derive(Debug, Clone, Serialize)]
pub struct SearchPage {
    pub query: String,
    pub context: Option<SearchContext>,
    pub listing: CompanyListPage,
}

/// Core business logic for the search results page.
pub fn show_search<R>(
    params: &ListingParams,
    items_per_page: usize,
    repo: &R,
) -> ServiceResult<SearchPage>
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

    Ok(SearchPage {
        query: params.query.clone(),
        context: SearchContext::classify(&params.query, &companies),
        listing: CompanyListPage::build(&companies, &listing_state(params, items_per_page)),
    })
}

/// Quick-search suggestions for the modal.
pub fn suggest_companies<R>(query: &str, locale: Locale, repo: &R) -> ServiceResult<Vec<SuggestionDto>>
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

    let query = query.trim();
    Ok(suggest(&companies, query, locale)
        .into_iter()
        .map(|hit| SuggestionDto::new(hit, query))
        .collect())
}

/// Remember a submitted search in the visitor's preferences.
pub fn remember_search<S: PreferenceStore>(store: &mut S, search: &str) -> RecentSearches {
    let mut recent = load_recent_searches(store);
    recent.add(search);
    save_recent_searches(store, &recent);
    recent
}

pub fn forget_search<S: PreferenceStore>(store: &mut S, search: &str) -> RecentSearches {
    let mut recent = load_recent_searches(store);
    recent.remove(search);
    save_recent_searches(store, &recent);
    recent
}

pub fn clear_searches<S: PreferenceStore>(store: &mut S) -> RecentSearches {
    let recent = RecentSearches::default();
    save_recent_searches(store, &recent);
    recent
}
