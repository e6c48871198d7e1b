use serde::Serialize;

use crate::domain::types::Category;
use crate::forms::listing::ListingParams;
use crate::repository::CompanyReader;
use crate::services::companies::{CompanyListPage, listing_state};

use super::{ServiceError, ServiceResult};

#[derive(Debug, Clone, Serialize)]
pub struct CategoryPage {
    pub category: Category,
    pub listing: CompanyListPage,
}

/// Core business logic for a category page.
///
/// The listing is restricted to `slug`'s category; search, sort and page come
/// from `params`. Unknown slugs yield `ServiceError::NotFound`.
pub fn show_category<R>(
    slug: &str,
    params: &ListingParams,
    items_per_page: usize,
    repo: &R,
) -> ServiceResult<CategoryPage>
where
    R: CompanyReader,
{
    let Some(category) = Category::from_slug(slug) else {
        return Err(ServiceError::NotFound);
    };

    let companies = match repo.list_companies() {
        Ok(companies) => companies,
        Err(e) => {
            log::error!("Failed to list companies: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let state = listing_state(params, items_per_page).with_categories([category]);
    Ok(CategoryPage {
        category,
        listing: CompanyListPage::build(&companies, &state),
    })
}
