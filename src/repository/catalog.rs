use crate::domain::company::Company;
use crate::domain::review::Review;
use crate::domain::types::CompanyId;
use crate::repository::{Catalog, CompanyReader, RepositoryResult, ReviewListQuery, ReviewReader};

impl CompanyReader for Catalog {
    fn list_companies(&self) -> RepositoryResult<Vec<Company>> {
        Ok(self.companies().to_vec())
    }

    fn get_company_by_id(&self, id: &CompanyId) -> RepositoryResult<Option<Company>> {
        Ok(self.companies().iter().find(|c| &c.id == id).cloned())
    }
}

impl ReviewReader for Catalog {
    fn list_reviews(&self, query: ReviewListQuery) -> RepositoryResult<Vec<Review>> {
        Ok(self
            .reviews()
            .iter()
            .filter(|r| query.company_id.as_ref().is_none_or(|id| &r.company_id == id))
            .filter(|r| query.rating.is_none_or(|rating| r.rating == rating))
            .cloned()
            .collect())
    }
}
