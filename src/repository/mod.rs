use std::sync::Arc;

use crate::domain::company::Company;
use crate::domain::review::Review;
use crate::domain::types::{CompanyId, Rating};
use crate::fetch::Emptiness;

pub mod catalog;
pub mod errors;
pub mod fixture;

pub use errors::{RepositoryError, RepositoryResult};

/// In-memory catalog assembled from the JSON fixtures.
///
/// The whole catalog is replaced on reload, so readers hold an `Arc` and never
/// observe a half-updated list.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Catalog {
    companies: Arc<Vec<Company>>,
    reviews: Arc<Vec<Review>>,
}

impl Catalog {
    /// Create a catalog from already validated records.
    pub fn new(companies: Vec<Company>, reviews: Vec<Review>) -> Self {
        Self {
            companies: Arc::new(companies),
            reviews: Arc::new(reviews),
        }
    }

    /// Every company in fixture order.
    pub fn companies(&self) -> &[Company] {
        &self.companies
    }

    /// Every review in fixture order.
    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }
}

/// A catalog without companies renders the empty state.
impl Emptiness for Catalog {
    fn is_empty_value(&self) -> bool {
        self.companies.is_empty()
    }

    fn is_empty_sequence(&self) -> bool {
        self.companies.is_empty()
    }
}

/// Query parameters used when listing reviews.
#[derive(Debug, Clone, Default)]
pub struct ReviewListQuery {
    /// Restrict to reviews of a company.
    pub company_id: Option<CompanyId>,
    /// Restrict to reviews with exactly this rating.
    pub rating: Option<Rating>,
}

impl ReviewListQuery {
    pub fn company(mut self, company_id: CompanyId) -> Self {
        self.company_id = Some(company_id);
        self
    }
    pub fn rating(mut self, rating: Rating) -> Self {
        self.rating = Some(rating);
        self
    }
}

/// Read-only operations for company entities.
pub trait CompanyReader {
    /// List all companies in fixture order.
    fn list_companies(&self) -> RepositoryResult<Vec<Company>>;
    /// Retrieve a company by its identifier.
    fn get_company_by_id(&self, id: &CompanyId) -> RepositoryResult<Option<Company>>;
}

/// Read-only operations for review entities.
pub trait ReviewReader {
    /// List reviews matching the supplied query parameters, in fixture order.
    fn list_reviews(&self, query: ReviewListQuery) -> RepositoryResult<Vec<Review>>;
}
