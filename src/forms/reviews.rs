use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::review::ReviewSort;
use crate::domain::types::{Rating, TypeConstraintError};

/// Query string of the company page.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ReviewQueryForm {
    pub sort: Option<String>,
    #[validate(range(min = 1, max = 5))]
    pub rating: Option<i64>,
    pub retry: Option<u8>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewParams {
    pub sort: ReviewSort,
    pub rating: Option<Rating>,
    pub retry: bool,
}

impl ReviewParams {
    /// Query string reproducing the review sort and filter.
    pub fn query_string(&self) -> String {
        let mut pairs = Vec::new();
        if self.sort != ReviewSort::default() {
            pairs.push(format!("sort={}", self.sort.as_str()));
        }
        if let Some(rating) = self.rating {
            pairs.push(format!("rating={rating}"));
        }
        pairs.join("&")
    }
}

#[derive(Debug, Error)]
pub enum ReviewQueryError {
    #[error("Review query validation failed: {0}")]
    Validation(String),
    #[error("Review query contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for ReviewQueryError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for ReviewQueryError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<ReviewQueryForm> for ReviewParams {
    type Error = ReviewQueryError;

    fn try_from(value: ReviewQueryForm) -> Result<Self, Self::Error> {
        value.validate()?;
        let rating = value.rating.map(Rating::new).transpose()?;
        let sort = value
            .sort
            .as_deref()
            .and_then(ReviewSort::parse)
            .unwrap_or_default();
        Ok(Self {
            sort,
            rating,
            retry: value.retry.is_some_and(|retry| retry > 0),
        })
    }
}
