use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

/// Query string of the quick-search suggestion endpoint.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct SuggestQueryForm {
    #[validate(length(max = 100))]
    pub query: Option<String>,
}

/// Body of the "remove one recent search" form.
#[derive(Debug, Deserialize, Validate)]
pub struct RecentSearchForm {
    #[validate(length(min = 1, max = 100))]
    pub search: String,
}

#[derive(Debug, Error)]
#[error("Search form validation failed: {0}")]
pub struct SearchFormError(String);

impl From<ValidationErrors> for SearchFormError {
    fn from(value: ValidationErrors) -> Self {
        Self(value.to_string())
    }
}

impl SuggestQueryForm {
    /// The query to match, empty when absent.
    pub fn into_query(self) -> Result<String, SearchFormError> {
        self.validate()?;
        Ok(self.query.unwrap_or_default())
    }
}

impl RecentSearchForm {
    pub fn into_search(self) -> Result<String, SearchFormError> {
        self.validate()?;
        Ok(self.search)
    }
}
