use std::str::FromStr;

use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::types::Category;
use crate::listing::SortOption;

/// Raw query string of the directory, category and search pages.
///
/// `category` may repeat (`category=bank&category=broker`), so the form is
/// built from the decoded key/value pairs instead of a derived deserializer.
#[derive(Debug, Default, Validate)]
pub struct ListingQueryForm {
    #[validate(length(max = 100))]
    pub query: Option<String>,
    pub category: Vec<String>,
    pub sort: Option<String>,
    #[validate(range(min = 1))]
    pub page: Option<usize>,
    pub retry: Option<u8>,
}

impl ListingQueryForm {
    /// Collect the known keys; later values of single-valued keys win and
    /// unknown keys are ignored.
    pub fn from_pairs(
        pairs: impl IntoIterator<Item = (String, String)>,
    ) -> Result<Self, ListingQueryError> {
        let mut form = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "query" => form.query = Some(value),
                "category" => form.category.push(value),
                "sort" => form.sort = Some(value),
                "page" => form.page = Some(parse_number("page", &value)?),
                "retry" => form.retry = Some(parse_number("retry", &value)?),
                _ => {}
            }
        }
        Ok(form)
    }
}

fn parse_number<N: FromStr>(field: &'static str, value: &str) -> Result<N, ListingQueryError> {
    value.trim().parse().map_err(|_| ListingQueryError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

/// Validated listing parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingParams {
    pub query: String,
    /// Selected categories in `Category::ALL` order, without duplicates.
    pub categories: Vec<Category>,
    pub sort: SortOption,
    pub page: usize,
    pub retry: bool,
}

impl Default for ListingParams {
    fn default() -> Self {
        Self {
            query: String::new(),
            categories: Vec::new(),
            sort: SortOption::default(),
            page: 1,
            retry: false,
        }
    }
}

impl ListingParams {
    /// Query string reproducing these parameters without the page number.
    ///
    /// Pagination links append `page=N` to it.
    pub fn query_string(&self) -> String {
        let mut pairs = Vec::new();
        if !self.query.is_empty() {
            pairs.push(format!("query={}", urlencoding::encode(&self.query)));
        }
        for category in &self.categories {
            pairs.push(format!("category={}", category.slug()));
        }
        if self.sort != SortOption::default() {
            pairs.push(format!("sort={}", self.sort.as_str()));
        }
        pairs.join("&")
    }
}

#[derive(Debug, Error)]
pub enum ListingQueryError {
    #[error("Listing query validation failed: {0}")]
    Validation(String),
    #[error("Listing query has a non-numeric {field}: {value}")]
    InvalidNumber { field: &'static str, value: String },
}

impl From<ValidationErrors> for ListingQueryError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl TryFrom<ListingQueryForm> for ListingParams {
    type Error = ListingQueryError;

    /// Unknown categories and sort orders fall back to "all" and the default
    /// order instead of failing the page.
    fn try_from(value: ListingQueryForm) -> Result<Self, Self::Error> {
        value.validate()?;

        let mut selected = Vec::new();
        for raw in &value.category {
            match Category::from_slug(raw) {
                Some(category) => selected.push(category),
                None if raw.trim().is_empty() => {}
                None => log::warn!("Ignoring unknown category filter: {raw}"),
            }
        }
        let categories = Category::ALL
            .into_iter()
            .filter(|category| selected.contains(category))
            .collect();
        let sort = value
            .sort
            .as_deref()
            .and_then(SortOption::parse)
            .unwrap_or_default();

        Ok(Self {
            query: value.query.unwrap_or_default().trim().to_string(),
            categories,
            sort,
            page: value.page.unwrap_or(1),
            retry: value.retry.is_some_and(|retry| retry > 0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_values() {
        let form = ListingQueryForm {
            query: Some("  bank ".into()),
            category: vec!["BROKER".into()],
            sort: Some("mostReviews".into()),
            page: Some(3),
            retry: Some(1),
        };
        let params = ListingParams::try_from(form).unwrap();
        assert_eq!(params.query, "bank");
        assert_eq!(params.categories, [Category::Broker]);
        assert_eq!(params.sort, SortOption::MostReviews);
        assert_eq!(params.page, 3);
        assert!(params.retry);
    }

    #[test]
    fn unknown_values_fall_back_to_defaults() {
        let form = ListingQueryForm {
            category: vec!["insurance".into()],
            sort: Some("cheapest".into()),
            ..Default::default()
        };
        let params = ListingParams::try_from(form).unwrap();
        assert!(params.categories.is_empty());
        assert_eq!(params.sort, SortOption::HighestRated);
        assert_eq!(params.page, 1);
        assert!(!params.retry);
    }

    #[test]
    fn rejects_page_zero_and_long_queries() {
        let form = ListingQueryForm {
            page: Some(0),
            ..Default::default()
        };
        assert!(ListingParams::try_from(form).is_err());

        let form = ListingQueryForm {
            query: Some("x".repeat(101)),
            ..Default::default()
        };
        assert!(ListingParams::try_from(form).is_err());
    }

    #[test]
    fn query_string_skips_defaults() {
        let params = ListingParams {
            query: "pay easy".into(),
            categories: vec![Category::Broker, Category::Payment],
            page: 2,
            ..Default::default()
        };
        assert_eq!(
            params.query_string(),
            "query=pay%20easy&category=broker&category=payment"
        );
        assert_eq!(ListingParams::default().query_string(), "");
    }

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn repeated_categories_are_collected_in_fixed_order() {
        let form = ListingQueryForm::from_pairs(pairs(&[
            ("category", "payment"),
            ("category", "bank"),
            ("category", "Payment"),
            ("utm_source", "mail"),
            ("page", "2"),
        ]))
        .unwrap();
        assert_eq!(form.category.len(), 3);

        let params = ListingParams::try_from(form).unwrap();
        assert_eq!(params.categories, [Category::Payment, Category::Bank]);
        assert_eq!(params.page, 2);
    }

    #[test]
    fn non_numeric_page_is_rejected() {
        let result = ListingQueryForm::from_pairs(pairs(&[("page", "two")]));
        assert!(matches!(
            result,
            Err(ListingQueryError::InvalidNumber { field: "page", .. })
        ));
    }
}
