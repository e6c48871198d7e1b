//! Filter, sort and paginate pipeline over the company catalog.
//!
//! [`ListingState`] holds the user's choices (search term, categories, sort
//! order, page) and [`ListingState::apply`] derives the visible page from a
//! company slice. The derivation is pure; it never mutates the input.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::domain::company::Company;
use crate::domain::types::Category;

/// Page size used when the caller does not configure one.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

/// Fixed orderings offered by the directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortOption {
    #[default]
    HighestRated,
    LowestRated,
    MostReviews,
    Alphabetical,
}

impl SortOption {
    pub const ALL: [SortOption; 4] = [
        SortOption::HighestRated,
        SortOption::LowestRated,
        SortOption::MostReviews,
        SortOption::Alphabetical,
    ];

    /// Query-string value.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HighestRated => "highestRated",
            Self::LowestRated => "lowestRated",
            Self::MostReviews => "mostReviews",
            Self::Alphabetical => "alphabetical",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|sort| sort.as_str() == value.trim())
    }

    fn compare(self, a: &Company, b: &Company) -> Ordering {
        match self {
            Self::HighestRated => b.average_score.get().total_cmp(&a.average_score.get()),
            Self::LowestRated => a.average_score.get().total_cmp(&b.average_score.get()),
            Self::MostReviews => b.review_count.cmp(&a.review_count),
            Self::Alphabetical => a
                .name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name)),
        }
    }
}

/// Keep companies whose name or either description contains `term`,
/// ignoring case. A blank term keeps everything.
pub fn filter_by_search<'a>(companies: &[&'a Company], term: &str) -> Vec<&'a Company> {
    if term.trim().is_empty() {
        return companies.to_vec();
    }
    let needle = term.to_lowercase();
    companies
        .iter()
        .copied()
        .filter(|company| company.matches_lowercase(&needle))
        .collect()
}

/// Keep companies whose category is selected. No selection keeps everything.
pub fn filter_by_categories<'a>(
    companies: &[&'a Company],
    categories: &[Category],
) -> Vec<&'a Company> {
    if categories.is_empty() {
        return companies.to_vec();
    }
    companies
        .iter()
        .copied()
        .filter(|company| categories.contains(&company.category))
        .collect()
}

/// Stable sort by `sort`.
pub fn sort_companies(companies: &mut [&Company], sort: SortOption) {
    companies.sort_by(|a, b| sort.compare(a, b));
}

/// Best-scored companies of one category, as shown in the home page sections.
pub fn top_rated_in(companies: &[Company], category: Category, max_items: usize) -> Vec<&Company> {
    let mut matching: Vec<&Company> = companies
        .iter()
        .filter(|company| company.category == category)
        .collect();
    sort_companies(&mut matching, SortOption::HighestRated);
    matching.truncate(max_items);
    matching
}

/// User-controlled listing parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingState {
    search_term: String,
    categories: Vec<Category>,
    sort_by: SortOption,
    current_page: usize,
    items_per_page: usize,
}

impl Default for ListingState {
    fn default() -> Self {
        Self::new(DEFAULT_ITEMS_PER_PAGE)
    }
}

impl ListingState {
    pub fn new(items_per_page: usize) -> Self {
        Self {
            search_term: String::new(),
            categories: Vec::new(),
            sort_by: SortOption::default(),
            current_page: 1,
            items_per_page: items_per_page.max(1),
        }
    }

    /// Seed the initial search term.
    pub fn with_search_term(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    /// Seed the initial category selection.
    pub fn with_categories(mut self, categories: impl IntoIterator<Item = Category>) -> Self {
        self.categories.clear();
        for category in categories {
            if !self.categories.contains(&category) {
                self.categories.push(category);
            }
        }
        self
    }

    pub fn with_sort(mut self, sort: SortOption) -> Self {
        self.sort_by = sort;
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.current_page = page.max(1);
        self
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn sort_by(&self) -> SortOption {
        self.sort_by
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    /// Change the search term and go back to the first page.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.current_page = 1;
    }

    /// Replace the category selection and go back to the first page.
    pub fn set_categories(&mut self, categories: impl IntoIterator<Item = Category>) {
        *self = std::mem::take(self).with_categories(categories);
        self.current_page = 1;
    }

    /// Change the sort order and go back to the first page.
    pub fn set_sort_by(&mut self, sort: SortOption) {
        self.sort_by = sort;
        self.current_page = 1;
    }

    pub fn set_current_page(&mut self, page: usize) {
        self.current_page = page.max(1);
    }

    /// Empty search, no categories, default order, first page.
    pub fn clear_filters(&mut self) {
        self.search_term.clear();
        self.categories.clear();
        self.sort_by = SortOption::default();
        self.current_page = 1;
    }

    pub fn has_active_filters(&self) -> bool {
        !self.search_term.trim().is_empty() || !self.categories.is_empty()
    }

    /// Run search, category filter, sort and pagination over `companies`.
    pub fn apply<'a>(&self, companies: &'a [Company]) -> Listing<'a> {
        let all: Vec<&Company> = companies.iter().collect();
        let searched = filter_by_search(&all, &self.search_term);
        let mut filtered = filter_by_categories(&searched, &self.categories);
        sort_companies(&mut filtered, self.sort_by);

        let filtered_count = filtered.len();
        let total_pages = filtered_count.div_ceil(self.items_per_page);
        let start_index = (self.current_page - 1).saturating_mul(self.items_per_page);
        let end_index = start_index.saturating_add(self.items_per_page);
        let displayed = filtered
            .get(start_index.min(filtered_count)..end_index.min(filtered_count))
            .unwrap_or_default()
            .to_vec();

        Listing {
            displayed,
            total_count: companies.len(),
            filtered_count,
            total_pages,
            current_page: self.current_page,
            start_index,
            end_index,
        }
    }
}

/// One rendered page of the directory.
#[derive(Debug, Clone, Serialize)]
pub struct Listing<'a> {
    pub displayed: Vec<&'a Company>,
    pub total_count: usize,
    pub filtered_count: usize,
    pub total_pages: usize,
    pub current_page: usize,
    pub start_index: usize,
    pub end_index: usize,
}

/// Value of a searchable field.
#[derive(Debug, Clone, Copy)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Number(f64),
}

/// Records that expose named fields to [`SearchFilter`].
pub trait Searchable {
    /// Value of the field called `key`, if the record has one.
    fn field(&self, key: &str) -> Option<FieldValue<'_>>;
}

impl Searchable for Company {
    fn field(&self, key: &str) -> Option<FieldValue<'_>> {
        match key {
            "name" => Some(FieldValue::Text(self.name.as_str())),
            "category" => Some(FieldValue::Text(self.category.as_str())),
            "descriptionEn" => Some(FieldValue::Text(&self.description.en)),
            "descriptionTh" => Some(FieldValue::Text(&self.description.th)),
            "averageScore" => Some(FieldValue::Number(self.average_score.get())),
            "reviewCount" => Some(FieldValue::Number(f64::from(self.review_count.get()))),
            _ => None,
        }
    }
}

/// Substring search over a configurable set of fields of any record type.
#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    keys: Vec<String>,
    search_term: String,
}

impl SearchFilter {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            search_term: String::new(),
        }
    }

    pub fn with_search_term(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn clear_search(&mut self) {
        self.search_term.clear();
    }

    /// Records where any configured text field contains the term ignoring
    /// case, or any numeric field's decimal form contains it.
    pub fn apply<'a, T: Searchable>(&self, data: &'a [T]) -> FilterResult<'a, T> {
        if self.search_term.trim().is_empty() {
            return FilterResult {
                items: data.iter().collect(),
            };
        }
        let needle = self.search_term.to_lowercase();
        let items = data
            .iter()
            .filter(|item| {
                self.keys.iter().any(|key| match item.field(key) {
                    Some(FieldValue::Text(text)) => text.to_lowercase().contains(&needle),
                    Some(FieldValue::Number(number)) => number.to_string().contains(&needle),
                    None => false,
                })
            })
            .collect();
        FilterResult { items }
    }
}

/// Output of [`SearchFilter::apply`].
#[derive(Debug)]
pub struct FilterResult<'a, T> {
    pub items: Vec<&'a T>,
}

impl<T> FilterResult<'_, T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test::{four_companies, sample_company};

    fn scores(listing: &Listing<'_>) -> Vec<f64> {
        listing
            .displayed
            .iter()
            .map(|c| c.average_score.get())
            .collect()
    }

    #[test]
    fn highest_rated_orders_scores_descending() {
        let companies = four_companies();
        let listing = ListingState::default().apply(&companies);
        assert_eq!(scores(&listing), vec![4.8, 4.5, 4.2, 3.5]);
    }

    #[test]
    fn lowest_rated_orders_scores_ascending() {
        let companies = four_companies();
        let listing = ListingState::default()
            .with_sort(SortOption::LowestRated)
            .apply(&companies);
        assert_eq!(scores(&listing), vec![3.5, 4.2, 4.5, 4.8]);
    }

    #[test]
    fn most_reviews_and_alphabetical_orders() {
        let companies = four_companies();
        let by_reviews = ListingState::default()
            .with_sort(SortOption::MostReviews)
            .apply(&companies);
        let counts: Vec<u32> = by_reviews
            .displayed
            .iter()
            .map(|c| c.review_count.get())
            .collect();
        assert_eq!(counts, vec![300, 120, 80, 45]);

        let by_name = ListingState::default()
            .with_sort(SortOption::Alphabetical)
            .apply(&companies);
        let names: Vec<&str> = by_name.displayed.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["ABC Broker", "Bank One", "PayEasy", "XYZ Fintech"]);
    }

    #[test]
    fn search_is_case_insensitive_on_name() {
        let companies = four_companies();
        let listing = ListingState::default()
            .with_search_term("xyz")
            .apply(&companies);
        assert_eq!(listing.filtered_count, 1);
        assert_eq!(listing.displayed[0].name, "XYZ Fintech");

        let upper = ListingState::default()
            .with_search_term("XYZ")
            .apply(&companies);
        assert_eq!(upper.filtered_count, 1);
    }

    #[test]
    fn search_matches_thai_description() {
        let companies = four_companies();
        let listing = ListingState::default()
            .with_search_term("บริการทางการเงินของ PayEasy")
            .apply(&companies);
        assert_eq!(listing.filtered_count, 1);
        assert_eq!(listing.displayed[0].id, "pay-easy");
    }

    #[test]
    fn search_results_always_contain_the_term() {
        let companies = four_companies();
        for term in ["a", "Bank", "services", "zzz", "  "] {
            let listing = ListingState::new(100).with_search_term(term).apply(&companies);
            let needle = term.to_lowercase();
            for company in &listing.displayed {
                assert!(term.trim().is_empty() || company.matches_lowercase(&needle));
            }
        }
    }

    #[test]
    fn blank_search_keeps_everything() {
        let companies = four_companies();
        let listing = ListingState::default()
            .with_search_term("   ")
            .apply(&companies);
        assert_eq!(listing.filtered_count, 4);
    }

    #[test]
    fn category_filter_restricts_to_selection() {
        let companies = four_companies();
        let selection = [Category::Broker, Category::Bank];
        let listing = ListingState::default()
            .with_categories(selection)
            .apply(&companies);
        assert_eq!(listing.filtered_count, 2);
        assert!(
            listing
                .displayed
                .iter()
                .all(|c| selection.contains(&c.category))
        );

        let none = ListingState::default()
            .with_categories(Vec::<Category>::new())
            .apply(&companies);
        assert_eq!(none.filtered_count, 4);
    }

    #[test]
    fn pagination_windows_the_filtered_list() {
        let companies = four_companies();
        let state = ListingState::new(2).with_page(2);
        let listing = state.apply(&companies);

        assert_eq!(listing.total_pages, 2);
        assert_eq!(listing.start_index, 2);
        assert_eq!(listing.end_index, 4);
        assert_eq!(scores(&listing), vec![4.2, 3.5]);
    }

    #[test]
    fn displayed_length_matches_remaining_items() {
        let companies: Vec<Company> = (0..7)
            .map(|i| {
                sample_company(
                    &format!("c{i}"),
                    &format!("Company {i}"),
                    Category::Fintech,
                    f64::from(i) / 2.0,
                    i64::from(i),
                )
            })
            .collect();

        for page in 1..=4 {
            let listing = ListingState::new(3).with_page(page).apply(&companies);
            let expected = 3.min(listing.filtered_count.saturating_sub(listing.start_index));
            assert_eq!(listing.displayed.len(), expected);
            assert_eq!(listing.start_index, (page - 1) * 3);
        }
    }

    #[test]
    fn page_far_past_the_end_is_empty() {
        let companies = four_companies();
        let listing = ListingState::new(10).with_page(usize::MAX).apply(&companies);

        assert!(listing.displayed.is_empty());
        assert_eq!(listing.filtered_count, 4);
        assert_eq!(listing.total_pages, 1);
        assert_eq!(listing.end_index, usize::MAX);
    }

    #[test]
    fn changing_filters_resets_page() {
        let mut state = ListingState::new(2).with_page(3);
        state.set_search_term("bank");
        assert_eq!(state.current_page(), 1);

        state.set_current_page(2);
        state.set_categories([Category::Bank]);
        assert_eq!(state.current_page(), 1);

        state.set_current_page(2);
        state.set_sort_by(SortOption::Alphabetical);
        assert_eq!(state.current_page(), 1);
    }

    #[test]
    fn clear_filters_restores_defaults() {
        let mut state = ListingState::new(5)
            .with_search_term("x")
            .with_categories([Category::Payment])
            .with_sort(SortOption::MostReviews)
            .with_page(4);
        state.clear_filters();
        assert_eq!(state, ListingState::new(5));
        assert!(!state.has_active_filters());
    }

    #[test]
    fn top_rated_in_category_is_truncated() {
        let mut companies = four_companies();
        companies.push(sample_company(
            "bank-two",
            "Bank Two",
            Category::Bank,
            4.9,
            10,
        ));
        let top = top_rated_in(&companies, Category::Bank, 1);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].id, "bank-two");
    }

    #[test]
    fn search_filter_matches_text_and_numbers() {
        let companies = four_companies();
        let filter = SearchFilter::new(["name", "averageScore"]).with_search_term("4.8");
        let result = filter.apply(&companies);
        assert_eq!(result.items.len(), 1);
        assert_eq!(result.items[0].id, "xyz-fintech");

        let mut filter = SearchFilter::new(["category"]).with_search_term("PAY");
        assert_eq!(filter.apply(&companies).items.len(), 1);
        filter.clear_search();
        assert_eq!(filter.apply(&companies).items.len(), 4);

        let unknown = SearchFilter::new(["website"]).with_search_term("example");
        assert!(unknown.apply(&companies).is_empty());
    }

    #[test]
    fn sort_option_round_trips_query_values() {
        for sort in SortOption::ALL {
            assert_eq!(SortOption::parse(sort.as_str()), Some(sort));
        }
        assert_eq!(SortOption::parse("random"), None);
    }
}
