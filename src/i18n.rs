//! Translation dictionaries for the two supported locales.
//!
//! Both dictionaries are compiled into the binary and parsed once by
//! [`Dictionaries::load`]. Every section is typed so a missing key fails at
//! load time rather than rendering an empty string.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::types::{Category, Locale};

const TH_JSON: &str = include_str!("../locales/th.json");
const EN_JSON: &str = include_str!("../locales/en.json");

#[derive(Debug, Error)]
#[error("failed to parse the {locale} dictionary: {source}")]
pub struct DictionaryError {
    pub locale: &'static str,
    #[source]
    pub source: serde_json::Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaText {
    pub site_name: String,
    pub html_lang: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavbarText {
    pub brand: String,
    pub home: String,
    pub companies: String,
    pub reviews: String,
    pub about: String,
    pub search: String,
    pub get_started: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeText {
    pub title: String,
    pub title_highlight: String,
    pub subtitle: String,
    pub search_placeholder: String,
    pub search_button: String,
    pub featured_companies: String,
    pub latest_reviews: String,
    pub view_reviews: String,
    pub hero_title: String,
    pub hero_subtitle: String,
    pub hero_description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FooterText {
    pub about: String,
    pub contact: String,
    pub privacy: String,
    pub terms: String,
    pub copyright: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotFoundText {
    pub title: String,
    pub message: String,
    pub go_home: String,
    pub browse_companies: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonText {
    pub language: String,
    pub thai: String,
    pub english: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortText {
    pub highest_rated: String,
    pub lowest_rated: String,
    pub most_reviews: String,
    pub alphabetical: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryLabels {
    pub fintech: String,
    pub broker: String,
    pub payment: String,
    pub bank: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompaniesText {
    pub title: String,
    pub subtitle: String,
    pub read_more: String,
    pub view_details: String,
    pub reviews: String,
    pub rating: String,
    pub category: String,
    pub all_categories: String,
    pub filter_by_category: String,
    pub search_companies: String,
    pub showing_results: String,
    pub no_companies_found: String,
    pub active_filters: String,
    pub clear_all_filters: String,
    pub visit_website: String,
    pub total_reviews: String,
    pub write_review: String,
    pub sort_by: String,
    pub sort: SortText,
    pub categories: CategoryLabels,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchSuggestionsText {
    pub best_trading_platforms: String,
    pub personal_loans: String,
    pub best_savings_accounts: String,
    pub crypto_exchange: String,
    pub stock_brokers: String,
    pub digital_wallet: String,
    pub investment_apps: String,
    pub payment_gateway: String,
}

impl SearchSuggestionsText {
    /// Popular searches in display order.
    pub fn ordered(&self) -> [&str; 8] {
        [
            &self.best_trading_platforms,
            &self.personal_loans,
            &self.best_savings_accounts,
            &self.crypto_exchange,
            &self.stock_brokers,
            &self.digital_wallet,
            &self.investment_apps,
            &self.payment_gateway,
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchText {
    pub placeholder: String,
    pub recent_searches: String,
    pub suggestions: String,
    pub no_recent_searches: String,
    pub clear_all: String,
    pub results_for: String,
    pub companies_in_category: String,
    pub search_suggestions: SearchSuggestionsText,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationText {
    pub previous: String,
    pub next: String,
    pub page: String,
    pub of: String,
    pub showing: String,
    pub to: String,
    pub results: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadingText {
    pub title: String,
    pub message: String,
    pub companies: String,
    pub reviews: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmptyText {
    pub title: String,
    pub message: String,
    pub companies: String,
    pub reviews: String,
    pub try_adjusting: String,
    pub clear_filters: String,
    pub go_back: String,
    pub company_not_found: String,
    pub company_not_found_message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorText {
    pub title: String,
    pub message: String,
    pub network_error: String,
    pub server_error: String,
    pub not_found: String,
    pub retry: String,
    pub go_home: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatesText {
    pub loading: LoadingText,
    pub empty: EmptyText,
    pub error: ErrorText,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPageText {
    pub explore_text: String,
    pub top_rated: String,
    pub see_more: String,
    pub no_categories_found: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewsText {
    pub title: String,
    pub based_on: String,
    pub write_review: String,
    pub verified: String,
    pub helpful: String,
    pub mark_helpful: String,
    pub company_replied: String,
    pub sort_by: String,
    pub filter_by: String,
    pub all_ratings: String,
    pub newest: String,
    pub highest: String,
    pub lowest: String,
    pub most_helpful: String,
    pub no_reviews: String,
    pub no_reviews_message: String,
    pub stars: String,
    pub days_ago: String,
    pub months_ago: String,
    pub years_ago: String,
    pub today: String,
    pub yesterday: String,
}

/// All user-facing text for one locale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dictionary {
    pub meta: MetaText,
    pub navbar: NavbarText,
    pub home: HomeText,
    pub footer: FooterText,
    pub not_found: NotFoundText,
    pub common: CommonText,
    pub companies: CompaniesText,
    pub search: SearchText,
    pub pagination: PaginationText,
    pub states: StatesText,
    pub category: CategoryPageText,
    pub reviews: ReviewsText,
}

impl Dictionary {
    /// Localized label for a category.
    pub fn category_label(&self, category: Category) -> &str {
        let labels = &self.companies.categories;
        match category {
            Category::Fintech => &labels.fintech,
            Category::Broker => &labels.broker,
            Category::Payment => &labels.payment,
            Category::Bank => &labels.bank,
        }
    }
}

/// The Thai and English dictionaries, parsed once at startup.
#[derive(Debug, Clone)]
pub struct Dictionaries {
    th: Dictionary,
    en: Dictionary,
}

impl Dictionaries {
    pub fn load() -> Result<Self, DictionaryError> {
        Ok(Self {
            th: parse(Locale::Th, TH_JSON)?,
            en: parse(Locale::En, EN_JSON)?,
        })
    }

    pub fn get(&self, locale: Locale) -> &Dictionary {
        match locale {
            Locale::Th => &self.th,
            Locale::En => &self.en,
        }
    }
}

fn parse(locale: Locale, raw: &str) -> Result<Dictionary, DictionaryError> {
    serde_json::from_str(raw).map_err(|source| DictionaryError {
        locale: locale.as_str(),
        source,
    })
}

/// Replace every `{{name}}` placeholder with its value.
///
/// Placeholders without a matching value are left untouched.
pub fn interpolate(template: &str, values: &[(&str, &str)]) -> String {
    let mut rendered = template.to_string();
    for (name, value) in values {
        rendered = rendered.replace(&format!("{{{{{name}}}}}"), value);
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_dictionaries_parse() {
        let dictionaries = Dictionaries::load().unwrap();
        assert_eq!(dictionaries.get(Locale::Th).meta.html_lang, "th");
        assert_eq!(dictionaries.get(Locale::En).meta.html_lang, "en");
        assert_eq!(dictionaries.get(Locale::Th).navbar.home, "หน้าหลัก");
        assert_eq!(dictionaries.get(Locale::En).states.error.retry, "Retry");
    }

    #[test]
    fn category_labels_are_localized() {
        let dictionaries = Dictionaries::load().unwrap();
        assert_eq!(
            dictionaries.get(Locale::Th).category_label(Category::Bank),
            "ธนาคาร"
        );
        assert_eq!(
            dictionaries.get(Locale::En).category_label(Category::Bank),
            "Bank"
        );
    }

    #[test]
    fn interpolate_fills_named_placeholders() {
        assert_eq!(
            interpolate(
                "Showing {{count}} of {{total}} companies",
                &[("count", "3"), ("total", "12")]
            ),
            "Showing 3 of 12 companies"
        );
        assert_eq!(interpolate("{{missing}} stays", &[]), "{{missing}} stays");
    }

    #[test]
    fn popular_searches_keep_display_order() {
        let dictionaries = Dictionaries::load().unwrap();
        let ordered = dictionaries.get(Locale::En).search.search_suggestions.ordered();
        assert_eq!(ordered[0], "Best trading platforms");
        assert_eq!(ordered[7], "Payment gateway");
    }
}
