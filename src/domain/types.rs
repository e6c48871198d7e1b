//! Strongly-typed value objects used by domain entities.
//!
//! Domain structs should carry these wrappers instead of raw primitives so that
//! identifiers, text values and numeric ranges are enforced when fixtures are
//! loaded rather than trusted to the authoring of the JSON files.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;
use validator::ValidateUrl;

/// Errors produced when attempting to construct constrained domain types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// A numeric value required to be non-negative was negative.
    #[error("{0} must be zero or greater")]
    NegativeNumber(&'static str),
    /// A string was empty or whitespace-only after trimming.
    #[error("{0} cannot be empty")]
    EmptyString(&'static str),
    /// URL validation failed.
    #[error("{0} must be a valid URL")]
    InvalidUrl(&'static str),
    /// Average score must be in [0.0, 5.0].
    #[error("average score must be between 0 and 5")]
    InvalidScore,
    /// Review rating must be in 1..=5.
    #[error("rating must be between 1 and 5")]
    InvalidRating,
    /// Catch-all for custom validation failures.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

fn trim_and_require_non_empty<S: Into<String>>(
    value: S,
    field: &'static str,
) -> Result<String, TypeConstraintError> {
    let trimmed = value.into().trim().to_string();
    if trimmed.is_empty() {
        Err(TypeConstraintError::EmptyString(field))
    } else {
        Ok(trimmed)
    }
}

/// Wrapper for non-empty, trimmed strings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Trims whitespace and rejects empty inputs.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        Self::new_for_field(value, "value")
    }

    /// Same as [`Self::new`] but with field-specific error context.
    pub fn new_for_field<S: Into<String>>(
        value: S,
        field: &'static str,
    ) -> Result<Self, TypeConstraintError> {
        trim_and_require_non_empty(value, field).map(Self)
    }

    /// Borrow the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper returning the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for NonEmptyString {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

macro_rules! string_newtype_impls {
    ($name:ident) => {
        impl $name {
            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::ops::Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                self.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.as_str() == *other
            }
        }

        impl PartialEq<$name> for &str {
            fn eq(&self, other: &$name) -> bool {
                *self == other.as_str()
            }
        }
    };
}

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let inner = NonEmptyString::new_for_field(value, $field)?;
                Ok(Self(inner.into_inner()))
            }
        }

        string_newtype_impls!($name);
    };
}

macro_rules! url_string_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed URL and validates its format.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let trimmed = trim_and_require_non_empty(value, $field)?;
                if !trimmed.as_str().validate_url() {
                    return Err(TypeConstraintError::InvalidUrl($field));
                }
                Ok(Self(trimmed))
            }
        }

        string_newtype_impls!($name);
    };
}

macro_rules! non_negative_u32_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(
            Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
        )]
        #[serde(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Constructs a count from a signed fixture value, rejecting negatives.
            pub fn new(value: i64) -> Result<Self, TypeConstraintError> {
                u32::try_from(value)
                    .map(Self)
                    .map_err(|_| TypeConstraintError::NegativeNumber($field))
            }

            /// Returns the raw count.
            pub const fn get(self) -> u32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$name> for u32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<u32> for $name {
            fn eq(&self, other: &u32) -> bool {
                self.0 == *other
            }
        }
    };
}

non_empty_string_newtype!(CompanyId, "Slug identifying a company.", "company id");
non_empty_string_newtype!(ReviewId, "Identifier of a review.", "review id");
non_empty_string_newtype!(
    CompanyName,
    "Company display name enforcing non-empty values.",
    "company name"
);
non_empty_string_newtype!(
    ReviewerName,
    "Reviewer display name enforcing non-empty values.",
    "reviewer name"
);
non_empty_string_newtype!(
    ReviewerInitials,
    "Initials rendered in the reviewer avatar.",
    "reviewer initials"
);
non_empty_string_newtype!(ReviewTitle, "Headline of a review.", "review title");

url_string_newtype!(WebsiteUrl, "Company website URL.", "website");

non_negative_u32_newtype!(
    ReviewCount,
    "Number of reviews a company has received.",
    "review count"
);
non_negative_u32_newtype!(
    HelpfulCount,
    "Number of readers that marked a review as helpful.",
    "helpful count"
);

/// Logo location: either an absolute URL or a site-relative path.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct LogoUrl(String);

impl LogoUrl {
    /// Accepts `https://...` URLs and paths starting with `/`.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = trim_and_require_non_empty(value, "logo")?;
        if trimmed.starts_with('/') || trimmed.as_str().validate_url() {
            Ok(Self(trimmed))
        } else {
            Err(TypeConstraintError::InvalidUrl("logo"))
        }
    }
}

string_newtype_impls!(LogoUrl);

/// Average review score in the inclusive range [0.0, 5.0].
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, PartialOrd)]
#[serde(transparent)]
pub struct AverageScore(f64);

impl AverageScore {
    /// Constructs a validated score.
    pub fn new(value: f64) -> Result<Self, TypeConstraintError> {
        if value.is_finite() && (0.0..=5.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::InvalidScore)
        }
    }

    /// Returns the raw `f64` value.
    pub const fn get(self) -> f64 {
        self.0
    }
}

impl Display for AverageScore {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

impl From<AverageScore> for f64 {
    fn from(value: AverageScore) -> Self {
        value.0
    }
}

impl PartialEq<f64> for AverageScore {
    fn eq(&self, other: &f64) -> bool {
        self.0 == *other
    }
}

/// Star rating attached to a single review, 1 to 5.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Rating(u8);

impl Rating {
    pub fn new(value: i64) -> Result<Self, TypeConstraintError> {
        match u8::try_from(value) {
            Ok(v) if (1..=5).contains(&v) => Ok(Self(v)),
            _ => Err(TypeConstraintError::InvalidRating),
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }
}

impl Display for Rating {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl PartialEq<u8> for Rating {
    fn eq(&self, other: &u8) -> bool {
        self.0 == *other
    }
}

/// Kind of financial company listed in the directory.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Fintech,
    Broker,
    Payment,
    Bank,
}

impl Category {
    /// Every category in display order.
    pub const ALL: [Category; 4] = [
        Category::Fintech,
        Category::Broker,
        Category::Payment,
        Category::Bank,
    ];

    /// Label as stored in the fixtures.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fintech => "Fintech",
            Self::Broker => "Broker",
            Self::Payment => "Payment",
            Self::Bank => "Bank",
        }
    }

    /// Lower-case form used in URLs and query strings.
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Fintech => "fintech",
            Self::Broker => "broker",
            Self::Payment => "payment",
            Self::Bank => "bank",
        }
    }

    /// Case-insensitive lookup used for route segments and query parameters.
    pub fn from_slug(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.slug().eq_ignore_ascii_case(value))
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for Category {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::from_slug(value)
            .ok_or_else(|| TypeConstraintError::InvalidValue(format!("category: {value}")))
    }
}

impl TryFrom<String> for Category {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

/// UI language selected by the leading path segment.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Th,
    En,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::Th, Locale::En];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Th => "th",
            Self::En => "en",
        }
    }

    /// Open Graph locale tag.
    pub const fn og_tag(self) -> &'static str {
        match self {
            Self::Th => "th_TH",
            Self::En => "en_US",
        }
    }

    /// The other supported locale, used by the language switcher.
    pub const fn other(self) -> Self {
        match self {
            Self::Th => Self::En,
            Self::En => Self::Th,
        }
    }

    /// Exact match on a supported locale code; `EN` or ` en` are rejected.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|locale| locale.as_str() == value)
    }
}

impl Display for Locale {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for Locale {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value).ok_or_else(|| TypeConstraintError::InvalidValue(format!("locale: {value}")))
    }
}

/// Text authored in both supported languages.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocalizedText {
    pub en: String,
    pub th: String,
}

impl LocalizedText {
    pub fn new(en: impl Into<String>, th: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            th: th.into(),
        }
    }

    /// Text for the requested locale.
    pub fn get(&self, locale: Locale) -> &str {
        match locale {
            Locale::En => &self.en,
            Locale::Th => &self.th,
        }
    }

    /// Case-insensitive substring match against either language.
    pub fn contains_lowercase(&self, needle_lower: &str) -> bool {
        self.en.to_lowercase().contains(needle_lower)
            || self.th.to_lowercase().contains(needle_lower)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_non_empty_strings() {
        let value = NonEmptyString::new("  kasikorn  ").unwrap();
        assert_eq!(value.as_str(), "kasikorn");
    }

    #[test]
    fn rejects_blank_company_names() {
        let err = CompanyName::new("   ").unwrap_err();
        assert_eq!(err, TypeConstraintError::EmptyString("company name"));
    }

    #[test]
    fn validates_urls() {
        assert!(WebsiteUrl::new("https://example.com").is_ok());
        let err = WebsiteUrl::new("not-a-url").unwrap_err();
        assert_eq!(err, TypeConstraintError::InvalidUrl("website"));
    }

    #[test]
    fn logo_accepts_site_relative_paths() {
        assert!(LogoUrl::new("/logos/scb.svg").is_ok());
        assert!(LogoUrl::new("https://cdn.example.com/logo.png").is_ok());
        assert!(LogoUrl::new("logo.png").is_err());
    }

    #[test]
    fn validates_score_range() {
        assert!(AverageScore::new(0.0).is_ok());
        assert!(AverageScore::new(5.0).is_ok());
        assert_eq!(
            AverageScore::new(5.1).unwrap_err(),
            TypeConstraintError::InvalidScore
        );
        assert!(AverageScore::new(f64::NAN).is_err());
    }

    #[test]
    fn validates_rating_range() {
        assert_eq!(Rating::new(5).unwrap(), 5);
        assert_eq!(Rating::new(0).unwrap_err(), TypeConstraintError::InvalidRating);
        assert_eq!(Rating::new(6).unwrap_err(), TypeConstraintError::InvalidRating);
    }

    #[test]
    fn review_count_rejects_negative_numbers() {
        assert_eq!(
            ReviewCount::new(-1).unwrap_err(),
            TypeConstraintError::NegativeNumber("review count")
        );
        assert_eq!(ReviewCount::new(0).unwrap(), 0);
    }

    #[test]
    fn category_slug_lookup_is_case_insensitive() {
        assert_eq!(Category::from_slug("BROKER"), Some(Category::Broker));
        assert_eq!(Category::from_slug(" bank "), Some(Category::Bank));
        assert_eq!(Category::from_slug("insurance"), None);
    }

    #[test]
    fn category_serializes_with_fixture_labels() {
        let json = serde_json::to_string(&Category::Payment).unwrap();
        assert_eq!(json, "\"Payment\"");
    }

    #[test]
    fn localized_text_picks_language() {
        let text = LocalizedText::new("Bank", "ธนาคาร");
        assert_eq!(text.get(Locale::En), "Bank");
        assert_eq!(text.get(Locale::Th), "ธนาคาร");
        assert!(text.contains_lowercase("bank"));
    }
}
