//! Page metadata, structured data and sitemap entries.

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::company::Company;
use crate::domain::types::{Category, Locale};
use crate::i18n::Dictionary;

/// Site-relative path of the default Open Graph image.
pub const OG_IMAGE_PATH: &str = "/assets/og-image.jpg";

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AlternateLink {
    pub hreflang: &'static str,
    pub href: String,
}

/// Everything the `<head>` of a page needs.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub canonical: String,
    pub alternates: Vec<AlternateLink>,
    pub og_locale: &'static str,
    pub og_type: &'static str,
    pub og_image: String,
    pub site_name: String,
}

impl PageMeta {
    /// Build metadata for `path` (relative to the locale root, e.g. `/companies`).
    ///
    /// A page title is suffixed with the site name; without one the site name
    /// is the title. The description defaults to the home hero text.
    pub fn new(
        site_url: &str,
        locale: Locale,
        t: &Dictionary,
        title: Option<&str>,
        description: Option<&str>,
        path: &str,
    ) -> Self {
        let site_name = t.meta.site_name.clone();
        let title = match title {
            Some(title) => format!("{title} | {site_name}"),
            None => site_name.clone(),
        };
        let alternates = Locale::ALL
            .into_iter()
            .map(|alternate| AlternateLink {
                hreflang: alternate.as_str(),
                href: localized_url(site_url, alternate, path),
            })
            .collect();

        Self {
            title,
            description: description.unwrap_or(&t.home.hero_description).to_string(),
            canonical: localized_url(site_url, locale, path),
            alternates,
            og_locale: locale.og_tag(),
            og_type: "website",
            og_image: format!("{site_url}{OG_IMAGE_PATH}"),
            site_name,
        }
    }

    pub fn article(mut self) -> Self {
        self.og_type = "article";
        self
    }
}

pub fn localized_url(site_url: &str, locale: Locale, path: &str) -> String {
    format!("{site_url}/{}{path}", locale.as_str())
}

/// `WebSite` schema with a search action pointing at the directory.
pub fn website_schema(site_url: &str, locale: Locale, t: &Dictionary) -> Value {
    json!({
        "@context": "https://schema.org",
        "@type": "WebSite",
        "name": t.meta.site_name,
        "url": localized_url(site_url, locale, ""),
        "description": t.home.hero_description,
        "potentialAction": {
            "@type": "SearchAction",
            "target": {
                "@type": "EntryPoint",
                "urlTemplate": format!(
                    "{}?query={{search_term_string}}",
                    localized_url(site_url, locale, "/companies")
                ),
            },
            "query-input": "required name=search_term_string",
        },
    })
}

/// `ItemList` schema of organizations with their aggregate rating.
pub fn company_list_schema(locale: Locale, t: &Dictionary, companies: &[&Company]) -> Value {
    let items: Vec<Value> = companies
        .iter()
        .enumerate()
        .map(|(index, company)| {
            json!({
                "@type": "ListItem",
                "position": index + 1,
                "item": {
                    "@type": "Organization",
                    "name": company.name.as_str(),
                    "description": company.description.get(locale),
                    "url": company.website.as_str(),
                    "aggregateRating": {
                        "@type": "AggregateRating",
                        "ratingValue": company.average_score.get(),
                        "reviewCount": company.review_count.get(),
                        "bestRating": 5,
                        "worstRating": 1,
                    },
                },
            })
        })
        .collect();

    json!({
        "@context": "https://schema.org",
        "@type": "ItemList",
        "name": t.companies.title,
        "description": t.companies.subtitle,
        "numberOfItems": companies.len(),
        "itemListElement": items,
    })
}

/// Serialize JSON-LD for embedding in a `<script>` element.
pub fn script_json(value: &Value) -> String {
    value.to_string().replace("</", "<\\/")
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SitemapEntry {
    pub loc: String,
    pub lastmod: NaiveDate,
    pub changefreq: &'static str,
    pub priority: &'static str,
}

/// Sitemap entries for every public page in both locales.
pub fn sitemap_entries(site_url: &str, companies: &[Company], today: NaiveDate) -> Vec<SitemapEntry> {
    let entry = |loc: String, changefreq, priority| SitemapEntry {
        loc,
        lastmod: today,
        changefreq,
        priority,
    };

    let mut entries = Vec::new();
    for locale in Locale::ALL {
        entries.push(entry(localized_url(site_url, locale, ""), "daily", "1.0"));
        entries.push(entry(
            localized_url(site_url, locale, "/companies"),
            "weekly",
            "0.9",
        ));
        for category in Category::ALL {
            entries.push(entry(
                localized_url(site_url, locale, &format!("/category/{}", category.slug())),
                "weekly",
                "0.7",
            ));
        }
        for company in companies {
            entries.push(entry(
                localized_url(site_url, locale, &format!("/companies/{}", company.id.as_str())),
                "weekly",
                "0.8",
            ));
        }
    }
    entries
}
