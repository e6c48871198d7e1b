use chrono::NaiveDate;

use crate::repository::CompanyReader;
use crate::seo::{SitemapEntry, sitemap_entries};

use super::{ServiceError, ServiceResult};

/// Core business logic for `/sitemap.xml`.
pub fn show_sitemap<R>(site_url: &str, today: NaiveDate, repo: &R) -> ServiceResult<Vec<SitemapEntry>>
where
    R: CompanyReader,
{
    match repo.list_companies() {
        Ok(companies) => Ok(sitemap_entries(site_url, &companies, today)),
        Err(e) => {
            log::error!("Failed to list companies for the sitemap: {e}");
            Err(ServiceError::Internal)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test::{TestRepository, four_companies};

    #[test]
    fn sitemap_covers_every_company() {
        let repo = TestRepository::new(four_companies(), vec![]);
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let entries = show_sitemap("https://finscope.example", today, &repo).unwrap();
        let company_pages = entries
            .iter()
            .filter(|entry| entry.loc.contains("/companies/"))
            .count();
        assert_eq!(company_pages, 8);
        assert!(entries.iter().all(|entry| entry.lastmod == today));
    }
}
