use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::de::DeserializeOwned;

use crate::domain::company::Company;
use crate::domain::review::Review;
use crate::models::company::CompanyRecord;
use crate::models::review::ReviewRecord;
use crate::repository::{Catalog, RepositoryError, RepositoryResult};

pub const COMPANIES_FILE: &str = "companies.json";
pub const REVIEWS_FILE: &str = "reviews.json";

/// Reads the bundled JSON fixtures from a data directory.
#[derive(Debug, Clone)]
pub struct FixtureSource {
    data_dir: PathBuf,
}

impl FixtureSource {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn read_records<T: DeserializeOwned>(&self, file: &str) -> RepositoryResult<Vec<T>> {
        let path = self.data_dir.join(file);
        let raw = fs::read_to_string(&path).map_err(|source| RepositoryError::Io {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| RepositoryError::Parse { path, source })
    }

    /// Load and validate `companies.json`.
    pub fn load_companies(&self) -> RepositoryResult<Vec<Company>> {
        self.read_records::<CompanyRecord>(COMPANIES_FILE)?
            .into_iter()
            .map(|record| Company::try_from(record).map_err(RepositoryError::from))
            .collect()
    }

    /// Load and validate `reviews.json`.
    pub fn load_reviews(&self) -> RepositoryResult<Vec<Review>> {
        self.read_records::<ReviewRecord>(REVIEWS_FILE)?
            .into_iter()
            .map(|record| Review::try_from(record).map_err(RepositoryError::from))
            .collect()
    }

    /// Load both fixtures into a fresh [`Catalog`].
    pub fn load_catalog(&self) -> RepositoryResult<Catalog> {
        let companies = self.load_companies()?;
        let reviews = self.load_reviews()?;
        log::info!(
            "Loaded {} companies and {} reviews from {}",
            companies.len(),
            reviews.len(),
            self.data_dir.display()
        );
        Ok(Catalog::new(companies, reviews))
    }

    /// Modification times of both fixture files; `None` for a missing file.
    ///
    /// Used as the dependency key that triggers a catalog reload.
    pub fn modified_times(&self) -> [Option<SystemTime>; 2] {
        [COMPANIES_FILE, REVIEWS_FILE].map(|file| {
            fs::metadata(self.data_dir.join(file))
                .and_then(|meta| meta.modified())
                .ok()
        })
    }
}
