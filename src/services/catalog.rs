use std::sync::Arc;

use crate::fetch::{FetchError, Snapshot};
use crate::repository::Catalog;

use super::{ServiceError, ServiceResult};

/// The loaded catalog, or `Unavailable` while loading or after a failed load.
///
/// Used by endpoints that cannot render a loading or error panel.
pub fn ready_catalog(snapshot: &Snapshot<Catalog>) -> ServiceResult<Arc<Catalog>> {
    if snapshot.is_loading {
        return Err(ServiceError::Unavailable(FetchError::new(
            "catalog is still loading",
        )));
    }
    if let Some(error) = &snapshot.error {
        return Err(ServiceError::Unavailable(error.clone()));
    }
    match &snapshot.data {
        Some(catalog) => Ok(Arc::clone(catalog)),
        None => Err(ServiceError::Unavailable(FetchError::new(
            "catalog has not been loaded",
        ))),
    }
}
