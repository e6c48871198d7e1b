pub mod api;
pub mod catalog;
pub mod categories;
pub mod companies;
pub mod errors;
pub mod main;
pub mod reviews;
pub mod search;
pub mod sitemap;

pub use errors::{ServiceError, ServiceResult};
