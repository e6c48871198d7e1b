pub mod listing;
pub mod reviews;
pub mod search;
