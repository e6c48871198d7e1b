pub mod company;
pub mod review;
pub mod types;
