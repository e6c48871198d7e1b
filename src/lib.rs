//! Core library exports for the FinScope review directory.
//!
//! With only the `data` feature the crate exposes the catalog layer: domain
//! types, fixture repository, listing pipeline, search, translations and SEO
//! helpers. The `server` feature adds the Actix-web routes.

pub mod domain;
pub mod dto;
pub mod error_conversions;
pub mod fetch;
pub mod forms;
pub mod i18n;
pub mod listing;
pub mod models;
pub mod negotiation;
pub mod pagination;
pub mod preferences;
pub mod repository;
pub mod search;
pub mod seo;
pub mod services;
pub mod states;

#[cfg(feature = "server")]
pub mod routes;
