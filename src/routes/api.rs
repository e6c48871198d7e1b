use actix_web::{HttpResponse, Responder, get, web};
use serde_json::json;

use crate::routes::CatalogState;
use crate::services::ServiceError;
use crate::services::api::{
    ApiV1CompaniesQueryParams, ApiV1ReviewsQueryParams,
    api_v1_companies as api_v1_companies_service,
    api_v1_company_reviews as api_v1_company_reviews_service,
};
use crate::services::catalog::ready_catalog;

fn unavailable(err: &ServiceError) -> HttpResponse {
    log::warn!("API request while {err}");
    HttpResponse::ServiceUnavailable().json(json!({ "error": err.to_string() }))
}

#[get("/v1/companies")]
pub async fn api_v1_companies(
    params: web::Query<ApiV1CompaniesQueryParams>,
    catalog: web::Data<CatalogState>,
) -> impl Responder {
    let snapshot = catalog.snapshot(false).await;
    let repo = match ready_catalog(&snapshot) {
        Ok(repo) => repo,
        Err(err) => return unavailable(&err),
    };

    match api_v1_companies_service(params.into_inner(), repo.as_ref()) {
        Ok(companies) => HttpResponse::Ok().json(companies),
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to list companies: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/v1/companies/{company_id}/reviews")]
pub async fn api_v1_company_reviews(
    company_id: web::Path<String>,
    params: web::Query<ApiV1ReviewsQueryParams>,
    catalog: web::Data<CatalogState>,
) -> impl Responder {
    let snapshot = catalog.snapshot(false).await;
    let repo = match ready_catalog(&snapshot) {
        Ok(repo) => repo,
        Err(err) => return unavailable(&err),
    };

    match api_v1_company_reviews_service(&company_id, params.into_inner(), repo.as_ref()) {
        Ok(reviews) => HttpResponse::Ok().json(reviews),
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to list company reviews: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
