use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, Responder, get, web};
use tera::{Context, Tera};

use crate::models::config::ServerConfig;
use crate::routes::{CatalogState, today};
use crate::services::catalog::ready_catalog;
use crate::services::sitemap::show_sitemap as show_sitemap_service;

#[get("/sitemap.xml")]
pub async fn sitemap(
    catalog: web::Data<CatalogState>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let snapshot = catalog.snapshot(false).await;
    let repo = match ready_catalog(&snapshot) {
        Ok(repo) => repo,
        Err(err) => {
            log::warn!("Sitemap requested while {err}");
            return HttpResponse::ServiceUnavailable().finish();
        }
    };

    let entries = match show_sitemap_service(server_config.base_url(), today(), repo.as_ref()) {
        Ok(entries) => entries,
        Err(err) => {
            log::error!("Failed to build sitemap: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let mut context = Context::new();
    context.insert("entries", &entries);
    match tera.render("sitemap.xml", &context) {
        Ok(body) => HttpResponse::Ok().content_type(ContentType::xml()).body(body),
        Err(e) => {
            log::error!("Failed to render template 'sitemap.xml': {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
