use actix_web::http::{Method, header};
use actix_web::{HttpRequest, HttpResponse, Responder, get, web};
use serde::Deserialize;
use tera::Tera;

use crate::domain::types::Locale;
use crate::i18n::Dictionaries;
use crate::models::config::ServerConfig;
use crate::negotiation::{negotiate_locale, needs_locale_redirect, path_locale, redirect_target};
use crate::preferences::{CookieStore, load_recent_searches, stored_locale};
use crate::routes::{
    CatalogState, base_context, catalog_or_panel, localized_path, render_page, render_template,
    today,
};
use crate::seo::{PageMeta, company_list_schema, script_json, website_schema};
use crate::services::main::show_home as show_home_service;

#[derive(Deserialize)]
struct HomeQueryParams {
    retry: Option<u8>,
}

#[get("/{lang:(th|en)}")]
pub async fn index(
    lang: web::Path<Locale>,
    params: web::Query<HomeQueryParams>,
    req: HttpRequest,
    catalog: web::Data<CatalogState>,
    dictionaries: web::Data<Dictionaries>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let locale = lang.into_inner();
    let t = dictionaries.get(locale);
    let store = CookieStore::from_request(&req);
    let site_url = server_config.base_url();

    let meta = PageMeta::new(site_url, locale, t, None, None, "");
    let mut context = base_context(
        locale,
        t,
        "index",
        &meta,
        &req,
        &load_recent_searches(&store),
    );
    context.insert("json_ld", &[script_json(&website_schema(site_url, locale, t))]);

    let snapshot = catalog.snapshot(params.retry.is_some_and(|retry| retry > 0)).await;
    let repo = match catalog_or_panel(&snapshot, locale, t, &req) {
        Ok(repo) => repo,
        Err(panel) => return panel.render(&tera, "main/index.html", context),
    };

    match show_home_service(locale, today(), &t.reviews, repo) {
        Ok(home) => {
            let featured: Vec<_> = home
                .sections
                .iter()
                .flat_map(|section| section.companies.iter())
                .collect();
            context.insert(
                "json_ld",
                &[
                    script_json(&website_schema(site_url, locale, t)),
                    script_json(&company_list_schema(locale, t, &featured)),
                ],
            );
            context.insert("home", &home);
            render_template(&tera, "main/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to render home page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[derive(Deserialize)]
struct LangQueryParams {
    lang: Option<String>,
}

/// Fallback for every unmatched request.
///
/// Unprefixed page paths are redirected to the negotiated locale; anything
/// else renders the not-found page.
pub async fn not_found(
    req: HttpRequest,
    dictionaries: web::Data<Dictionaries>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> HttpResponse {
    let store = CookieStore::from_request(&req);
    let path = req.path();

    if matches!(*req.method(), Method::GET | Method::HEAD) && needs_locale_redirect(path) {
        let query_lang = web::Query::<LangQueryParams>::from_query(req.query_string())
            .ok()
            .and_then(|query| query.into_inner().lang);
        let accept_language = req
            .headers()
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok());
        let locale = negotiate_locale(
            query_lang.as_deref(),
            stored_locale(&store).map(Locale::as_str),
            accept_language,
            server_config.default_locale,
        );
        let target = redirect_target(locale, path, req.query_string());
        log::debug!("Redirecting {path} to {target}");
        return HttpResponse::TemporaryRedirect()
            .insert_header((header::LOCATION, target))
            .finish();
    }

    let locale = path_locale(path).unwrap_or(server_config.default_locale);
    let t = dictionaries.get(locale);
    let meta = PageMeta::new(
        server_config.base_url(),
        locale,
        t,
        Some(t.not_found.title.as_str()),
        Some(t.not_found.message.as_str()),
        localized_path(&req),
    );
    let context = base_context(
        locale,
        t,
        "not_found",
        &meta,
        &req,
        &load_recent_searches(&store),
    );
    render_page(
        HttpResponse::NotFound(),
        &tera,
        "main/not_found.html",
        &context,
    )
}
