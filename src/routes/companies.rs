use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use tera::Tera;

use crate::domain::review::ReviewSort;
use crate::domain::types::Locale;
use crate::forms::listing::{ListingParams, ListingQueryForm};
use crate::forms::reviews::{ReviewParams, ReviewQueryForm};
use crate::i18n::{Dictionaries, interpolate};
use crate::listing::SortOption;
use crate::models::config::ServerConfig;
use crate::preferences::{CookieStore, HelpfulVotes, load_recent_searches};
use crate::routes::{
    CatalogState, PanelResponse, base_context, catalog_or_panel, localized_path, redirect,
    redirect_with, render_template, today,
};
use crate::seo::{PageMeta, company_list_schema, script_json};
use crate::services::ServiceError;
use crate::services::catalog::ready_catalog;
use crate::services::companies::{
    show_companies as show_companies_service, show_company as show_company_service,
};
use crate::services::reviews::mark_helpful as mark_helpful_service;
use crate::states::StatePanel;

#[get("/{lang:(th|en)}/companies")]
pub async fn show_companies(
    lang: web::Path<Locale>,
    params: web::Query<Vec<(String, String)>>,
    req: HttpRequest,
    catalog: web::Data<CatalogState>,
    dictionaries: web::Data<Dictionaries>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let locale = lang.into_inner();
    let t = dictionaries.get(locale);
    let params = match ListingQueryForm::from_pairs(params.into_inner())
        .and_then(ListingParams::try_from)
    {
        Ok(params) => params,
        Err(err) => {
            log::warn!("Rejected directory query: {err}");
            return HttpResponse::BadRequest().finish();
        }
    };

    let store = CookieStore::from_request(&req);
    let meta = PageMeta::new(
        server_config.base_url(),
        locale,
        t,
        Some(t.companies.title.as_str()),
        Some(t.companies.subtitle.as_str()),
        localized_path(&req),
    );
    let mut context = base_context(
        locale,
        t,
        "companies",
        &meta,
        &req,
        &load_recent_searches(&store),
    );
    context.insert("query", &params.query);
    context.insert(
        "selected_categories",
        &params.categories.iter().map(|c| c.slug()).collect::<Vec<_>>(),
    );
    context.insert("selected_sort", params.sort.as_str());
    context.insert("sort_options", &SortOption::ALL.map(SortOption::as_str));
    context.insert("filter_query", &params.query_string());

    let snapshot = catalog.snapshot(params.retry).await;
    let repo = match catalog_or_panel(&snapshot, locale, t, &req) {
        Ok(repo) => repo,
        Err(panel) => return panel.render(&tera, "companies/index.html", context),
    };

    match show_companies_service(&params, server_config.items_per_page, repo) {
        Ok(page) => {
            let shown: Vec<_> = page.companies.items.iter().collect();
            context.insert(
                "json_ld",
                &[script_json(&company_list_schema(locale, t, &shown))],
            );
            context.insert(
                "showing_text",
                &interpolate(
                    &t.companies.showing_results,
                    &[
                        ("count", &shown.len().to_string()),
                        ("total", &page.filtered_count.to_string()),
                    ],
                ),
            );
            if page.is_empty() {
                let panel = StatePanel::empty(
                    t,
                    Some(t.companies.no_companies_found.as_str()),
                    Some(t.states.empty.try_adjusting.as_str()),
                )
                .with_action(
                    &t.states.empty.clear_filters,
                    &format!("/{}/companies", locale.as_str()),
                );
                context.insert("panel", &panel);
            }
            context.insert("page", &page);
            render_template(&tera, "companies/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to render company directory: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/{lang:(th|en)}/companies/{company_id}")]
pub async fn show_company(
    path: web::Path<(Locale, String)>,
    params: web::Query<ReviewQueryForm>,
    req: HttpRequest,
    catalog: web::Data<CatalogState>,
    dictionaries: web::Data<Dictionaries>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let (locale, company_id) = path.into_inner();
    let t = dictionaries.get(locale);
    let params = match ReviewParams::try_from(params.into_inner()) {
        Ok(params) => params,
        Err(err) => {
            log::warn!("Rejected review query: {err}");
            return HttpResponse::BadRequest().finish();
        }
    };

    let store = CookieStore::from_request(&req);
    let site_url = server_config.base_url();
    let mut context = base_context(
        locale,
        t,
        "companies",
        &PageMeta::new(site_url, locale, t, None, None, localized_path(&req)),
        &req,
        &load_recent_searches(&store),
    );
    context.insert("selected_sort", params.sort.as_str());
    context.insert("selected_rating", &params.rating.map(|rating| rating.get()));
    context.insert("sort_options", &ReviewSort::ALL.map(ReviewSort::as_str));
    context.insert("review_query", &params.query_string());

    let snapshot = catalog.snapshot(params.retry).await;
    let repo = match catalog_or_panel(&snapshot, locale, t, &req) {
        Ok(repo) => repo,
        Err(panel) => return panel.render(&tera, "companies/show.html", context),
    };

    let votes = HelpfulVotes::load(&store);
    match show_company_service(
        &company_id,
        &params,
        &votes,
        locale,
        today(),
        &t.reviews,
        repo,
    ) {
        Ok(detail) => {
            let meta = PageMeta::new(
                site_url,
                locale,
                t,
                Some(detail.company.name.as_str()),
                Some(detail.company.description.get(locale)),
                localized_path(&req),
            )
            .article();
            context.insert("meta", &meta);
            context.insert(
                "json_ld",
                &[script_json(&company_list_schema(locale, t, &[&detail.company]))],
            );
            context.insert(
                "based_on",
                &interpolate(
                    &t.reviews.based_on,
                    &[("count", &detail.company.review_count.get().to_string())],
                ),
            );
            context.insert("detail", &detail);
            render_template(&tera, "companies/show.html", &context)
        }
        Err(ServiceError::NotFound) => {
            let panel = StatePanel::empty(
                t,
                Some(t.states.empty.company_not_found.as_str()),
                Some(t.states.empty.company_not_found_message.as_str()),
            )
            .with_action(
                &t.not_found.browse_companies,
                &format!("/{}/companies", locale.as_str()),
            );
            PanelResponse::new(StatusCode::NOT_FOUND, panel).render(
                &tera,
                "companies/show.html",
                context,
            )
        }
        Err(err) => {
            log::error!("Failed to render company page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/{lang:(th|en)}/companies/{company_id}/reviews/{review_id}/helpful")]
pub async fn mark_helpful(
    path: web::Path<(Locale, String, String)>,
    req: HttpRequest,
    catalog: web::Data<CatalogState>,
) -> impl Responder {
    let (locale, company_id, review_id) = path.into_inner();
    let company_url = format!("/{}/companies/{}", locale.as_str(), company_id);

    let snapshot = catalog.snapshot(false).await;
    let repo = match ready_catalog(&snapshot) {
        Ok(repo) => repo,
        Err(err) => {
            log::warn!("Helpful vote before the catalog was ready: {err}");
            return redirect(&company_url);
        }
    };

    let mut store = CookieStore::from_request(&req);
    match mark_helpful_service(&company_id, &review_id, &mut store, repo.as_ref()) {
        Ok(counted) => {
            if !counted {
                log::debug!("Visitor already found review {review_id} helpful");
            }
            redirect_with(&format!("{company_url}#review-{review_id}"), &store)
        }
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to record helpful vote: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
