use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use tera::Tera;

use crate::domain::types::Locale;
use crate::forms::listing::{ListingParams, ListingQueryForm};
use crate::forms::search::{RecentSearchForm, SuggestQueryForm};
use crate::i18n::{Dictionaries, interpolate};
use crate::listing::SortOption;
use crate::models::config::ServerConfig;
use crate::preferences::{CookieStore, load_recent_searches};
use crate::routes::{
    CatalogState, RESULTS_PER_PAGE, base_context, catalog_or_panel, localized_path, render_page,
    redirect_with,
};
use crate::search::SearchContext;
use crate::seo::PageMeta;
use crate::services::ServiceError;
use crate::services::catalog::ready_catalog;
use crate::services::search::{
    clear_searches as clear_searches_service, forget_search as forget_search_service,
    remember_search as remember_search_service, show_search as show_search_service,
    suggest_companies as suggest_companies_service,
};
use crate::states::StatePanel;

#[get("/{lang:(th|en)}/search")]
pub async fn show_search(
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
            log::warn!("Rejected search query: {err}");
            return HttpResponse::BadRequest().finish();
        }
    };

    let mut store = CookieStore::from_request(&req);
    let recent = if params.query.is_empty() {
        load_recent_searches(&store)
    } else {
        remember_search_service(&mut store, &params.query)
    };

    let meta = PageMeta::new(
        server_config.base_url(),
        locale,
        t,
        Some(t.navbar.search.as_str()),
        None,
        localized_path(&req),
    );
    let mut context = base_context(locale, t, "search", &meta, &req, &recent);
    context.insert("query", &params.query);
    context.insert(
        "selected_categories",
        &params.categories.iter().map(|c| c.slug()).collect::<Vec<_>>(),
    );
    context.insert("selected_sort", params.sort.as_str());
    context.insert("sort_options", &SortOption::ALL.map(SortOption::as_str));
    context.insert("filter_query", &params.query_string());

    let mut builder = HttpResponse::Ok();
    store.apply(&mut builder);

    let snapshot = catalog.snapshot(params.retry).await;
    let repo = match catalog_or_panel(&snapshot, locale, t, &req) {
        Ok(repo) => repo,
        Err(panel) => {
            builder.status(panel.status);
            context.insert("panel", &panel.panel);
            return render_page(builder, &tera, "search/index.html", &context);
        }
    };

    match show_search_service(&params, RESULTS_PER_PAGE, repo) {
        Ok(page) => {
            let heading = match &page.context {
                Some(SearchContext::Category(category)) => interpolate(
                    &t.search.companies_in_category,
                    &[("category", t.category_label(*category))],
                ),
                Some(SearchContext::Company(_) | SearchContext::General(_)) => {
                    interpolate(&t.search.results_for, &[("query", &page.query)])
                }
                None => t.companies.title.clone(),
            };
            context.insert("heading", &heading);
            context.insert(
                "showing_text",
                &interpolate(
                    &t.companies.showing_results,
                    &[
                        ("count", &page.listing.companies.items.len().to_string()),
                        ("total", &page.listing.filtered_count.to_string()),
                    ],
                ),
            );
            if page.listing.is_empty() {
                let panel = StatePanel::empty(
                    t,
                    Some(t.companies.no_companies_found.as_str()),
                    Some(t.states.empty.try_adjusting.as_str()),
                )
                .with_action(
                    &t.states.empty.clear_filters,
                    &format!("/{}/search", locale.as_str()),
                );
                context.insert("panel", &panel);
            }
            context.insert("page", &page.listing);
            render_page(builder, &tera, "search/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to render search page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// JSON suggestions for the quick-search box.
#[get("/{lang:(th|en)}/search/suggest")]
pub async fn suggest(
    lang: web::Path<Locale>,
    params: web::Query<SuggestQueryForm>,
    catalog: web::Data<CatalogState>,
) -> impl Responder {
    let locale = lang.into_inner();
    let query = match params.into_inner().into_query() {
        Ok(query) => query,
        Err(err) => {
            log::warn!("Rejected suggestion query: {err}");
            return HttpResponse::BadRequest().finish();
        }
    };

    let snapshot = catalog.snapshot(false).await;
    let repo = match ready_catalog(&snapshot) {
        Ok(repo) => repo,
        Err(err) => {
            log::warn!("Suggestions requested while {err}");
            return HttpResponse::ServiceUnavailable().finish();
        }
    };

    match suggest_companies_service(&query, locale, repo.as_ref()) {
        Ok(suggestions) => HttpResponse::Ok().json(suggestions),
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to suggest companies: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/{lang:(th|en)}/search/recent/clear")]
pub async fn clear_recent(lang: web::Path<Locale>, req: HttpRequest) -> impl Responder {
    let mut store = CookieStore::from_request(&req);
    clear_searches_service(&mut store);
    redirect_with(&format!("/{}/search", lang.as_str()), &store)
}

#[post("/{lang:(th|en)}/search/recent/remove")]
pub async fn remove_recent(
    lang: web::Path<Locale>,
    form: web::Form<RecentSearchForm>,
    req: HttpRequest,
) -> impl Responder {
    let search = match form.into_inner().into_search() {
        Ok(search) => search,
        Err(err) => {
            log::warn!("Rejected recent search removal: {err}");
            return HttpResponse::BadRequest().finish();
        }
    };

    let mut store = CookieStore::from_request(&req);
    forget_search_service(&mut store, &search);
    redirect_with(&format!("/{}/search", lang.as_str()), &store)
}
