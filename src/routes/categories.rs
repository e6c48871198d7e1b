use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Responder, get, web};
use tera::Tera;

use crate::domain::types::{Category, Locale};
use crate::forms::listing::{ListingParams, ListingQueryForm};
use crate::i18n::{Dictionaries, interpolate};
use crate::listing::SortOption;
use crate::models::config::ServerConfig;
use crate::preferences::{CookieStore, load_recent_searches};
use crate::routes::{
    CatalogState, PanelResponse, RESULTS_PER_PAGE, base_context, catalog_or_panel,
    localized_path, render_template,
};
use crate::seo::{PageMeta, company_list_schema, script_json};
use crate::services::ServiceError;
use crate::services::categories::show_category as show_category_service;
use crate::states::StatePanel;

#[get("/{lang:(th|en)}/category/{category}")]
pub async fn show_category(
    path: web::Path<(Locale, String)>,
    params: web::Query<Vec<(String, String)>>,
    req: HttpRequest,
    catalog: web::Data<CatalogState>,
    dictionaries: web::Data<Dictionaries>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let (locale, slug) = path.into_inner();
    let t = dictionaries.get(locale);
    let params = match ListingQueryForm::from_pairs(params.into_inner())
        .and_then(ListingParams::try_from)
    {
        Ok(params) => params,
        Err(err) => {
            log::warn!("Rejected category query: {err}");
            return HttpResponse::BadRequest().finish();
        }
    };

    let store = CookieStore::from_request(&req);
    let label = Category::from_slug(&slug).map(|category| t.category_label(category));
    let title = label.map(|label| interpolate(&t.category.top_rated, &[("category", label)]));
    let description =
        label.map(|label| interpolate(&t.category.explore_text, &[("category", label)]));
    let meta = PageMeta::new(
        server_config.base_url(),
        locale,
        t,
        title.as_deref(),
        description.as_deref(),
        localized_path(&req),
    );
    let mut context = base_context(
        locale,
        t,
        "category",
        &meta,
        &req,
        &load_recent_searches(&store),
    );
    context.insert("heading", &title);
    context.insert("explore_text", &description);
    context.insert("query", &params.query);
    context.insert("selected_sort", params.sort.as_str());
    context.insert("sort_options", &SortOption::ALL.map(SortOption::as_str));

    let snapshot = catalog.snapshot(params.retry).await;
    let repo = match catalog_or_panel(&snapshot, locale, t, &req) {
        Ok(repo) => repo,
        Err(panel) => return panel.render(&tera, "categories/show.html", context),
    };

    match show_category_service(&slug, &params, RESULTS_PER_PAGE, repo) {
        Ok(page) => {
            // The category comes from the path, only search and sort travel
            // in pagination links.
            let filter_query = ListingParams {
                categories: Vec::new(),
                ..params.clone()
            }
            .query_string();
            context.insert("filter_query", &filter_query);

            let shown: Vec<_> = page.listing.companies.items.iter().collect();
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
                        ("total", &page.listing.filtered_count.to_string()),
                    ],
                ),
            );
            if page.listing.is_empty() {
                let panel = StatePanel::empty(
                    t,
                    Some(t.category.no_categories_found.as_str()),
                    Some(t.states.empty.try_adjusting.as_str()),
                )
                .with_action(
                    &t.not_found.browse_companies,
                    &format!("/{}/companies", locale.as_str()),
                );
                context.insert("panel", &panel);
            }
            context.insert("category_slug", page.category.slug());
            context.insert("page", &page.listing);
            render_template(&tera, "categories/show.html", &context)
        }
        Err(ServiceError::NotFound) => {
            let panel = StatePanel::empty(
                t,
                Some(t.category.no_categories_found.as_str()),
                None,
            )
            .with_action(
                &t.not_found.browse_companies,
                &format!("/{}/companies", locale.as_str()),
            );
            PanelResponse::new(StatusCode::NOT_FOUND, panel).render(
                &tera,
                "categories/show.html",
                context,
            )
        }
        Err(err) => {
            log::error!("Failed to render category page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
